//! Abnormal Activity Demo
//!
//! Animates "Abnormal Activity" with a quarter-turn about Y and a skew about
//! X, printing each character's offset every few frames.
//!
//! Run with: cargo run -p textfx_widgets --example abnormal_activity
//!
//! Pass a TOML file to override the options:
//! `cargo run -p textfx_widgets --example abnormal_activity -- options.toml`
//!
//! Set `RUST_LOG=textfx_widgets=debug` to see legs start and reverse.

use std::f32::consts::FRAC_PI_4;

use anyhow::{Context, Result};
use textfx_animation::ManualClock;
use textfx_core::Vec3;
use textfx_widgets::{TextFx, TextFxOptions};
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;
const FRAMES: usize = 150;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("reading options from {path}"))?;
            TextFxOptions::from_toml_str(&source)
                .with_context(|| format!("parsing options in {path}"))?
        }
        None => TextFxOptions::new("Abnormal Activity")
            .with_rotate(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_4, 0.0))
            .with_skew(Vec3::ZERO, Vec3::new(FRAC_PI_4, 0.0, 0.0)),
    };

    tracing::info!(
        text = %options.text,
        curve = %options.transition.curve,
        duration_ms = options.transition.duration_ms,
        "starting"
    );

    // a fixed-step clock keeps the output reproducible
    let clock = ManualClock::new();
    let mut fx = TextFx::with_clock(options, clock.clone());

    for frame in 0..FRAMES {
        let entries = fx.render();
        if frame % 10 == 0 {
            let offsets: Vec<String> = entries
                .iter()
                .map(|entry| {
                    let p = entry.transform.translation_part();
                    format!("({:.1}, {:.1})", p.x, p.y)
                })
                .collect();
            tracing::info!(
                frame,
                direction = %fx.direction(),
                scale = fx.channel_values().scale.x,
                "{}",
                offsets.join(" ")
            );
        }
        clock.advance_ms(FRAME_MS);
    }

    tracing::info!(legs = fx.leg_count(), "done");
    Ok(())
}
