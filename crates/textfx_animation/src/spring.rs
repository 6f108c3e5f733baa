//! Spring curves
//!
//! Springs here are closed-form: the normalized step response of a damped
//! harmonic oscillator released from rest, evaluated directly at any elapsed
//! time. That keeps spring legs a pure function of clock time, the same as
//! tweened legs, with no per-frame integration state.
//!
//! With `x(t)` the remaining normalized displacement (1 at release):
//!
//! ```text
//! ω0 = sqrt(k / m)        ζ = c / (2·sqrt(k·m))
//! ζ < 1:  x = e^(-ζω0t) · (cos ωd·t + (ζω0/ωd)·sin ωd·t),   ωd = ω0·sqrt(1 - ζ²)
//! ζ = 1:  x = e^(-ω0t) · (1 + ω0t)
//! ζ > 1:  x = (r2·e^(r1·t) - r1·e^(r2·t)) / (r2 - r1),      r = -ω0(ζ ∓ sqrt(ζ² - 1))
//! ```
//!
//! and progress is `1 - x`.

use serde::{Deserialize, Serialize};

/// Normalized displacement below which a spring counts as settled
pub const REST_EPSILON: f64 = 1e-3;

/// Upper bound on how long any spring leg may run
pub const MAX_SETTLE_SECS: f64 = 10.0;

/// Spring configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            mass: 1.0,
        }
    }
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Slow, soft, no visible bounce
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Loose, several visible oscillations
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Fast with a small overshoot
    pub const fn stiff() -> Self {
        Self::new(210.0, 20.0, 1.0)
    }

    /// Very fast, barely overshoots
    pub const fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "gentle" => Some(Self::gentle()),
            "wobbly" => Some(Self::wobbly()),
            "stiff" => Some(Self::stiff()),
            "snappy" => Some(Self::snappy()),
            _ => None,
        }
    }

    /// Name of the preset this config equals, if any
    pub fn preset_name(&self) -> Option<&'static str> {
        ["default", "gentle", "wobbly", "stiff", "snappy"]
            .into_iter()
            .find(|name| Self::preset(name).as_ref() == Some(self))
    }

    /// Undamped angular frequency, `None` for degenerate configs
    fn omega0(&self) -> Option<f64> {
        let k = self.stiffness as f64;
        let m = self.mass as f64;
        let omega = (k / m).sqrt();
        (k > 0.0 && m > 0.0 && omega.is_finite()).then_some(omega)
    }

    /// Damping ratio ζ
    pub fn damping_ratio(&self) -> f32 {
        let k = self.stiffness as f64;
        let m = self.mass as f64;
        (self.damping as f64 / (2.0 * (k * m).sqrt())) as f32
    }

    /// Whether the response can pass the target before settling
    pub fn overshoots(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Remaining normalized displacement at `t` seconds after release
    fn displacement(&self, t: f64) -> f64 {
        let Some(w0) = self.omega0() else {
            return 0.0;
        };
        let zeta = self.damping_ratio() as f64;

        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * w0 * t).exp();
            decay * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else if (zeta - 1.0).abs() < 1e-6 {
            (-w0 * t).exp() * (1.0 + w0 * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Time until the spring is within [`REST_EPSILON`] of its target for good
    pub fn settle_secs(&self) -> f64 {
        let Some(w0) = self.omega0() else {
            return 0.0;
        };
        let zeta = self.damping_ratio() as f64;

        if zeta <= 0.0 {
            return MAX_SETTLE_SECS;
        }

        if zeta < 1.0 {
            // envelope of the oscillation: e^(-ζω0t) / sqrt(1 - ζ²)
            let secs = (1.0 / (REST_EPSILON * (1.0 - zeta * zeta).sqrt())).ln() / (zeta * w0);
            return secs.clamp(0.0, MAX_SETTLE_SECS);
        }

        // critically damped and overdamped responses decay monotonically
        const STEP: f64 = 0.001;
        let mut t = 0.0;
        while t < MAX_SETTLE_SECS {
            if self.displacement(t).abs() < REST_EPSILON {
                return t;
            }
            t += STEP;
        }
        MAX_SETTLE_SECS
    }

    /// Normalized progress `0.0..` at `t` seconds after release, given the
    /// leg's settle time from [`SpringConfig::settle_secs`].
    ///
    /// Reaches exactly 1.0 at `settle_secs`.
    pub fn progress(&self, t: f64, settle_secs: f64) -> f32 {
        if t >= settle_secs {
            return 1.0;
        }
        self.response(t)
    }

    /// Raw step response at `t` seconds, without snapping to the target
    pub fn response(&self, t: f64) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        (1.0 - self.displacement(t)) as f32
    }
}
