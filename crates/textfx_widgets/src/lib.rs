//! TextFX Widgets
//!
//! Per-character text animation. A [`TextFx`] lays its text out as one leaf
//! per character and moves every leaf with a shared pose that oscillates
//! between two boundary poses, reversing each time a leg completes.
//!
//! # Features
//!
//! - **Four synchronized channels**: scale, rotate, translate and skew,
//!   started together with one curve and duration per leg
//! - **Named curves**: Penner easings, cubic-bezier and spring presets
//! - **Configurable completion**: gate legs on one channel or on all four
//! - **Text configuration**: options load from TOML or JSON as deep patches
//!   over the defaults
//!
//! # Example
//!
//! ```rust
//! use std::f32::consts::FRAC_PI_4;
//!
//! use textfx_core::Vec3;
//! use textfx_widgets::{TextFx, TextFxOptions};
//!
//! let options = TextFxOptions::new("Abnormal Activity")
//!     .with_rotate(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_4, 0.0))
//!     .with_skew(Vec3::ZERO, Vec3::new(FRAC_PI_4, 0.0, 0.0));
//!
//! let mut fx = TextFx::new(options);
//! for entry in fx.render() {
//!     let _ = (entry.transform, entry.target);
//! }
//! ```

pub mod error;
pub mod node;
pub mod options;
pub mod text_fx;

pub use error::{OptionsError, Result};
pub use node::{CharacterNode, RenderNode, Surface, SurfaceSpec};
pub use options::{
    AnimationBoundaries, Axis, AxisBoundary, AxisBoundaryPatch, BoundariesPatch, Direction,
    LegCompletion, TextFxOptions, TextFxOptionsPatch, TransitionPatch,
};
pub use text_fx::{ChannelValues, RenderEntry, TextFx};
