//! TextFX Animation Primitives
//!
//! Time-sampled interpolation for animated text.
//!
//! # Features
//!
//! - **Easing Curves**: Penner-style tweens (quad, cubic, quart, sine, expo,
//!   back, bounce) and CSS cubic-bezier timing, addressable by name
//! - **Spring Curves**: closed-form damped springs with stiffness, damping, mass
//! - **Clocks**: wall-clock and manually driven time sources
//! - **Transitionables**: multi-component values that move toward a target
//!   as a pure function of clock time, with no per-frame stepping

pub mod clock;
pub mod easing;
pub mod error;
pub mod spring;
pub mod transition;
pub mod transitionable;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::Easing;
pub use error::{CurveParseError, Result};
pub use spring::SpringConfig;
pub use transition::{Curve, TransitionSpec};
pub use transitionable::Transitionable;
