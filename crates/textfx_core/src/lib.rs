//! TextFX Core Types
//!
//! Foundational, stateless building blocks shared by the TextFX crates:
//!
//! - **Transform Algebra**: column-major [`Mat4`] with translate, scale,
//!   rotate and skew constructors and matrix multiplication
//! - **Geometry**: [`Vec3`] triples used as animation channel values and
//!   [`Size`] for leaf node dimensions
//! - **Identifiers**: [`NodeId`] handles emitted as render targets
//!
//! # Example
//!
//! ```rust
//! use textfx_core::{Mat4, Vec3};
//!
//! let base = Mat4::translation(15.0, 0.0, 0.0);
//! let pose = Mat4::scale(0.5, 0.5, 0.5).mul(&Mat4::rotation(0.0, 0.0, 0.0));
//! let p = base.mul(&pose).transform_point(Vec3::new(2.0, 0.0, 0.0));
//! assert_eq!(p, Vec3::new(16.0, 0.0, 0.0));
//! ```

pub mod geometry;
pub mod id;
pub mod transform;

pub use geometry::{Size, Vec3};
pub use id::{NodeId, NodeIdGenerator};
pub use transform::Mat4;
