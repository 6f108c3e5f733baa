//! Geometry types
//!
//! [`Vec3`] doubles as the value type of every animation channel: one
//! component per spatial axis, serialized as a plain `[x, y, z]` array.

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f32; 3]", into = "[f32; 3]")
)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Component-wise linear interpolation (`t = 0` yields `self`)
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Largest absolute component-wise difference
    pub fn max_abs_diff(self, other: Vec3) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }

    pub fn approx_eq(self, other: Vec3, epsilon: f32) -> bool {
        self.max_abs_diff(other) <= epsilon
    }

    /// Whether every component lies between the matching components of `a`
    /// and `b` (in either order), widened by `epsilon`.
    pub fn is_between(self, a: Vec3, b: Vec3, epsilon: f32) -> bool {
        fn within(v: f32, a: f32, b: f32, eps: f32) -> bool {
            v >= a.min(b) - eps && v <= a.max(b) + eps
        }
        within(self.x, a.x, b.x, epsilon)
            && within(self.y, a.y, b.y, epsilon)
            && within(self.z, a.z, b.z, epsilon)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f32; 2]", into = "[f32; 2]")
)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<[f32; 2]> for Size {
    fn from([width, height]: [f32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Size> for [f32; 2] {
    fn from(size: Size) -> Self {
        [size.width, size.height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(-10.0, 0.0, 1.0);
        let b = Vec3::new(10.0, 4.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(0.0, 2.0, 0.75));
    }

    #[test]
    fn test_is_between_accepts_either_order() {
        let v = Vec3::new(0.75, 0.75, 0.75);
        assert!(v.is_between(Vec3::ONE, Vec3::splat(0.5), 0.0));
        assert!(v.is_between(Vec3::splat(0.5), Vec3::ONE, 0.0));
        assert!(!Vec3::splat(1.2).is_between(Vec3::splat(0.5), Vec3::ONE, 0.01));
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.5, 0.0, 3.0);
        assert_eq!(a.max_abs_diff(b), 2.0);
        assert!(a.approx_eq(Vec3::new(1.0, 2.0, 3.0005), 0.001));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_plain_arrays() {
        let v: Vec3 = serde_json::from_str("[1.0, 0.5, -2.0]").unwrap();
        assert_eq!(v, Vec3::new(1.0, 0.5, -2.0));
        assert_eq!(serde_json::to_string(&Size::new(30.0, 30.0)).unwrap(), "[30.0,30.0]");
    }
}
