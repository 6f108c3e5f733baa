//! 4x4 transform algebra
//!
//! Matrices are column-major and act on column vectors, so `a.mul(&b)`
//! applies `b` first and `a` second.

use crate::geometry::Vec3;

/// 4x4 transformation matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Euler rotation in radians: `Rx · Ry · Rz`, so a point is turned
    /// about Z first, then Y, then X
    pub fn rotation(x: f32, y: f32, z: f32) -> Self {
        Self::rotation_x(x)
            .mul(&Self::rotation_y(y))
            .mul(&Self::rotation_z(z))
    }

    /// Shear by angles in radians.
    ///
    /// `z` shears x along y, `y` shears y along x, and `x` shears y along z:
    ///
    /// ```text
    /// x' = x + tan(z)·y
    /// y' = tan(y)·x + y + tan(x)·z
    /// z' = z
    /// ```
    pub fn skew(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, y.tan(), 0.0, 0.0],
                [z.tan(), 1.0, 0.0, 0.0],
                [0.0, x.tan(), 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn from_translation(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    pub fn from_scale(v: Vec3) -> Self {
        Self::scale(v.x, v.y, v.z)
    }

    pub fn from_rotation(v: Vec3) -> Self {
        Self::rotation(v.x, v.y, v.z)
    }

    pub fn from_skew(v: Vec3) -> Self {
        Self::skew(v.x, v.y, v.z)
    }

    /// Multiply two matrices
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Transform a point (w = 1)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// The translation column
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Largest absolute element-wise difference
    pub fn max_abs_diff(&self, other: &Mat4) -> f32 {
        let mut max = 0.0f32;
        for (a, b) in self.cols.iter().flatten().zip(other.cols.iter().flatten()) {
            max = max.max((a - b).abs());
        }
        max
    }

    pub fn approx_eq(&self, other: &Mat4, epsilon: f32) -> bool {
        self.max_abs_diff(other) <= epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_mat4_operations() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        let s = Mat4::scale(2.0, 2.0, 2.0);
        let result = t.mul(&s);

        // scale applies first, translation is untouched
        assert_eq!(result.translation_part(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            result.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(3.0, 4.0, 5.0)
        );

        // the other order scales the translation as well
        let flipped = s.mul(&t);
        assert_eq!(flipped.translation_part(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::rotation(0.3, -0.2, 1.1).mul(&Mat4::skew(0.1, 0.2, 0.3));
        assert_eq!(Mat4::IDENTITY.mul(&m), m);
        assert_eq!(m.mul(&Mat4::IDENTITY), m);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_axis_rotations() {
        let p = Mat4::rotation_z(FRAC_PI_2).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Vec3::new(0.0, 1.0, 0.0), EPS));

        let p = Mat4::rotation_x(FRAC_PI_2).transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.approx_eq(Vec3::new(0.0, 0.0, 1.0), EPS));

        let p = Mat4::rotation_y(FRAC_PI_2).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(p.approx_eq(Vec3::new(1.0, 0.0, 0.0), EPS));
    }

    /// Closed form of `Rx(phi) · Ry(theta) · Rz(psi)`, column-major
    fn euler_closed_form(phi: f32, theta: f32, psi: f32) -> Mat4 {
        let (sp, cp) = phi.sin_cos();
        let (st, ct) = theta.sin_cos();
        let (ss, cs) = psi.sin_cos();
        Mat4 {
            cols: [
                [ct * cs, cp * ss + sp * st * cs, sp * ss - cp * st * cs, 0.0],
                [-ct * ss, cp * cs - sp * st * ss, sp * cs + cp * st * ss, 0.0],
                [st, -sp * ct, cp * ct, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[test]
    fn test_euler_order_is_x_then_y_then_z() {
        let euler = Mat4::rotation(0.4, 0.5, 0.6);
        let manual = Mat4::rotation_x(0.4)
            .mul(&Mat4::rotation_y(0.5))
            .mul(&Mat4::rotation_z(0.6));
        assert!(euler.approx_eq(&manual, EPS));
        assert!(euler.approx_eq(&euler_closed_form(0.4, 0.5, 0.6), EPS));
        assert_eq!(Mat4::rotation(0.0, 0.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_quarter_turn_on_every_axis() {
        let m = Mat4::rotation(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
        let expected = [
            [0.0, 0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        for (col, expected_col) in m.cols.iter().zip(expected.iter()) {
            for (value, expected_value) in col.iter().zip(expected_col.iter()) {
                assert!((value - expected_value).abs() < EPS, "{:?}", m.cols);
            }
        }

        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Vec3::new(0.0, 0.0, 1.0), EPS));
        assert!(m.approx_eq(&euler_closed_form(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2), EPS));
    }

    #[test]
    fn test_skew() {
        let angle = std::f32::consts::FRAC_PI_4;

        let p = Mat4::skew(0.0, 0.0, angle).transform_point(Vec3::new(0.0, 2.0, 0.0));
        assert!(p.approx_eq(Vec3::new(2.0, 2.0, 0.0), EPS));

        let p = Mat4::skew(angle, 0.0, 0.0).transform_point(Vec3::new(0.0, 0.0, 3.0));
        assert!(p.approx_eq(Vec3::new(0.0, 3.0, 3.0), EPS));

        assert_eq!(Mat4::skew(0.0, 0.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_non_finite_inputs_propagate() {
        let m = Mat4::scale(f32::NAN, 1.0, 1.0);
        assert!(!m.is_finite());
        assert!(!m.mul(&Mat4::translation(1.0, 0.0, 0.0)).is_finite());
        assert!(Mat4::IDENTITY.is_finite());
    }
}
