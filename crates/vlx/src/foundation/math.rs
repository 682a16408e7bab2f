//! Math utilities and types
//!
//! Provides the vector and matrix types used by the scene records, plus the
//! matrix classification helpers the matrix codec relies on.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Extension trait for Mat4 with the helpers needed to express a matrix as a
/// composition of simple transforms
pub trait Mat4Ext {
    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, look: Vec3, up: Vec3) -> Mat4;

    /// Build a matrix from 16 values listed row by row
    fn from_row_major(values: &[f32; 16]) -> Mat4;

    /// The 16 values of the matrix listed row by row
    fn to_row_major(&self) -> [f32; 16];

    /// Translation column of the matrix
    fn translation_part(&self) -> Vec3;

    /// Diagonal scale factors of the matrix
    fn scaling_part(&self) -> Vec3;

    /// True when the matrix is exactly a translation (identity included)
    fn is_translation_only(&self) -> bool;

    /// True when every off-diagonal entry is zero and `m44` is one
    fn is_scaling_only(&self) -> bool;
}

impl Mat4Ext for Mat4 {
    fn look_at(eye: Vec3, look: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(look), &up)
    }

    fn from_row_major(values: &[f32; 16]) -> Mat4 {
        Mat4::from_row_slice(values)
    }

    fn to_row_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self[(row, col)];
            }
        }
        out
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn scaling_part(&self) -> Vec3 {
        Vec3::new(self[(0, 0)], self[(1, 1)], self[(2, 2)])
    }

    #[allow(clippy::float_cmp)]
    fn is_translation_only(&self) -> bool {
        for row in 0..4 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                if self[(row, col)] != expected {
                    return false;
                }
            }
        }
        self[(3, 3)] == 1.0
    }

    #[allow(clippy::float_cmp)]
    fn is_scaling_only(&self) -> bool {
        for row in 0..4 {
            for col in 0..4 {
                if row != col && self[(row, col)] != 0.0 {
                    return false;
                }
            }
        }
        self[(3, 3)] == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_major_round_trip() {
        let values = [
            1.0, 2.0, 3.0, 4.0,
            5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        ];
        let m = Mat4::from_row_major(&values);
        assert_eq!(m[(0, 3)], 4.0);
        assert_eq!(m[(3, 0)], 13.0);
        assert_eq!(m.to_row_major(), values);
    }

    #[test]
    fn test_classification() {
        let translation = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        assert!(translation.is_translation_only());
        assert!(!translation.is_scaling_only());
        assert_eq!(translation.translation_part(), Vec3::new(1.0, 2.0, 3.0));

        let scale = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 3.0, 4.0));
        assert!(scale.is_scaling_only());
        assert!(!scale.is_translation_only());
        assert_eq!(scale.scaling_part(), Vec3::new(2.0, 3.0, 4.0));

        let rotation = Mat4::from_axis_angle(&Vec3::y_axis(), 0.5);
        assert!(!rotation.is_translation_only());
        assert!(!rotation.is_scaling_only());

        assert!(Mat4::identity().is_translation_only());
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());
        let moved = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(moved.coords, Vec3::zeros(), epsilon = 1e-5);
    }
}
