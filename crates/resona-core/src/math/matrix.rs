// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the column-major 4x4 matrix type.

use super::{Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// This is the storage type behind every [`Transform`](super::Transform) and
/// the camera view matrix. Columns are stored contiguously so the
/// matrix can be handed to a graphics API unchanged.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0].get(index),
            self.cols[1].get(index),
            self.cols[2].get(index),
            self.cols[3].get(index),
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(v.x, v.y, v.z, 1.0))
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation matrix around an arbitrary axis.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. Must be a unit vector.
    /// * `angle`: The angle of rotation in radians (counter-clockwise when
    ///   looking down the axis towards the origin).
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Self::from_cols(
            Vec4::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0),
            Vec4::new(t * y * x - s * z, t * y * y + c, t * y * z + s * x, 0.0),
            Vec4::new(t * z * x + s * y, t * z * y - s * x, t * z * z + c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed view matrix looking from `eye` towards `target`.
    ///
    /// Returns `None` if `eye` and `target` coincide or `up` is parallel to the
    /// view direction.
    #[inline]
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let forward = target - eye;
        if forward.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let f = forward.normalize();
        let s = f.cross(up);
        if s.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let s = s.normalize();
        let u = s.cross(f);

        Some(Self::from_cols(
            Vec4::new(s.x, u.x, -f.x, 0.0),
            Vec4::new(s.y, u.y, -f.y, 0.0),
            Vec4::new(s.z, u.z, -f.z, 0.0),
            Vec4::new(-eye.dot(s), -eye.dot(u), eye.dot(f), 1.0),
        ))
    }

    /// Transforms a point (implicit `w = 1.0`) and drops the resulting `w`.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Returns the translation stored in the last column.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let rows = [
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        ];
        let mut cols = [Vec4::ZERO; 4];
        for (target, col) in cols.iter_mut().zip(rhs.cols.iter()) {
            *target = Vec4::new(
                rows[0].dot(*col),
                rows[1].dot(*col),
                rows[2].dot(*col),
                rows[3].dot(*col),
            );
        }
        Mat4 { cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::abs_diff_eq;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        abs_diff_eq!(a.x, b.x, epsilon = EPSILON)
            && abs_diff_eq!(a.y, b.y, epsilon = EPSILON)
            && abs_diff_eq!(a.z, b.z, epsilon = EPSILON)
    }

    #[test]
    fn test_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn test_translation_and_scale() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(vec3_approx_eq(t.transform_point3(p), Vec3::new(2.0, 3.0, 4.0)));
        let s = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert!(vec3_approx_eq(s.transform_point3(p), Vec3::new(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_axis_angle_matches_right_handed_y_rotation() {
        // +X rotated 90 degrees about +Y lands on -Z.
        let m = Mat4::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(vec3_approx_eq(m.transform_point3(Vec3::X), -Vec3::Z));
    }

    #[test]
    fn test_axis_angle_about_z() {
        let m = Mat4::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert!(vec3_approx_eq(m.transform_point3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_mul_order_matters() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Mat4::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let p = Vec3::X;
        // Translate first, then rotate.
        assert!(vec3_approx_eq((r * t).transform_point3(p), Vec3::new(0.0, 2.0, 0.0)));
        // Rotate first, then translate.
        assert!(vec3_approx_eq((t * r).transform_point3(p), Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_look_at_rh() {
        let m = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .expect("look_at_rh should return Some(Mat4)");
        assert!(abs_diff_eq!(m.cols[2].z, 1.0, epsilon = EPSILON));
        assert!(abs_diff_eq!(m.cols[3].z, -5.0, epsilon = EPSILON));
        assert!(Mat4::look_at_rh(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_none());
    }
}
