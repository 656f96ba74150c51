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

//! A mutable, in-place composed affine transform.

use super::{Mat4, Vec3};

/// A 4x4 affine transform that is rebuilt call by call.
///
/// Every operation post-multiplies its elementary matrix onto the running
/// matrix (`M = M * E`), so the *last* call is the first one applied to a
/// point. A pivot rotation about `c` is therefore written
/// `translate(c) -> rotate(..) -> translate(-c)`.
///
/// Each [`SceneNode`](crate::scene::SceneNode) owns exactly one `Transform`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Creates an identity transform.
    pub const fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    /// Resets the transform to the identity matrix.
    pub fn load_identity(&mut self) -> &mut Self {
        self.matrix = Mat4::IDENTITY;
        self
    }

    /// Post-multiplies a non-uniform scale.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.matrix = self.matrix * Mat4::from_scale(Vec3::new(sx, sy, sz));
        self
    }

    /// Post-multiplies a translation.
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        self.matrix = self.matrix * Mat4::from_translation(Vec3::new(tx, ty, tz));
        self
    }

    /// Post-multiplies a rotation of `angle` radians around `(ax, ay, az)`.
    ///
    /// The axis does not need to be unit length; it is normalized here. A zero
    /// axis with a non-zero angle is a caller error: the rotation degenerates
    /// and the resulting matrix is meaningless.
    pub fn rotate(&mut self, angle: f32, ax: f32, ay: f32, az: f32) -> &mut Self {
        let axis = Vec3::new(ax, ay, az).normalize();
        self.matrix = self.matrix * Mat4::from_axis_angle(axis, angle);
        self
    }

    /// Returns the current matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.matrix.transform_point3(p)
    }
}

impl From<Transform> for Mat4 {
    #[inline]
    fn from(transform: Transform) -> Self {
        transform.matrix
    }
}
