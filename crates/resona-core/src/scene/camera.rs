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

//! A first-person fly camera driven by pointer motion and movement keys.

use crate::math::{Mat4, Vec3, FRAC_PI_2};

/// Radians of rotation per pixel of pointer motion.
const MOUSE_SENSITIVITY: f32 = 0.005;
/// Keeps the view direction away from the poles so `look_at` stays defined.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// A free-flying perspective camera.
///
/// The camera is the renderer's viewpoint only; it never touches the scene
/// graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    yaw: f32,
    pitch: f32,
    up: Vec3,
    last_pointer: Option<(f32, f32)>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            // Looking down -Z.
            yaw: -FRAC_PI_2,
            pitch: 0.0,
            up: Vec3::Y,
            last_pointer: None,
        }
    }
}

impl Camera {
    /// Creates a camera at `eye` looking down the negative Z axis.
    pub fn new(eye: Vec3) -> Self {
        Self {
            eye,
            ..Self::default()
        }
    }

    /// The camera position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// The unit view direction.
    pub fn view_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// Rotates the view by the pointer delta since the previous call. The
    /// first call only records the position.
    pub fn mouse_look(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.last_pointer {
            self.yaw += (x - last_x) * MOUSE_SENSITIVITY;
            self.pitch = (self.pitch - (y - last_y) * MOUSE_SENSITIVITY)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.last_pointer = Some((x, y));
    }

    /// Moves along the view direction.
    pub fn move_forward(&mut self, speed: f32) {
        self.eye += self.view_direction() * speed;
    }

    /// Moves against the view direction.
    pub fn move_backward(&mut self, speed: f32) {
        self.eye += self.view_direction() * -speed;
    }

    /// Strafes left.
    pub fn move_left(&mut self, speed: f32) {
        self.eye += self.right() * -speed;
    }

    /// Strafes right.
    pub fn move_right(&mut self, speed: f32) {
        self.eye += self.right() * speed;
    }

    /// Moves along world up.
    pub fn move_up(&mut self, speed: f32) {
        self.eye += self.up * speed;
    }

    /// Moves along world down.
    pub fn move_down(&mut self, speed: f32) {
        self.eye += self.up * -speed;
    }

    /// The world-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.view_direction(), self.up)
            .unwrap_or(Mat4::IDENTITY)
    }

    fn right(&self) -> Vec3 {
        self.view_direction().cross(self.up).normalize()
    }
}
