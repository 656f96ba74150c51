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

//! The mapping from `(amplitude, progress)` to node transforms.

use resona_core::math::{Transform, TAU};

/// The rotation axis for both nodes. Not unit length; the transform
/// normalizes it, so this is a plain yaw.
pub const ORBIT_AXIS: (f32, f32, f32) = (0.0, 0.1, 0.0);

/// Smallest sphere scale, reached by silence and by negative amplitudes.
pub const SPHERE_MIN_SIZE: f32 = 1.25;

/// Largest sphere scale.
pub const SPHERE_MAX_SIZE: f32 = 20.0;

/// The sphere's uniform scale for a given amplitude.
///
/// `amplitude * terrain_size / 4` clamped to
/// `[SPHERE_MIN_SIZE, SPHERE_MAX_SIZE]`. Negative amplitudes keep their sign
/// and therefore always floor to the minimum, and so does NaN.
pub fn sphere_size(amplitude: f32, terrain_size: f32) -> f32 {
    (amplitude * terrain_size / 4.0)
        .max(SPHERE_MIN_SIZE)
        .min(SPHERE_MAX_SIZE)
}

/// Rewrites the terrain transform as a pivot rotation about its own center.
pub fn place_terrain(transform: &mut Transform, terrain_size: f32, progress: f32) {
    let center = terrain_size / 2.0;
    let (ax, ay, az) = ORBIT_AXIS;
    transform
        .load_identity()
        .scale(1.0, 1.0, 1.0)
        .translate(center, 0.0, center)
        .rotate(progress * TAU, ax, ay, az)
        .translate(-center, 0.0, -center);
}

/// Rewrites the sphere transform: lifted above the terrain center, scaled by
/// `size`, spun by progress.
pub fn place_sphere(transform: &mut Transform, terrain_size: f32, size: f32, progress: f32) {
    let center = terrain_size / 2.0;
    let (ax, ay, az) = ORBIT_AXIS;
    transform
        .load_identity()
        .translate(center, terrain_size / 2.5, center)
        .scale(size, size, size)
        .rotate(progress * TAU, ax, ay, az);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use resona_core::math::Vec3;

    #[test]
    fn silence_gives_minimum_size() {
        assert_eq!(sphere_size(0.0, 256.0), 1.25);
    }

    #[test]
    fn size_stays_in_bounds() {
        for amplitude in [-1.0, -0.5, 0.0, 0.001, 0.05, 0.3, 1.0, 7.0, f32::NAN] {
            let size = sphere_size(amplitude, 256.0);
            assert!(
                (SPHERE_MIN_SIZE..=SPHERE_MAX_SIZE).contains(&size),
                "amplitude {amplitude} gave {size}"
            );
        }
        assert_eq!(sphere_size(1.0, 256.0), SPHERE_MAX_SIZE);
        assert_eq!(sphere_size(-1.0, 256.0), SPHERE_MIN_SIZE);
        assert_eq!(sphere_size(0.25, 64.0), 4.0);
    }

    #[test]
    fn terrain_rotates_about_its_center() {
        let mut t = Transform::new();
        place_terrain(&mut t, 256.0, 0.5);
        let center = Vec3::new(128.0, 0.0, 128.0);
        let fixed = t.transform_point(center);
        assert_abs_diff_eq!(fixed.x, center.x, epsilon = 1e-3);
        assert_abs_diff_eq!(fixed.z, center.z, epsilon = 1e-3);

        // Half a turn sends the near corner to the far corner.
        let corner = t.transform_point(Vec3::ZERO);
        assert_abs_diff_eq!(corner.x, 256.0, epsilon = 1e-3);
        assert_abs_diff_eq!(corner.z, 256.0, epsilon = 1e-3);
    }

    #[test]
    fn terrain_at_zero_progress_is_identity() {
        let mut t = Transform::new();
        t.translate(5.0, 5.0, 5.0);
        place_terrain(&mut t, 256.0, 0.0);
        let p = t.transform_point(Vec3::new(3.0, 4.0, 5.0));
        assert_abs_diff_eq!(p.x, 3.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.y, 4.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.z, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn sphere_sits_above_center_and_scales() {
        let mut t = Transform::new();
        place_sphere(&mut t, 256.0, 2.0, 0.25);
        let origin = t.transform_point(Vec3::ZERO);
        assert_abs_diff_eq!(origin.x, 128.0, epsilon = 1e-3);
        assert_abs_diff_eq!(origin.y, 102.4, epsilon = 1e-3);
        assert_abs_diff_eq!(origin.z, 128.0, epsilon = 1e-3);

        // A unit offset is scaled by 2 and yawed a quarter turn: +X to -Z.
        let tip = t.transform_point(Vec3::X);
        assert_abs_diff_eq!(tip.x, 128.0, epsilon = 1e-3);
        assert_abs_diff_eq!(tip.z, 126.0, epsilon = 1e-3);
    }
}
