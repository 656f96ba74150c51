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

//! The per-frame update: audio reading in, node transforms out.

mod frame_updater;
mod placement;

pub use frame_updater::{
    FinishReason, FrameState, FrameUpdater, SceneHandles, DEFAULT_CAMERA_SPEED,
};
pub use placement::{
    place_sphere, place_terrain, sphere_size, ORBIT_AXIS, SPHERE_MAX_SIZE, SPHERE_MIN_SIZE,
};
