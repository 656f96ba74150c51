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

//! # Resona Lanes
//!
//! The per-frame and startup pipelines of the visualizer. Each lane is a
//! focused piece of work over the contracts in `resona-core`:
//!
//! - [`asset_lane`]: decoding audio files and heightmap images.
//! - [`scene_lane`]: accumulating world transforms from local ones.
//! - [`frame_lane`]: the per-frame update driven by the audio clock.
//! - [`render_lane`]: the renderer that consumes the scene each frame.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod frame_lane;
pub mod render_lane;
pub mod scene_lane;

pub use frame_lane::{FinishReason, FrameState, FrameUpdater, SceneHandles};
pub use render_lane::FrameStatsRenderer;
pub use scene_lane::WorldTransforms;
