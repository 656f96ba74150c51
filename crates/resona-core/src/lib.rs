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

//! # Resona Core
//!
//! Foundational crate containing the math primitives, the scene graph, the
//! audio clock, and the interface contracts (audio sources, playback devices,
//! renderers, input) that the rest of the visualizer is built on.

#![warn(missing_docs)]

pub mod asset;
pub mod audio;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod scene;

pub use audio::clock::{AudioClock, ClockReading};
pub use scene::{NodeId, SceneGraph, SceneNode};
