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

//! The scene graph: an arena of nodes, each owning a drawable and a local
//! [`Transform`](crate::math::Transform), plus the fly camera that views it.

pub mod camera;
mod graph;
mod node;

pub use camera::Camera;
pub use graph::{SceneError, SceneGraph, Traversal};
pub use node::{Drawable, NodeId, SceneNode};
