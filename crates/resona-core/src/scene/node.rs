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

use std::fmt;
use std::path::PathBuf;

use crate::asset::MeshData;
use crate::math::Transform;

/// A stable handle to a node stored in a [`SceneGraph`](super::SceneGraph).
///
/// Ids carry a generation so a handle to a destroyed node is never confused
/// with a node later stored in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}v{}", self.index, self.generation)
    }
}

/// The renderable payload owned by a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// A human-readable label, used in logs.
    pub name: String,
    /// The geometry to draw.
    pub mesh: MeshData,
    /// The texture the renderer should bind, if any.
    pub texture: Option<PathBuf>,
}

impl Drawable {
    /// Creates an untextured drawable.
    pub fn new(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture: None,
        }
    }

    /// Attaches a texture path.
    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }
}

/// A single node of the scene tree.
///
/// The node exclusively owns its drawable and its local transform. Its
/// children are owned through the graph: removing a node removes its subtree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    drawable: Drawable,
    local: Transform,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Creates a detached node with an identity transform.
    pub fn new(drawable: Drawable) -> Self {
        Self {
            drawable,
            local: Transform::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// The drawable payload.
    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// The node's transform relative to its parent.
    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    /// Mutable access to the local transform, rewritten every frame.
    pub fn local_transform_mut(&mut self) -> &mut Transform {
        &mut self.local
    }

    /// The owning parent, `None` for the root or a detached node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The ordered list of children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
