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

//! A renderer that resolves the frame on the CPU and reports it instead of
//! submitting draw calls.
//!
//! Every frame it runs the same extraction a GPU renderer would: world
//! transforms are accumulated from local ones, each drawable becomes a
//! [`DrawItem`], and the result is kept for inspection and logged at a fixed
//! cadence. Headless runs and tests use it directly; the windowed build
//! shows its summary in the title bar.

use crate::scene_lane::propagate_world_transforms;
use anyhow::Result;
use std::path::PathBuf;

use resona_core::{
    math::{Mat4, Vec3, Vec4},
    renderer::{FrameHints, SceneRenderer},
    scene::{Camera, NodeId, SceneGraph},
};

/// One drawable resolved for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// The node the drawable belongs to.
    pub node: NodeId,
    /// The drawable's label.
    pub name: String,
    /// Depth in the tree, the root being 0.
    pub depth: usize,
    /// The accumulated world matrix.
    pub world: Mat4,
    /// Triangles submitted for this drawable.
    pub triangles: usize,
    /// The texture bound for this drawable.
    pub texture: Option<PathBuf>,
    /// Whether the node's origin lies in front of the camera.
    pub in_view: bool,
}

impl DrawItem {
    /// The node's origin in world space.
    pub fn world_origin(&self) -> Vec3 {
        self.world.translation()
    }
}

/// The resolved contents of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Zero-based frame counter.
    pub frame: u64,
    /// Hints the frame was drawn with.
    pub hints: FrameHints,
    /// Drawables in traversal order, parents first.
    pub items: Vec<DrawItem>,
    /// The base color scaled by amplitude, as a shader would tint.
    pub tint: [f32; 3],
}

impl FrameStats {
    /// Total triangles across all drawables.
    pub fn triangle_count(&self) -> usize {
        self.items.iter().map(|i| i.triangles).sum()
    }

    /// Finds a drawable by name.
    pub fn item(&self, name: &str) -> Option<&DrawItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// A one-line description for logs and window titles.
    pub fn summary(&self) -> String {
        format!(
            "{:5.1}% | amp {:+.3} | {} | {} draws, {} tris",
            self.hints.progress * 100.0,
            self.hints.amplitude,
            self.hints.color,
            self.items.len(),
            self.triangle_count()
        )
    }
}

/// A [`SceneRenderer`] that extracts and reports frames on the CPU.
#[derive(Debug)]
pub struct FrameStatsRenderer {
    report_every: u64,
    frames: u64,
    last: Option<FrameStats>,
}

impl Default for FrameStatsRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameStatsRenderer {
    /// Creates a renderer that logs a summary every `report_every` frames.
    /// Zero disables the periodic report.
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every,
            frames: 0,
            last: None,
        }
    }

    /// The most recently rendered frame.
    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last.as_ref()
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl SceneRenderer for FrameStatsRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, hints: &FrameHints) -> Result<()> {
        let world = propagate_world_transforms(scene);
        let view = camera.view_matrix();

        let items = scene
            .traverse()
            .filter_map(|(id, node, depth)| {
                let world = world.get(id)?;
                let origin_in_view = view * (world * Vec4::W);
                Some(DrawItem {
                    node: id,
                    name: node.drawable().name.clone(),
                    depth,
                    world,
                    triangles: node.drawable().mesh.triangle_count(),
                    texture: node.drawable().texture.clone(),
                    in_view: origin_in_view.z < 0.0,
                })
            })
            .collect();

        let [r, g, b] = hints.color.rgb();
        let gain = hints.amplitude.abs().min(1.0);
        let stats = FrameStats {
            frame: self.frames,
            hints: *hints,
            items,
            tint: [r * gain, g * gain, b * gain],
        };

        if self.report_every != 0 && self.frames % self.report_every == 0 {
            log::debug!("frame {}: {}", stats.frame, stats.summary());
        }
        self.frames += 1;
        self.last = Some(stats);
        Ok(())
    }
}
