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

//! CPU-side geometry: the terrain grid and the UV sphere.

use super::Heightmap;
use crate::math::{PI, TAU};

/// Heightmap intensities are divided by this to flatten the terrain.
pub const TERRAIN_HEIGHT_DIVISOR: f32 = 5.0;

/// A vertex with a position and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex from its components.
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
        }
    }
}

/// An indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// The vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, three per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Builds a terrain grid of `x_segments` by `z_segments` vertices.
    ///
    /// Vertex `(x, z)` sits at `(x, h, z)` where `h` is the heightmap
    /// intensity divided by [`TERRAIN_HEIGHT_DIVISOR`] and truncated to whole
    /// units, giving the terrain its stepped look. UVs run from `1` down to
    /// `1/segments`. Each of the `(x_segments-1) * (z_segments-1)` quads is
    /// split into two triangles.
    pub fn terrain_grid(heightmap: &Heightmap, x_segments: u32, z_segments: u32) -> Self {
        let mut vertices = Vec::with_capacity(x_segments as usize * z_segments as usize);
        for z in 0..z_segments {
            for x in 0..x_segments {
                let intensity = heightmap.sample_grid(x, z, x_segments, z_segments);
                let height = (intensity as f32 / TERRAIN_HEIGHT_DIVISOR).trunc();
                let u = 1.0 - x as f32 / x_segments as f32;
                let v = 1.0 - z as f32 / z_segments as f32;
                vertices.push(Vertex::new(x as f32, height, z as f32, u, v));
            }
        }

        let quads_x = x_segments.saturating_sub(1);
        let quads_z = z_segments.saturating_sub(1);
        let mut indices = Vec::with_capacity(quads_x as usize * quads_z as usize * 6);
        for z in 0..quads_z {
            for x in 0..quads_x {
                let i = z * x_segments + x;
                let below = i + x_segments;
                indices.extend_from_slice(&[i, below, i + 1]);
                indices.extend_from_slice(&[i + 1, below, below + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// Builds a unit-radius UV sphere centred at the origin.
    pub fn uv_sphere(stacks: u32, slices: u32) -> Self {
        let stacks = stacks.max(2);
        let slices = slices.max(3);
        let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
        for stack in 0..=stacks {
            let v = stack as f32 / stacks as f32;
            let phi = v * PI;
            for slice in 0..=slices {
                let u = slice as f32 / slices as f32;
                let theta = u * TAU;
                vertices.push(Vertex::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                    u,
                    v,
                ));
            }
        }

        let ring = slices + 1;
        let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * ring + slice;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1]);
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
