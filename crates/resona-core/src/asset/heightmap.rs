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

//! Grayscale intensity grids used to seed terrain heights.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building or loading a heightmap.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// The image could not be read or decoded.
    #[error("failed to load heightmap '{path}': {reason}")]
    Load {
        /// The file that failed to load.
        path: PathBuf,
        /// The decoder's message.
        reason: String,
    },
    /// The intensity buffer does not match the declared dimensions.
    #[error("heightmap buffer holds {actual} values, expected {width}x{depth}")]
    DimensionMismatch {
        /// Declared width.
        width: u32,
        /// Declared depth.
        depth: u32,
        /// Number of values supplied.
        actual: usize,
    },
}

/// A row-major grid of 8-bit intensities, `depth` rows of `width` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    width: u32,
    depth: u32,
    values: Vec<u8>,
}

impl Heightmap {
    /// Wraps an intensity buffer, checking it matches `width * depth`.
    pub fn new(width: u32, depth: u32, values: Vec<u8>) -> Result<Self, HeightmapError> {
        if values.len() != width as usize * depth as usize {
            return Err(HeightmapError::DimensionMismatch {
                width,
                depth,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            depth,
            values,
        })
    }

    /// An all-zero heightmap, used when no image is available.
    pub fn flat(width: u32, depth: u32) -> Self {
        Self {
            width,
            depth,
            values: vec![0; width as usize * depth as usize],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The intensity at column `x`, row `z`, clamped to the edges.
    /// An empty heightmap reads as zero everywhere.
    pub fn value(&self, x: u32, z: u32) -> u8 {
        if self.values.is_empty() {
            return 0;
        }
        let x = x.min(self.width - 1) as usize;
        let z = z.min(self.depth - 1) as usize;
        self.values[z * self.width as usize + x]
    }

    /// Nearest-neighbour lookup of grid vertex `(x, z)` on a
    /// `x_segments` by `z_segments` grid stretched over the whole image.
    pub fn sample_grid(&self, x: u32, z: u32, x_segments: u32, z_segments: u32) -> u8 {
        let sx = (x as u64 * self.width as u64 / x_segments.max(1) as u64) as u32;
        let sz = (z as u64 * self.depth as u64 / z_segments.max(1) as u64) as u32;
        self.value(sx, sz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(matches!(
            Heightmap::new(2, 2, vec![0; 3]),
            Err(HeightmapError::DimensionMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn value_is_row_major_and_clamped() {
        let map = Heightmap::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(map.value(1, 0), 2);
        assert_eq!(map.value(0, 1), 3);
        assert_eq!(map.value(10, 10), 4);
    }

    #[test]
    fn grid_sampling_stretches_over_image() {
        let map = Heightmap::new(4, 1, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(map.sample_grid(0, 0, 2, 1), 10);
        assert_eq!(map.sample_grid(1, 0, 2, 1), 30);
        assert_eq!(Heightmap::flat(0, 0).value(3, 3), 0);
    }
}
