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

//! Decodes grayscale heightmaps with the `image` crate.

use super::AssetLoaderLane;
use anyhow::Context;
use resona_core::asset::{Heightmap, HeightmapError};
use std::{error::Error, path::Path};

/// A lane that decodes any image format into a luminance [`Heightmap`].
///
/// Color images are converted to 8-bit luma, so a PPM heightmap painted in
/// gray reads back with its red channel intact.
#[derive(Debug, Default, Clone)]
pub struct HeightmapLoaderLane;

impl AssetLoaderLane<Heightmap> for HeightmapLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<Heightmap, Box<dyn Error + Send + Sync>> {
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;
        let luma = img.to_luma8();
        let (width, depth) = luma.dimensions();
        Ok(Heightmap::new(width, depth, luma.into_raw())?)
    }
}

/// Reads and decodes the heightmap at `path`.
pub fn load_heightmap(path: &Path) -> Result<Heightmap, HeightmapError> {
    let load_error = |reason: String| HeightmapError::Load {
        path: path.to_path_buf(),
        reason,
    };
    let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
    let heightmap = HeightmapLoaderLane
        .load(&bytes)
        .map_err(|e| load_error(e.to_string()))?;
    log::debug!(
        "Loaded heightmap '{}' ({}x{})",
        path.display(),
        heightmap.width(),
        heightmap.depth()
    );
    Ok(heightmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    fn encoded_png() -> Vec<u8> {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 10 + y * 100) as u8]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_grayscale_png() {
        let map = HeightmapLoaderLane.load(&encoded_png()).unwrap();
        assert_eq!((map.width(), map.depth()), (3, 2));
        assert_eq!(map.value(2, 0), 20);
        assert_eq!(map.value(1, 1), 110);
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.png");
        std::fs::write(&path, encoded_png()).unwrap();
        assert_eq!(load_heightmap(&path).unwrap().value(0, 1), 100);
    }

    #[test]
    fn reports_missing_file() {
        let err = load_heightmap(Path::new("no/such/terrain.ppm")).unwrap_err();
        assert!(matches!(err, HeightmapError::Load { .. }));
    }
}
