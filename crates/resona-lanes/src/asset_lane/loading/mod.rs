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

//! Loader lanes, one per asset format.

pub mod audio_loader_lane;
pub mod heightmap_loader_lane;

use std::error::Error;

/// A trait for lanes that decode one kind of asset from a byte slice.
///
/// Implementors do the CPU work of parsing raw file data. File access stays
/// with the caller so loaders can be exercised on in-memory buffers.
pub trait AssetLoaderLane<A> {
    /// Parses `bytes` into an asset.
    fn load(&self, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;
}
