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

//! # Resona SDK
//!
//! Assembles a visualizer session from an audio file and a configuration,
//! and runs it either headless or in a `winit` window.
//!
//! ```no_run
//! use resona_sdk::{NullPlayback, VisualizerConfig, VisualizerSession};
//!
//! let config = VisualizerConfig::default();
//! let mut session =
//!     VisualizerSession::open("song.wav".as_ref(), config, Box::new(NullPlayback::default()))?;
//! let reason = session.run_headless();
//! println!("finished: {reason:?}");
//! # Ok::<(), resona_sdk::SessionError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod session;

pub use config::{ConfigError, TerrainConfig, VisualizerConfig, WindowConfig};
pub use diagnostics::{Diagnostic, Severity, StartupDiagnostics};
pub use engine::run_windowed;
pub use resona_core::audio::{NullPlayback, PlaybackDevice};
pub use resona_core::renderer::ColorMode;
pub use resona_infra::CpalPlayback;
pub use resona_lanes::{FinishReason, FrameState};
pub use session::{build_scene, SessionAssets, SessionError, VisualizerSession};
