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

//! Defines the abstract `PlaybackDevice` trait.

use crate::asset::SoundData;
use anyhow::Result;

/// A struct providing information about the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// The number of channels (e.g., 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

/// The contract for a fire-and-forget audio output backend.
///
/// Playback is independent of the analysis path: the device receives its own
/// decoded copy of the file and is never queried for position. The clock and
/// the device only agree on time because both start together.
pub trait PlaybackDevice {
    /// Starts playing `sound` and returns immediately.
    ///
    /// Returns the parameters of the opened output stream, or `None` when the
    /// device produces no sound.
    fn play(&mut self, sound: SoundData) -> Result<Option<StreamInfo>>;

    /// Stops playback and releases the output stream. Stopping twice is a
    /// no-op.
    fn stop(&mut self);
}

/// A playback device that discards everything, for muted or headless runs.
#[derive(Debug, Default)]
pub struct NullPlayback {
    playing: bool,
}

impl NullPlayback {
    /// Whether `play` has been called since the last `stop`.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl PlaybackDevice for NullPlayback {
    fn play(&mut self, sound: SoundData) -> Result<Option<StreamInfo>> {
        log::debug!(
            "NullPlayback: discarding {:.2}s of audio",
            sound.duration_secs()
        );
        self.playing = true;
        Ok(None)
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}
