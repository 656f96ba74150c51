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

//! Defines the `AudioSource` trait and the in-memory `BufferedSource`.

use crate::asset::SoundData;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an audio source or the clock reading it.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The file is missing or could not be decoded.
    #[error("failed to open audio '{path}': {reason}")]
    Open {
        /// The file that failed to open.
        path: PathBuf,
        /// The decoder's message.
        reason: String,
    },
    /// The stream holds no frames, so progress is undefined.
    #[error("audio source contains no frames")]
    EmptySource,
    /// A seek or read failed mid-stream.
    #[error("failed to read frame {index}: {reason}")]
    Read {
        /// The frame that was requested.
        index: u64,
        /// The decoder's message.
        reason: String,
    },
    /// The source was used after `close`.
    #[error("audio source is closed")]
    Closed,
}

/// A seekable stream of decoded frames, read one frame at a time for
/// amplitude analysis.
///
/// Samples are exposed as signed 32-bit integers scaled to the full `i32`
/// range regardless of the file's bit depth, so `sample / i32::MAX` is a
/// normalized amplitude.
pub trait AudioSource: Send {
    /// Frames per second.
    fn sample_rate(&self) -> u32;

    /// Total number of frames in the stream.
    fn total_frames(&self) -> u64;

    /// Seeks to `index` and returns the first channel of that frame.
    ///
    /// Reading the same index twice must return the same value.
    fn read_frame(&mut self, index: u64) -> Result<i32, AudioError>;

    /// Releases decoder resources. Closing twice is a no-op.
    fn close(&mut self);
}

/// A fully decoded stream held in memory, one `i32` per frame.
#[derive(Debug, Clone, Default)]
pub struct BufferedSource {
    sample_rate: u32,
    frames: Vec<i32>,
    closed: bool,
}

impl BufferedSource {
    /// Wraps pre-decoded mono frames.
    pub fn new(sample_rate: u32, frames: Vec<i32>) -> Self {
        Self {
            sample_rate,
            frames,
            closed: false,
        }
    }

    /// Takes the first channel of every frame of a decoded clip, rescaling
    /// `[-1, 1]` floats to the `i32` range.
    pub fn from_sound(sound: &SoundData) -> Self {
        let channels = sound.channels.max(1) as usize;
        let frames = sound
            .samples
            .chunks_exact(channels)
            .map(|frame| (frame[0].clamp(-1.0, 1.0) as f64 * i32::MAX as f64) as i32)
            .collect();
        Self::new(sound.sample_rate, frames)
    }
}

impl AudioSource for BufferedSource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_frames(&self) -> u64 {
        self.frames.len() as u64
    }

    fn read_frame(&mut self, index: u64) -> Result<i32, AudioError> {
        if self.closed {
            return Err(AudioError::Closed);
        }
        self.frames
            .get(index as usize)
            .copied()
            .ok_or_else(|| AudioError::Read {
                index,
                reason: format!("stream ends at frame {}", self.frames.len()),
            })
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.frames = Vec::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sound_keeps_first_channel() {
        let sound = SoundData {
            samples: vec![1.0, -1.0, 0.0, 0.5, -1.0, 1.0],
            channels: 2,
            sample_rate: 8000,
        };
        let mut source = BufferedSource::from_sound(&sound);
        assert_eq!(source.total_frames(), 3);
        assert_eq!(source.sample_rate(), 8000);
        assert_eq!(source.read_frame(0).unwrap(), i32::MAX);
        assert_eq!(source.read_frame(1).unwrap(), 0);
        assert_eq!(source.read_frame(2).unwrap(), -i32::MAX);
    }

    #[test]
    fn read_past_end_is_an_error() {
        let mut source = BufferedSource::new(10, vec![1, 2]);
        assert!(matches!(
            source.read_frame(2),
            Err(AudioError::Read { index: 2, .. })
        ));
    }

    #[test]
    fn close_is_idempotent_and_blocks_reads() {
        let mut source = BufferedSource::new(10, vec![1, 2]);
        source.close();
        source.close();
        assert!(matches!(source.read_frame(0), Err(AudioError::Closed)));
    }
}
