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

//! A streaming `AudioSource` backed by a `hound` WAV reader.

use resona_core::audio::{AudioError, AudioSource};
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

/// Reads one frame at a time from a WAV stream, seeking before every read.
///
/// Integer samples are shifted up to the full `i32` range and float samples
/// are scaled to it, so callers see the same range for every bit depth.
pub struct WavSource<R = BufReader<File>> {
    reader: Option<hound::WavReader<R>>,
    spec: hound::WavSpec,
    total_frames: u64,
}

impl WavSource {
    /// Opens a WAV file from disk.
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let reader = hound::WavReader::open(path).map_err(|e| AudioError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_hound(reader))
    }
}

impl<R: Read + Seek> WavSource<R> {
    /// Wraps any seekable byte stream holding a WAV file.
    pub fn from_reader(inner: R) -> Result<Self, AudioError> {
        let reader = hound::WavReader::new(inner).map_err(|e| AudioError::Open {
            path: "<memory>".into(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_hound(reader))
    }

    fn from_hound(reader: hound::WavReader<R>) -> Self {
        let spec = reader.spec();
        let total_frames = reader.duration() as u64;
        log::debug!(
            "WavSource: {} Hz, {} channel(s), {}-bit {:?}, {} frames",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format,
            total_frames
        );
        Self {
            reader: Some(reader),
            spec,
            total_frames,
        }
    }

    fn read_scaled(&mut self, index: u64) -> Result<i32, String> {
        let spec = self.spec;
        let reader = self.reader.as_mut().ok_or("closed")?;
        let position = u32::try_from(index).map_err(|e| e.to_string())?;
        reader.seek(position).map_err(|e| e.to_string())?;

        match spec.sample_format {
            hound::SampleFormat::Int => {
                let sample = reader
                    .samples::<i32>()
                    .next()
                    .ok_or("end of stream")?
                    .map_err(|e| e.to_string())?;
                let shift = 32u32.saturating_sub(spec.bits_per_sample as u32);
                Ok(((sample as i64) << shift).clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            }
            hound::SampleFormat::Float => {
                let sample = reader
                    .samples::<f32>()
                    .next()
                    .ok_or("end of stream")?
                    .map_err(|e| e.to_string())?;
                Ok((sample.clamp(-1.0, 1.0) as f64 * i32::MAX as f64) as i32)
            }
        }
    }
}

impl<R: Read + Seek + Send> AudioSource for WavSource<R> {
    fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    fn total_frames(&self) -> u64 {
        self.total_frames
    }

    fn read_frame(&mut self, index: u64) -> Result<i32, AudioError> {
        if self.reader.is_none() {
            return Err(AudioError::Closed);
        }
        self.read_scaled(index)
            .map_err(|reason| AudioError::Read { index, reason })
    }

    fn close(&mut self) {
        self.reader = None;
    }
}
