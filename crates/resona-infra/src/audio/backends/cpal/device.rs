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

//! Contains the `CpalPlayback` struct.

use crate::audio::PlaybackCursor;
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use resona_core::{
    asset::SoundData,
    audio::{PlaybackDevice, StreamInfo},
};

/// A `PlaybackDevice` that plays through the host's default output device.
///
/// The stream lives as long as this value, or until [`stop`](PlaybackDevice::stop).
#[derive(Default)]
pub struct CpalPlayback {
    stream: Option<cpal::Stream>,
}

impl CpalPlayback {
    /// Creates a new instance of the CPAL playback backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackDevice for CpalPlayback {
    fn play(&mut self, sound: SoundData) -> Result<Option<StreamInfo>> {
        self.stop();

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available"))?;
        let config = device.default_output_config()?;

        let stream_info = StreamInfo {
            channels: config.channels(),
            sample_rate: config.sample_rate(),
        };

        let mut cursor = PlaybackCursor::new(sound, stream_info.sample_rate);
        let audio_callback = move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
            cursor.fill(output_buffer, stream_info.channels);
        };

        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {}", err);
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                device.build_output_stream(&config.into(), audio_callback, error_callback, None)?
            }
            format => return Err(anyhow!("Unsupported sample format: {}", format)),
        };

        stream.play()?;
        log::info!(
            "Audio output started: {} channel(s) at {} Hz",
            stream_info.channels,
            stream_info.sample_rate
        );

        self.stream = Some(stream);
        Ok(Some(stream_info))
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                log::debug!("Pausing the audio stream failed: {}", e);
            }
            log::info!("Audio output stopped.");
        }
    }
}

impl Drop for CpalPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}
