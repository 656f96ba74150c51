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

//! The read head the output callback pulls samples through.

use resona_core::asset::SoundData;

/// Streams a decoded clip into an output buffer of any channel count and
/// sample rate.
///
/// Rate conversion is nearest-frame: the cursor advances by
/// `clip_rate / output_rate` clip frames per output frame. Channels are
/// mapped modulo the clip's channel count, so mono is duplicated to every
/// output channel. Past the end of the clip the output is silence.
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    sound: SoundData,
    position: f64,
    step: f64,
}

impl PlaybackCursor {
    /// Places a cursor at the start of `sound` for a stream at `output_rate`.
    pub fn new(sound: SoundData, output_rate: u32) -> Self {
        let step = sound.sample_rate as f64 / output_rate.max(1) as f64;
        Self {
            sound,
            position: 0.0,
            step,
        }
    }

    /// Returns `true` once every clip frame has been emitted.
    pub fn is_finished(&self) -> bool {
        self.position as u64 >= self.sound.frame_count()
    }

    /// Fills `output`, interleaved with `output_channels` channels.
    pub fn fill(&mut self, output: &mut [f32], output_channels: u16) {
        let out_channels = output_channels.max(1) as usize;
        let clip_channels = self.sound.channels.max(1) as usize;
        let clip_frames = self.sound.frame_count();

        for frame in output.chunks_mut(out_channels) {
            let index = self.position as u64;
            if index >= clip_frames {
                frame.fill(0.0);
                continue;
            }
            let base = index as usize * clip_channels;
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = self.sound.samples[base + channel % clip_channels];
            }
            self.position += self.step;
        }
    }
}
