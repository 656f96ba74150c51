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

//! Maps elapsed wall-clock time onto a position in an audio stream.

use super::source::{AudioError, AudioSource};
use crate::math::saturate;
use std::time::Instant;

/// One sample of the stream at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    /// The frame that was read, clamped to the last valid frame.
    pub sample_index: u64,
    /// Fraction of the stream elapsed, in `[0, 1]`.
    pub progress: f32,
    /// The first channel's sample, normalized to `[-1, 1]`.
    pub amplitude: f32,
}

/// Converts elapsed playback time into a sample index, a progress fraction,
/// and the amplitude at that index.
///
/// The clock owns its source for the duration of one session and closes it
/// on [`close`](Self::close) or drop.
pub struct AudioClock {
    source: Box<dyn AudioSource>,
    sample_rate: u32,
    total_frames: u64,
    origin: Option<Instant>,
    closed: bool,
}

impl std::fmt::Debug for AudioClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioClock")
            .field("sample_rate", &self.sample_rate)
            .field("total_frames", &self.total_frames)
            .field("started", &self.origin.is_some())
            .field("closed", &self.closed)
            .finish()
    }
}

impl AudioClock {
    /// Binds the clock to an opened source.
    ///
    /// A source with a zero sample rate cannot be mapped onto time and is
    /// rejected here, before any frame is processed.
    pub fn open(source: Box<dyn AudioSource>) -> Result<Self, AudioError> {
        let sample_rate = source.sample_rate();
        if sample_rate == 0 {
            return Err(AudioError::Open {
                path: "<stream>".into(),
                reason: "sample rate is zero".to_owned(),
            });
        }
        let total_frames = source.total_frames();
        log::debug!(
            "AudioClock opened: {} frames at {} Hz",
            total_frames,
            sample_rate
        );
        Ok(Self {
            source,
            sample_rate,
            total_frames,
            origin: None,
            closed: false,
        })
    }

    /// Frames per second of the underlying stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total frames in the underlying stream.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Records the wall-clock origin. Calling it again restarts the clock.
    pub fn start(&mut self) {
        self.origin = Some(Instant::now());
    }

    /// Milliseconds since [`start`](Self::start), zero if never started.
    pub fn elapsed_millis(&self) -> u64 {
        self.origin
            .map(|origin| origin.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Reads the stream at `elapsed_millis` after the origin.
    ///
    /// The result depends only on `elapsed_millis` and the stream contents:
    /// the same input always yields the same reading, and a larger input
    /// never yields a smaller `sample_index`.
    pub fn query(&mut self, elapsed_millis: u64) -> Result<ClockReading, AudioError> {
        if self.closed {
            return Err(AudioError::Closed);
        }
        if self.total_frames == 0 {
            return Err(AudioError::EmptySource);
        }

        let raw_index = (elapsed_millis as u128 * self.sample_rate as u128 / 1000) as u64;
        let progress = saturate((raw_index as f64 / self.total_frames as f64) as f32);
        let sample_index = raw_index.min(self.total_frames - 1);

        let sample = self.source.read_frame(sample_index)?;
        let amplitude = sample as f32 / i32::MAX as f32;

        Ok(ClockReading {
            sample_index,
            progress,
            amplitude,
        })
    }

    /// Queries at the current elapsed time.
    pub fn tick(&mut self) -> Result<ClockReading, AudioError> {
        let elapsed = self.elapsed_millis();
        self.query(elapsed)
    }

    /// Releases the source. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.source.close();
        self.closed = true;
        log::debug!("AudioClock closed");
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for AudioClock {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BufferedSource;

    fn ramp_clock(rate: u32, frames: u64) -> AudioClock {
        let samples = (0..frames).map(|i| (i % 1000) as i32 * 1000).collect();
        AudioClock::open(Box::new(BufferedSource::new(rate, samples))).unwrap()
    }

    #[test]
    fn half_second_into_one_second_clip() {
        let mut clock = ramp_clock(44_100, 44_100);
        let reading = clock.query(500).unwrap();
        assert_eq!(reading.sample_index, 22_050);
        assert_eq!(reading.progress, 0.5);
    }

    #[test]
    fn sample_index_is_monotonic() {
        let mut clock = ramp_clock(48_000, 96_000);
        let mut last = 0;
        for ms in (0..2_500).step_by(7) {
            let reading = clock.query(ms).unwrap();
            assert!(reading.sample_index >= last);
            assert!((0.0..=1.0).contains(&reading.progress));
            last = reading.sample_index;
        }
    }

    #[test]
    fn query_is_idempotent() {
        let mut clock = ramp_clock(8_000, 8_000);
        let first = clock.query(333).unwrap();
        let second = clock.query(333).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn amplitude_is_normalized() {
        let source = BufferedSource::new(1_000, vec![i32::MAX, 0, i32::MIN + 1]);
        let mut clock = AudioClock::open(Box::new(source)).unwrap();
        assert_eq!(clock.query(0).unwrap().amplitude, 1.0);
        assert_eq!(clock.query(1).unwrap().amplitude, 0.0);
        assert_eq!(clock.query(2).unwrap().amplitude, -1.0);
    }

    #[test]
    fn end_of_stream_is_clamped_and_progress_saturates() {
        let mut clock = ramp_clock(1_000, 1_000);
        let at_end = clock.query(1_000).unwrap();
        assert_eq!(at_end.sample_index, 999);
        assert_eq!(at_end.progress, 1.0);

        let past_end = clock.query(60_000).unwrap();
        assert_eq!(past_end.sample_index, 999);
        assert_eq!(past_end.progress, 1.0);
    }

    #[test]
    fn empty_source_is_guarded() {
        let mut clock = ramp_clock(44_100, 0);
        assert!(matches!(clock.query(0), Err(AudioError::EmptySource)));
        assert!(matches!(clock.query(500), Err(AudioError::EmptySource)));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let source = BufferedSource::new(0, vec![1, 2, 3]);
        assert!(matches!(
            AudioClock::open(Box::new(source)),
            Err(AudioError::Open { .. })
        ));
    }

    #[test]
    fn close_is_idempotent() {
        let mut clock = ramp_clock(1_000, 1_000);
        clock.close();
        clock.close();
        assert!(clock.is_closed());
        assert!(matches!(clock.query(0), Err(AudioError::Closed)));
    }

    #[test]
    fn unstarted_clock_reads_zero() {
        let mut clock = ramp_clock(1_000, 1_000);
        assert_eq!(clock.elapsed_millis(), 0);
        assert_eq!(clock.tick().unwrap().sample_index, 0);
    }
}
