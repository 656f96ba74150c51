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

//! Audio decoding: whole-file decoders for playback and the streaming
//! source the clock reads amplitudes from.

mod symphonia_loader_lane;
mod wav_loader_lane;
mod wav_source;

pub use symphonia_loader_lane::SymphoniaLoaderLane;
pub use wav_loader_lane::WavLoaderLane;
pub use wav_source::WavSource;

use super::AssetLoaderLane;
use anyhow::{anyhow, Context, Result};
use resona_core::{
    asset::SoundData,
    audio::{AudioError, AudioSource, BufferedSource},
};
use std::path::Path;

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Opens `path` for amplitude analysis.
///
/// WAV files are streamed with seek-then-read. Every other format is decoded
/// up front and served from memory.
pub fn open_audio_source(path: &Path) -> Result<Box<dyn AudioSource>, AudioError> {
    let open_error = |reason: String| AudioError::Open {
        path: path.to_path_buf(),
        reason,
    };

    if is_wav(path) {
        let source = WavSource::open(path)?;
        return Ok(Box::new(source));
    }

    let bytes = std::fs::read(path).map_err(|e| open_error(e.to_string()))?;
    let sound = SymphoniaLoaderLane::new()
        .load(&bytes)
        .map_err(|e| open_error(e.to_string()))?;
    log::debug!(
        "Decoded '{}' into memory: {} frames, {} channel(s)",
        path.display(),
        sound.frame_count(),
        sound.channels
    );
    Ok(Box::new(BufferedSource::from_sound(&sound)))
}

/// Decodes the whole of `path` into interleaved `f32` samples for playback.
pub fn load_sound(path: &Path) -> Result<SoundData> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let decoded = if is_wav(path) {
        WavLoaderLane::new().load(&bytes)
    } else {
        SymphoniaLoaderLane::new().load(&bytes)
    };
    decoded
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Failed to decode '{}'", path.display()))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn wav_path_is_streamed() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&test_wav::mono_i16(8_000, &[0, i16::MAX, -100]))
            .unwrap();

        let mut source = open_audio_source(file.path()).unwrap();
        assert_eq!(source.sample_rate(), 8_000);
        assert_eq!(source.total_frames(), 3);
        assert_eq!(source.read_frame(1).unwrap(), (i16::MAX as i32) << 16);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let result = open_audio_source(Path::new("does/not/exist.wav"));
        assert!(matches!(result, Err(AudioError::Open { .. })));
        let result = open_audio_source(Path::new("does/not/exist.ogg"));
        assert!(matches!(result, Err(AudioError::Open { .. })));
    }

    #[test]
    fn load_sound_decodes_wav_for_playback() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&test_wav::mono_i16(22_050, &[0; 441])).unwrap();

        let sound = load_sound(file.path()).unwrap();
        assert_eq!(sound.sample_rate, 22_050);
        assert_eq!(sound.frame_count(), 441);
    }
}
