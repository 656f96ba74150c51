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

//! End-to-end session behavior, headless.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use resona_core::{
    asset::{Heightmap, SoundData},
    audio::{AudioError, AudioSource, BufferedSource, NullPlayback, PlaybackDevice, StreamInfo},
    platform::{InputEvent, Key},
};
use resona_sdk::{
    FinishReason, FrameState, SessionAssets, SessionError, StartupDiagnostics, VisualizerConfig,
    VisualizerSession,
};
use resona_lanes::FrameStatsRenderer;

type Log = Arc<Mutex<Vec<&'static str>>>;

struct LoggingSource {
    inner: BufferedSource,
    log: Log,
}

impl AudioSource for LoggingSource {
    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }
    fn total_frames(&self) -> u64 {
        self.inner.total_frames()
    }
    fn read_frame(&mut self, index: u64) -> Result<i32, AudioError> {
        self.inner.read_frame(index)
    }
    fn close(&mut self) {
        self.log.lock().unwrap().push("source closed");
        self.inner.close();
    }
}

struct LoggingPlayback {
    log: Log,
}

impl PlaybackDevice for LoggingPlayback {
    fn play(&mut self, _: SoundData) -> Result<Option<StreamInfo>> {
        self.log.lock().unwrap().push("playback started");
        Ok(Some(StreamInfo {
            channels: 2,
            sample_rate: 48_000,
        }))
    }
    fn stop(&mut self) {
        self.log.lock().unwrap().push("playback stopped");
    }
}

fn small_config() -> VisualizerConfig {
    let mut config = VisualizerConfig::default();
    config.terrain.size = 8;
    config.terrain.heightmap = None;
    config.report_every = 0;
    config
}

fn logged_session(frames: usize) -> (VisualizerSession<FrameStatsRenderer>, Log) {
    let log: Log = Arc::default();
    let source = LoggingSource {
        inner: BufferedSource::new(1_000, vec![0; frames]),
        log: log.clone(),
    };
    let assets = SessionAssets {
        source: Box::new(source),
        heightmap: Heightmap::flat(8, 8),
        sound: Some(SoundData::default()),
    };
    let session = VisualizerSession::assemble(
        small_config(),
        assets,
        Box::new(LoggingPlayback { log: log.clone() }),
        FrameStatsRenderer::new(0),
        StartupDiagnostics::new(),
    )
    .unwrap();
    (session, log)
}

#[test]
fn scene_is_terrain_with_sphere_child() {
    let (session, _) = logged_session(100);
    let handles = session.handles();
    let scene = session.scene();
    assert_eq!(scene.root(), Some(handles.terrain));
    assert_eq!(scene.get(handles.terrain).unwrap().children(), &[handles.sphere]);
    assert_eq!(
        scene.get(handles.terrain).unwrap().drawable().mesh.vertices.len(),
        64
    );
    // Camera starts back from the terrain, looking at it.
    assert_eq!(session.camera().eye().z, 10.0);
}

#[test]
fn completes_and_tears_down_clock_before_playback() {
    let (mut session, log) = logged_session(1_000);
    session.start();
    assert_eq!(session.tick_at(400), FrameState::Running);
    assert_eq!(
        session.tick_at(1_000),
        FrameState::Finished(FinishReason::PlaybackComplete)
    );
    assert!(session.is_torn_down());

    session.teardown();
    drop(session);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["playback started", "source closed", "playback stopped"]
    );
}

#[test]
fn quit_ends_session_at_next_frame() {
    let (mut session, _) = logged_session(1_000);
    session.tick_at(10);
    session.handle_input(InputEvent::Quit);
    assert_eq!(
        session.tick_at(20),
        FrameState::Finished(FinishReason::QuitRequested)
    );
    assert_eq!(session.renderer().frames_rendered(), 1);
}

#[test]
fn escape_requests_quit_like_window_close() {
    let (mut session, _) = logged_session(1_000);
    session.tick_at(10);
    session.handle_input(InputEvent::KeyPressed { key: Key::Char('r') });
    assert!(!session.updater().is_quit_requested());

    session.handle_input(InputEvent::KeyPressed { key: Key::Escape });
    assert!(session.updater().is_quit_requested());
    assert_eq!(
        session.tick_at(20),
        FrameState::Finished(FinishReason::QuitRequested)
    );
    assert!(session.is_torn_down());
}

#[test]
fn empty_audio_finishes_with_fault() {
    let (mut session, _) = logged_session(0);
    assert_eq!(
        session.tick_at(0),
        FrameState::Finished(FinishReason::AudioFault)
    );
}

#[test]
fn missing_audio_file_is_a_startup_error() {
    let result = VisualizerSession::open(
        "no/such/track.wav".as_ref(),
        small_config(),
        Box::new(NullPlayback::default()),
    );
    match result {
        Err(SessionError::Startup(report)) => assert!(report.has_errors()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("session should not open"),
    }
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = small_config();
    config.terrain.size = 0;
    let result = VisualizerSession::open(
        "no/such/track.wav".as_ref(),
        config,
        Box::new(NullPlayback::default()),
    );
    assert!(matches!(result, Err(SessionError::Config(_))));
}

#[test]
fn wav_file_runs_headless_to_completion() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    let mut bytes = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut bytes, spec).unwrap();
        // 50 ms of audio.
        for i in 0..400 {
            writer.write_sample((i * 50) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    file.write_all(bytes.get_ref()).unwrap();

    let mut config = small_config();
    config.mute = true;
    config.terrain.heightmap = Some("no/such/heightmap.ppm".into());
    let mut session =
        VisualizerSession::open(file.path(), config, Box::new(NullPlayback::default())).unwrap();

    assert_eq!(session.run_headless(), FinishReason::PlaybackComplete);
    assert!(session.is_torn_down());
    let last = session.renderer().last_frame().unwrap();
    assert_eq!(last.hints.progress, 1.0);
}
