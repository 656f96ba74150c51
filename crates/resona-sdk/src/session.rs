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

//! One visualizer run: the clock, the scene, the renderer, and the playback
//! device, owned together and torn down together.

use crate::{
    config::{ConfigError, VisualizerConfig},
    diagnostics::StartupDiagnostics,
};
use resona_core::{
    asset::{Heightmap, MeshData, SoundData},
    audio::{AudioClock, AudioError, AudioSource, PlaybackDevice},
    math::Vec3,
    platform::InputEvent,
    renderer::SceneRenderer,
    scene::{Camera, Drawable, SceneError, SceneGraph, SceneNode},
};
use resona_lanes::{
    asset_lane::{load_heightmap, load_sound, open_audio_source},
    FinishReason, FrameState, FrameStatsRenderer, FrameUpdater, SceneHandles,
};
use std::path::Path;
use thiserror::Error;

const SPHERE_STACKS: u32 = 24;
const SPHERE_SLICES: u32 = 32;

/// Errors that prevent a session from starting.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// One or more startup steps failed; the report lists them all.
    #[error("startup failed: {0}")]
    Startup(StartupDiagnostics),
    /// The audio source was rejected by the clock.
    #[error(transparent)]
    Audio(#[from] AudioError),
    /// The scene could not be assembled.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// The window or event loop could not be created.
    #[error("initialization failed: {0}")]
    Initialization(String),
}

/// Already-loaded inputs for [`VisualizerSession::assemble`].
pub struct SessionAssets {
    /// The analysis stream.
    pub source: Box<dyn AudioSource>,
    /// Terrain heights.
    pub heightmap: Heightmap,
    /// The decoded clip for playback, if any.
    pub sound: Option<SoundData>,
}

/// Builds the terrain root and its sphere child.
pub fn build_scene(
    config: &VisualizerConfig,
    heightmap: &Heightmap,
) -> Result<(SceneGraph, SceneHandles), SceneError> {
    let size = config.terrain.size;
    let mut terrain = Drawable::new("terrain", MeshData::terrain_grid(heightmap, size, size));
    if let Some(texture) = &config.terrain.colormap {
        terrain = terrain.with_texture(texture.clone());
    }
    let mut sphere = Drawable::new("sphere", MeshData::uv_sphere(SPHERE_STACKS, SPHERE_SLICES));
    if let Some(texture) = &config.terrain.sphere_texture {
        sphere = sphere.with_texture(texture.clone());
    }

    let mut scene = SceneGraph::new();
    let terrain = scene.insert_root(SceneNode::new(terrain))?;
    let sphere = scene.spawn_child(terrain, SceneNode::new(sphere))?;
    Ok((scene, SceneHandles { terrain, sphere }))
}

/// A single playback of one audio file.
///
/// The session owns every piece of mutable state. Dropping it, or calling
/// [`teardown`](Self::teardown), closes the audio clock first and then
/// stops playback.
pub struct VisualizerSession<R: SceneRenderer = FrameStatsRenderer> {
    config: VisualizerConfig,
    clock: AudioClock,
    playback: Box<dyn PlaybackDevice>,
    scene: SceneGraph,
    handles: SceneHandles,
    camera: Camera,
    renderer: R,
    updater: FrameUpdater,
    pending_sound: Option<SoundData>,
    diagnostics: StartupDiagnostics,
    started: bool,
    torn_down: bool,
}

impl VisualizerSession<FrameStatsRenderer> {
    /// Loads `audio_path` and the configured heightmap and assembles a
    /// session that reports frames through a [`FrameStatsRenderer`].
    ///
    /// The audio file is opened twice: once as a seekable analysis stream
    /// and once decoded whole for `playback`. Only the first is required; a
    /// missing heightmap or an undecodable playback copy degrade the
    /// session with a warning.
    pub fn open(
        audio_path: &Path,
        config: VisualizerConfig,
        playback: Box<dyn PlaybackDevice>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let size = config.terrain.size;
        let mut diagnostics = StartupDiagnostics::new();
        diagnostics.info(format!("audio file: {}", audio_path.display()));

        let source = match open_audio_source(audio_path) {
            Ok(source) => Some(source),
            Err(e) => {
                diagnostics.error(e.to_string());
                None
            }
        };

        let heightmap = match &config.terrain.heightmap {
            Some(path) => match load_heightmap(path) {
                Ok(map) => {
                    diagnostics.info(format!(
                        "heightmap: {} ({}x{})",
                        path.display(),
                        map.width(),
                        map.depth()
                    ));
                    map
                }
                Err(e) => {
                    diagnostics.warn(format!("{e}; using a flat terrain"));
                    Heightmap::flat(size, size)
                }
            },
            None => Heightmap::flat(size, size),
        };

        let sound = if config.mute {
            None
        } else {
            match load_sound(audio_path) {
                Ok(sound) => Some(sound),
                Err(e) => {
                    diagnostics.warn(format!("playback disabled: {e:#}"));
                    None
                }
            }
        };

        let Some(source) = source else {
            diagnostics.log();
            return Err(SessionError::Startup(diagnostics));
        };

        let renderer = FrameStatsRenderer::new(config.report_every);
        let assets = SessionAssets {
            source,
            heightmap,
            sound,
        };
        Self::assemble(config, assets, playback, renderer, diagnostics)
    }
}

impl<R: SceneRenderer> VisualizerSession<R> {
    /// Assembles a session from inputs that are already in memory.
    pub fn assemble(
        config: VisualizerConfig,
        assets: SessionAssets,
        playback: Box<dyn PlaybackDevice>,
        renderer: R,
        mut diagnostics: StartupDiagnostics,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let clock = match AudioClock::open(assets.source) {
            Ok(clock) => clock,
            Err(e) => {
                diagnostics.error(e.to_string());
                diagnostics.log();
                return Err(SessionError::Startup(diagnostics));
            }
        };
        diagnostics.info(format!(
            "audio stream: {} Hz, {} frames ({:.2}s)",
            clock.sample_rate(),
            clock.total_frames(),
            clock.total_frames() as f64 / clock.sample_rate() as f64
        ));
        if clock.total_frames() == 0 {
            diagnostics.warn("audio stream is empty; the session will end on its first frame");
        }

        let (scene, handles) = build_scene(&config, &assets.heightmap)?;
        diagnostics.info(format!(
            "scene: {} nodes, terrain {}x{}",
            scene.len(),
            config.terrain.size,
            config.terrain.size
        ));

        let size = config.terrain.size as f32;
        let camera = Camera::new(Vec3::new(size / 2.0, size / 4.0, size * 1.25));
        let updater = FrameUpdater::new(handles, config.terrain.size)
            .with_color(config.color)
            .with_camera_speed(config.camera_speed);

        Ok(Self {
            config,
            clock,
            playback,
            scene,
            handles,
            camera,
            renderer,
            updater,
            pending_sound: assets.sound,
            diagnostics,
            started: false,
            torn_down: false,
        })
    }

    /// Starts playback and the clock together, then logs the startup report.
    /// Calling it again does nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        match self.pending_sound.take() {
            Some(sound) => match self.playback.play(sound) {
                Ok(Some(info)) => self.diagnostics.info(format!(
                    "audio output: {} channel(s) at {} Hz",
                    info.channels, info.sample_rate
                )),
                Ok(None) => self.diagnostics.info("audio output: silent"),
                Err(e) => self
                    .diagnostics
                    .warn(format!("audio output unavailable: {e:#}")),
            },
            None => self.diagnostics.info("audio output: muted"),
        }
        self.diagnostics.log();
        self.clock.start();
        self.started = true;
    }

    /// Produces the frame for the current wall-clock time, starting the
    /// session first if needed.
    pub fn tick(&mut self) -> FrameState {
        self.start();
        let elapsed = self.clock.elapsed_millis();
        self.tick_at(elapsed)
    }

    /// Produces the frame for an explicit elapsed time.
    pub fn tick_at(&mut self, elapsed_millis: u64) -> FrameState {
        let state = self.updater.tick(
            elapsed_millis,
            &mut self.clock,
            &mut self.scene,
            &self.camera,
            &mut self.renderer,
        );
        if let FrameState::Finished(_) = state {
            self.teardown();
        }
        state
    }

    /// Forwards an input event to the frame updater and camera.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.updater.handle_input(event, &mut self.camera);
    }

    /// Runs frames until the session finishes, pausing the configured delay
    /// between frames.
    pub fn run_headless(&mut self) -> FinishReason {
        let delay = self.config.frame_delay();
        loop {
            match self.tick() {
                FrameState::Finished(reason) => return reason,
                FrameState::Running => std::thread::sleep(delay),
            }
        }
    }

    /// Closes the audio clock, then stops playback. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.clock.close();
        self.playback.stop();
        self.torn_down = true;
        log::info!(
            "Session torn down after {} frame(s).",
            self.updater.frames_rendered()
        );
    }

    /// The current state.
    pub fn state(&self) -> FrameState {
        self.updater.state()
    }

    /// The frame updater.
    pub fn updater(&self) -> &FrameUpdater {
        &self.updater
    }

    /// The scene graph.
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The terrain and sphere node ids.
    pub fn handles(&self) -> SceneHandles {
        self.handles
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The configuration the session was built with.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Startup findings, for adding entries before [`start`](Self::start).
    pub fn diagnostics_mut(&mut self) -> &mut StartupDiagnostics {
        &mut self.diagnostics
    }

    /// Returns `true` once [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl<R: SceneRenderer> Drop for VisualizerSession<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
