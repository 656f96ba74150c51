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

use resona_core::{
    audio::{AudioClock, ClockReading},
    platform::{InputEvent, Key},
    renderer::{ColorMode, FrameHints, SceneRenderer},
    scene::{Camera, NodeId, SceneError, SceneGraph},
};

use super::placement::{place_sphere, place_terrain, sphere_size};

/// Default camera displacement per movement key press.
pub const DEFAULT_CAMERA_SPEED: f32 = 5.0;

/// The two nodes the updater rewrites every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    /// The terrain, root of the tree.
    pub terrain: NodeId,
    /// The sphere, child of the terrain.
    pub sphere: NodeId,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// A quit event arrived.
    QuitRequested,
    /// The audio clock failed to produce a reading.
    AudioFault,
    /// A scene handle no longer resolved to a node.
    SceneFault,
    /// Progress reached `1.0`.
    PlaybackComplete,
}

/// The updater's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Frames are being produced.
    Running,
    /// Terminal. The audio source has been released.
    Finished(FinishReason),
}

/// Drives one visualizer session frame by frame.
///
/// Each [`tick`](Self::tick) takes exactly one clock reading and uses it for
/// both nodes, so the terrain and the sphere never disagree about time within
/// a frame. The updater only writes local transforms; the renderer is
/// responsible for composing them.
#[derive(Debug)]
pub struct FrameUpdater {
    handles: SceneHandles,
    terrain_size: f32,
    camera_speed: f32,
    color: ColorMode,
    state: FrameState,
    quit_requested: bool,
    frames: u64,
    last_reading: Option<ClockReading>,
}

impl FrameUpdater {
    /// Creates a running updater for a terrain of `terrain_size` units.
    pub fn new(handles: SceneHandles, terrain_size: u32) -> Self {
        Self {
            handles,
            terrain_size: terrain_size as f32,
            camera_speed: DEFAULT_CAMERA_SPEED,
            color: ColorMode::default(),
            state: FrameState::Running,
            quit_requested: false,
            frames: 0,
            last_reading: None,
        }
    }

    /// Sets the initial color mode.
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Sets the camera displacement per movement key.
    pub fn with_camera_speed(mut self, speed: f32) -> Self {
        self.camera_speed = speed;
        self
    }

    /// The current state.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Returns `true` until the session finishes.
    pub fn is_running(&self) -> bool {
        self.state == FrameState::Running
    }

    /// The selected color mode.
    pub fn color(&self) -> ColorMode {
        self.color
    }

    /// Progress of the last reading, zero before the first frame.
    pub fn progress(&self) -> f32 {
        self.last_reading.map_or(0.0, |r| r.progress)
    }

    /// The reading used by the last frame.
    pub fn last_reading(&self) -> Option<ClockReading> {
        self.last_reading
    }

    /// Number of frames handed to the renderer.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Asks the session to stop at the next frame boundary.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Returns `true` while a quit is waiting for the next frame boundary.
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested && self.is_running()
    }

    /// Applies one input event: quit requests, color selection, and camera
    /// movement.
    pub fn handle_input(&mut self, event: InputEvent, camera: &mut Camera) {
        match event {
            InputEvent::Quit => self.request_quit(),
            InputEvent::PointerMoved { x, y } => camera.mouse_look(x, y),
            InputEvent::KeyPressed { key } => {
                if let Some(color) = ColorMode::from_key(key) {
                    log::debug!("Color mode set to {}", color);
                    self.color = color;
                    return;
                }
                let speed = self.camera_speed;
                match key {
                    Key::ArrowLeft => camera.move_left(speed),
                    Key::ArrowRight => camera.move_right(speed),
                    Key::ArrowUp => camera.move_forward(speed),
                    Key::ArrowDown => camera.move_backward(speed),
                    Key::PageUp => camera.move_up(speed),
                    Key::PageDown => camera.move_down(speed),
                    Key::Escape => self.request_quit(),
                    Key::Char(_) => {}
                }
            }
        }
    }

    /// Produces one frame for `elapsed_millis` and returns the new state.
    ///
    /// A finished updater does nothing. Any failure to read the clock or to
    /// resolve a scene node ends the session instead of skipping the frame.
    /// A renderer error is logged and the session continues.
    pub fn tick(
        &mut self,
        elapsed_millis: u64,
        clock: &mut AudioClock,
        scene: &mut SceneGraph,
        camera: &Camera,
        renderer: &mut dyn SceneRenderer,
    ) -> FrameState {
        if !self.is_running() {
            return self.state;
        }
        if self.quit_requested {
            self.finish(FinishReason::QuitRequested, clock);
            return self.state;
        }

        let reading = match clock.query(elapsed_millis) {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("Audio clock failed at {} ms: {}", elapsed_millis, e);
                self.finish(FinishReason::AudioFault, clock);
                return self.state;
            }
        };
        self.last_reading = Some(reading);

        if let Err(e) = self.place_nodes(scene, &reading) {
            log::error!("Scene update failed: {}", e);
            self.finish(FinishReason::SceneFault, clock);
            return self.state;
        }

        let hints = FrameHints {
            amplitude: reading.amplitude,
            progress: reading.progress,
            color: self.color,
        };
        if let Err(e) = renderer.render(scene, camera, &hints) {
            log::warn!("Renderer failed on frame {}: {:#}", self.frames, e);
        }
        self.frames += 1;

        log::trace!(
            "frame {} @ {} ms: index={} progress={:.4} amplitude={:.4}",
            self.frames,
            elapsed_millis,
            reading.sample_index,
            reading.progress,
            reading.amplitude
        );

        if reading.progress >= 1.0 {
            self.finish(FinishReason::PlaybackComplete, clock);
        }
        self.state
    }

    fn place_nodes(&self, scene: &mut SceneGraph, reading: &ClockReading) -> Result<(), SceneError> {
        place_terrain(
            scene.local_transform_mut(self.handles.terrain)?,
            self.terrain_size,
            reading.progress,
        );
        let size = sphere_size(reading.amplitude, self.terrain_size);
        place_sphere(
            scene.local_transform_mut(self.handles.sphere)?,
            self.terrain_size,
            size,
            reading.progress,
        );
        Ok(())
    }

    fn finish(&mut self, reason: FinishReason, clock: &mut AudioClock) {
        log::info!(
            "Session finished after {} frame(s): {:?}",
            self.frames,
            reason
        );
        clock.close();
        self.state = FrameState::Finished(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use resona_core::{
        asset::MeshData,
        audio::BufferedSource,
        math::{Mat4, Vec3},
        scene::{Drawable, SceneNode},
    };

    #[derive(Default)]
    struct RecordingRenderer {
        hints: Vec<FrameHints>,
        fail: bool,
    }

    impl SceneRenderer for RecordingRenderer {
        fn render(&mut self, _: &SceneGraph, _: &Camera, hints: &FrameHints) -> Result<()> {
            self.hints.push(*hints);
            if self.fail {
                anyhow::bail!("device lost");
            }
            Ok(())
        }
    }

    struct Fixture {
        clock: AudioClock,
        scene: SceneGraph,
        camera: Camera,
        renderer: RecordingRenderer,
        updater: FrameUpdater,
    }

    impl Fixture {
        fn new(frames: Vec<i32>) -> Self {
            let clock = AudioClock::open(Box::new(BufferedSource::new(1_000, frames))).unwrap();
            let mut scene = SceneGraph::new();
            let terrain = scene
                .insert_root(SceneNode::new(Drawable::new("terrain", MeshData::default())))
                .unwrap();
            let sphere = scene
                .spawn_child(
                    terrain,
                    SceneNode::new(Drawable::new("sphere", MeshData::default())),
                )
                .unwrap();
            Self {
                clock,
                scene,
                camera: Camera::default(),
                renderer: RecordingRenderer::default(),
                updater: FrameUpdater::new(SceneHandles { terrain, sphere }, 256),
            }
        }

        fn tick(&mut self, ms: u64) -> FrameState {
            self.updater.tick(
                ms,
                &mut self.clock,
                &mut self.scene,
                &self.camera,
                &mut self.renderer,
            )
        }
    }

    #[test]
    fn starts_running_with_zero_progress() {
        let fx = Fixture::new(vec![0; 1_000]);
        assert_eq!(fx.updater.state(), FrameState::Running);
        assert_eq!(fx.updater.progress(), 0.0);
        assert_eq!(fx.updater.color(), ColorMode::G);
    }

    #[test]
    fn finishes_when_progress_reaches_one() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        assert_eq!(fx.tick(500), FrameState::Running);
        assert_eq!(
            fx.tick(1_000),
            FrameState::Finished(FinishReason::PlaybackComplete)
        );
        assert!(fx.clock.is_closed());
        assert_eq!(fx.renderer.hints.len(), 2);
        assert_eq!(fx.renderer.hints[1].progress, 1.0);

        // Further ticks are no-ops.
        fx.tick(2_000);
        assert_eq!(fx.renderer.hints.len(), 2);
        assert_eq!(fx.updater.frames_rendered(), 2);
    }

    #[test]
    fn quit_is_honored_at_frame_top() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        fx.tick(10);
        fx.updater.handle_input(InputEvent::Quit, &mut fx.camera);
        assert_eq!(fx.tick(20), FrameState::Finished(FinishReason::QuitRequested));
        assert_eq!(fx.renderer.hints.len(), 1);
        assert!(fx.clock.is_closed());
    }

    #[test]
    fn empty_audio_ends_with_fault() {
        let mut fx = Fixture::new(Vec::new());
        assert_eq!(fx.tick(0), FrameState::Finished(FinishReason::AudioFault));
        assert!(fx.renderer.hints.is_empty());
    }

    #[test]
    fn renderer_errors_do_not_stop_the_session() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        fx.renderer.fail = true;
        assert_eq!(fx.tick(100), FrameState::Running);
        assert_eq!(fx.updater.frames_rendered(), 1);
    }

    #[test]
    fn one_reading_drives_both_nodes() {
        let loud = (i32::MAX as f32 * 0.05) as i32;
        let mut fx = Fixture::new(vec![loud; 1_000]);
        fx.tick(250);

        let terrain = fx.scene.get(fx.updater.handles.terrain).unwrap();
        let mut expected_terrain = resona_core::math::Transform::new();
        place_terrain(&mut expected_terrain, 256.0, 0.25);
        assert_eq!(terrain.local_transform(), &expected_terrain);

        let sphere = fx.scene.get(fx.updater.handles.sphere).unwrap();
        let scale = Mat4::from(*sphere.local_transform()).get_row(1).y;
        // 0.05 * 256 / 4 = 3.2, yawed so the Y scale is untouched.
        assert!((scale - 3.2).abs() < 1e-3, "scale was {scale}");
        assert_eq!(fx.renderer.hints[0].progress, 0.25);
    }

    #[test]
    fn color_keys_update_hints() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        fx.updater.handle_input(
            InputEvent::KeyPressed { key: Key::Char('r') },
            &mut fx.camera,
        );
        fx.tick(0);
        assert_eq!(fx.renderer.hints[0].color, ColorMode::R);
    }

    #[test]
    fn movement_keys_move_camera() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        fx.updater = fx.updater.with_camera_speed(2.0);
        fx.updater.handle_input(
            InputEvent::KeyPressed { key: Key::PageUp },
            &mut fx.camera,
        );
        assert_eq!(fx.camera.eye(), Vec3::new(0.0, 2.0, 0.0));
        assert!(!fx.updater.is_quit_requested());
        fx.updater.handle_input(
            InputEvent::KeyPressed { key: Key::Escape },
            &mut fx.camera,
        );
        assert!(fx.updater.is_quit_requested());
        assert_eq!(fx.tick(0), FrameState::Finished(FinishReason::QuitRequested));
        assert!(!fx.updater.is_quit_requested());
    }

    #[test]
    fn stale_handle_is_a_scene_fault() {
        let mut fx = Fixture::new(vec![0; 1_000]);
        let sphere = fx.updater.handles.sphere;
        fx.scene.remove(sphere).unwrap();
        assert_eq!(fx.tick(0), FrameState::Finished(FinishReason::SceneFault));
    }
}
