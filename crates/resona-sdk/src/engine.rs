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

//! The windowed run loop, driven by `winit`.

use crate::session::{SessionError, VisualizerSession};
use anyhow::Result;
use resona_infra::{translate_winit_input, WinitWindow, WinitWindowBuilder};
use resona_lanes::{FinishReason, FrameState};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

/// Frames between window title refreshes.
const TITLE_REFRESH_FRAMES: u64 = 15;

/// The state of the running visualizer, managed by the winit event loop.
struct EngineState {
    session: VisualizerSession,
    window: Option<WinitWindow>,
    finish: Option<FinishReason>,
    init_error: Option<SessionError>,
}

impl EngineState {
    fn step(&mut self, event_loop: &ActiveEventLoop) {
        let state = self.session.tick();
        let frames = self.session.updater().frames_rendered();

        if let (Some(window), Some(frame)) = (&self.window, self.session.renderer().last_frame()) {
            if frames % TITLE_REFRESH_FRAMES == 1 {
                window.set_title(&format!(
                    "{} | {}",
                    self.session.config().window.title,
                    frame.summary()
                ));
            }
        }

        if let FrameState::Finished(reason) = state {
            log::info!("Visualizer finished ({:?}), exiting event loop...", reason);
            self.finish = Some(reason);
            event_loop.exit();
        } else {
            std::thread::sleep(self.session.config().frame_delay());
        }
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        log::info!("EngineState is being dropped. Performing controlled shutdown...");
        self.session.teardown();
        log::info!("Visualizer shutdown complete.");
    }
}

impl ApplicationHandler for EngineState {
    /// Creates the window and starts playback the first time the loop is
    /// ready.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_config = self.session.config().window.clone();
        let window = match WinitWindowBuilder::new()
            .with_title(window_config.title)
            .with_dimensions(window_config.width, window_config.height)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create the window: {}", e);
                self.init_error = Some(SessionError::Initialization(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.inner_size();
        self.session
            .diagnostics_mut()
            .info(format!("window: {}x{} physical pixels", width, height));
        self.session.start();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WinitWindow::id) != Some(id) || self.finish.is_some() {
            return;
        }

        match event {
            WindowEvent::RedrawRequested => self.step(event_loop),
            _ => {
                if let Some(input_event) = translate_winit_input(&event) {
                    log::debug!("Input event: {:?}", input_event);
                    self.session.handle_input(input_event);
                    if self.session.updater().is_quit_requested() {
                        log::info!("Shutdown requested, exiting event loop...");
                        self.step(event_loop);
                    }
                }
            }
        }
    }

    /// Requests the next frame as soon as pending events are handled.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Runs `session` in a window until playback completes or the window closes.
///
/// Blocks the calling thread. The session is torn down before returning.
pub fn run_windowed(session: VisualizerSession) -> Result<FinishReason> {
    log::info!("Resona: starting windowed session...");
    let event_loop = EventLoop::new()?;

    let mut state = EngineState {
        session,
        window: None,
        finish: None,
        init_error: None,
    };
    event_loop.run_app(&mut state)?;

    if let Some(err) = state.init_error.take() {
        return Err(err.into());
    }
    Ok(state.finish.unwrap_or(FinishReason::QuitRequested))
}
