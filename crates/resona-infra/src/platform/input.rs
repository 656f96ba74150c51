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

//! Translates `winit` window events into the visualizer's [`InputEvent`]s.

use resona_core::platform::{InputEvent, Key};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates a `winit::event::WindowEvent` into an [`InputEvent`].
///
/// Closing the window becomes [`InputEvent::Quit`]. Key presses are reported
/// once, without auto-repeat, and only for keys the visualizer binds.
/// Everything else (resizes, focus, releases) yields `None`.
pub fn translate_winit_input(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            if key_event.state != ElementState::Pressed || key_event.repeat {
                return None;
            }
            match key_event.physical_key {
                PhysicalKey::Code(keycode) => {
                    map_keycode(keycode).map(|key| InputEvent::KeyPressed { key })
                }
                PhysicalKey::Unidentified(_) => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        _ => None,
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a physical key to a visualizer key. Letters map to their
/// lowercase character.
fn map_keycode(keycode: KeyCode) -> Option<Key> {
    match keycode {
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        KeyCode::ArrowLeft => Some(Key::ArrowLeft),
        KeyCode::ArrowRight => Some(Key::ArrowRight),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Escape => Some(Key::Escape),
        other => {
            let name = format!("{other:?}");
            let mut letters = name.strip_prefix("Key")?.chars();
            match (letters.next(), letters.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(Key::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}
