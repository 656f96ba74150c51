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

//! The rendering contract: what the frame loop hands over every frame.
//!
//! Renderers read the scene graph and never write it. World transforms are
//! theirs to accumulate from the local transforms the frame loop sets.

use crate::platform::Key;
use crate::scene::{Camera, SceneGraph};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which color channel the renderer emphasises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Red base color.
    #[serde(alias = "r", alias = "red")]
    R,
    /// Green base color.
    #[default]
    #[serde(alias = "g", alias = "green")]
    G,
    /// Blue base color.
    #[serde(alias = "b", alias = "blue")]
    B,
}

impl ColorMode {
    /// The color selected by a key, if any. `r`, `g` and `b` select.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('r') => Some(Self::R),
            Key::Char('g') => Some(Self::G),
            Key::Char('b') => Some(Self::B),
            _ => None,
        }
    }

    /// The base color as linear RGB.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Self::R => [1.0, 0.0, 0.0],
            Self::G => [0.0, 1.0, 0.0],
            Self::B => [0.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::R => 'R',
            Self::G => 'G',
            Self::B => 'B',
        };
        write!(f, "{c}")
    }
}

/// Per-frame values passed through to the renderer alongside the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameHints {
    /// Normalized amplitude for this frame.
    pub amplitude: f32,
    /// Playback progress for this frame.
    pub progress: f32,
    /// The selected base color.
    pub color: ColorMode,
}

/// A consumer of the scene graph that draws one frame at a time.
pub trait SceneRenderer {
    /// Draws the current state of `scene` as seen from `camera`.
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, hints: &FrameHints) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_keys() {
        assert_eq!(ColorMode::from_key(Key::Char('r')), Some(ColorMode::R));
        assert_eq!(ColorMode::from_key(Key::Char('b')), Some(ColorMode::B));
        assert_eq!(ColorMode::from_key(Key::Char('x')), None);
        assert_eq!(ColorMode::from_key(Key::ArrowUp), None);
        assert_eq!(ColorMode::default(), ColorMode::G);
        assert_eq!(ColorMode::B.to_string(), "B");
    }
}
