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

//! `resona-player`: plays an audio file while a heightmap terrain and a
//! sphere pulse and turn with it.

use anyhow::{Context, Result};
use clap::Parser;
use resona_sdk::{
    run_windowed, CpalPlayback, FinishReason, NullPlayback, PlaybackDevice, VisualizerConfig,
    VisualizerSession,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The audio file to play and visualize.
    audio: PathBuf,

    /// A TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grayscale image used as the terrain heightmap.
    #[arg(long, value_name = "IMAGE")]
    heightmap: Option<PathBuf>,

    /// Terrain grid resolution.
    #[arg(long)]
    terrain_size: Option<u32>,

    /// Run without a window, logging frames instead.
    #[arg(long)]
    headless: bool,

    /// Do not play the audio.
    #[arg(long)]
    mute: bool,

    /// Window width.
    #[arg(long)]
    width: Option<u32>,

    /// Window height.
    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    fn config(&self) -> Result<VisualizerConfig> {
        let mut config = match &self.config {
            Some(path) => VisualizerConfig::load(path)?,
            None => VisualizerConfig::default(),
        };
        if let Some(heightmap) = &self.heightmap {
            config.terrain.heightmap = Some(heightmap.clone());
        }
        if let Some(size) = self.terrain_size {
            config.terrain.size = size;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        config.mute |= self.mute;
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<FinishReason> {
    let config = cli.config().context("Invalid configuration")?;
    let headless = cli.headless;

    let playback: Box<dyn PlaybackDevice> = if config.mute {
        Box::new(NullPlayback::default())
    } else {
        Box::new(CpalPlayback::new())
    };

    let mut session = VisualizerSession::open(&cli.audio, config, playback)
        .with_context(|| format!("Cannot visualize '{}'", cli.audio.display()))?;

    if headless {
        Ok(session.run_headless())
    } else {
        run_windowed(session)
    }
}

fn main() -> ExitCode {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("symphonia_core", log::LevelFilter::Warn)
        .filter_module("symphonia_format_riff", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(reason) => {
            log::info!("Done: {:?}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_path_is_required() {
        assert!(Cli::try_parse_from(["resona-player"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "resona-player",
            "song.ogg",
            "--terrain-size",
            "64",
            "--heightmap",
            "hills.png",
            "--mute",
            "--width",
            "800",
        ])
        .unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.terrain.size, 64);
        assert_eq!(config.terrain.heightmap, Some(PathBuf::from("hills.png")));
        assert_eq!(config.window.width, 800);
        assert!(config.mute);
        assert!(!cli.headless);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
