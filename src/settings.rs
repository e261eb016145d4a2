use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::generate::DEFAULT_POINT_COUNT;
use super::playback::{Input, DEFAULT_AUTOPLAY_RATE, DEFAULT_SPEED};
use super::render::MAX_FRAME_SIDE;

/// An input fed to the driver at the start of a given tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub tick: u64,
    pub input: Input,
}

/// Everything the driver binary can be told from its settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub point_count: usize,
    /// Fixed seed for the stage clouds. Fresh entropy when absent.
    pub seed: Option<u64>,
    pub autoplay: bool,
    pub speed: f32,
    pub autoplay_rate: f32,
    pub ticks: u64,
    pub tick_interval_ms: u64,
    pub width: u32,
    pub height: u32,
    pub frame_dir: Option<PathBuf>,
    /// Save every n-th frame
    pub frame_every: u64,
    pub export_dir: Option<PathBuf>,
    pub script: Vec<ScriptedInput>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            point_count: DEFAULT_POINT_COUNT,
            seed: None,
            autoplay: false,
            speed: DEFAULT_SPEED,
            autoplay_rate: DEFAULT_AUTOPLAY_RATE,
            ticks: 600,
            tick_interval_ms: 16,
            width: 800,
            height: 600,
            frame_dir: None,
            frame_every: 10,
            export_dir: None,
            script: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let text = fs::read_to_string(path)?;
        Settings::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Settings> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(Error::InvalidSettings(msg.to_string())) };
        if self.point_count == 0 {
            return invalid("point_count must be positive");
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return invalid("speed must be a finite, non-negative number");
        }
        if !self.autoplay_rate.is_finite() || self.autoplay_rate < 0.0 {
            return invalid("autoplay_rate must be a finite, non-negative number");
        }
        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be positive");
        }
        if self.width > MAX_FRAME_SIDE || self.height > MAX_FRAME_SIDE {
            return invalid(&format!("width and height must be at most {}", MAX_FRAME_SIDE));
        }
        if self.frame_every == 0 {
            return invalid("frame_every must be positive");
        }
        Ok(())
    }

    /// Scripted inputs due at `tick`, in file order
    pub fn inputs_at(&self, tick: u64) -> impl Iterator<Item = &Input> + '_ {
        self.script
            .iter()
            .filter(move |s| s.tick == tick)
            .map(|s| &s.input)
    }
}
