// config.rs - Display settings loaded from JSON and merged with CLI flags
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::ChannelOrder;
use crate::demo::Pattern;

pub const DEFAULT_DEVICE: &str = "/dev/fb1";
pub const DEFAULT_FPS: f32 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Device path or dummy_<W>x<H>
    pub device: String,
    /// Maximum update rate
    pub fps: f32,
    pub channel_order: ChannelOrder,
    pub pattern: Pattern,
    /// Frame limit, unlimited when absent
    pub frames: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            fps: DEFAULT_FPS,
            channel_order: ChannelOrder::default(),
            pattern: Pattern::default(),
            frames: None,
        }
    }
}

impl DisplayConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse display config")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Config file (if any) overridden by the flags that were given, then validated
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(device) = &cli.device {
            self.device = device.clone();
        }
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(frames) = cli.frames {
            self.frames = Some(frames);
        }
        if let Some(pattern) = cli.pattern {
            self.pattern = pattern;
        }
        if let Some(order) = cli.channel_order {
            self.channel_order = order;
        }
    }

    /// Number of frames to run; limits beyond `usize` are unlimited
    pub fn frame_limit(&self) -> usize {
        self.frames
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX))
    }

    pub fn validate(&self) -> Result<()> {
        if self.device.trim().is_empty() {
            bail!("device must not be empty");
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            bail!("fps must be a positive number, got {}", self.fps);
        }
        Ok(())
    }
}
