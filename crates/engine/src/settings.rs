//! Session configuration.
//!
//! Layers, lowest first: built-in defaults, an optional JSON settings file,
//! `STACKER_*` environment variables, then command-line flags (applied by the
//! binary through the setters here).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::types::{GameMode, AFTER_DAS_FRAMES, DAS_FRAMES, FPS, MAX_GRAVITY};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub gravity: u8,
    pub ghost: bool,
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: GameMode,
    /// Queue seed; `None` lets the host pick one
    pub seed: Option<u32>,
    pub das_frames: u32,
    pub after_das_frames: u32,
    pub fps: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity: 0,
            ghost: true,
            mode: GameMode::Marathon,
            seed: None,
            das_frames: DAS_FRAMES,
            after_das_frames: AFTER_DAS_FRAMES,
            fps: FPS,
        }
    }
}

fn deserialize_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GameMode, D::Error> {
    let name = String::deserialize(deserializer)?;
    GameMode::from_str(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown mode `{}`", name)))
}

impl SessionConfig {
    /// Read a JSON settings file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.validated())
    }

    /// Overlay `STACKER_GRAVITY`, `STACKER_GHOST`, `STACKER_MODE` and `STACKER_SEED`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Unparseable values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(gravity) = lookup("STACKER_GRAVITY").and_then(|s| s.trim().parse().ok()) {
            self.set_gravity(gravity);
        }
        if let Some(ghost) = lookup("STACKER_GHOST").and_then(|s| parse_flag(&s)) {
            self.ghost = ghost;
        }
        if let Some(mode) = lookup("STACKER_MODE").and_then(|s| GameMode::from_str(s.trim())) {
            self.mode = mode;
        }
        if let Some(seed) = lookup("STACKER_SEED").and_then(|s| s.trim().parse().ok()) {
            self.seed = Some(seed);
        }
        self
    }

    /// Apply `gravity` if within `0..=MAX_GRAVITY`; otherwise keep the current value.
    pub fn set_gravity(&mut self, gravity: u8) -> bool {
        if gravity > MAX_GRAVITY {
            warn!(gravity, max = MAX_GRAVITY, "gravity out of range, keeping {}", self.gravity);
            return false;
        }
        self.gravity = gravity;
        true
    }

    fn validated(mut self) -> Self {
        if self.gravity > MAX_GRAVITY {
            let requested = self.gravity;
            self.gravity = Self::default().gravity;
            warn!(gravity = requested, "gravity out of range in settings, using default");
        }
        if self.das_frames == 0 || self.after_das_frames >= self.das_frames {
            warn!(
                das = self.das_frames,
                after_das = self.after_das_frames,
                "invalid auto-repeat timing, using defaults"
            );
            self.das_frames = DAS_FRAMES;
            self.after_das_frames = AFTER_DAS_FRAMES;
        }
        self
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
