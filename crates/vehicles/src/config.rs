//! Simulation tuning. Loaded from vehicles.ron at startup.

use procgen::ScalePatternConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SimError;

/// Largest skin raster edge `scale_pattern` hands to the factory.
pub const MAX_TEXTURE_SIZE: u32 = 8192;

/// Persistent simulation settings. Loaded from `vehicles.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seconds between behavior re-rolls.
    #[serde(default = "default_behavior_interval")]
    pub behavior_interval: f32,
    /// Probability that a behavior change plays the instance's sound cue.
    #[serde(default = "default_sound_chance")]
    pub sound_chance: f32,
    /// Player interaction range for `nearest_vehicle`.
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: f32,
    /// Patrol drift speed in units per second.
    #[serde(default = "default_patrol_speed")]
    pub patrol_speed: f32,
    /// Angular frequency of the patrol circle, radians per second.
    #[serde(default = "default_patrol_frequency")]
    pub patrol_frequency: f32,
    /// Per-frame chance that a grazer turns.
    #[serde(default = "default_graze_turn_chance")]
    pub graze_turn_chance: f32,
    /// Fraction of species speed used while grazing.
    #[serde(default = "default_graze_speed_factor")]
    pub graze_speed_factor: f32,
    /// Edge of the square skin texture in pixels.
    #[serde(default = "default_texture_size")]
    pub texture_size: u32,
    /// Edge of one scale cell in pixels.
    #[serde(default = "default_scale_cell_size")]
    pub scale_cell_size: u32,
    #[serde(default = "default_texture_repeat")]
    pub texture_repeat: f32,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Frames simulated by the `dinosim` demo.
    #[serde(default = "default_demo_frames")]
    pub demo_frames: u32,
    /// Frame delta used by the `dinosim` demo, seconds.
    #[serde(default = "default_demo_delta")]
    pub demo_delta: f32,
}

fn default_behavior_interval() -> f32 {
    10.0
}
fn default_sound_chance() -> f32 {
    0.3
}
fn default_interaction_radius() -> f32 {
    20.0
}
fn default_patrol_speed() -> f32 {
    10.0
}
fn default_patrol_frequency() -> f32 {
    0.5
}
fn default_graze_turn_chance() -> f32 {
    0.05
}
fn default_graze_speed_factor() -> f32 {
    0.2
}
fn default_texture_size() -> u32 {
    1024
}
fn default_scale_cell_size() -> u32 {
    16
}
fn default_texture_repeat() -> f32 {
    4.0
}
fn default_demo_frames() -> u32 {
    1200
}
fn default_demo_delta() -> f32 {
    1.0 / 60.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            behavior_interval: default_behavior_interval(),
            sound_chance: default_sound_chance(),
            interaction_radius: default_interaction_radius(),
            patrol_speed: default_patrol_speed(),
            patrol_frequency: default_patrol_frequency(),
            graze_turn_chance: default_graze_turn_chance(),
            graze_speed_factor: default_graze_speed_factor(),
            texture_size: default_texture_size(),
            scale_cell_size: default_scale_cell_size(),
            texture_repeat: default_texture_repeat(),
            seed: None,
            demo_frames: default_demo_frames(),
            demo_delta: default_demo_delta(),
        }
    }
}

impl SimConfig {
    /// Load config from `vehicles.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path with the same fallback as `load`.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::from_ron_str(&data) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("{} at {:?}, using defaults", e, path);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn from_ron_str(data: &str) -> Result<Self, SimError> {
        ron::from_str(data).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Save current config to `vehicles.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Skin raster settings for the model factory. The edge is capped at `MAX_TEXTURE_SIZE`.
    pub fn scale_pattern(&self) -> ScalePatternConfig {
        if self.texture_size > MAX_TEXTURE_SIZE {
            log::warn!(
                "texture_size {} exceeds {}, clamping",
                self.texture_size,
                MAX_TEXTURE_SIZE
            );
        }
        ScalePatternConfig {
            size: self.texture_size.min(MAX_TEXTURE_SIZE),
            cell_size: self.scale_cell_size,
            repeat: self.texture_repeat,
            ..Default::default()
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("vehicles.ron")
}
