//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`AMIUS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use amius_core::{Camera, Vec3};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine and frame loop configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Camera configuration, shared by both screens
    #[serde(default)]
    pub camera: CameraConfig,
    /// Key binding overrides
    #[serde(default)]
    pub input: InputConfig,
    /// Loader channel configuration
    #[serde(default)]
    pub channel: ChannelConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`AMIUS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // AMIUS_ENGINE__PLATFORM=test -> engine.platform = "test"
        figment = figment.merge(Env::prefixed("AMIUS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Platform name reported to the engine
    pub platform: String,
    /// Target frame time in milliseconds
    pub frame_time_ms: u64,
    /// Stop after this many frames even if START was never pressed (0 = no limit)
    pub max_frames: u32,
    /// Root directory of the asset tree
    pub assets_dir: String,
    /// Material library loaded into the top scene (relative to `assets_dir`)
    pub materials: String,
    /// Logical path of the background track played by the top scene (empty = none)
    pub music: String,
    /// Background music volume (0-100)
    pub music_volume: u8,
    /// Scripted input: each step holds `keys` for `frames` frames
    pub script: Vec<ScriptStep>,
}

/// One step of scripted input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frames: u32,
    /// Desktop key names, see [`InputMapper`](crate::input::InputMapper)
    #[serde(default)]
    pub keys: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: "desktop".to_string(),
            frame_time_ms: 16,
            max_frames: 600,
            assets_dir: "data".to_string(),
            materials: "materials.ron".to_string(),
            music: String::new(),
            music_volume: 100,
            script: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_time_ms)
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub position: [f32; 3],
    /// Starting rotation in radians [x, y, z]
    pub rotation: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Movement speed (units per second) while a direction is held
    pub move_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            fov: 40.0,
            near: 0.01,
            far: 1000.0,
            aspect: 800.0 / 600.0,
            move_speed: 0.5,
        }
    }
}

impl CameraConfig {
    /// Build a camera with these settings
    pub fn to_camera(&self) -> Camera {
        Camera::new(
            Vec3::from(self.position),
            Vec3::from(self.rotation),
            self.near,
            self.far,
            self.fov.to_radians(),
            self.aspect,
        )
    }
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Button name -> desktop key name, e.g. `START = "space"`
    pub bindings: HashMap<String, String>,
}

/// Loader channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Deliver messages oldest first instead of newest first
    pub fifo: bool,
    /// How long the main loop waits for the loader before giving up (ms)
    pub loader_timeout_ms: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            fifo: false,
            loader_timeout_ms: 2000,
        }
    }
}

impl ChannelConfig {
    pub fn loader_timeout(&self) -> Duration {
        Duration::from_millis(self.loader_timeout_ms)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log per-frame statistics every this many frames (0 = never)
    pub stats_interval: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.platform, "desktop");
        assert_eq!(config.camera.near, 0.01);
        assert_eq!(config.camera.far, 1000.0);
        assert!(!config.channel.fifo);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("platform"));
        assert!(toml.contains("loader_timeout_ms"));
    }

    #[test]
    fn test_camera_from_config() {
        let config = CameraConfig {
            position: [1.0, 2.0, 3.0],
            ..Default::default()
        };
        let camera = config.to_camera();
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!((camera.fov_y() - 40f32.to_radians()).abs() < 1e-6);
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[camera]\nfov = 60.0\n").unwrap();
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.near, 0.01);
        assert_eq!(config.engine.frame_time_ms, 16);
    }

    #[test]
    fn test_script_steps_parse() {
        let config: AppConfig = toml::from_str(
            "[[engine.script]]\nframes = 10\nkeys = [\"d\"]\n\n[[engine.script]]\nframes = 1\n",
        )
        .unwrap();
        assert_eq!(config.engine.script.len(), 2);
        assert_eq!(config.engine.script[0].keys, vec!["d".to_string()]);
        assert!(config.engine.script[1].keys.is_empty());
    }

    #[test]
    fn test_bindings_parse() {
        let config: AppConfig = toml::from_str("[input.bindings]\nSTART = \"space\"\n").unwrap();
        assert_eq!(config.input.bindings.get("START").map(String::as_str), Some("space"));
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.engine.frame_time(), Duration::from_millis(16));
        assert_eq!(config.channel.loader_timeout(), Duration::from_secs(2));
    }
}
