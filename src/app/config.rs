//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when RUST_LOG is unset
    pub filter: String,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// UI scale multiplier reported by the headless graphics service
    pub ui_scale: f32,
    /// Frame loop rate in frames per second
    pub frame_rate: u32,
    /// Number of frames the demo session runs
    pub demo_frames: u32,
}

/// Host window geometry for the headless session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. Built-in defaults
    /// 2. config/{profile}.toml, next to the executable or in ./config
    /// 3. Environment variables with prefix OVERLAY_ (e.g., OVERLAY_INPUT__UI_SCALE=1.5)
    pub fn load(profile: &str) -> Result<Self> {
        let dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&dir, profile)
    }

    /// Loads `{dir}/{profile}.toml` plus environment overrides
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self> {
        let defaults = Self::defaults(profile);

        let config = Config::builder()
            .set_default("logging.filter", defaults.logging.filter)?
            .set_default("input.ui_scale", defaults.input.ui_scale as f64)?
            .set_default("input.frame_rate", defaults.input.frame_rate as i64)?
            .set_default("input.demo_frames", defaults.input.demo_frames as i64)?
            .set_default("window.width", defaults.window.width as i64)?
            .set_default("window.height", defaults.window.height as i64)?
            .add_source(File::from(dir.join(profile).as_path()).required(false))
            // Use __ as separator for nested fields (e.g., OVERLAY_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("OVERLAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration using the OVERLAY_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile = std::env::var("OVERLAY_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Rejects values the frame loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let scale = self.input.ui_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(OverlayError::InvalidScale(scale));
        }
        if self.input.frame_rate == 0 {
            return Err(OverlayError::InvalidFrameRate);
        }
        Ok(())
    }

    fn defaults(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            logging: LoggingConfig {
                filter: "info".to_string(),
            },
            input: InputConfig {
                ui_scale: 1.0,
                frame_rate: 60,
                demo_frames: 120,
            },
            window: WindowConfig {
                width: 1920,
                height: 1080,
            },
        }
    }

    /// Finds the config directory next to the executable, then in the current directory
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::defaults("release"))
    }
}
