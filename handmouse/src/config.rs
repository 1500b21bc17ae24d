//! Configuration management.
//!
//! Covers session plumbing only: where frames come from, where pointer
//! commands go, screen geometry and stop conditions. Gesture tuning is
//! fixed in code.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::motion::{RegionMapping, Size};

/// Screen size used when neither the config nor the backend provides one.
pub const FALLBACK_SCREEN: Size = Size {
    width: 1920,
    height: 1080,
};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub session: SessionConfig,
}

/// Target screen geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen width in pixels (0 = ask the backend).
    pub width: u32,
    /// Screen height in pixels (0 = ask the backend).
    pub height: u32,
}

/// Landmark input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON-lines landmark stream; "-" reads stdin.
    pub path: String,
}

/// Pointer output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub backend: Backend,
}

/// Pointer backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `enigo` when compiled in, otherwise `log`.
    #[default]
    Auto,
    /// Dry run: log commands only.
    Log,
    /// Inject into the desktop session.
    Enigo,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Log => "log",
            Self::Enigo => "enigo",
        }
    }
}

/// Session loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Stop after this many seconds.
    pub exit_after_secs: Option<u64>,
    /// Seconds between status log lines (0 disables).
    pub status_interval_secs: u64,
    /// Write per-frame overlay reports as JSON lines to this path.
    pub overlay_path: Option<PathBuf>,
    /// Pin fingertips outside the active region to the screen edge.
    pub clamp_to_screen: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "-".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_frames: None,
            exit_after_secs: None,
            status_interval_secs: 60,
            overlay_path: None,
            clamp_to_screen: true,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if (self.screen.width == 0) != (self.screen.height == 0) {
            return Err(crate::Error::Config(format!(
                "screen width and height must both be set or both be 0, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        if self.input.path.trim().is_empty() {
            return Err(crate::Error::Config("input path must not be empty".to_string()));
        }
        if self.session.max_frames == Some(0) {
            return Err(crate::Error::Config("max_frames must be > 0".to_string()));
        }
        if self.session.exit_after_secs == Some(0) {
            return Err(crate::Error::Config("exit_after_secs must be > 0".to_string()));
        }
        Ok(())
    }

    /// Configured screen size, if both dimensions are set.
    pub fn screen_size(&self) -> Option<Size> {
        if self.screen.width > 0 && self.screen.height > 0 {
            Some(Size::new(self.screen.width, self.screen.height))
        } else {
            None
        }
    }

    pub fn region_mapping(&self) -> RegionMapping {
        if self.session.clamp_to_screen {
            RegionMapping::Clamp
        } else {
            RegionMapping::Extrapolate
        }
    }

    /// Load config from file.
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location, or defaults if absent.
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/handmouse/config.toml`, falling back to
    /// `~/.config`.
    pub fn default_path() -> PathBuf {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|dir| dir.join("handmouse").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("handmouse.toml"))
    }

    /// Generate TOML representation.
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.path, "-");
        assert_eq!(config.output.backend, Backend::Auto);
        assert_eq!(config.session.status_interval_secs, 60);
        assert!(config.session.clamp_to_screen);
        assert!(config.screen_size().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[screen]\nwidth = 2560\nheight = 1440\n").unwrap();
        assert_eq!(config.screen_size(), Some(Size::new(2560, 1440)));
        assert_eq!(config.input.path, "-");
        assert!(config.session.clamp_to_screen);
    }

    #[test]
    fn test_backend_names() {
        let config: Config = toml::from_str("[output]\nbackend = \"log\"\n").unwrap();
        assert_eq!(config.output.backend, Backend::Log);
        assert_eq!(Backend::Enigo.as_str(), "enigo");
        assert!(toml::from_str::<Config>("[output]\nbackend = \"x11\"\n").is_err());
    }

    #[test]
    fn test_validate_rejects_half_screen() {
        let mut config = Config::default();
        config.screen.width = 1920;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.session.max_frames = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.exit_after_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_region_mapping() {
        let mut config = Config::default();
        assert_eq!(config.region_mapping(), RegionMapping::Clamp);
        config.session.clamp_to_screen = false;
        assert_eq!(config.region_mapping(), RegionMapping::Extrapolate);
    }

    #[test]
    fn test_config_serialization() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[screen]"));
        assert!(toml.contains("[input]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[session]"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = Config::default();
        original.screen.width = 1280;
        original.screen.height = 800;
        original.output.backend = Backend::Log;
        original.session.max_frames = Some(300);
        original.session.overlay_path = Some(PathBuf::from("/tmp/overlay.jsonl"));

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "[session]\nmax_frames = 0\n").unwrap();
        assert!(matches!(Config::load(&path), Err(crate::Error::Config(_))));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(Config::load(&path), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().ends_with(".toml"));
    }
}
