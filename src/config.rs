use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Level;

/// Prefix for environment overrides, e.g. `GESTURE__DETECTOR__REFRESH_RATE_HZ=30`.
pub const ENV_PREFIX: &str = "GESTURE";
pub const DEFAULT_SETTINGS_FILE: &str = "gesture.toml";
/// Highest accepted tick rate.
pub const MAX_REFRESH_RATE_HZ: u32 = 1_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub detector: DetectorSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub refresh_rate_hz: u32,
    pub snapshot_log_every: u64,
    pub classify_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Synthetic,
    Directory,
    Image,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
    pub looping: bool,
    pub width: u32,
    pub height: u32,
    pub skin_ratio: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            detector: DetectorSettings::default(),
            source: SourceSettings::default(),
        }
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            snapshot_log_every: 120,
            classify_timeout_ms: 250,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Synthetic,
            path: None,
            looping: true,
            width: 640,
            height: 480,
            skin_ratio: 0.12,
        }
    }
}

impl Settings {
    /// Defaults, then the optional settings file, then environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        self.detector.validate()?;
        self.source.validate()
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::Message(format!("Unknown log level '{}'", self.log_level)))
    }
}

impl DetectorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_rate_hz == 0 || self.refresh_rate_hz > MAX_REFRESH_RATE_HZ {
            return Err(ConfigError::Message(format!(
                "Refresh rate must be between 1 and {} Hz, got {}",
                MAX_REFRESH_RATE_HZ, self.refresh_rate_hz
            )));
        }
        if self.classify_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "Classification timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_nanos((1_000_000_000 / self.refresh_rate_hz.max(1) as u64).max(1))
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_millis(self.classify_timeout_ms)
    }
}

impl SourceSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            SourceKind::Synthetic => {
                if self.width == 0 || self.height == 0 {
                    return Err(ConfigError::Message(
                        "Synthetic frames need a non-zero width and height".to_string(),
                    ));
                }
                if !(0.0..=1.0).contains(&self.skin_ratio) {
                    return Err(ConfigError::Message(
                        "Skin ratio must be between 0.0 and 1.0".to_string(),
                    ));
                }
            }
            SourceKind::Directory | SourceKind::Image => {
                if self.path.is_none() {
                    return Err(ConfigError::Message(format!(
                        "A path is required for the {:?} source",
                        self.kind
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn synthetic(width: u32, height: u32, skin_ratio: f64) -> Self {
        Self {
            kind: SourceKind::Synthetic,
            width,
            height,
            skin_ratio,
            ..Self::default()
        }
    }

    pub fn directory(path: impl Into<PathBuf>, looping: bool) -> Self {
        Self {
            kind: SourceKind::Directory,
            path: Some(path.into()),
            looping,
            ..Self::default()
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::Image,
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.log_level().unwrap(), Level::INFO);
        assert_eq!(settings.detector.classify_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", Uuid::new_v4()));
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.detector.refresh_rate_hz, 60);
        assert_eq!(settings.source.kind, SourceKind::Synthetic);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("gesture-settings-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gesture.toml");
        std::fs::write(
            &path,
            "log_level = \"debug\"\n\n[detector]\nrefresh_rate_hz = 30\n\n[source]\nkind = \"directory\"\npath = \"frames\"\nlooping = false\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.log_level().unwrap(), Level::DEBUG);
        assert_eq!(settings.detector.refresh_rate_hz, 30);
        assert_eq!(settings.detector.snapshot_log_every, 120);
        assert_eq!(settings.source.kind, SourceKind::Directory);
        assert_eq!(settings.source.path, Some(PathBuf::from("frames")));
        assert!(!settings.source.looping);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_invalid_values() {
        let mut settings = Settings::default();
        settings.detector.refresh_rate_hz = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.source.skin_ratio = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.source.kind = SourceKind::Image;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn tick_period_follows_refresh_rate() {
        let detector = DetectorSettings {
            refresh_rate_hz: 50,
            ..DetectorSettings::default()
        };
        assert_eq!(detector.tick_period(), Duration::from_millis(20));
    }

    #[test]
    fn refresh_rate_has_a_ceiling() {
        let mut detector = DetectorSettings {
            refresh_rate_hz: MAX_REFRESH_RATE_HZ,
            ..DetectorSettings::default()
        };
        assert!(detector.validate().is_ok());
        assert_eq!(detector.tick_period(), Duration::from_millis(1));

        detector.refresh_rate_hz = MAX_REFRESH_RATE_HZ + 1;
        assert!(detector.validate().is_err());

        detector.refresh_rate_hz = 2_000_000_000;
        assert!(detector.validate().is_err());
        assert!(detector.tick_period() > Duration::ZERO);
    }
}
