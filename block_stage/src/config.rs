//! Stage configuration: defaults, JSON file, env overrides, data locations.

use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_BUCKET_DEPTH, DEFAULT_LERP_SPEED};

const CONFIG_ENV: &str = "STAGE_CONFIG";
const LERP_SPEED_ENV: &str = "STAGE_LERP_SPEED";
const DEBOUNCE_ENV: &str = "STAGE_DEBOUNCE_MS";
const BLOCKS_FIXTURE_ENV: &str = "BLOCKS_FIXTURE";
const HASH_RATE_FIXTURE_ENV: &str = "HASH_RATE_FIXTURE";
const START_DAY_ENV: &str = "START_DAY";

const DEFAULT_BLOCKS_FIXTURE: &str = "assets/fixtures/blocks.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid config {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Tunables of the stage camera, projection and scene styling.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub lerp_speed: f32,
    pub camera_position: [f32; 3],
    pub look_at: [f32; 3],
    pub drift_min: [f32; 2],
    pub drift_max: [f32; 2],
    pub move_step: f32,
    pub bucket_depth: f32,
    pub debounce_ms: u64,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: [f32; 2],
    pub background: u32,
    pub fog_density: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            lerp_speed: DEFAULT_LERP_SPEED,
            camera_position: [0.0, 0.0, 2500.0],
            look_at: [0.0, 0.0, 0.0],
            drift_min: [-300.0, -300.0],
            drift_max: [300.0, 300.0],
            move_step: 300.0,
            bucket_depth: DEFAULT_BUCKET_DEPTH,
            debounce_ms: 100,
            fov_degrees: 50.0,
            near: 1.0,
            far: 5000.0,
            viewport: [1280.0, 720.0],
            background: 0x0b0d14,
            fog_density: 0.0002,
        }
    }
}

impl StageConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the stage math cannot work with: a smoothing factor
    /// outside (0, 1) overshoots instead of converging, and zero-sized
    /// buckets or viewports produce non-finite buckets and aspect ratios.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.lerp_speed > 0.0 && self.lerp_speed < 1.0) {
            return Err(invalid(
                "lerp_speed",
                format!("{} is outside (0, 1)", self.lerp_speed),
            ));
        }
        if !(self.bucket_depth > 0.0 && self.bucket_depth.is_finite()) {
            return Err(invalid(
                "bucket_depth",
                format!("{} must be positive", self.bucket_depth),
            ));
        }
        if !(self.move_step >= 0.0 && self.move_step.is_finite()) {
            return Err(invalid(
                "move_step",
                format!("{} must not be negative", self.move_step),
            ));
        }
        if !self.viewport.iter().all(|side| *side > 0.0 && side.is_finite()) {
            return Err(invalid(
                "viewport",
                format!("{:?} must have positive sides", self.viewport),
            ));
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            return Err(invalid(
                "near",
                format!("need 0 < near < far, got {} and {}", self.near, self.far),
            ));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid(
                "fov_degrees",
                format!("{} is outside (0, 180)", self.fov_degrees),
            ));
        }
        Ok(())
    }

    /// Applies `STAGE_LERP_SPEED` and `STAGE_DEBOUNCE_MS` when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var(LERP_SPEED_ENV) {
            match raw.parse::<f32>() {
                Ok(speed) if speed > 0.0 && speed < 1.0 => self.lerp_speed = speed,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: LERP_SPEED_ENV,
                        value: raw,
                    })
                }
            }
        }
        if let Ok(raw) = std::env::var(DEBOUNCE_ENV) {
            self.debounce_ms = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                var: DEBOUNCE_ENV,
                value: raw,
            })?;
        }
        Ok(())
    }
}

/// Defaults, then the JSON file named by `STAGE_CONFIG`, then env overrides.
pub fn stage_config() -> Result<StageConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => StageConfig::from_file(Path::new(&path))?,
        Err(_) => StageConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

/// Where block records are read from.
pub fn blocks_fixture() -> PathBuf {
    std::env::var(BLOCKS_FIXTURE_ENV)
        .unwrap_or_else(|_| DEFAULT_BLOCKS_FIXTURE.to_string())
        .into()
}

pub fn hash_rate_fixture() -> Option<PathBuf> {
    std::env::var(HASH_RATE_FIXTURE_ENV).ok().map(PathBuf::from)
}

/// Day to open the stage on. `None` means "day of the latest block".
pub fn start_day() -> Result<Option<NaiveDate>, ConfigError> {
    match std::env::var(START_DAY_ENV) {
        Ok(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: START_DAY_ENV,
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            for key in keys {
                std::env::remove_var(key);
            }
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 6] = [
        CONFIG_ENV,
        LERP_SPEED_ENV,
        DEBOUNCE_ENV,
        BLOCKS_FIXTURE_ENV,
        HASH_RATE_FIXTURE_ENV,
        START_DAY_ENV,
    ];

    #[test]
    fn defaults_when_nothing_is_set() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        let config = stage_config().unwrap();

        assert_eq!(config, StageConfig::default());
        assert_eq!(blocks_fixture(), PathBuf::from(DEFAULT_BLOCKS_FIXTURE));
        assert_eq!(hash_rate_fixture(), None);
        assert_eq!(start_day().unwrap(), None);
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(LERP_SPEED_ENV, "0.2");
        std::env::set_var(DEBOUNCE_ENV, "250");

        let config = stage_config().unwrap();

        assert_eq!(config.lerp_speed, 0.2);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.move_step, 300.0);
    }

    #[test]
    fn out_of_range_lerp_speed_is_rejected() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(LERP_SPEED_ENV, "1.5");

        let err = stage_config().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: LERP_SPEED_ENV,
                ..
            }
        ));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: StageConfig =
            serde_json::from_str(r#"{ "move_step": 500.0, "drift_max": [100.0, 50.0] }"#).unwrap();

        assert_eq!(config.move_step, 500.0);
        assert_eq!(config.drift_max, [100.0, 50.0]);
        assert_eq!(config.drift_min, [-300.0, -300.0]);
        assert_eq!(config.lerp_speed, DEFAULT_LERP_SPEED);
    }

    #[test]
    fn missing_config_file_reports_path() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(CONFIG_ENV, "/nonexistent/stage.json");

        match stage_config() {
            Err(ConfigError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/stage.json"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    fn write_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "orpheus-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn file_with_out_of_range_lerp_speed_is_rejected() {
        for (name, speed) in [("zero", "0.0"), ("one", "1.0"), ("overshoot", "2.5")] {
            let path = write_config(name, &format!(r#"{{ "lerp_speed": {speed} }}"#));
            let result = StageConfig::from_file(&path);
            std::fs::remove_file(&path).unwrap();

            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid {
                        field: "lerp_speed",
                        ..
                    })
                ),
                "lerp_speed {speed} accepted: {result:?}"
            );
        }
    }

    #[test]
    fn file_with_valid_values_loads() {
        let path = write_config("valid", r#"{ "lerp_speed": 0.2, "move_step": 150.0 }"#);
        let result = StageConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.lerp_speed, 0.2);
        assert_eq!(config.move_step, 150.0);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let zero_bucket = StageConfig {
            bucket_depth: 0.0,
            ..StageConfig::default()
        };
        assert!(matches!(
            zero_bucket.validate(),
            Err(ConfigError::Invalid {
                field: "bucket_depth",
                ..
            })
        ));

        let flat_viewport = StageConfig {
            viewport: [1280.0, 0.0],
            ..StageConfig::default()
        };
        assert!(matches!(
            flat_viewport.validate(),
            Err(ConfigError::Invalid {
                field: "viewport",
                ..
            })
        ));

        let inverted_clip = StageConfig {
            near: 10.0,
            far: 5.0,
            ..StageConfig::default()
        };
        assert!(inverted_clip.validate().is_err());
        assert!(StageConfig::default().validate().is_ok());
    }

    #[test]
    fn file_layer_is_validated_before_env_overrides() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        let path = write_config("layered", r#"{ "lerp_speed": 2.5 }"#);
        std::env::set_var(CONFIG_ENV, &path);
        std::env::set_var(LERP_SPEED_ENV, "0.1");
        let result = stage_config();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "lerp_speed",
                ..
            })
        ));
    }

    #[test]
    fn start_day_parses_iso_dates() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(START_DAY_ENV, "2018-10-02");
        assert_eq!(
            start_day().unwrap(),
            NaiveDate::from_ymd_opt(2018, 10, 2)
        );

        std::env::set_var(START_DAY_ENV, "yesterday");
        assert!(start_day().is_err());
    }
}
