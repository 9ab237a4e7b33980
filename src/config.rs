//! Mission configuration loaded from TOML.
//!
//! ```toml
//! [tracker]
//! max_distance = 70.0
//! max_frames_unseen = 20
//!
//! [mission]
//! phase1_vocabulary = ["go left", "go right", "go straight"]
//! phase2_vocabulary = ["drop left", "drop right"]
//! vote_target = 5
//!
//! [runtime]
//! frame_backoff_ms = 10
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mission::MissionConfig;
use crate::tracker::TrackerConfig;

/// Pacing of the tick loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Wait after a tick skipped for lack of a frame
    pub frame_backoff_ms: u64,
}

impl RuntimeConfig {
    pub fn frame_backoff(&self) -> Duration {
        Duration::from_millis(self.frame_backoff_ms)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_backoff_ms: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub mission: MissionConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_distance = self.tracker.max_distance;
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tracker.max_distance",
                reason: format!("must be a positive number, got {max_distance}"),
            });
        }

        if self.mission.vote_target == 0 {
            return Err(ConfigError::InvalidValue {
                field: "mission.vote_target",
                reason: "must be at least 1".to_string(),
            });
        }

        for (name, vocabulary) in [
            ("mission.phase1_vocabulary", &self.mission.phase1_vocabulary),
            ("mission.phase2_vocabulary", &self.mission.phase2_vocabulary),
        ] {
            if vocabulary.is_empty() {
                return Err(ConfigError::EmptyVocabulary(name));
            }
            if vocabulary.iter().any(str::is_empty) {
                return Err(ConfigError::InvalidValue {
                    field: name,
                    reason: "contains an empty payload".to_string(),
                });
            }
        }

        Ok(())
    }
}
