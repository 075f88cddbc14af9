/*
 * ==========================================================================
 * LUNA - Scripting Language Front End
 * ==========================================================================
 * 
 * License:
 * This file is part of the LUNA scripting language project.
 * 
 * LUNA is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

//! Run-time configuration for the `luna` binary.
//!
//! A config file is a small JSON object:
//!
//! ```json
//! { "seed": 1234, "trace": "info" }
//! ```
//!
//! Both fields are optional.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How much the binary logs when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    #[default]
    Error,
    Info,
    Verbose,
}

impl TraceLevel {
    /// The `tracing` filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Verbose => "trace",
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Verbose => "verbose",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LunaConfig {
    /// Seed for the id generator. Derived from the clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,

    #[serde(default)]
    pub trace: TraceLevel,
}

impl LunaConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// The id generator seed: the configured one, or the low 32 bits of the
    /// current UTC timestamp in seconds.
    pub fn resolved_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => u64::from(seed),
            None => chrono::Utc::now().timestamp() as u64 & u64::from(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_object_uses_defaults() {
        let config = LunaConfig::from_json("{}").unwrap();
        assert_eq!(config, LunaConfig::default());
        assert_eq!(config.trace, TraceLevel::Error);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parses_every_field() {
        let config = LunaConfig::from_json(r#"{ "seed": 77, "trace": "verbose" }"#).unwrap();
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.trace, TraceLevel::Verbose);
        assert_eq!(config.resolved_seed(), 77);
        assert_eq!(config.trace.directive(), "trace");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = LunaConfig::from_json(r#"{ "sead": 1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(ref msg) if msg.contains("sead")));
    }

    #[test]
    fn unknown_trace_level_is_rejected() {
        assert!(LunaConfig::from_json(r#"{ "trace": "loud" }"#).is_err());
    }

    #[test]
    fn seed_defaults_to_the_clock() {
        let config = LunaConfig::default();
        assert!(config.resolved_seed() <= u64::from(u32::MAX));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("luna.json");
        fs::write(&path, r#"{ "trace": "info" }"#).unwrap();

        let config = LunaConfig::load(&path).unwrap();
        assert_eq!(config.trace, TraceLevel::Info);
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = TempDir::new().unwrap();
        let err = LunaConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn serializes_back_to_json() {
        let config = LunaConfig {
            seed: Some(5),
            trace: TraceLevel::Info,
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(LunaConfig::from_json(&text).unwrap(), config);
    }
}
