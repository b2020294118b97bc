//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::level::{RankSelector, Severity};
use crate::logging::DiagnosticsFormat;

fn default_level() -> Severity {
    Severity::Info
}

fn default_diagnostics_filter() -> String {
    "warn".to_owned()
}

/// Engine configuration fixed at construction: the maximum severity to act
/// on and which ranks act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerConfig {
    #[serde(default = "default_level")]
    pub level: Severity,
    #[serde(default)]
    pub ranks: RankSelector,
}

/// Metadata describing where a [`ManagerConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedManagerConfig {
    pub config: ManagerConfig,
    /// `None` when no file was found and defaults were used.
    pub source: Option<PathBuf>,
}

impl ManagerConfig {
    pub const ENV_CONFIG_PATH: &'static str = "RANKLOG_CONFIG";
    pub const ENV_LEVEL: &'static str = "RANKLOG_LEVEL";
    pub const ENV_RANKS: &'static str = "RANKLOG_RANKS";

    pub fn new(level: Severity, ranks: RankSelector) -> Self {
        Self { level, ranks }
    }

    /// Load configuration from disk, respecting the `RANKLOG_CONFIG` override.
    /// Falls back to defaults when none of the candidates exist.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedManagerConfig> {
        let env_path = std::env::var(Self::ENV_CONFIG_PATH).ok();
        Self::load_from(env_path.as_deref(), candidates)
    }

    /// Same as [`ManagerConfig::load_with_source`] with the override path
    /// passed explicitly; a blank override is ignored.
    pub fn load_from<P: AsRef<Path>>(
        override_path: Option<&str>,
        candidates: &[P],
    ) -> Result<LoadedManagerConfig> {
        if let Some(raw) = override_path {
            if !raw.trim().is_empty() {
                let path = PathBuf::from(raw);
                let config = Self::from_path(&path)?;
                return Ok(LoadedManagerConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedManagerConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no configuration file found; using defaults");
        Ok(LoadedManagerConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Parse a flat TOML table such as `level = "debug"` / `ranks = "all"`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: format!("unable to read: {err}"),
        })?;
        toml::from_str(&contents).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Apply `RANKLOG_LEVEL` / `RANKLOG_RANKS` overrides from the environment.
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(
            std::env::var(Self::ENV_LEVEL).ok().as_deref(),
            std::env::var(Self::ENV_RANKS).ok().as_deref(),
        )
    }

    /// Apply textual overrides; blank values are ignored.
    pub fn apply_overrides(mut self, level: Option<&str>, ranks: Option<&str>) -> Result<Self> {
        if let Some(raw) = level.filter(|raw| !raw.trim().is_empty()) {
            self.level = Severity::try_from(raw.to_owned())?;
        }
        if let Some(raw) = ranks.filter(|raw| !raw.trim().is_empty()) {
            self.ranks = RankSelector::try_from(raw.to_owned())?;
        }
        Ok(self)
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            ranks: RankSelector::default(),
        }
    }
}

/// Settings for the library's own diagnostics, kept apart from rank output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_diagnostics_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: DiagnosticsFormat,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: default_diagnostics_filter(),
            format: DiagnosticsFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_on_leader() {
        let config = ManagerConfig::default();
        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.ranks, RankSelector::Leader);
    }

    #[test]
    fn overrides_replace_fields() {
        let config = ManagerConfig::default()
            .apply_overrides(Some("debug"), Some("all"))
            .unwrap();
        assert_eq!(config, ManagerConfig::new(Severity::Debug, RankSelector::All));

        let untouched = ManagerConfig::default()
            .apply_overrides(Some("  "), None)
            .unwrap();
        assert_eq!(untouched, ManagerConfig::default());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = ManagerConfig::default()
            .apply_overrides(Some("chatty"), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { key: "severity", .. }));
    }

    #[test]
    fn parses_flat_toml() {
        let config: ManagerConfig = toml::from_str("level = \"notice\"\nranks = \"zero\"\n").unwrap();
        assert_eq!(config.level, Severity::Notice);
        assert_eq!(config.ranks, RankSelector::Leader);

        let partial: ManagerConfig = toml::from_str("ranks = \"all\"").unwrap();
        assert_eq!(partial.level, Severity::Info);
        assert!(toml::from_str::<ManagerConfig>("colour = \"red\"").is_err());
    }
}
