//! Logger configuration.
//!
//! [`Config`] is a plain value: it can be deserialized from an application's own config file, built in code, or read
//! from the environment with [`Config::from_env`]. The environment is only consulted when explicitly asked to, never
//! implicitly by a [`Logger`][crate::Logger].
//!
//! # Environment Variables
//!
//! - `PIPELOG_NO_COLOR` - A boolean (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`); when true, lines are not
//!   colored.
//! - `PIPELOG_SEVERITIES` - The allowed severities as flag names joined by `|`, e.g. `INFO | WARN`.

use serde::{Deserialize, Serialize};

use crate::color::{ColorAnnotator, ColorScope};
use crate::format::{DEFAULT_SOURCE_ROOT, Fields, LineFormat};
use crate::severity::Severities;

/// Name of the variable disabling color.
pub const NO_COLOR_VAR: &str = "PIPELOG_NO_COLOR";

/// Name of the variable restricting the allowed severities.
pub const SEVERITIES_VAR: &str = "PIPELOG_SEVERITIES";

/// Configuration of a [`Logger`][crate::Logger].
///
/// # Examples
///
/// ```rust
/// use pipelog::{Config, Severities};
///
/// let config: Config = toml::from_str(r#"
///     allowed = "INFO | WARN | ERROR"
///     color = false
/// "#).unwrap();
///
/// assert_eq!(config.allowed, Severities::INFO | Severities::WARN | Severities::ERROR);
/// assert!(config.process_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Severities that are emitted.
    pub allowed: Severities,
    /// Whether lines are colored.
    pub color: bool,
    /// What part of a line is colored.
    pub color_scope: ColorScope,
    /// Whether lines carry the process id.
    pub process_id: bool,
    /// Whether lines carry the call-site file, function and line.
    pub call_site: bool,
    /// Path segment call-site files are trimmed to.
    pub source_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed: Severities::ALL,
            color: true,
            color_scope: ColorScope::default(),
            process_id: true,
            call_site: true,
            source_root: DEFAULT_SOURCE_ROOT.to_owned(),
        }
    }
}

/// Errors that can occur when reading configuration from the environment.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable is not a recognized boolean.
    #[error("`{name}` is not a boolean: `{value}`")]
    InvalidBool {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A variable is not a valid set of severities.
    #[error("`{name}` is not a set of severities: `{value}`")]
    InvalidSeverities {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        #[source]
        source: bitflags::parser::ParseError,
    },
}

impl Config {
    /// Reads the default configuration, overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Overrides this configuration with the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_lookup(|name| std::env::var(name).ok())
    }

    /// Overrides this configuration with variables resolved by `lookup`.
    ///
    /// Unset variables leave the configuration untouched.
    pub fn with_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(NO_COLOR_VAR) {
            self.color = !parse_bool(NO_COLOR_VAR, value)?;
        }

        if let Some(value) = lookup(SEVERITIES_VAR) {
            self.allowed = bitflags::parser::from_str::<Severities>(&value).map_err(|source| {
                ConfigError::InvalidSeverities {
                    name: SEVERITIES_VAR,
                    value,
                    source,
                }
            })?;
        }

        Ok(self)
    }

    /// Returns the color annotator described by this configuration.
    pub fn color_annotator(&self) -> ColorAnnotator {
        ColorAnnotator::new(self.color, self.color_scope)
    }

    /// Returns the line format described by this configuration.
    pub fn line_format(&self) -> LineFormat {
        LineFormat::new(
            Fields {
                process_id: self.process_id,
                call_site: self.call_site,
            },
            self.source_root.clone(),
        )
    }
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value }),
    }
}
