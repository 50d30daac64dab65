//! Configuration for the `gds` binary
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `gds.toml` in the working directory, or the file given with `--config`
//! 3. `GDS_*` environment variables (`.env` is loaded first)

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_FILE: &str = "gds";
const ENV_PREFIX: &str = "GDS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Where `gds run` writes a checkpoint after every turn
    pub checkpoint_path: Option<PathBuf>,

    /// Print script variables after every turn
    pub echo_vars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            checkpoint_path: None,
            echo_vars: false,
        }
    }
}

impl Config {
    /// Load configuration from the default file (if present) or an explicit one
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        Self::build(
            defaults()?
                .add_source(file)
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
        .with_context(|| match config_path {
            Some(path) => format!("Failed to load config from {}", path),
            None => "Failed to load config".to_string(),
        })
    }

    /// Load configuration from TOML text layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::build(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let default = Config::default();
    Ok(config::Config::builder()
        .set_default("log_level", default.log_level)?
        .set_default("echo_vars", default.echo_vars)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            log_level = "debug"
            checkpoint_path = "save.json"
            echo_vars = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.checkpoint_path, Some(PathBuf::from("save.json")));
        assert!(config.echo_vars);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        assert!(Config::from_toml_str("echo_vars = \"often\"").is_err());
    }
}
