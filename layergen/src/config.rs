//! Configuration management for layergen
//!
//! Configuration is merged from three sources, later ones winning:
//!
//! 1. Hardcoded defaults
//! 2. A TOML file (`./layergen.toml`, or the path passed explicitly)
//! 3. Environment variables with the `LAYERGEN_` prefix, `__` for nesting
//!    (e.g. `LAYERGEN_GENERATION__EXTERNAL_ID=false`)
//!
//! # Example Configuration
//!
//! ```toml
//! [generation]
//! external_id = true
//! timestamps = true
//! namespace = "storefront"
//!
//! [output]
//! root = "./generated"
//!
//! [logging]
//! filter = "info,layergen=debug"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::context::GenerationOptions;
use crate::error::ConfigError;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "layergen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LAYERGEN_";

/// Switches applied to every generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Emit an external `uuid` id next to the surrogate key
    pub external_id: bool,

    /// Emit audit timestamps and soft delete
    pub timestamps: bool,

    /// Namespace label override
    pub namespace: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            external_id: true,
            timestamps: true,
            namespace: None,
        }
    }
}

/// Where generated files go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output root directory
    pub root: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./generated"),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Complete layergen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generation switches
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Output location
    #[serde(default)]
    pub output: OutputSettings,

    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl GeneratorConfig {
    /// Load configuration
    ///
    /// With `path`, that file must exist. Without it, `./layergen.toml` is
    /// merged when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when an explicit path does not exist
    /// and [`ConfigError::Invalid`] when the merged values do not form a valid
    /// configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing {
                        path: path.to_path_buf(),
                    });
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Generation options derived from the `[generation]` section
    #[must_use]
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            external_id: self.generation.external_id,
            timestamps: self.generation.timestamps,
            namespace: self.generation.namespace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.generation.external_id);
        assert!(config.generation.timestamps);
        assert_eq!(config.generation.namespace, None);
        assert_eq!(config.output.root, PathBuf::from("./generated"));
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_generation_options_mirror_settings() {
        let mut config = GeneratorConfig::default();
        config.generation.timestamps = false;
        config.generation.namespace = Some("crm".into());

        let options = config.generation_options();
        assert!(options.external_id);
        assert!(!options.timestamps);
        assert_eq!(options.namespace.as_deref(), Some("crm"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = GeneratorConfig::load(None).map_err(|e| e.to_string())?;
            assert!(config.generation.external_id);
            Ok(())
        });
    }

    #[test]
    fn test_local_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [generation]
                timestamps = false
                namespace = "billing"

                [logging]
                format = "json"
                "#,
            )?;
            jail.set_env("LAYERGEN_GENERATION__EXTERNAL_ID", "false");
            jail.set_env("LAYERGEN_OUTPUT__ROOT", "/tmp/out");

            let config = GeneratorConfig::load(None).map_err(|e| e.to_string())?;
            assert!(!config.generation.timestamps);
            assert!(!config.generation.external_id);
            assert_eq!(config.generation.namespace.as_deref(), Some("billing"));
            assert_eq!(config.output.root, PathBuf::from("/tmp/out"));
            assert_eq!(config.logging.format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_must_exist() {
        Jail::expect_with(|_jail| {
            let err = GeneratorConfig::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Missing { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[generation]\ntimestamps = \"sometimes\"\n")?;
            let err = GeneratorConfig::load(Some(Path::new("bad.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
