use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, DEFAULT_MAX_LINE_OCTETS, ENV_PREFIX};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Charset applied when a block has no byte-order mark and a field has no `CHARSET`.
    pub default_charset: String,
    /// Charset applied when bytes are invalid in the default charset.
    pub fallback_charset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Fold threshold in octets. Zero disables folding.
    pub max_line_length: usize,
}

impl ExportConfig {
    /// ## Summary
    /// Returns the fold threshold, or `None` when folding is disabled.
    #[must_use]
    pub fn fold_at(&self) -> Option<usize> {
        (self.max_line_length > 0).then_some(self.max_line_length)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `rolodex.toml` and
    /// `ROLODEX_*` environment variables, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            // Environment, e.g. ROLODEX_EXPORT__MAX_LINE_LENGTH=0
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not match `Settings`.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("import.default_charset", "UTF-8")?
            .set_default("import.fallback_charset", "windows-1252")?
            .set_default(
                "export.max_line_length",
                i64::try_from(DEFAULT_MAX_LINE_OCTETS)?,
            )?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_apply_without_sources() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings.import.default_charset, "UTF-8");
        assert_eq!(settings.import.fallback_charset, "windows-1252");
        assert_eq!(settings.export.max_line_length, 75);
        assert_eq!(settings.export.fold_at(), Some(75));
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn toml_overrides_defaults() {
        let settings = Settings::from_toml_str(
            "[import]\ndefault_charset = \"ISO-8859-1\"\n\n[export]\nmax_line_length = 0\n",
        )
        .unwrap();

        assert_eq!(settings.import.default_charset, "ISO-8859-1");
        assert_eq!(settings.import.fallback_charset, "windows-1252");
        assert_eq!(settings.export.fold_at(), None);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("[export\nmax_line_length = ").is_err());
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(Settings::from_toml_str("[export]\nmax_line_length = \"wide\"\n").is_err());
    }
}
