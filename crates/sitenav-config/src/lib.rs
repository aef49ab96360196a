//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! `site.source` and the `--source` override support:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `~` - expands to the home directory

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site description path.
    pub source: Option<PathBuf>,
    /// Override site description format.
    pub format: Option<String>,
    /// Override strict coercion flag.
    pub strict_coercion: Option<bool>,
    /// Override clean URLs flag.
    pub clean_urls: Option<bool>,
    /// Override pretty JSON output flag.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Default site description filename.
const DEFAULT_SOURCE: &str = "site.yaml";

/// Supported site description formats.
const FORMATS: [&str; 4] = ["json", "yaml", "yml", "toml"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site description location (paths are relative strings from TOML).
    #[serde(default)]
    site: SiteConfigRaw,
    /// Resolver options.
    pub resolve: ResolveConfig,
    /// Output options.
    pub output: OutputConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source: Option<String>,
    format: Option<String>,
}

/// Resolved site description location.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Absolute path of the site description file.
    pub source: PathBuf,
    /// Explicit format name. `None` infers the format from the extension.
    pub format: Option<String>,
}

/// Resolver options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Reject string-encoded booleans such as `collapsed: "True"`.
    pub strict_coercion: bool,
    /// Treat `/page`, `/page/` and `/page.html` as one route.
    pub clean_urls: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            strict_coercion: false,
            clean_urls: true,
        }
    }
}

/// Output options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print exported JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.source`").
        field: String,
        /// Error message (e.g., "${`SITE_FILE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(source) = &settings.source {
            self.site_resolved.source = expand::expand_path_buf(source, "--source")?;
        }
        if let Some(format) = &settings.format {
            self.site_resolved.format = Some(format.clone());
        }
        if let Some(strict) = settings.strict_coercion {
            self.resolve.strict_coercion = strict;
        }
        if let Some(clean_urls) = settings.clean_urls {
            self.resolve.clean_urls = clean_urls;
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            resolve: ResolveConfig::default(),
            output: OutputConfig::default(),
            site_resolved: SiteConfig {
                source: base.join(DEFAULT_SOURCE),
                format: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_paths()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(source) = &self.site.source {
            require_non_empty(source, "site.source")?;
        }

        if let Some(format) = &self.site_resolved.format {
            require_non_empty(format, "site.format")?;
            if !FORMATS.contains(&format.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::Validation(format!(
                    "site.format must be one of {}, got `{format}`",
                    FORMATS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variables and `~` in path fields.
    fn expand_paths(&mut self) -> Result<(), ConfigError> {
        if let Some(source) = &self.site.source {
            let expanded = expand::expand_path(source, "site.source")?;
            self.site.source = Some(expanded.to_string_lossy().into_owned());
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            source: config_dir.join(self.site.source.as_deref().unwrap_or(DEFAULT_SOURCE)),
            format: self.site.format.clone(),
        };
    }
}
