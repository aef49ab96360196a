//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod routes;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};
use sitenav_model::{
    DescriptionFormat, Resolution, ResolveOptions, Resolver, load_description,
};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use show::ShowArgs;

/// Arguments shared by every command that resolves a site description.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Site description file (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Site description format: json, yaml or toml (default: from extension).
    #[arg(long)]
    format: Option<String>,

    /// Reject string-encoded booleans instead of coercing them.
    #[arg(long)]
    strict: bool,

    /// Compare route paths verbatim (`/a` and `/a/` are different routes).
    #[arg(long)]
    no_clean_urls: bool,

    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self, pretty: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source: self.source.clone(),
            format: self.format.clone(),
            strict_coercion: self.strict.then_some(true),
            clean_urls: self.no_clean_urls.then_some(false),
            pretty,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load and resolve the configured site description.
///
/// Warnings are reported through `output` and returned with the model.
pub(crate) fn resolve_site(config: &Config, output: &Output) -> Result<Resolution, CliError> {
    let site = &config.site_resolved;
    let format = site
        .format
        .as_deref()
        .map(str::parse::<DescriptionFormat>)
        .transpose()?;

    tracing::info!(source = %site.source.display(), "Resolving site description");
    let description = load_description(&site.source, format)?;

    let resolver = Resolver::new(ResolveOptions {
        strict_coercion: config.resolve.strict_coercion,
        clean_urls: config.resolve.clean_urls,
    });
    let resolution = resolver.resolve(&description)?;

    for warning in &resolution.warnings {
        output.warning(&format!("Warning: {warning}"));
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const SITE: &str = r#"{
        "title": "Cryptography 101",
        "description": "A complete guide to cryptography.",
        "sidebar": {"/": [
            {"text": "Hashing", "collapsed": "True", "items": [
                {"text": "MD5", "link": "/hashing/algorithms/md5"}
            ]}
        ]}
    }"#;

    fn write_project(dir: &Path, config: &str) {
        std::fs::write(dir.join("site.json"), SITE).unwrap();
        std::fs::write(dir.join("sitenav.toml"), config).unwrap();
    }

    fn source_args(config: &Path) -> SourceArgs {
        SourceArgs {
            source: None,
            format: None,
            strict: false,
            no_clean_urls: false,
            config: Some(config.to_path_buf()),
        }
    }

    #[test]
    fn test_resolve_site_from_config() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "[site]\nsource = \"site.json\"\n");

        let args = source_args(&dir.path().join("sitenav.toml"));
        let config = args.load_config(None).unwrap();
        let resolution = resolve_site(&config, &Output::new()).unwrap();

        assert_eq!(resolution.model.routes().len(), 1);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_strict_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "[site]\nsource = \"site.json\"\n");

        let mut args = source_args(&dir.path().join("sitenav.toml"));
        args.strict = true;
        let config = args.load_config(None).unwrap();
        let result = resolve_site(&config, &Output::new());

        assert!(matches!(result, Err(CliError::Resolve(_))));
    }

    #[test]
    fn test_unknown_format_override() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "[site]\nsource = \"site.json\"\n");

        let mut args = source_args(&dir.path().join("sitenav.toml"));
        args.format = Some("xml".to_owned());

        assert!(matches!(args.load_config(None), Err(CliError::Config(_))));
    }
}
