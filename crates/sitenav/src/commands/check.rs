//! `sitenav check` command implementation.

use clap::Args;

use super::{SourceArgs, resolve_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config(None)?;

        output.info(&format!(
            "Source: {}",
            config.site_resolved.source.display()
        ));

        let resolution = resolve_site(&config, &output)?;
        let model = &resolution.model;

        output.highlight(&model.site().title);
        output.info(&format!(
            "{} nav entries, {} sidebar sections, {} routes",
            model.nav_entries().len(),
            model.sidebar().len(),
            model.routes().len()
        ));

        if self.deny_warnings && !resolution.warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} warning(s) found",
                resolution.warnings.len()
            )));
        }

        output.success("Site description is valid");
        Ok(())
    }
}
