//! `sitenav routes` command implementation.

use clap::Args;

use super::{SourceArgs, resolve_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only list routes of the sidebar section with this prefix.
    #[arg(long)]
    section: Option<String>,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config(None)?;
        let resolution = resolve_site(&config, &output)?;

        let routes = resolution
            .model
            .routes()
            .iter()
            .filter(|route| self.section.as_ref().is_none_or(|s| &route.section == s));

        let width = routes
            .clone()
            .map(|route| route.path.len())
            .max()
            .unwrap_or_default();

        for route in routes {
            let crumbs = output.dim(&route.breadcrumb.join(" > "));
            output.data(&format!("{:<width$}  {crumbs}", route.path))?;
        }

        Ok(())
    }
}
