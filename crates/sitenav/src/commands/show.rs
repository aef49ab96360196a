//! `sitenav show` command implementation.

use clap::Args;

use super::{SourceArgs, resolve_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Route path to look up (e.g. /hashing/algorithms/md5).
    path: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config(None)?;
        let resolution = resolve_site(&config, &output)?;
        let model = &resolution.model;

        let route = model
            .route(&self.path)
            .ok_or_else(|| CliError::NotFound(format!("Route not found: {}", self.path)))?;

        output.data(&format!("path:       {}", route.path))?;
        output.data(&format!("label:      {}", route.label))?;
        output.data(&format!("breadcrumb: {}", route.breadcrumb.join(" > ")))?;
        output.data(&format!("section:    {}", route.section))?;

        let neighbors = model.neighbors(&route.path);
        if let Some(prev) = neighbors.prev {
            output.data(&format!("previous:   {} ({})", prev.label, prev.path))?;
        }
        if let Some(next) = neighbors.next {
            output.data(&format!("next:       {} ({})", next.label, next.path))?;
        }
        if let Some(edit) = model.edit_link(&route.path) {
            output.data(&format!("edit:       {edit}"))?;
        }

        Ok(())
    }
}
