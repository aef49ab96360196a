//! `sitenav export` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sitenav_model::{ResolveWarning, ResolvedModel};

use super::{SourceArgs, resolve_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON (overrides config).
    #[arg(long)]
    compact: bool,
}

/// Exported document: the model plus warnings raised while resolving it.
#[derive(Serialize)]
struct Export<'a> {
    model: &'a ResolvedModel,
    warnings: &'a [ResolveWarning],
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config(self.compact.then_some(false))?;
        let resolution = resolve_site(&config, &output)?;

        let export = Export {
            model: &resolution.model,
            warnings: &resolution.warnings,
        };
        let json = if config.output.pretty {
            serde_json::to_string_pretty(&export)?
        } else {
            serde_json::to_string(&export)?
        };

        match self.output {
            Some(path) => {
                std::fs::write(&path, json)?;
                output.success(&format!("Model written to {}", path.display()));
            }
            None => output.data(&json)?,
        }

        Ok(())
    }
}
