//! Implementation of the `autoslide tabs` command.

use autoslide_core::domain::ActiveTabMemo;
use serde::Serialize;
use tracing::debug;

use crate::{
    cli::{ReportFormat, TabsArgs},
    commands::report_format,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Resolution {
    path: String,
    active: Option<String>,
}

pub fn execute(args: TabsArgs, output: OutputManager) -> CliResult<()> {
    let mut memo = ActiveTabMemo::new(args.tabs);

    let resolutions: Vec<Resolution> = args
        .paths
        .into_iter()
        .map(|path| {
            let active = memo.resolve(&path).map(str::to_owned);
            Resolution { path, active }
        })
        .collect();
    debug!(
        paths = resolutions.len(),
        computations = memo.computations(),
        "Active tabs resolved"
    );

    match report_format(args.format, &output) {
        ReportFormat::Json => output.json(&resolutions)?,
        ReportFormat::Table => {
            for r in &resolutions {
                match &r.active {
                    Some(id) => output.print(&format!("{} -> {id}", r.path))?,
                    None => output.dim(&format!("{} -> (none)", r.path))?,
                }
            }
        }
    }
    Ok(())
}
