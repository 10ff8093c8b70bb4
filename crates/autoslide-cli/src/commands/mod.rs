//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod simulate;
pub mod tabs;

use crate::{
    cli::{OutputFormat, ReportFormat},
    output::OutputManager,
};

/// A command's own `--format` wins; otherwise `--output-format json` selects JSON.
pub(crate) fn report_format(flag: Option<ReportFormat>, output: &OutputManager) -> ReportFormat {
    flag.unwrap_or(if output.format() == OutputFormat::Json {
        ReportFormat::Json
    } else {
        ReportFormat::Table
    })
}
