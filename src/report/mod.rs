mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::scan::ScanOutcome;
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    /// Parse a format name from configuration, defaulting to terminal
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Terminal,
        }
    }
}

/// Reporter for scan results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_empty: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_empty: false,
        }
    }

    /// Also list documents that reference nothing
    pub fn with_show_empty(mut self, show: bool) -> Self {
        self.show_empty = show;
        self
    }

    /// Report a batch; paths are shown relative to `root` when possible
    pub fn report(&self, outcome: &ScanOutcome, root: &Path) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new(root).with_show_empty(self.show_empty);
                reporter.report(outcome)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone(), root);
                reporter.report(outcome)
            }
        }
    }
}

/// Path relative to the scanned root, for display
pub(crate) fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
