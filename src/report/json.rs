use super::display_path;
use crate::parser::xib::{ParsedNib, ResourceReference, Reusable};
use crate::scan::ScanOutcome;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
    root: PathBuf,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>, root: &Path) -> Self {
        Self {
            output_path,
            root: root.to_path_buf(),
        }
    }

    pub fn report(&self, outcome: &ScanOutcome) -> Result<()> {
        let json = self.render(outcome)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    /// Serialize a batch to pretty-printed JSON
    pub fn render(&self, outcome: &ScanOutcome) -> Result<String> {
        let report = JsonReport::from_outcome(outcome, &self.root);
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_documents: usize,
    nibs: Vec<JsonNib<'a>>,
    warnings: Vec<JsonWarning>,
    failures: Vec<JsonFailure>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonNib<'a> {
    file: String,
    #[serde(flatten)]
    nib: &'a ParsedNib,
}

#[derive(Serialize)]
struct JsonWarning {
    file: String,
    message: String,
}

#[derive(Serialize)]
struct JsonFailure {
    file: String,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    parsed: usize,
    failed: usize,
    root_views: usize,
    reusables: Vec<Reusable>,
    images: Vec<ResourceReference>,
    colors: Vec<ResourceReference>,
    accessibility_identifiers: Vec<String>,
}

impl<'a> JsonReport<'a> {
    fn from_outcome(outcome: &'a ScanOutcome, root: &Path) -> Self {
        let summary = outcome.summary();

        Self {
            version: "1.0",
            total_documents: summary.documents,
            nibs: outcome
                .nibs
                .iter()
                .map(|scanned| JsonNib {
                    file: display_path(&scanned.path, root),
                    nib: &scanned.nib,
                })
                .collect(),
            warnings: outcome
                .warnings
                .iter()
                .map(|w| JsonWarning {
                    file: display_path(&w.path, root),
                    message: w.warning.to_string(),
                })
                .collect(),
            failures: outcome
                .failures
                .iter()
                .map(|f| JsonFailure {
                    file: display_path(&f.path, root),
                    kind: f.error.kind(),
                    message: f.error.to_string(),
                })
                .collect(),
            summary: JsonSummary {
                parsed: summary.parsed,
                failed: summary.failed,
                root_views: summary.root_views,
                reusables: summary.reusables,
                images: summary.images,
                colors: summary.colors,
                accessibility_identifiers: summary.accessibility_identifiers,
            },
        }
    }
}
