//! Batch scanning of xib documents
//!
//! Runs one [`NibLoader`] per document, sequentially or on the rayon pool.
//! A document that fails to parse is recorded and skipped; it never stops
//! the rest of the batch.

use crate::parser::xib::{NibLoader, NibWarning, ParsedNib, ResourceParsingError, ResourceReference, Reusable};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A successfully parsed document
#[derive(Debug, Clone)]
pub struct ScannedNib {
    pub path: PathBuf,
    pub nib: ParsedNib,
}

/// A warning raised while parsing a document
#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub warning: NibWarning,
}

/// A document that could not be parsed
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: ResourceParsingError,
}

/// Everything produced by a batch, in input order
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub nibs: Vec<ScannedNib>,
    pub warnings: Vec<ScanWarning>,
    pub failures: Vec<ScanFailure>,
}

impl ScanOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn summary(&self) -> ScanSummary {
        let nibs = || self.nibs.iter().map(|scanned| &scanned.nib);

        ScanSummary {
            documents: self.nibs.len() + self.failures.len(),
            parsed: self.nibs.len(),
            failed: self.failures.len(),
            warnings: self.warnings.len(),
            root_views: nibs().map(|nib| nib.root_views.len()).sum(),
            reusables: unique(nibs().flat_map(|nib| nib.reusables.iter())),
            images: unique(nibs().flat_map(|nib| nib.used_image_references.iter())),
            colors: unique(nibs().flat_map(|nib| nib.used_color_references.iter())),
            accessibility_identifiers: unique(
                nibs().flat_map(|nib| nib.used_accessibility_identifiers.iter()),
            ),
        }
    }
}

/// Totals across a batch; resources are de-duplicated in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub documents: usize,
    pub parsed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub root_views: usize,
    pub reusables: Vec<Reusable>,
    pub images: Vec<ResourceReference>,
    pub colors: Vec<ResourceReference>,
    pub accessibility_identifiers: Vec<String>,
}

fn unique<'a, T, I>(items: I) -> Vec<T>
where
    T: Clone + Eq + Hash + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Result of a single document before it is sorted into the outcome
struct FileResult {
    path: PathBuf,
    result: Result<ParsedNib, ResourceParsingError>,
    warnings: Vec<NibWarning>,
}

/// Parses batches of xib documents
pub struct NibScanner {
    parallel: bool,
    show_progress: bool,
}

impl NibScanner {
    pub fn new() -> Self {
        Self {
            parallel: false,
            show_progress: false,
        }
    }

    /// Parse documents on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Show a progress bar for sequential scans
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn scan(&self, files: &[PathBuf]) -> ScanOutcome {
        info!("Parsing {} xib files{}...", files.len(), if self.parallel { " in parallel" } else { "" });

        let results: Vec<FileResult> = if self.parallel {
            files.par_iter().map(|path| scan_file(path)).collect()
        } else {
            let pb = self.progress_bar(files.len());
            let results: Vec<FileResult> = files
                .iter()
                .map(|path| {
                    let result = scan_file(path);
                    pb.inc(1);
                    result
                })
                .collect();
            pb.finish_and_clear();
            results
        };

        let mut outcome = ScanOutcome::default();
        for file in results {
            outcome.warnings.extend(file.warnings.into_iter().map(|warning| ScanWarning {
                path: file.path.clone(),
                warning,
            }));

            match file.result {
                Ok(nib) => outcome.nibs.push(ScannedNib { path: file.path, nib }),
                Err(error) => {
                    debug!("Parse error (continuing): {}", error);
                    outcome.failures.push(ScanFailure { path: file.path, error });
                }
            }
        }

        info!(
            "Parsed {} xib files, {} failed, {} warnings",
            outcome.nibs.len(),
            outcome.failures.len(),
            outcome.warnings.len()
        );

        outcome
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

impl Default for NibScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn scan_file(path: &Path) -> FileResult {
    let mut warnings = Vec::new();
    // Surfaced through ScanOutcome::warnings
    let result = NibLoader::new().load_with_warnings(path, |warning| {
        debug!("{}", warning);
        warnings.push(warning);
    });

    FileResult {
        path: path.to_path_buf(),
        result,
        warnings,
    }
}
