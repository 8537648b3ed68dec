use crate::config::Config;
use crate::parser::xib::SUPPORTED_EXTENSIONS;
use ignore::WalkBuilder;
use miette::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Whether a path has one of the extensions the nib loader accepts
pub fn is_nib_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Finds xib documents in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all xib files under `root`, sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        debug!("Scanning for xib files in: {}", root.display());

        let targets: Vec<PathBuf> = if self.config.targets.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.config.targets.iter().map(|t| root.join(t)).collect()
        };

        let mut files: Vec<PathBuf> = targets
            .par_iter()
            .flat_map(|target| self.scan_directory(target))
            .collect();

        files.sort();
        files.dedup();

        debug!("Found {} xib files", files.len());
        Ok(files)
    }

    fn scan_directory(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.exists() {
            trace!("Target does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if !is_nib_file(path) {
                    return None;
                }
                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                trace!("Found nib: {}", path.display());
                Some(path.to_path_buf())
            })
            .collect()
    }
}
