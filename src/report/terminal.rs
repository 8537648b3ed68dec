use super::display_path;
use crate::parser::xib::ResourceReference;
use crate::scan::{ScanOutcome, ScannedNib};
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

/// Terminal reporter with colored output
pub struct TerminalReporter {
    root: PathBuf,
    show_empty: bool,
}

impl TerminalReporter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            show_empty: false,
        }
    }

    pub fn with_show_empty(mut self, show: bool) -> Self {
        self.show_empty = show;
        self
    }

    pub fn report(&self, outcome: &ScanOutcome) -> Result<()> {
        let listed: Vec<&ScannedNib> = outcome
            .nibs
            .iter()
            .filter(|scanned| self.show_empty || !scanned.nib.is_empty())
            .collect();

        if listed.is_empty() && outcome.failures.is_empty() {
            println!("{}", "No resource usage found.".green().bold());
        }

        if !listed.is_empty() {
            println!();
            for scanned in listed {
                print!("{}", self.format_nib(scanned));
                println!();
            }
        }

        if !outcome.warnings.is_empty() {
            println!("{}", "Warnings:".yellow().bold());
            for item in &outcome.warnings {
                println!(
                    "  {} {}: {}",
                    "⚠".yellow(),
                    display_path(&item.path, &self.root).dimmed(),
                    item.warning
                );
            }
            println!();
        }

        if !outcome.failures.is_empty() {
            println!("{}", "Failed to parse:".red().bold());
            for failure in &outcome.failures {
                println!(
                    "  {} {} [{}] {}",
                    "✗".red(),
                    display_path(&failure.path, &self.root).dimmed(),
                    failure.error.kind().dimmed(),
                    failure.error
                );
            }
            println!();
        }

        self.print_summary(outcome);
        Ok(())
    }

    /// Render one document as an indented block
    pub fn format_nib(&self, scanned: &ScannedNib) -> String {
        let nib = &scanned.nib;
        let mut out = String::new();

        out.push_str(&format!(
            "{} {}\n",
            display_path(&scanned.path, &self.root).cyan().bold(),
            format!("({})", nib.name).dimmed()
        ));

        if let Some(version) = &nib.deployment_version {
            out.push_str(&format!("  {} {}\n", "deployment:".dimmed(), version));
        }

        let root_views: Vec<String> = nib.root_views.iter().map(|t| t.to_string()).collect();
        push_list(&mut out, "root views", &root_views);

        let reusables: Vec<String> = nib
            .reusables
            .iter()
            .map(|r| format!("{} ({})", r.identifier, r.type_name))
            .collect();
        push_list(&mut out, "reusables", &reusables);

        push_list(&mut out, "images", &format_references(&nib.used_image_references));
        push_list(&mut out, "colors", &format_references(&nib.used_color_references));
        push_list(
            &mut out,
            "accessibility",
            &nib.used_accessibility_identifiers,
        );

        out
    }

    fn print_summary(&self, outcome: &ScanOutcome) {
        let summary = outcome.summary();

        println!("{}", "─".repeat(60).dimmed());

        let mut parts = vec![format!("{} parsed", summary.parsed).green().to_string()];
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed).red().to_string());
        }
        if summary.warnings > 0 {
            parts.push(format!("{} warnings", summary.warnings).yellow().to_string());
        }
        println!("Summary: {}", parts.join(", "));

        println!(
            "  {} root views, {} reusables, {} images, {} colors, {} accessibility identifiers",
            summary.root_views,
            summary.reusables.len(),
            summary.images.len(),
            summary.colors.len(),
            summary.accessibility_identifiers.len()
        );
        println!();
    }
}

fn format_references(references: &[ResourceReference]) -> Vec<String> {
    references
        .iter()
        .map(|r| match &r.catalog {
            Some(catalog) => format!("{} [{}]", r.name, catalog),
            None => r.name.clone(),
        })
        .collect()
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!(
        "  {} {}\n",
        format!("{}:", label).dimmed(),
        items.join(", ")
    ));
}
