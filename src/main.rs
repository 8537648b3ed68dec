use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use nibscan::report::{ReportFormat, Reporter};
use nibscan::{Config, FileFinder, NibScanner};

/// nibscan - Extract resource usage from Interface Builder xib files
#[derive(Parser, Debug)]
#[command(name = "nibscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to scan (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse files in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with an error if any file fails to parse
    #[arg(long)]
    strict: bool,

    /// Also list files that reference no resources
    #[arg(long)]
    show_empty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("nibscan v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_scan(&config, &cli)
}

/// Directory holding the scanned path, used for config lookup and display
fn project_root(path: &Path) -> &Path {
    if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(project_root(&cli.path))?
    };

    // Override with CLI arguments
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if let Some(format) = &cli.format {
        config.report.format = match format {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
        }
        .to_string();
    }
    config.scan.parallel |= cli.parallel;
    config.scan.strict |= cli.strict;
    config.report.show_empty |= cli.show_empty;

    Ok(config)
}

fn run_scan(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();
    let format = ReportFormat::from_name(&config.report.format);
    let interactive = format == ReportFormat::Terminal && !cli.quiet;

    // Step 1: Discover files
    info!("Discovering xib files...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(&cli.path)?;

    if files.is_empty() {
        if interactive {
            println!("{}", "No xib files found.".yellow());
        }
        return Ok(());
    }

    // Step 2: Parse every document
    let scanner = NibScanner::new()
        .with_parallel(config.scan.parallel)
        .with_progress(interactive);
    let outcome = scanner.scan(&files);

    // Step 3: Report
    let reporter = Reporter::new(format, cli.output.clone()).with_show_empty(config.report.show_empty);
    reporter.report(&outcome, project_root(&cli.path))?;

    let elapsed = start_time.elapsed();
    if interactive {
        println!(
            "{}",
            format!("⏱  Scanned {} files in {:.2}s", files.len(), elapsed.as_secs_f64()).dimmed()
        );
    }

    if config.scan.strict && outcome.has_failures() {
        return Err(miette::miette!(
            "{} of {} xib files failed to parse",
            outcome.failures.len(),
            files.len()
        ));
    }

    Ok(())
}
