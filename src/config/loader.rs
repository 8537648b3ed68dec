use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a nibscan run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to scan, relative to the project root
    pub targets: Vec<PathBuf>,

    /// Glob patterns for files to skip
    pub exclude: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,

    /// Scan configuration
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// List documents that reference nothing
    pub show_empty: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Parse documents on all cores
    pub parallel: bool,

    /// Exit with an error when any document fails to parse
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: vec![],
            exclude: vec![
                "**/build/**".to_string(),
                "**/DerivedData/**".to_string(),
                "**/Pods/**".to_string(),
                "**/Carthage/**".to_string(),
            ],
            report: ReportConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            show_empty: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML or TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => serde_yaml::from_str(&contents).or_else(|_| {
                toml::from_str(&contents)
                    .into_diagnostic()
                    .wrap_err("Failed to parse config file")
            }),
        }
    }

    /// Look for a config file in the project root, falling back to defaults
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".nibscan.yml",
            ".nibscan.yaml",
            ".nibscan.toml",
            "nibscan.yml",
            "nibscan.yaml",
            "nibscan.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Whether a path matches one of the exclude patterns.
    ///
    /// Patterns containing `/` are matched against the whole path, others
    /// against the file name only.
    pub fn should_exclude(&self, path: &Path) -> bool {
        let full = path.to_string_lossy().replace('\\', "/");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.exclude.iter().any(|pattern| {
            if pattern.contains('/') {
                glob_match(pattern, &full)
            } else {
                glob_match(pattern, &file_name)
            }
        })
    }
}

/// Glob matching: `*` and `?` stay within a path segment, `**` crosses
/// segments and `**/` may match no directory at all.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    match_bytes(pattern.as_bytes(), text.as_bytes())
}

fn match_bytes(pattern: &[u8], text: &[u8]) -> bool {
    match pattern {
        [] => text.is_empty(),
        [b'*', b'*', rest @ ..] => {
            if let [b'/', after_slash @ ..] = rest {
                if match_bytes(after_slash, text) {
                    return true;
                }
            }
            (0..=text.len()).any(|i| match_bytes(rest, &text[i..]))
        }
        [b'*', rest @ ..] => {
            for i in 0..=text.len() {
                if match_bytes(rest, &text[i..]) {
                    return true;
                }
                if text.get(i) == Some(&b'/') {
                    break;
                }
            }
            false
        }
        [b'?', rest @ ..] => match text {
            [c, tail @ ..] if *c != b'/' => match_bytes(rest, tail),
            _ => false,
        },
        [p, rest @ ..] => match text {
            [c, tail @ ..] if c == p => match_bytes(rest, tail),
            _ => false,
        },
    }
}
