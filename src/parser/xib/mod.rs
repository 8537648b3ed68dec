// Interface Builder (.xib) parser
//
// Streams a xib document with quick-xml and extracts the resources it uses:
// root views, reusable cells, image and color references, accessibility
// identifiers and the deployment target.

pub mod classify;
pub mod deployment;
mod loader;
pub mod state;

pub use classify::{Attributes, Classification, ViewElement};
pub use loader::{NibLoader, SUPPORTED_EXTENSIONS};
pub use state::NibParseState;

use crate::naming::TypeName;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop a single document from being parsed
#[derive(Error, Debug)]
pub enum ResourceParsingError {
    #[error("Unsupported extension '{extension}' for {}, expected one of: xib", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("Couldn't read {}: {reason}", path.display())]
    UnreadableSource { path: PathBuf, reason: String },

    #[error("Invalid XML in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
}

impl ResourceParsingError {
    /// Document the error belongs to
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedExtension { path, .. }
            | Self::UnreadableSource { path, .. }
            | Self::MalformedInput { path, .. } => path,
        }
    }

    /// Stable machine-readable name of the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedExtension { .. } => "unsupported_extension",
            Self::UnreadableSource { .. } => "unreadable_source",
            Self::MalformedInput { .. } => "malformed_input",
        }
    }
}

/// Non-fatal problems found while loading a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NibWarning {
    /// More than one `<deployment>` marker; the version is left unset
    MultipleDeploymentVersions { nib: String, count: usize },
}

impl fmt::Display for NibWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleDeploymentVersions { nib, count } => write!(
                f,
                "Nib {} contains {} deployment versions. Unknown how to parse, ignoring all.",
                nib, count
            ),
        }
    }
}

/// Named asset reference, optionally scoped to an asset catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceReference {
    pub name: String,
    pub catalog: Option<String>,
}

impl ResourceReference {
    pub fn new(name: &str, catalog: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            catalog: catalog.map(str::to_string),
        }
    }
}

/// A cell or reusable view registered under a reuse identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reusable {
    pub identifier: String,
    #[serde(rename = "type")]
    pub type_name: TypeName,
}

/// Resources used by one xib document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedNib {
    /// File name without extension
    pub name: String,

    /// Types of the top-level views, in document order
    pub root_views: Vec<TypeName>,

    pub reusables: Vec<Reusable>,

    pub used_image_references: Vec<ResourceReference>,

    pub used_color_references: Vec<ResourceReference>,

    pub used_accessibility_identifiers: Vec<String>,

    /// Minimum deployment target, e.g. "13.0"
    pub deployment_version: Option<String>,
}

impl ParsedNib {
    /// First root view, the one instantiated by default
    pub fn first_root_view(&self) -> Option<&TypeName> {
        self.root_views.first()
    }

    /// Whether the document references nothing worth reporting
    pub fn is_empty(&self) -> bool {
        self.root_views.is_empty()
            && self.reusables.is_empty()
            && self.used_image_references.is_empty()
            && self.used_color_references.is_empty()
            && self.used_accessibility_identifiers.is_empty()
    }
}
