//! nibscan - Resource usage extraction for Interface Builder xib files
//!
//! This library streams xib documents and reports what each one uses:
//! top-level views, reusable cells, image and color references,
//! accessibility identifiers and the deployment target.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **File Discovery** - Find all .xib files in a project
//! 2. **Parsing** - Stream each document through a depth-tracking state machine
//! 3. **Scanning** - Parse many documents, isolating failures per document
//! 4. **Reporting** - Output results to the terminal or as JSON

pub mod config;
pub mod discovery;
pub mod naming;
pub mod parser;
pub mod report;
pub mod scan;

pub use config::Config;
pub use discovery::FileFinder;
pub use naming::TypeName;
pub use parser::xib::{NibLoader, NibWarning, ParsedNib, ResourceParsingError, ResourceReference, Reusable};
pub use report::{ReportFormat, Reporter};
pub use scan::{NibScanner, ScanOutcome};
