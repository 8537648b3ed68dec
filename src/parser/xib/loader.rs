// Document loader
//
// Drives quick-xml over one document, feeds the events to NibParseState and
// assembles the final ParsedNib. Any reader error aborts the document.

use super::classify::Attributes;
use super::deployment::parse_deployment_version;
use super::state::{Accumulated, NibParseState};
use super::{NibWarning, ParsedNib, ResourceParsingError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// File extensions handled by [`NibLoader`]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xib"];

/// Loads xib documents into [`ParsedNib`] values
pub struct NibLoader;

impl NibLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a xib file, logging warnings through `tracing`
    pub fn load(&self, path: &Path) -> Result<ParsedNib, ResourceParsingError> {
        self.load_with_warnings(path, |warning| warn!("{}", warning))
    }

    /// Parse a xib file, reporting non-fatal problems to `on_warning`
    pub fn load_with_warnings<F>(
        &self,
        path: &Path,
        on_warning: F,
    ) -> Result<ParsedNib, ResourceParsingError>
    where
        F: FnMut(NibWarning),
    {
        check_extension(path)?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| ResourceParsingError::UnreadableSource {
                path: path.to_path_buf(),
                reason: "couldn't extract a file name".to_string(),
            })?;

        let reader =
            Reader::from_file(path).map_err(|e| ResourceParsingError::UnreadableSource {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        self.parse_reader(name, path, reader, on_warning)
    }

    /// Parse an in-memory xib document named `name`
    pub fn parse_str(&self, name: &str, contents: &str) -> Result<ParsedNib, ResourceParsingError> {
        self.parse_str_with_warnings(name, contents, |warning| warn!("{}", warning))
    }

    pub fn parse_str_with_warnings<F>(
        &self,
        name: &str,
        contents: &str,
        on_warning: F,
    ) -> Result<ParsedNib, ResourceParsingError>
    where
        F: FnMut(NibWarning),
    {
        let reader = Reader::from_str(contents);
        self.parse_reader(name, Path::new(name), reader, on_warning)
    }

    fn parse_reader<R, F>(
        &self,
        name: &str,
        path: &Path,
        mut reader: Reader<R>,
        mut on_warning: F,
    ) -> Result<ParsedNib, ResourceParsingError>
    where
        R: BufRead,
        F: FnMut(NibWarning),
    {
        let collected = drive(&mut reader, path)?;

        let deployment_version = parse_deployment_version(&collected.deployment_versions, || {
            on_warning(NibWarning::MultipleDeploymentVersions {
                nib: name.to_string(),
                count: collected.deployment_versions.len(),
            })
        });

        debug!(
            "Parsed nib {}: {} root views, {} reusables, {} images, {} colors, {} accessibility identifiers",
            path.display(),
            collected.root_views.len(),
            collected.reusables.len(),
            collected.used_image_references.len(),
            collected.used_color_references.len(),
            collected.used_accessibility_identifiers.len()
        );

        Ok(ParsedNib {
            name: name.to_string(),
            root_views: collected.root_views,
            reusables: collected.reusables,
            used_image_references: collected.used_image_references,
            used_color_references: collected.used_color_references,
            used_accessibility_identifiers: collected.used_accessibility_identifiers,
            deployment_version,
        })
    }
}

impl Default for NibLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn check_extension(path: &Path) -> Result<(), ResourceParsingError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| extension.eq_ignore_ascii_case(supported))
    {
        Ok(())
    } else {
        Err(ResourceParsingError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Run the reader to the end of the document.
///
/// quick-xml reports a clean EOF even when elements are left open, and it
/// accepts a second top-level element, so both checks are done here.
fn drive<R: BufRead>(reader: &mut Reader<R>, path: &Path) -> Result<Accumulated, ResourceParsingError> {
    reader.trim_text(true);

    let mut state = NibParseState::new();
    let mut buf = Vec::new();
    let mut open_elements: usize = 0;
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position();
        let root_closed = seen_root && open_elements == 0;

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if root_closed {
                    return Err(content_after_root(path, position));
                }
                let name = element_name(e);
                let attributes = read_attributes(e, path, position)?;
                state.open_element(&name, &attributes);
                open_elements += 1;
                seen_root = true;
            }
            Ok(Event::Empty(ref e)) => {
                if root_closed {
                    return Err(content_after_root(path, position));
                }
                let name = element_name(e);
                let attributes = read_attributes(e, path, position)?;
                state.open_element(&name, &attributes);
                state.close_element(&name);
                seen_root = true;
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                open_elements = open_elements.checked_sub(1).ok_or_else(|| {
                    malformed(path, format!("unexpected closing tag </{}> at byte {}", name, position))
                })?;
                state.close_element(&name);
            }
            // Whitespace is trimmed away, so any text left here is content
            Ok(Event::Text(_)) | Ok(Event::CData(_)) if root_closed => {
                return Err(content_after_root(path, position));
            }
            Ok(Event::Eof) => break,
            Err(quick_xml::Error::Io(e)) => {
                return Err(ResourceParsingError::UnreadableSource {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                debug!("Error parsing nib {}: {:?}", path.display(), e);
                return Err(malformed(
                    path,
                    format!("{} at byte {}", e, reader.buffer_position()),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(malformed(path, "document has no root element".to_string()));
    }
    if open_elements > 0 {
        return Err(malformed(
            path,
            format!("document ended with {} unclosed element(s)", open_elements),
        ));
    }

    Ok(state.finish())
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn read_attributes(e: &BytesStart, path: &Path, position: usize) -> Result<Attributes, ResourceParsingError> {
    let mut attributes = Attributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            malformed(path, format!("bad attribute in element starting at byte {}: {}", position, err))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().map_err(|err| {
            malformed(path, format!("bad attribute value for '{}' at byte {}: {}", key, position, err))
        })?;
        attributes.insert(key, value.into_owned());
    }

    Ok(attributes)
}

fn content_after_root(path: &Path, position: usize) -> ResourceParsingError {
    malformed(path, format!("content after root element at byte {}", position))
}

fn malformed(path: &Path, reason: String) -> ResourceParsingError {
    ResourceParsingError::MalformedInput {
        path: path.to_path_buf(),
        reason,
    }
}
