//! Type naming for classes referenced from interface archives
//!
//! Class names found in xib attributes are turned into [`TypeName`] values:
//! an optional module qualifier plus a name token that is safe to use as an
//! identifier in generated code.

use serde::Serialize;
use std::fmt;

/// Module that owns the builtin view classes
pub const UIKIT_MODULE: &str = "UIKit";

/// Reference to a type, optionally qualified by the module it lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeName {
    /// Module qualifier, `None` when the type belongs to the compiling target
    pub module: Option<String>,

    /// Identifier of the type within its module
    pub name: String,
}

impl TypeName {
    pub fn new(module: Option<&str>, name: &str) -> Self {
        Self {
            module: module.filter(|m| !m.is_empty()).map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Build a type from a raw class name as written in a document.
    ///
    /// The name is sanitised into an identifier (see [`sanitize_identifier`]).
    /// An empty module string is treated the same as no module.
    pub fn from_class_name(raw: &str, lowercase_first: bool, module: Option<&str>) -> Self {
        Self {
            module: module.filter(|m| !m.is_empty()).map(str::to_string),
            name: sanitize_identifier(raw, lowercase_first),
        }
    }

    pub fn uiview() -> Self {
        Self::new(Some(UIKIT_MODULE), "UIView")
    }

    pub fn table_view_cell() -> Self {
        Self::new(Some(UIKIT_MODULE), "UITableViewCell")
    }

    pub fn collection_view_cell() -> Self {
        Self::new(Some(UIKIT_MODULE), "UICollectionViewCell")
    }

    pub fn collection_reusable_view() -> Self {
        Self::new(Some(UIKIT_MODULE), "UICollectionReusableView")
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}.{}", module, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Turn an arbitrary string into an identifier.
///
/// Characters that cannot appear in an identifier split the input into
/// words; every word after the first gets an uppercase first letter so
/// `my-custom cell` becomes `myCustomCell`. The casing of the first word is
/// kept unless `lowercase_first` is set, in which case its first character
/// is lowercased.
pub fn sanitize_identifier(raw: &str, lowercase_first: bool) -> String {
    let mut words = raw
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty());

    let mut identifier = String::with_capacity(raw.len());

    if let Some(first) = words.next() {
        if lowercase_first {
            let mut chars = first.chars();
            if let Some(c) = chars.next() {
                identifier.extend(c.to_lowercase());
                identifier.push_str(chars.as_str());
            }
        } else {
            identifier.push_str(first);
        }
    }

    for word in words {
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            identifier.extend(c.to_uppercase());
            identifier.push_str(chars.as_str());
        }
    }

    // Identifiers cannot start with a digit
    if identifier.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }

    identifier
}
