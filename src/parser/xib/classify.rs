// Element classification for xib documents
//
// Decides what a single element means on its own, from its tag name and
// attributes. Position in the document (root view or not) is decided by
// the state machine, not here.

use super::{ResourceReference, Reusable};
use crate::naming::TypeName;
use std::collections::HashMap;

/// Attributes of one element, keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What a single element contributes to the parse result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `<image name=".." catalog="..">`
    Image(ResourceReference),
    /// `<color name=".." catalog="..">`
    Color(ResourceReference),
    /// `<accessibility identifier="..">` or the equivalent runtime attribute
    AccessibilityIdentifier(String),
    /// Raw `version` of a `<deployment>` element, decoded later
    DeploymentVersion(String),
    /// Any other element, treated as a potential view
    View(ViewElement),
    /// A recognised fact element that lacks the attributes it needs
    Nothing,
}

/// A view-like element with its resolved type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewElement {
    pub view_type: TypeName,
    pub reusable: Option<Reusable>,
}

/// Element name -> builtin type, used when no custom class is set
fn builtin_type(element_name: &str) -> Option<TypeName> {
    // TODO: map the remaining standard UIKit elements (button, label, imageView, ...)
    match element_name {
        "view" => Some(TypeName::uiview()),
        "tableViewCell" => Some(TypeName::table_view_cell()),
        "collectionViewCell" => Some(TypeName::collection_view_cell()),
        "collectionReusableView" => Some(TypeName::collection_reusable_view()),
        _ => None,
    }
}

/// Classify one element
pub fn classify(element_name: &str, attributes: &Attributes) -> Classification {
    match element_name {
        "image" => attributes
            .get("name")
            .map(|name| Classification::Image(reference(name, attributes)))
            .unwrap_or(Classification::Nothing),

        "color" => attributes
            .get("name")
            .map(|name| Classification::Color(reference(name, attributes)))
            .unwrap_or(Classification::Nothing),

        "accessibility" => attributes
            .get("identifier")
            .map(|id| Classification::AccessibilityIdentifier(id.to_string()))
            .unwrap_or(Classification::Nothing),

        "deployment" => attributes
            .get("version")
            .map(|version| Classification::DeploymentVersion(version.to_string()))
            .unwrap_or(Classification::Nothing),

        // <userDefinedRuntimeAttribute type="string" keyPath="accessibilityIdentifier" value="..."/>
        "userDefinedRuntimeAttribute" => {
            let is_accessibility = attributes.get("keyPath") == Some("accessibilityIdentifier")
                && attributes.get("type") == Some("string");

            match attributes.get("value") {
                Some(value) if is_accessibility => {
                    Classification::AccessibilityIdentifier(value.to_string())
                }
                _ => Classification::Nothing,
            }
        }

        _ => Classification::View(ViewElement {
            view_type: resolve_view_type(element_name, attributes),
            reusable: reusable_from_attributes(element_name, attributes),
        }),
    }
}

fn reference(name: &str, attributes: &Attributes) -> ResourceReference {
    ResourceReference::new(name, attributes.get("catalog"))
}

/// Resolve the type of a view element.
///
/// A `customClass` wins; its module is `customModule`, except when
/// `customModuleProvider="target"`, meaning the class lives in the target
/// being compiled. Without a custom class the element name is looked up in
/// the builtin table, falling back to `UIView`.
pub fn resolve_view_type(element_name: &str, attributes: &Attributes) -> TypeName {
    if let Some(custom_class) = attributes.get("customClass") {
        let module = if attributes.get("customModuleProvider") == Some("target") {
            None
        } else {
            attributes.get("customModule")
        };
        return TypeName::from_class_name(custom_class, false, module);
    }

    builtin_type(element_name).unwrap_or_else(TypeName::uiview)
}

/// Build a reusable declaration when the element has a non-empty `reuseIdentifier`
pub fn reusable_from_attributes(element_name: &str, attributes: &Attributes) -> Option<Reusable> {
    let identifier = attributes.get("reuseIdentifier").filter(|id| !id.is_empty())?;

    Some(Reusable {
        identifier: identifier.to_string(),
        type_name: resolve_view_type(element_name, attributes),
    })
}
