// Depth-tracking parse state for xib documents
//
// Consumes open/close events in document order and accumulates everything
// the classifier reports. Root views are the direct children of <objects>,
// found by counting opens and closes since the container was opened.

use super::classify::{classify, Attributes, Classification};
use super::{ResourceReference, Reusable};
use crate::naming::TypeName;
use tracing::trace;

/// Element whose direct children are the top-level objects of a document
pub const CONTAINER_ELEMENT: &str = "objects";

/// Direct children of the container that are never root views
pub const IGNORED_ROOT_VIEW_ELEMENTS: &[&str] = &["placeholder"];

/// Everything collected from one document, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulated {
    pub root_views: Vec<TypeName>,
    pub reusables: Vec<Reusable>,
    pub used_image_references: Vec<ResourceReference>,
    pub used_color_references: Vec<ResourceReference>,
    pub used_accessibility_identifiers: Vec<String>,
    pub deployment_versions: Vec<String>,
}

/// Streaming parse state for a single document
#[derive(Debug, Default)]
pub struct NibParseState {
    container_open: bool,
    depth_since_container: usize,
    collected: Accumulated,
}

impl NibParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the start of an element
    pub fn open_element(&mut self, name: &str, attributes: &Attributes) {
        if self.container_open {
            self.depth_since_container += 1;
        }
        if name == CONTAINER_ELEMENT && !self.container_open {
            self.container_open = true;
            self.depth_since_container = 0;
        }

        match classify(name, attributes) {
            Classification::Image(reference) => self.collected.used_image_references.push(reference),
            Classification::Color(reference) => self.collected.used_color_references.push(reference),
            Classification::AccessibilityIdentifier(identifier) => {
                self.collected.used_accessibility_identifiers.push(identifier)
            }
            Classification::DeploymentVersion(version) => {
                self.collected.deployment_versions.push(version)
            }
            Classification::View(view) => {
                if self.is_root_view_position(name) {
                    trace!("Root view <{}>: {}", name, view.view_type);
                    self.collected.root_views.push(view.view_type);
                }
                if let Some(reusable) = view.reusable {
                    self.collected.reusables.push(reusable);
                }
            }
            Classification::Nothing => {}
        }
    }

    /// Handle the end of an element
    pub fn close_element(&mut self, name: &str) {
        if name == CONTAINER_ELEMENT {
            self.container_open = false;
        } else if self.container_open {
            // Saturating so an unbalanced stream can never underflow
            self.depth_since_container = self.depth_since_container.saturating_sub(1);
        }
    }

    fn is_root_view_position(&self, name: &str) -> bool {
        self.container_open
            && self.depth_since_container == 1
            && !IGNORED_ROOT_VIEW_ELEMENTS.contains(&name)
    }

    pub fn is_container_open(&self) -> bool {
        self.container_open
    }

    pub fn depth_since_container(&self) -> usize {
        self.depth_since_container
    }

    /// Stop consuming events and hand over the accumulated results
    pub fn finish(self) -> Accumulated {
        self.collected
    }
}
