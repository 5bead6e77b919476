use std::time::Duration;

use tracing::debug;

use crate::config::Hooks;
use crate::dom::{Document, NodeId};
use crate::engine::{PageEvent, Widget};

/// Mobile navigation toggle. The expanded flag lives in the markup, mirrored
/// on the header and on its toggle button.
#[derive(Debug, Clone)]
pub struct NavToggle {
    header: NodeId,
    button: NodeId,
    attribute: String,
}

impl NavToggle {
    /// Binds to the first header in the document and the toggle button inside
    /// it. Returns `None` when either is missing.
    pub fn mount(document: &Document, hooks: &Hooks) -> Option<Self> {
        let Some(header) = document.query_class(document.root(), &hooks.header) else {
            debug!(hook = %hooks.header, "no navigation header, skipping nav toggle");
            return None;
        };
        let Some(button) = document.query_class(header, &hooks.nav_toggle) else {
            debug!(hook = %hooks.nav_toggle, "navigation header has no toggle button");
            return None;
        };
        Some(Self {
            header,
            button,
            attribute: hooks.expanded_attribute.clone(),
        })
    }

    pub fn header(&self) -> NodeId {
        self.header
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn is_expanded(&self, document: &Document) -> bool {
        document.attribute(self.header, &self.attribute) == Some("true")
    }

    /// Flips the expanded flag and writes it to both elements. Returns the
    /// new value.
    pub fn toggle(&self, document: &mut Document) -> bool {
        let expanded = !self.is_expanded(document);
        let value = if expanded { "true" } else { "false" };
        document.set_attribute(self.header, &self.attribute, value);
        document.set_attribute(self.button, &self.attribute, value);
        debug!(expanded, "navigation toggled");
        expanded
    }
}

impl Widget for NavToggle {
    fn handle_event(&mut self, document: &mut Document, event: PageEvent) -> bool {
        match event {
            PageEvent::Click(target) if document.contains(self.button, target) => {
                self.toggle(document);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, _document: &mut Document, _dt: Duration) {}

    fn dispose(&mut self) {}
}
