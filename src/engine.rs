use std::time::Duration;

use crate::dom::{Document, NodeId};

/// Host events a widget can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Click(NodeId),
    PointerEnter(NodeId),
    PointerLeave(NodeId),
}

impl PageEvent {
    pub fn target(&self) -> NodeId {
        match *self {
            PageEvent::Click(id) | PageEvent::PointerEnter(id) | PageEvent::PointerLeave(id) => id,
        }
    }
}

/// A mounted, self-contained interactive unit bound to part of a document.
pub trait Widget {
    /// Reacts to `event`; returns true when the widget changed because of it.
    fn handle_event(&mut self, document: &mut Document, event: PageEvent) -> bool;

    /// Advances the widget's timers by `dt` of host time.
    fn update(&mut self, document: &mut Document, dt: Duration);

    /// Stops every timer the widget owns. The widget stays inert afterwards.
    fn dispose(&mut self);
}
