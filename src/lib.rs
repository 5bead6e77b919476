//! Carousel and navigation widgets over a mutable element tree.
//!
//! A host parses a page into a [`dom::Document`], hands it to
//! [`page::Page::mount`], then feeds it [`engine::PageEvent`]s and elapsed
//! time. The `preview` feature adds a raylib window acting as that host.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod dom;
pub mod engine;
pub mod nav;
pub mod page;
pub mod state;
pub mod timer;

#[cfg(feature = "preview")]
pub mod preview;

pub use carousel::Carousel;
pub use config::{Config, Hooks};
pub use dom::{Document, NodeId};
pub use engine::{PageEvent, Widget};
pub use nav::NavToggle;
pub use page::Page;
