pub mod engine;
pub mod layout;
pub mod texture_loader;

pub use engine::{PreviewEngine, run};
