//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
pub mod factory;
pub mod file;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use factory::SinkFactory;
pub use file::{FilePlacement, FileSink};

pub use crate::core::Sink;
