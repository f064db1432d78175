//! Byte source implementations

pub mod io;
pub mod memory;

pub use io::{FileOpener, IoSource, IoSourceError};
pub use memory::{MemoryError, MemoryFile, MemorySource};
