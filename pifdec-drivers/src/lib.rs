//! Source and sink implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pifdec-hal:
//!
//! - Byte sources (in-memory images, `embedded-io` files)
//! - Pixel sinks (`embedded-graphics` draw targets)

#![no_std]
#![deny(unsafe_code)]

pub mod sink;
pub mod source;

pub use sink::DrawTargetSink;
pub use source::{FileOpener, IoSource, IoSourceError, MemoryError, MemoryFile, MemorySource};
