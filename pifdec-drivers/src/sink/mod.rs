//! Pixel sink implementations

pub mod graphics;

pub use graphics::DrawTargetSink;
