//! PIF decoder capability traits
//!
//! The decoder never touches a filesystem or a display directly. It reads
//! bytes through an [`ImageSource`] and hands every decoded pixel to a
//! [`PixelSink`]. Board support code implements these for its storage and
//! display hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pifdec-core (PifDecoder)               │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  ImageSource  │       │   PixelSink   │
//! │ (this crate)  │       │ (this crate)  │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         ▼                       ▼
//!   flash, SD card,          TFT, e-paper,
//!   FAT filesystem           framebuffer
//! ```
//!
//! # Traits
//!
//! - [`source::ImageSource`] - Open, read, seek and close an image file
//! - [`sink::PixelSink`] - Receive decoded pixels

#![no_std]
#![deny(unsafe_code)]

pub mod sink;
pub mod source;

pub use sink::PixelSink;
pub use source::ImageSource;
