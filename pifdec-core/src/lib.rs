//! Streaming PIF image decoder
//!
//! This crate contains everything between the byte source and the pixel
//! sink, with no dependency on a particular board:
//!
//! - Header parsing and validation
//! - Palette lookup from a caller-loaned buffer or by seeking
//! - Raw and RLE pixel streams, sub-byte unpacking
//! - Colour conversion between RGB888, RGB565 and RGB332
//! - Decoder configuration
//!
//! Memory use is fixed: the decoder never allocates and keeps only one
//! pixel word in flight.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod color;
pub mod config;
pub mod decoder;
pub mod error;
pub mod palette;

#[cfg(test)]
mod testing;

pub use color::{convert, ConversionMode};
pub use config::{DecoderConfig, OutputConversion};
pub use decoder::{DecodeEvent, DecodeState, PifDecoder};
pub use error::PifError;
pub use palette::{FixedPalette, PaletteResolver};

pub use pifdec_format::{Compression, FormatError, ImageInfo, ImageType};
