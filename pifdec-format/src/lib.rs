//! PIF Image File Format
//!
//! This crate defines the on-disk layout of PIF ("Pixel Image Format")
//! files and the encoding primitives shared by the decoder and by tools
//! that produce PIF images.
//!
//! # File Layout
//!
//! All multi-byte fields are little-endian:
//! ```text
//! ┌───────┬──────────┬────────────┬────────┬─────┬───────┬────────┐
//! │ MAGIC │ FILESIZE │ DATAOFFSET │ FORMAT │ BPP │ WIDTH │ HEIGHT │
//! │ 4B    │ 4B       │ 4B         │ 2B     │ 2B  │ 2B    │ 2B     │
//! ├───────┴──────────┴────────────┴────────┴─────┴───────┴────────┤
//! │ DATASIZE 4B │ COLORTABLESIZE 2B │ COMPRESSION 2B              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ palette entries (indexed formats only)                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ pixel data (raw or RLE) at DATAOFFSET                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod encoder;
pub mod image;
pub mod le;
pub mod pack;
pub mod rle;

pub use encoder::{encode, encoded_len, EncodeError, ImageSpec};
pub use image::{
    word_bytes, Compression, FormatError, ImageInfo, ImageType, COLOR_TABLE_OFFSET,
    COMPRESSION_NONE, COMPRESSION_RLE, HEADER_SIZE, PIF_MAGIC,
};
pub use rle::{RleParser, RleRun, MAX_RUN};
