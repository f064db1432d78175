//! Colour conversion between pixel encodings
//!
//! Conversions are defined between the RGB888, RGB565 and RGB332
//! encodings. Indexed types convert as the encoding of their palette
//! entries. The 16-colour and monochrome types have no defined encoding
//! and convert to 0.
//!
//! Narrowing is plain bit truncation. Widening has two modes:
//! - [`ConversionMode::Accurate`] spreads each channel over the full
//!   target range so that full intensity stays full intensity
//! - [`ConversionMode::Fast`] shifts the channel into place

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pifdec_format::ImageType;

/// Channel widening strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConversionMode {
    /// Scale channels to the full target range
    #[default]
    Accurate,
    /// Shift channels without rescaling
    Fast,
}

/// Significant bits of a value in the given direct encoding
const fn mask(encoding: ImageType) -> u32 {
    match encoding {
        ImageType::Rgb888 => 0x00FF_FFFF,
        ImageType::Rgb565 => 0xFFFF,
        _ => 0xFF,
    }
}

/// Convert a colour value from one encoding to another
///
/// Returns 0 when either side has no colour encoding.
pub fn convert(color: u32, source: ImageType, target: ImageType, mode: ConversionMode) -> u32 {
    let (Some(from), Some(to)) = (source.color_encoding(), target.color_encoding()) else {
        return 0;
    };

    match (from, to) {
        (from, to) if from == to => color & mask(from),
        (ImageType::Rgb332, ImageType::Rgb888) => rgb332_to_rgb888(color, mode),
        (ImageType::Rgb332, ImageType::Rgb565) => rgb332_to_rgb565(color, mode),
        (ImageType::Rgb565, ImageType::Rgb888) => rgb565_to_rgb888(color, mode),
        (ImageType::Rgb888, ImageType::Rgb565) => {
            ((color & 0xF8_0000) >> 8) | ((color & 0xFC00) >> 5) | ((color & 0xF8) >> 3)
        }
        (ImageType::Rgb888, ImageType::Rgb332) => {
            ((color & 0xE0_0000) >> 16) | ((color & 0xE000) >> 11) | ((color & 0xC0) >> 6)
        }
        (ImageType::Rgb565, ImageType::Rgb332) => {
            ((color & 0xE000) >> 8) | ((color & 0x0700) >> 6) | ((color & 0x0018) >> 3)
        }
        _ => 0,
    }
}

fn rgb332_to_rgb888(color: u32, mode: ConversionMode) -> u32 {
    let r = (color >> 5) & 0x07;
    let g = (color >> 2) & 0x07;
    let b = color & 0x03;

    let (r, g, b) = match mode {
        ConversionMode::Accurate => (r * 36 + 3, g * 36 + 3, b * 85),
        ConversionMode::Fast => (r << 5, g << 5, b << 6),
    };
    (r << 16) | (g << 8) | b
}

fn rgb332_to_rgb565(color: u32, mode: ConversionMode) -> u32 {
    let r = (color >> 5) & 0x07;
    let g = (color >> 2) & 0x07;
    let b = color & 0x03;

    let (r, g, b) = match mode {
        ConversionMode::Accurate => (r * 4 + 3, g * 9, b * 10),
        ConversionMode::Fast => (r << 2, g << 3, b << 3),
    };
    (r << 11) | (g << 5) | b
}

fn rgb565_to_rgb888(color: u32, mode: ConversionMode) -> u32 {
    let r = (color >> 11) & 0x1F;
    let g = (color >> 5) & 0x3F;
    let b = color & 0x1F;

    let (r, g, b) = match mode {
        ConversionMode::Accurate => (r * 8 + 4, g * 4 + 3, b * 8 + 3),
        ConversionMode::Fast => (r << 3, g << 2, b << 3),
    };
    (r << 16) | (g << 8) | b
}

/// Split an RGB888 value into channels
pub const fn rgb888_channels(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
