//! Built-in 16-colour table
//!
//! The classic CGA text-mode palette, stored in the three direct
//! encodings so the table matches the display without conversion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pifdec_format::ImageType;

/// CGA palette as RGB888
pub const CGA_RGB888: [u32; 16] = [
    0x00_0000, // black
    0x00_00AA, // blue
    0x00_AA00, // green
    0x00_AAAA, // cyan
    0xAA_0000, // red
    0xAA_00AA, // magenta
    0xAA_AA00, // dark yellow
    0xAA_AAAA, // light grey
    0x55_5555, // dark grey
    0x55_55FF, // light blue
    0x55_FF55, // light green
    0x55_FFFF, // light cyan
    0xFF_5555, // light red
    0xFF_55FF, // light magenta
    0xFF_FF55, // yellow
    0xFF_FFFF, // white
];

/// CGA palette as RGB565
pub const CGA_RGB565: [u16; 16] = [
    0x0000, 0x0015, 0x0540, 0x0555, 0xA800, 0xA815, 0xAD40, 0xAD55, //
    0x52AA, 0x52BF, 0x57EA, 0x57FF, 0xFAAA, 0xFABF, 0xFFEA, 0xFFFF,
];

/// CGA palette as RGB332
pub const CGA_RGB332: [u8; 16] = [
    0x00, 0x02, 0x14, 0x16, 0xA0, 0xA2, 0xB4, 0xB6, //
    0x49, 0x4B, 0x5D, 0x5F, 0xE9, 0xEB, 0xFD, 0xFF,
];

/// Table entry drawn for a cleared monochrome bit
pub const MONO_BLACK: u8 = 0;

/// Table entry drawn for a set monochrome bit
pub const MONO_WHITE: u8 = 15;

/// Encoding of the built-in table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixedPalette {
    Rgb888,
    #[default]
    Rgb565,
    Rgb332,
}

impl FixedPalette {
    /// Colour of a 4-bit index
    pub fn lookup(self, index: u8) -> u32 {
        let index = usize::from(index & 0x0F);
        match self {
            FixedPalette::Rgb888 => CGA_RGB888[index],
            FixedPalette::Rgb565 => u32::from(CGA_RGB565[index]),
            FixedPalette::Rgb332 => u32::from(CGA_RGB332[index]),
        }
    }

    /// Colour of a monochrome bit
    pub fn mono(self, bit: bool) -> u32 {
        self.lookup(if bit { MONO_WHITE } else { MONO_BLACK })
    }

    /// Direct image type the table values are encoded in
    pub fn encoding(self) -> ImageType {
        match self {
            FixedPalette::Rgb888 => ImageType::Rgb888,
            FixedPalette::Rgb565 => ImageType::Rgb565,
            FixedPalette::Rgb332 => ImageType::Rgb332,
        }
    }
}
