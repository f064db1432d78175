//! Whole-file PIF encoding
//!
//! Writes header, palette and pixel data into a caller-provided buffer.
//! Pixel data is given as stored words: one word per pixel for direct
//! colour types, one word per packed byte for sub-byte types (see
//! [`crate::pack::pack_indices`]).

use crate::image::{word_bytes, Compression, ImageInfo, ImageType, HEADER_SIZE};
use crate::{le, rle};

/// Errors that can occur while encoding an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer too small
    BufferTooSmall,
    /// Pixel word size outside 1..=3 bytes
    InvalidWordSize,
    /// Bit depth cannot be packed
    UnsupportedBitDepth(u16),
    /// Palette given for a type without one, or too many entries
    InvalidPalette,
}

/// Parameters of an image to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageSpec {
    pub image_type: ImageType,
    pub bits_per_pixel: u16,
    pub width: u16,
    pub height: u16,
    pub compression: Compression,
}

impl ImageSpec {
    /// Direct colour image with the natural depth of its type
    pub const fn direct(image_type: ImageType, width: u16, height: u16) -> Self {
        let bits_per_pixel = match image_type {
            ImageType::Rgb888 => 24,
            ImageType::Rgb565 => 16,
            _ => 8,
        };
        Self {
            image_type,
            bits_per_pixel,
            width,
            height,
            compression: Compression::None,
        }
    }

    /// Packed or indexed image with an explicit depth
    pub const fn packed(image_type: ImageType, bits_per_pixel: u16, width: u16, height: u16) -> Self {
        Self {
            image_type,
            bits_per_pixel,
            width,
            height,
            compression: Compression::None,
        }
    }

    /// Same image with RLE compressed pixel data
    pub const fn with_rle(mut self) -> Self {
        self.compression = Compression::Rle;
        self
    }

    fn palette_bytes(&self, entries: usize) -> Result<usize, EncodeError> {
        match self.image_type.palette_entry_width() {
            Some(width) if entries <= u16::MAX as usize => Ok(entries * width as usize),
            None if entries == 0 => Ok(0),
            _ => Err(EncodeError::InvalidPalette),
        }
    }
}

/// Upper bound on the encoded size of an image
pub fn encoded_len(spec: &ImageSpec, palette_entries: usize, data_words: usize) -> usize {
    let word = word_bytes(spec.bits_per_pixel);
    let palette = spec
        .image_type
        .palette_entry_width()
        .map_or(0, |w| w as usize * palette_entries);
    let data = match spec.compression {
        Compression::None => data_words * word,
        Compression::Rle => rle::max_compressed_len(data_words, word),
    };
    HEADER_SIZE + palette + data
}

/// Encode a complete PIF file
///
/// Returns the number of bytes written
pub fn encode(
    spec: &ImageSpec,
    palette: &[u32],
    data: &[u32],
    buffer: &mut [u8],
) -> Result<usize, EncodeError> {
    let palette_len = spec.palette_bytes(palette.len())?;
    let data_offset = HEADER_SIZE + palette_len;
    if buffer.len() < data_offset {
        return Err(EncodeError::BufferTooSmall);
    }

    if let Some(width) = spec.image_type.palette_entry_width() {
        let width = width as usize;
        for (entry, slot) in palette
            .iter()
            .zip(buffer[HEADER_SIZE..data_offset].chunks_exact_mut(width))
        {
            le::put_uint(slot, *entry, width);
        }
    }

    let word = word_bytes(spec.bits_per_pixel);
    let data_len = match spec.compression {
        Compression::None => {
            let end = data_offset + data.len() * word;
            let out = buffer
                .get_mut(data_offset..end)
                .ok_or(EncodeError::BufferTooSmall)?;
            for (value, slot) in data.iter().zip(out.chunks_exact_mut(word)) {
                le::put_uint(slot, *value, word);
            }
            end - data_offset
        }
        Compression::Rle => rle::compress(data, word, &mut buffer[data_offset..])?,
    };

    let total = data_offset + data_len;
    let info = ImageInfo {
        file_size: total as u32,
        image_data_offset: data_offset as u32,
        image_type: spec.image_type,
        bits_per_pixel: spec.bits_per_pixel,
        width: spec.width,
        height: spec.height,
        image_data_size: data_len as u32,
        color_table_entries: palette.len() as u16,
        compression: spec.compression,
        ..Default::default()
    };
    info.encode_header(buffer)?;

    Ok(total)
}
