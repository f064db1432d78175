//! Image header types
//!
//! [`ImageInfo`] is both the decoded header record and the live decode
//! cursor that sinks read to place pixels on screen.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoder::EncodeError;
use crate::le;

/// File magic, `"PIF\0"` read as a little-endian u32
pub const PIF_MAGIC: u32 = 0x0046_4950;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 28;

/// Offset of the first palette entry (directly after the header)
pub const COLOR_TABLE_OFFSET: u32 = HEADER_SIZE as u32;

/// Compression tag for raw pixel data
pub const COMPRESSION_NONE: u16 = 0x0000;

/// Compression tag for run-length encoded pixel data
pub const COMPRESSION_RLE: u16 = 0x7DDE;

/// Errors raised while interpreting a PIF header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// First four bytes are not `"PIF\0"`
    BadMagic(u32),
    /// Format tag does not name a known image type
    UnknownImageType(u16),
    /// Compression tag is neither none nor RLE
    UnknownCompression(u16),
    /// Bits per pixel cannot be unpacked for this image type
    UnsupportedBitDepth(u16),
}

/// Pixel encoding of an image
///
/// The discriminant is a packed descriptor: the low two bits give the
/// palette entry width in bytes for indexed types, bit 2 marks the
/// packed/indexed family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ImageType {
    /// 24-bit direct colour
    #[default]
    Rgb888 = 0,
    /// 16-bit direct colour
    Rgb565 = 1,
    /// 8-bit direct colour
    Rgb332 = 2,
    /// 4-bit index into the fixed 16-colour table
    Rgb16c = 3,
    /// 1-bit black and white
    Monochrome = 4,
    /// Index into a palette of RGB332 entries
    Indexed8 = 5,
    /// Index into a palette of RGB565 entries
    Indexed16 = 6,
    /// Index into a palette of RGB888 entries
    Indexed24 = 7,
}

impl ImageType {
    /// Tag stored in the header for this type
    pub const fn tag(self) -> u16 {
        match self {
            ImageType::Rgb888 => 0x433C,
            ImageType::Rgb565 => 0xE5C5,
            ImageType::Rgb332 => 0x1E53,
            ImageType::Rgb16c => 0xB895,
            ImageType::Monochrome => 0x7DAA,
            ImageType::Indexed24 => 0x4952,
            ImageType::Indexed16 => 0x4947,
            ImageType::Indexed8 => 0x4942,
        }
    }

    /// Look up the image type for a header tag
    pub const fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            0x433C => Some(ImageType::Rgb888),
            0xE5C5 => Some(ImageType::Rgb565),
            0x1E53 => Some(ImageType::Rgb332),
            0xB895 => Some(ImageType::Rgb16c),
            0x7DAA => Some(ImageType::Monochrome),
            0x4952 => Some(ImageType::Indexed24),
            0x4947 => Some(ImageType::Indexed16),
            0x4942 => Some(ImageType::Indexed8),
            _ => None,
        }
    }

    /// Pixel value encodes the colour itself
    pub const fn is_direct(self) -> bool {
        (self as u8) <= ImageType::Rgb332 as u8
    }

    /// Pixel data holds sub-byte groups that must be unpacked
    pub const fn is_packed(self) -> bool {
        !self.is_direct()
    }

    /// Pixel values index a palette stored in the file
    pub const fn is_indexed(self) -> bool {
        self.palette_entry_width().is_some()
    }

    /// Byte width of one palette entry, for types that carry a palette
    pub const fn palette_entry_width(self) -> Option<u8> {
        match (self as u8) & 0x04 {
            0 => None,
            _ => match (self as u8) & 0x03 {
                0 => None,
                width => Some(width),
            },
        }
    }

    /// Direct colour type sharing this type's colour encoding
    ///
    /// Indexed types map to the encoding of their palette entries. The
    /// 16-colour and monochrome types have no fixed encoding.
    pub const fn color_encoding(self) -> Option<ImageType> {
        match self {
            ImageType::Rgb888 | ImageType::Indexed24 => Some(ImageType::Rgb888),
            ImageType::Rgb565 | ImageType::Indexed16 => Some(ImageType::Rgb565),
            ImageType::Rgb332 | ImageType::Indexed8 => Some(ImageType::Rgb332),
            ImageType::Rgb16c | ImageType::Monochrome => None,
        }
    }
}

/// Pixel data compression scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Compression {
    #[default]
    None,
    Rle,
}

impl Compression {
    /// Tag stored in the header
    pub const fn tag(self) -> u16 {
        match self {
            Compression::None => COMPRESSION_NONE,
            Compression::Rle => COMPRESSION_RLE,
        }
    }

    /// Look up the compression scheme for a header tag
    pub const fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            COMPRESSION_NONE => Some(Compression::None),
            COMPRESSION_RLE => Some(Compression::Rle),
            _ => None,
        }
    }
}

/// Bytes in one stored pixel word for the given bit depth
pub const fn word_bytes(bits_per_pixel: u16) -> usize {
    if bits_per_pixel > 16 {
        3
    } else if bits_per_pixel > 8 {
        2
    } else {
        1
    }
}

/// Header record of the open image plus the current decode position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageInfo {
    /// Total file size as declared in the header
    pub file_size: u32,
    /// Absolute offset of the pixel data
    pub image_data_offset: u32,
    /// Pixel encoding
    pub image_type: ImageType,
    /// Bits per stored pixel
    pub bits_per_pixel: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Size of the pixel data in bytes
    pub image_data_size: u32,
    /// Number of palette entries
    pub color_table_entries: u16,
    /// Pixel data compression
    pub compression: Compression,
    /// Destination x of the top-left pixel
    pub origin_x: u16,
    /// Destination y of the top-left pixel
    pub origin_y: u16,
    /// Column of the pixel being drawn
    pub cursor_x: u16,
    /// Row of the pixel being drawn
    pub cursor_y: u16,
}

impl ImageInfo {
    /// Screen coordinates of the pixel at the cursor
    pub fn screen_position(&self) -> (u16, u16) {
        (
            self.origin_x.saturating_add(self.cursor_x),
            self.origin_y.saturating_add(self.cursor_y),
        )
    }

    /// Number of pixels in the image
    pub fn pixel_count(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Bytes per stored pixel word
    pub fn word_bytes(&self) -> usize {
        word_bytes(self.bits_per_pixel)
    }

    /// Move the cursor to the next pixel in row-major order
    ///
    /// Returns `true` once the cursor has left the last row.
    pub fn advance_cursor(&mut self) -> bool {
        self.cursor_x += 1;
        if self.cursor_x >= self.width {
            self.cursor_x = 0;
            self.cursor_y += 1;
        }
        self.is_complete()
    }

    /// All rows have been drawn
    pub fn is_complete(&self) -> bool {
        self.cursor_y >= self.height
    }

    /// Encode the 28-byte header into a buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_header(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        if buffer.len() < HEADER_SIZE {
            return Err(EncodeError::BufferTooSmall);
        }

        le::put_u32(&mut buffer[0..], PIF_MAGIC);
        le::put_u32(&mut buffer[4..], self.file_size);
        le::put_u32(&mut buffer[8..], self.image_data_offset);
        le::put_u16(&mut buffer[12..], self.image_type.tag());
        le::put_u16(&mut buffer[14..], self.bits_per_pixel);
        le::put_u16(&mut buffer[16..], self.width);
        le::put_u16(&mut buffer[18..], self.height);
        le::put_u32(&mut buffer[20..], self.image_data_size);
        le::put_u16(&mut buffer[24..], self.color_table_entries);
        le::put_u16(&mut buffer[26..], self.compression.tag());

        Ok(HEADER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [ImageType; 8] = [
        ImageType::Rgb888,
        ImageType::Rgb565,
        ImageType::Rgb332,
        ImageType::Rgb16c,
        ImageType::Monochrome,
        ImageType::Indexed8,
        ImageType::Indexed16,
        ImageType::Indexed24,
    ];

    #[test]
    fn test_tags_map_back() {
        for ty in ALL_TYPES {
            assert_eq!(ImageType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(ImageType::from_tag(0x1234), None);
    }

    #[test]
    fn test_palette_entry_width() {
        assert_eq!(ImageType::Indexed8.palette_entry_width(), Some(1));
        assert_eq!(ImageType::Indexed16.palette_entry_width(), Some(2));
        assert_eq!(ImageType::Indexed24.palette_entry_width(), Some(3));
        assert_eq!(ImageType::Monochrome.palette_entry_width(), None);
        assert_eq!(ImageType::Rgb16c.palette_entry_width(), None);
        assert_eq!(ImageType::Rgb565.palette_entry_width(), None);
    }

    #[test]
    fn test_type_families() {
        assert!(ImageType::Rgb332.is_direct());
        assert!(!ImageType::Rgb16c.is_direct());
        assert!(ImageType::Rgb16c.is_packed());
        assert!(ImageType::Indexed24.is_indexed());
        assert!(!ImageType::Monochrome.is_indexed());
        assert!(!ImageType::Rgb888.is_indexed());
    }

    #[test]
    fn test_compression_tags() {
        assert_eq!(Compression::from_tag(0), Some(Compression::None));
        assert_eq!(Compression::from_tag(0x7DDE), Some(Compression::Rle));
        assert_eq!(Compression::from_tag(1), None);
    }

    #[test]
    fn test_word_bytes() {
        assert_eq!(word_bytes(1), 1);
        assert_eq!(word_bytes(8), 1);
        assert_eq!(word_bytes(9), 2);
        assert_eq!(word_bytes(16), 2);
        assert_eq!(word_bytes(24), 3);
    }

    #[test]
    fn test_cursor_wraps_rows() {
        let mut info = ImageInfo {
            width: 2,
            height: 2,
            ..Default::default()
        };
        assert!(!info.advance_cursor());
        assert_eq!((info.cursor_x, info.cursor_y), (1, 0));
        assert!(!info.advance_cursor());
        assert_eq!((info.cursor_x, info.cursor_y), (0, 1));
        info.advance_cursor();
        assert!(info.advance_cursor());
        assert!(info.is_complete());
    }

    #[test]
    fn test_screen_position() {
        let info = ImageInfo {
            origin_x: 10,
            origin_y: 20,
            cursor_x: 3,
            cursor_y: 4,
            ..Default::default()
        };
        assert_eq!(info.screen_position(), (13, 24));
    }

    #[test]
    fn test_encode_header_layout() {
        let info = ImageInfo {
            file_size: 0x0102_0304,
            image_data_offset: 28,
            image_type: ImageType::Rgb565,
            bits_per_pixel: 16,
            width: 320,
            height: 240,
            image_data_size: 153_600,
            color_table_entries: 0,
            compression: Compression::Rle,
            ..Default::default()
        };
        let mut buffer = [0u8; HEADER_SIZE];
        assert_eq!(info.encode_header(&mut buffer).unwrap(), HEADER_SIZE);

        assert_eq!(&buffer[0..4], b"PIF\0");
        assert_eq!(&buffer[4..8], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buffer[12..14], &[0xC5, 0xE5]);
        assert_eq!(&buffer[16..18], &[0x40, 0x01]);
        assert_eq!(&buffer[26..28], &[0xDE, 0x7D]);
    }

    #[test]
    fn test_encode_header_buffer_too_small() {
        let mut buffer = [0u8; HEADER_SIZE - 1];
        assert_eq!(
            ImageInfo::default().encode_header(&mut buffer),
            Err(EncodeError::BufferTooSmall)
        );
    }
}
