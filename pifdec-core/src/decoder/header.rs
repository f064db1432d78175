//! Header parsing
//!
//! Fields are read in file order. A wrong magic stops immediately; any
//! other problem is remembered and reported once the whole header has
//! been consumed.

use pifdec_format::{le, Compression, FormatError, ImageInfo, ImageType, PIF_MAGIC};
use pifdec_hal::ImageSource;

use crate::error::PifError;

/// Read a little-endian value of `len` (1..=4) bytes
pub(crate) fn read_uint<S: ImageSource>(
    source: &mut S,
    file: &mut S::File,
    len: usize,
) -> Result<u32, PifError> {
    let mut bytes = [0u8; 4];
    let bytes = &mut bytes[..len.min(4)];
    source.read(file, bytes).map_err(|_| PifError::Io)?;
    Ok(le::read_uint(bytes))
}

fn read_u16<S: ImageSource>(source: &mut S, file: &mut S::File) -> Result<u16, PifError> {
    Ok(read_uint(source, file, 2)? as u16)
}

fn read_u32<S: ImageSource>(source: &mut S, file: &mut S::File) -> Result<u32, PifError> {
    read_uint(source, file, 4)
}

/// Packed types need a depth the unpacker can step through
fn check_bit_depth(image_type: ImageType, bits_per_pixel: u16) -> Result<(), FormatError> {
    if image_type.is_packed() && !(1..=24).contains(&bits_per_pixel) {
        return Err(FormatError::UnsupportedBitDepth(bits_per_pixel));
    }
    Ok(())
}

/// Parse the 28-byte header from the start of the file
///
/// Leaves the stream positioned at the colour table. Origin and cursor
/// are zero.
pub(crate) fn read_header<S: ImageSource>(
    source: &mut S,
    file: &mut S::File,
) -> Result<ImageInfo, PifError> {
    let magic = read_u32(source, file)?;
    if magic != PIF_MAGIC {
        return Err(FormatError::BadMagic(magic).into());
    }

    let mut latent: Option<FormatError> = None;

    let file_size = read_u32(source, file)?;
    let image_data_offset = read_u32(source, file)?;

    let format_tag = read_u16(source, file)?;
    let image_type = ImageType::from_tag(format_tag).unwrap_or_else(|| {
        latent.get_or_insert(FormatError::UnknownImageType(format_tag));
        ImageType::default()
    });

    let bits_per_pixel = read_u16(source, file)?;
    let width = read_u16(source, file)?;
    let height = read_u16(source, file)?;
    let image_data_size = read_u32(source, file)?;
    let color_table_entries = read_u16(source, file)?;

    let compression_tag = read_u16(source, file)?;
    let compression = Compression::from_tag(compression_tag).unwrap_or_else(|| {
        latent.get_or_insert(FormatError::UnknownCompression(compression_tag));
        Compression::None
    });

    if latent.is_none() {
        latent = check_bit_depth(image_type, bits_per_pixel).err();
    }
    if let Some(err) = latent {
        return Err(err.into());
    }

    Ok(ImageInfo {
        file_size,
        image_data_offset,
        image_type,
        bits_per_pixel,
        width,
        height,
        image_data_size,
        color_table_entries,
        compression,
        origin_x: 0,
        origin_y: 0,
        cursor_x: 0,
        cursor_y: 0,
    })
}
