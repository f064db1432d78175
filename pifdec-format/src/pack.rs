//! Sub-byte pixel packing
//!
//! Packed formats store several pixels per byte, least significant bits
//! first, continuously across row ends. A depth of 3 bits is stored at
//! nibble granularity.

use crate::encoder::EncodeError;

/// Bit stride of one packed pixel (3 bpp occupies a nibble)
pub const fn pixel_stride(bits_per_pixel: u16) -> u16 {
    if bits_per_pixel == 3 {
        4
    } else {
        bits_per_pixel
    }
}

/// Pixels stored in one byte, or 1 for depths of 8 bits and above
pub const fn pixels_per_byte(bits_per_pixel: u16) -> usize {
    let stride = pixel_stride(bits_per_pixel);
    if stride == 0 || stride >= 8 {
        1
    } else {
        (8 / stride) as usize
    }
}

/// Bytes needed to pack `count` pixels
pub const fn packed_len(count: usize, bits_per_pixel: u16) -> usize {
    count.div_ceil(pixels_per_byte(bits_per_pixel))
}

/// Pack palette indices into bytes
///
/// Only depths that fit in a byte are packed. Values wider than the depth
/// are masked. Returns the number of bytes written.
pub fn pack_indices(indices: &[u8], bits_per_pixel: u16, buffer: &mut [u8]) -> Result<usize, EncodeError> {
    if !matches!(bits_per_pixel, 1 | 2 | 3 | 4 | 8) {
        return Err(EncodeError::UnsupportedBitDepth(bits_per_pixel));
    }

    let len = packed_len(indices.len(), bits_per_pixel);
    let out = buffer.get_mut(..len).ok_or(EncodeError::BufferTooSmall)?;
    out.fill(0);

    let per_byte = pixels_per_byte(bits_per_pixel);
    let stride = pixel_stride(bits_per_pixel);
    let mask = ((1u16 << bits_per_pixel) - 1) as u8;

    for (i, &index) in indices.iter().enumerate() {
        let shift = (i % per_byte) as u16 * stride;
        out[i / per_byte] |= (index & mask) << shift;
    }

    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_per_byte() {
        assert_eq!(pixels_per_byte(1), 8);
        assert_eq!(pixels_per_byte(2), 4);
        assert_eq!(pixels_per_byte(3), 2);
        assert_eq!(pixels_per_byte(4), 2);
        assert_eq!(pixels_per_byte(8), 1);
        assert_eq!(pixels_per_byte(16), 1);
    }

    #[test]
    fn test_pack_lsb_first() {
        let mut buffer = [0u8; 2];
        let len = pack_indices(&[1, 0, 1, 1, 0, 0, 0, 0, 1], 1, &mut buffer).unwrap();
        assert_eq!(len, 2);
        assert_eq!(buffer, [0b0000_1101, 0b0000_0001]);
    }

    #[test]
    fn test_pack_nibbles() {
        let mut buffer = [0u8; 2];
        pack_indices(&[0x3, 0xA, 0xF], 4, &mut buffer).unwrap();
        assert_eq!(buffer, [0xA3, 0x0F]);
    }

    #[test]
    fn test_pack_three_bits_as_nibbles() {
        let mut buffer = [0u8; 1];
        pack_indices(&[0x7, 0x5], 3, &mut buffer).unwrap();
        assert_eq!(buffer, [0x57]);
    }

    #[test]
    fn test_pack_rejects_depth() {
        let mut buffer = [0u8; 4];
        assert_eq!(
            pack_indices(&[1], 5, &mut buffer),
            Err(EncodeError::UnsupportedBitDepth(5))
        );
    }
}
