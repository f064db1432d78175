//! Little-endian field helpers
//!
//! Values are assembled byte by byte so the code does not depend on the
//! host byte order. Callers guarantee the slice is long enough.

/// Assemble up to four little-endian bytes into a u32
pub fn read_uint(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)))
}

/// Write the low `len` bytes of `value`, least significant first
pub fn put_uint(buffer: &mut [u8], value: u32, len: usize) {
    for (i, slot) in buffer.iter_mut().take(len.min(4)).enumerate() {
        *slot = (value >> (8 * i)) as u8;
    }
}

pub fn put_u16(buffer: &mut [u8], value: u16) {
    put_uint(buffer, u32::from(value), 2);
}

pub fn put_u32(buffer: &mut [u8], value: u32) {
    put_uint(buffer, value, 4);
}
