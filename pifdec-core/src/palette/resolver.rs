//! Indexed colour resolution
//!
//! The colour table of an indexed image starts right after the header.
//! Entries that fit in the loaned buffer are served from memory; the rest
//! are read by seeking into the table, after which the caller must move
//! the stream back to the pixel data.

use pifdec_format::{le, COLOR_TABLE_OFFSET};
use pifdec_hal::ImageSource;

use super::FixedPalette;

/// Resolves palette indices to colours
pub struct PaletteResolver<'p> {
    fixed: FixedPalette,
    buffer: Option<&'p mut [u8]>,
    /// Bytes of the buffer holding valid entries
    buffered: usize,
    entry_width: u8,
    seeked: bool,
}

impl<'p> PaletteResolver<'p> {
    /// Create a resolver without a buffer (every lookup seeks)
    pub fn new(fixed: FixedPalette) -> Self {
        Self {
            fixed,
            buffer: None,
            buffered: 0,
            entry_width: 0,
            seeked: false,
        }
    }

    /// Create a resolver that caches the table prefix in `buffer`
    pub fn with_buffer(fixed: FixedPalette, buffer: &'p mut [u8]) -> Self {
        let mut resolver = Self::new(fixed);
        resolver.buffer = Some(buffer);
        resolver
    }

    /// Replace the loaned buffer
    pub fn set_buffer(&mut self, buffer: Option<&'p mut [u8]>) {
        self.buffer = buffer;
        self.buffered = 0;
    }

    /// Built-in 16-colour table in use
    pub fn fixed(&self) -> FixedPalette {
        self.fixed
    }

    pub fn set_fixed(&mut self, fixed: FixedPalette) {
        self.fixed = fixed;
    }

    /// Size of the loaned buffer in bytes
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, |buffer| buffer.len())
    }

    /// Number of whole entries currently held in memory
    pub fn buffered_entries(&self) -> usize {
        match self.entry_width {
            0 => 0,
            width => self.buffered / usize::from(width),
        }
    }

    /// Forget buffered entries and set the entry width of the next image
    pub fn reset(&mut self, entry_width: u8) {
        self.entry_width = entry_width;
        self.buffered = 0;
        self.seeked = false;
    }

    /// Load as many whole entries as fit, reading from the current position
    ///
    /// The stream must sit at the start of the colour table. Returns the
    /// number of entries loaded.
    pub fn prefill<S: ImageSource>(
        &mut self,
        source: &mut S,
        file: &mut S::File,
        entry_width: u8,
        entries: u16,
    ) -> Result<usize, S::Error> {
        self.reset(entry_width);
        let Some(buffer) = self.buffer.as_deref_mut() else {
            return Ok(0);
        };
        if entry_width == 0 {
            return Ok(0);
        }

        let width = usize::from(entry_width);
        let count = (buffer.len() / width).min(usize::from(entries));
        let len = count * width;
        if len > 0 {
            source.read(file, &mut buffer[..len])?;
        }
        self.buffered = len;
        Ok(count)
    }

    /// Resolve an index of the current image's colour table
    ///
    /// Falls back to seeking into the table when the entry is not buffered.
    pub fn resolve<S: ImageSource>(
        &mut self,
        source: &mut S,
        file: &mut S::File,
        index: u32,
    ) -> Result<u32, S::Error> {
        let width = usize::from(self.entry_width);
        if width == 0 {
            return Ok(0);
        }

        let start = index as usize * width;
        if let Some(buffer) = self.buffer.as_deref() {
            if start + width <= self.buffered {
                return Ok(le::read_uint(&buffer[start..start + width]));
            }
        }

        let offset = COLOR_TABLE_OFFSET.saturating_add(index.saturating_mul(width as u32));
        trace!("pif: palette seek for index {} at {}", index, offset);
        self.seeked = true;
        source.seek(file, offset)?;
        let mut entry = [0u8; 3];
        source.read(file, &mut entry[..width])?;
        Ok(le::read_uint(&entry[..width]))
    }

    /// Colour of a 4-bit index in the built-in table
    pub fn lookup_fixed(&self, index: u8) -> u32 {
        self.fixed.lookup(index)
    }

    /// Colour of a monochrome bit
    pub fn lookup_mono(&self, bit: bool) -> u32 {
        self.fixed.mono(bit)
    }

    /// Whether a lookup moved the stream since the last call
    pub fn take_seek(&mut self) -> bool {
        core::mem::take(&mut self.seeked)
    }
}
