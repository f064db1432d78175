//! In-memory image store
//!
//! Serves images linked into the firmware (e.g. with `include_bytes!`) by
//! name. Lookups are linear; the store is meant for a handful of assets.

use heapless::Vec;
use pifdec_hal::ImageSource;

/// Errors from the in-memory store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryError {
    /// No image registered under that name
    NotFound,
    /// Read past the end of the image
    UnexpectedEof,
    /// Seek beyond the end of the image
    SeekOutOfRange,
    /// Store already holds its maximum number of images
    Full,
}

/// Open handle into a stored image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryFile<'a> {
    data: &'a [u8],
    pos: usize,
}

impl MemoryFile<'_> {
    /// Current read offset
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Up to `N` named images held in memory
pub struct MemorySource<'a, const N: usize> {
    images: Vec<(&'a str, &'a [u8]), N>,
}

impl<const N: usize> Default for MemorySource<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> MemorySource<'a, N> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Register an image, replacing any image with the same name
    pub fn add(&mut self, name: &'a str, data: &'a [u8]) -> Result<(), MemoryError> {
        if let Some(entry) = self.images.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = data;
            return Ok(());
        }
        self.images
            .push((name, data))
            .map_err(|_| MemoryError::Full)
    }

    /// Register an image, builder style
    pub fn with(mut self, name: &'a str, data: &'a [u8]) -> Result<Self, MemoryError> {
        self.add(name, data)?;
        Ok(self)
    }

    /// Number of registered images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn find(&self, name: &str) -> Option<&'a [u8]> {
        self.images
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, data)| data)
    }
}

impl<'a, const N: usize> ImageSource for MemorySource<'a, N> {
    type File = MemoryFile<'a>;
    type Error = MemoryError;

    fn open(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let data = self.find(path).ok_or(MemoryError::NotFound)?;
        Ok(MemoryFile { data, pos: 0 })
    }

    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<(), Self::Error> {
        let end = file.pos + buf.len();
        let bytes = file
            .data
            .get(file.pos..end)
            .ok_or(MemoryError::UnexpectedEof)?;
        buf.copy_from_slice(bytes);
        file.pos = end;
        Ok(())
    }

    fn seek(&mut self, file: &mut Self::File, offset: u32) -> Result<(), Self::Error> {
        let offset = offset as usize;
        if offset > file.data.len() {
            return Err(MemoryError::SeekOutOfRange);
        }
        file.pos = offset;
        Ok(())
    }
}
