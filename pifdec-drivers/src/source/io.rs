//! `embedded-io` file adapter
//!
//! Wraps any filesystem whose files implement `embedded_io::Read` and
//! `embedded_io::Seek` (FAT on SD card, littlefs, host files in tests).
//! Closing a file drops its handle.

use embedded_io::{ErrorType, Read, ReadExactError, Seek, SeekFrom};
use pifdec_hal::ImageSource;

/// Opens files by path
pub trait FileOpener {
    /// Open file handle
    type File: Read + Seek;

    /// Open a file for reading
    fn open(&mut self, path: &str) -> Result<Self::File, <Self::File as ErrorType>::Error>;
}

/// Errors from an `embedded-io` backed source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoSourceError<E> {
    /// Underlying I/O error
    Io(E),
    /// File ended before the requested bytes
    UnexpectedEof,
}

impl<E> From<ReadExactError<E>> for IoSourceError<E> {
    fn from(err: ReadExactError<E>) -> Self {
        match err {
            ReadExactError::UnexpectedEof => IoSourceError::UnexpectedEof,
            ReadExactError::Other(e) => IoSourceError::Io(e),
        }
    }
}

/// Image source over an `embedded-io` filesystem
pub struct IoSource<O> {
    opener: O,
}

impl<O: FileOpener> IoSource<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    pub fn opener(&mut self) -> &mut O {
        &mut self.opener
    }

    pub fn into_inner(self) -> O {
        self.opener
    }
}

type FileError<O> = <<O as FileOpener>::File as ErrorType>::Error;

impl<O: FileOpener> ImageSource for IoSource<O> {
    type File = O::File;
    type Error = IoSourceError<FileError<O>>;

    fn open(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        self.opener.open(path).map_err(IoSourceError::Io)
    }

    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<(), Self::Error> {
        file.read_exact(buf)?;
        Ok(())
    }

    fn seek(&mut self, file: &mut Self::File, offset: u32) -> Result<(), Self::Error> {
        file.seek(SeekFrom::Start(u64::from(offset)))
            .map_err(IoSourceError::Io)?;
        Ok(())
    }
}
