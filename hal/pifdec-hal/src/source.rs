//! Byte source abstractions
//!
//! Provides the stream operations the decoder needs from a storage
//! backend.

/// Random access byte source holding PIF files
///
/// One file is open per decode session. Offsets are absolute from the
/// start of the file.
pub trait ImageSource {
    /// Handle of an open file
    type File;

    /// Error type for source operations
    type Error;

    /// Open a file by path
    fn open(&mut self, path: &str) -> Result<Self::File, Self::Error>;

    /// Fill `buf` completely from the current position
    ///
    /// A short read is an error.
    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Move the read position to an absolute offset
    fn seek(&mut self, file: &mut Self::File, offset: u32) -> Result<(), Self::Error>;

    /// Release a file handle
    ///
    /// Sources without per-file resources can rely on the default.
    fn close(&mut self, file: Self::File) -> Result<(), Self::Error> {
        let _ = file;
        Ok(())
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &mut T {
    type File = T::File;
    type Error = T::Error;

    fn open(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        T::open(self, path)
    }

    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, file, buf)
    }

    fn seek(&mut self, file: &mut Self::File, offset: u32) -> Result<(), Self::Error> {
        T::seek(self, file, offset)
    }

    fn close(&mut self, file: Self::File) -> Result<(), Self::Error> {
        T::close(self, file)
    }
}
