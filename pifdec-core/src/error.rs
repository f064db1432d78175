//! Decoder error type

use pifdec_format::FormatError;

/// Errors that end a decode session
///
/// The open file is closed before any of these is returned. Pixels
/// already handed to the sink are not rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PifError {
    /// Byte source failed to open, read, seek or close, or no file is open
    Io,
    /// File is not a PIF image this decoder understands
    Format(FormatError),
    /// Sink failed to prepare or finish
    Draw,
}

impl From<FormatError> for PifError {
    fn from(err: FormatError) -> Self {
        PifError::Format(err)
    }
}
