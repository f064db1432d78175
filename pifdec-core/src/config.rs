//! Decoder configuration
//!
//! Plain data, chosen once per display. Under the `serde` feature the
//! configuration can be kept in flash as postcard binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pifdec_format::ImageType;

use crate::color::ConversionMode;
use crate::palette::FixedPalette;

/// Conversion applied to every resolved colour before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConversion {
    /// Encoding the sink expects (RGB888, RGB565 or RGB332)
    pub target: ImageType,
    /// Widening strategy
    pub mode: ConversionMode,
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Forward raw palette indices instead of colours
    ///
    /// For panels whose native palette matches the image's index space,
    /// such as 7-colour e-paper.
    pub bypass_palette_lookup: bool,
    /// Encoding of the built-in 16-colour table
    pub fixed_palette: FixedPalette,
    /// Convert colours to the sink's encoding
    pub output: Option<OutputConversion>,
}

impl DecoderConfig {
    /// Forward raw indices for packed and indexed images
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass_palette_lookup = bypass;
        self
    }

    /// Select the encoding of the built-in 16-colour table
    pub fn with_fixed_palette(mut self, fixed_palette: FixedPalette) -> Self {
        self.fixed_palette = fixed_palette;
        self
    }

    /// Convert every colour to `target` before drawing
    pub fn with_output(mut self, target: ImageType, mode: ConversionMode) -> Self {
        self.output = Some(OutputConversion { target, mode });
        self
    }
}

/// Errors from storing or loading a configuration
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Buffer too small for the serialized data
    BufferTooSmall,
    /// Stored data is not a valid configuration
    Deserialize,
}

#[cfg(feature = "serde")]
impl DecoderConfig {
    /// Largest serialized size of a configuration
    pub const MAX_SERIALIZED_LEN: usize = 16;

    /// Serialize as postcard binary into `buffer`
    ///
    /// Returns the number of bytes written
    pub fn to_slice(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| ConfigError::BufferTooSmall)
    }

    /// Load a configuration stored with [`DecoderConfig::to_slice`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}
