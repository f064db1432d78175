//! `embedded-graphics` sink
//!
//! Draws decoded pixels into any `DrawTarget`. Pixel values are read in
//! a configured encoding, widened to `Rgb888` and converted into the
//! target's colour type.
//!
//! `draw` cannot fail, so the first target error is latched: later pixels
//! are skipped and the error is returned from `finish`.

use core::iter;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::Pixel;
use pifdec_core::color::{convert, rgb888_channels, ConversionMode};
use pifdec_format::{ImageInfo, ImageType};
use pifdec_hal::PixelSink;

/// Pixel sink over an `embedded-graphics` draw target
pub struct DrawTargetSink<D: DrawTarget> {
    target: D,
    encoding: ImageType,
    mode: ConversionMode,
    error: Option<D::Error>,
}

impl<D> DrawTargetSink<D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    /// Create a sink reading pixel values as `encoding`
    ///
    /// Use the image type for direct colour images, the palette entry
    /// encoding for indexed images, or the output format when the decoder
    /// converts colours itself.
    pub fn new(target: D, encoding: ImageType) -> Self {
        Self {
            target,
            encoding,
            mode: ConversionMode::Accurate,
            error: None,
        }
    }

    /// Widening strategy for narrow encodings
    pub fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_encoding(&mut self, encoding: ImageType) {
        self.encoding = encoding;
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn color(&self, pixel: u32) -> D::Color {
        let rgb = convert(pixel, self.encoding, ImageType::Rgb888, self.mode);
        let (r, g, b) = rgb888_channels(rgb);
        Rgb888::new(r, g, b).into()
    }
}

impl<D> PixelSink for DrawTargetSink<D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    type Error = D::Error;

    fn prepare(&mut self, _info: &ImageInfo) -> Result<(), Self::Error> {
        self.error = None;
        Ok(())
    }

    fn draw(&mut self, info: &ImageInfo, pixel: u32) {
        if self.error.is_some() {
            return;
        }
        let (x, y) = info.screen_position();
        let point = Point::new(i32::from(x), i32::from(y));
        let color = self.color(pixel);
        if let Err(err) = self.target.draw_iter(iter::once(Pixel(point, color))) {
            self.error = Some(err);
        }
    }

    fn finish(&mut self, _info: &ImageInfo) -> Result<(), Self::Error> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
