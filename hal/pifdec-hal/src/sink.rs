//! Pixel sink abstractions
//!
//! A sink receives pixels in row-major order. The pixel position is read
//! from [`ImageInfo`]: `origin_x + cursor_x`, `origin_y + cursor_y`.

use pifdec_format::ImageInfo;

/// Destination for decoded pixels
pub trait PixelSink {
    /// Error type reported by `prepare` and `finish`
    type Error;

    /// Called once before the first pixel
    ///
    /// Typically sets a display window covering the image.
    fn prepare(&mut self, info: &ImageInfo) -> Result<(), Self::Error> {
        let _ = info;
        Ok(())
    }

    /// Draw one pixel at the cursor position
    ///
    /// The value is a resolved colour in the image's encoding, or a raw
    /// palette index when palette lookup is bypassed.
    fn draw(&mut self, info: &ImageInfo, pixel: u32);

    /// Called once after the last pixel
    fn finish(&mut self, info: &ImageInfo) -> Result<(), Self::Error> {
        let _ = info;
        Ok(())
    }
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    type Error = T::Error;

    fn prepare(&mut self, info: &ImageInfo) -> Result<(), Self::Error> {
        T::prepare(self, info)
    }

    fn draw(&mut self, info: &ImageInfo, pixel: u32) {
        T::draw(self, info, pixel)
    }

    fn finish(&mut self, info: &ImageInfo) -> Result<(), Self::Error> {
        T::finish(self, info)
    }
}
