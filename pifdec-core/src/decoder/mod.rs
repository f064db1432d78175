//! PIF decode sessions
//!
//! A [`PifDecoder`] owns a byte source and a pixel sink and runs one image
//! at a time through them:
//!
//! ```text
//! open ──► Idle ──prepare──► Prepared ──palette──► Streaming ──finish──► Done
//!                                 │                    │
//!                                 └──────── any failure ────────► Error
//! ```
//!
//! Pixels are produced in row-major order. The sink reads the target
//! position from [`ImageInfo`] on every draw.

mod header;
mod state;

pub use state::{DecodeEvent, DecodeState};

use pifdec_format::{pack, Compression, ImageInfo, ImageType, RleParser, COLOR_TABLE_OFFSET};
use pifdec_hal::{ImageSource, PixelSink};

use crate::color::convert;
use crate::config::DecoderConfig;
use crate::error::PifError;
use crate::palette::PaletteResolver;

/// Streaming decoder for PIF images
pub struct PifDecoder<'p, S: ImageSource, D: PixelSink> {
    source: S,
    sink: D,
    config: DecoderConfig,
    palette: PaletteResolver<'p>,
    file: Option<S::File>,
    info: ImageInfo,
    /// Pixel data bytes consumed, relative to `image_data_offset`
    file_pos: u32,
    state: DecodeState,
}

impl<'p, S: ImageSource, D: PixelSink> PifDecoder<'p, S, D> {
    /// Create a decoder that looks up palette entries by seeking
    pub fn new(source: S, sink: D, config: DecoderConfig) -> Self {
        Self {
            source,
            sink,
            config,
            palette: PaletteResolver::new(config.fixed_palette),
            file: None,
            info: ImageInfo::default(),
            file_pos: 0,
            state: DecodeState::Idle,
        }
    }

    /// Cache palette entries in a caller-owned buffer
    ///
    /// Any size works; only whole entries are kept and the rest of the
    /// table is read on demand.
    pub fn with_palette_buffer(mut self, buffer: &'p mut [u8]) -> Self {
        self.palette.set_buffer(Some(buffer));
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Change the configuration for the next `display`
    pub fn set_config(&mut self, config: DecoderConfig) {
        self.palette.set_fixed(config.fixed_palette);
        self.config = config;
    }

    /// Header and cursor of the current image
    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// An image file is open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Close any open file and hand back the source and sink
    pub fn release(mut self) -> (S, D) {
        if let Some(file) = self.file.take() {
            if self.source.close(file).is_err() {
                warn!("pif: close failed");
            }
        }
        (self.source, self.sink)
    }

    /// Open an image and read its header
    ///
    /// An image left open by a previous call is closed first.
    pub fn open(&mut self, path: &str) -> Result<ImageInfo, PifError> {
        if self.file.is_some() {
            debug!("pif: closing previous image");
            if self.close().is_err() {
                warn!("pif: close failed");
            }
        }
        self.state = self.state.transition(DecodeEvent::Reset);
        self.info = ImageInfo::default();

        let mut file = match self.source.open(path) {
            Ok(file) => file,
            Err(_) => {
                warn!("pif: cannot open image");
                self.state = self.state.transition(DecodeEvent::Fail);
                return Err(PifError::Io);
            }
        };

        match header::read_header(&mut self.source, &mut file) {
            Ok(info) => {
                info!(
                    "pif: {:?} {}x{} {}bpp, {:?}",
                    info.image_type,
                    info.width,
                    info.height,
                    info.bits_per_pixel,
                    info.compression
                );
                self.info = info;
                self.file = Some(file);
                Ok(info)
            }
            Err(err) => {
                warn!("pif: header rejected: {:?}", err);
                let _ = self.source.close(file);
                self.state = self.state.transition(DecodeEvent::Fail);
                Err(err)
            }
        }
    }

    /// Draw the open image with its top-left corner at `(x0, y0)`
    ///
    /// On failure the file is closed. Pixels already drawn stay drawn.
    pub fn display(&mut self, x0: u16, y0: u16) -> Result<(), PifError> {
        match self.run(x0, y0) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(
                    "pif: decode failed at ({}, {}): {:?}",
                    self.info.cursor_x,
                    self.info.cursor_y,
                    err
                );
                self.state = self.state.transition(DecodeEvent::Fail);
                if let Some(file) = self.file.take() {
                    let _ = self.source.close(file);
                }
                Err(err)
            }
        }
    }

    /// Close the open image, if any
    pub fn close(&mut self) -> Result<(), PifError> {
        match self.file.take() {
            Some(file) => self.source.close(file).map_err(|_| PifError::Io),
            None => Ok(()),
        }
    }

    /// Open, draw and close an image
    ///
    /// The file is closed even when drawing fails; the drawing error is
    /// the one reported.
    pub fn open_and_display(&mut self, path: &str, x0: u16, y0: u16) -> Result<(), PifError> {
        self.open(path)?;
        let shown = self.display(x0, y0);
        let closed = self.close();
        shown.and(closed)
    }

    fn run(&mut self, x0: u16, y0: u16) -> Result<(), PifError> {
        if self.file.is_none() {
            return Err(PifError::Io);
        }

        self.info.origin_x = x0;
        self.info.origin_y = y0;
        self.info.cursor_x = 0;
        self.info.cursor_y = 0;
        self.file_pos = 0;

        self.sink.prepare(&self.info).map_err(|_| PifError::Draw)?;
        self.state = self.state.transition(DecodeEvent::Prepare);

        self.load_palette()?;
        self.seek(self.info.image_data_offset)?;
        self.state = self.state.transition(DecodeEvent::StartStream);

        if self.info.width > 0 && self.info.height > 0 {
            match self.info.compression {
                Compression::None => self.stream_raw()?,
                Compression::Rle => self.stream_rle()?,
            }
        }

        self.sink.finish(&self.info).map_err(|_| PifError::Draw)?;
        self.state = self.state.transition(DecodeEvent::Finish);
        debug!("pif: {} data bytes decoded", self.file_pos);
        Ok(())
    }

    fn load_palette(&mut self) -> Result<(), PifError> {
        let entry_width = self.info.image_type.palette_entry_width().unwrap_or(0);
        self.palette.reset(entry_width);
        if entry_width == 0 || self.config.bypass_palette_lookup || self.palette.capacity() == 0 {
            return Ok(());
        }

        let file = self.file.as_mut().ok_or(PifError::Io)?;
        self.source
            .seek(file, COLOR_TABLE_OFFSET)
            .map_err(|_| PifError::Io)?;
        let loaded = self
            .palette
            .prefill(&mut self.source, file, entry_width, self.info.color_table_entries)
            .map_err(|_| PifError::Io)?;
        debug!(
            "pif: {} of {} palette entries buffered",
            loaded,
            self.info.color_table_entries
        );
        Ok(())
    }

    fn stream_raw(&mut self) -> Result<(), PifError> {
        let word_bytes = self.info.word_bytes();
        while !self.info.is_complete() {
            let word = self.read_data(word_bytes)?;
            self.emit_word(word)?;
            self.restore_after_seek()?;
        }
        Ok(())
    }

    fn stream_rle(&mut self) -> Result<(), PifError> {
        let mut parser = RleParser::new(self.info.word_bytes());
        while self.file_pos < self.info.image_data_size && !self.info.is_complete() {
            let byte = self.read_data(1)? as u8;
            let Some(run) = parser.feed(byte) else {
                continue;
            };
            for _ in 0..run.count {
                if self.info.is_complete() {
                    break;
                }
                self.emit_word(run.pixel)?;
            }
            self.restore_after_seek()?;
        }

        if !self.info.is_complete() {
            warn!(
                "pif: RLE data ended at row {} of {}",
                self.info.cursor_y,
                self.info.height
            );
        } else if self.file_pos < self.info.image_data_size {
            debug!(
                "pif: {} trailing RLE bytes ignored",
                self.info.image_data_size - self.file_pos
            );
        }
        Ok(())
    }

    /// Draw one stored pixel word, unpacking sub-byte groups
    fn emit_word(&mut self, word: u32) -> Result<(), PifError> {
        let image_type = self.info.image_type;
        if image_type.is_direct() {
            let color = self.to_output(word, image_type);
            self.draw(color);
            return Ok(());
        }

        let bits = self.info.bits_per_pixel;
        let stride = pack::pixel_stride(bits);
        let mask = if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 };
        let mut group = word;
        for _ in 0..pack::pixels_per_byte(bits) {
            if self.info.is_complete() {
                break;
            }
            let pixel = self.resolve(group & mask)?;
            self.draw(pixel);
            group = group.checked_shr(u32::from(stride)).unwrap_or(0);
        }
        Ok(())
    }

    /// Turn an unpacked value into the value handed to the sink
    fn resolve(&mut self, value: u32) -> Result<u32, PifError> {
        if self.config.bypass_palette_lookup {
            return Ok(value);
        }

        let fixed = self.palette.fixed().encoding();
        let (color, encoding) = match self.info.image_type {
            ImageType::Rgb16c => (self.palette.lookup_fixed(value as u8), fixed),
            ImageType::Monochrome => (self.palette.lookup_mono(value & 1 != 0), fixed),
            image_type => {
                let file = self.file.as_mut().ok_or(PifError::Io)?;
                let color = self
                    .palette
                    .resolve(&mut self.source, file, value)
                    .map_err(|_| PifError::Io)?;
                (color, image_type)
            }
        };
        Ok(self.to_output(color, encoding))
    }

    fn to_output(&self, color: u32, encoding: ImageType) -> u32 {
        match self.config.output {
            Some(output) => convert(color, encoding, output.target, output.mode),
            None => color,
        }
    }

    fn draw(&mut self, pixel: u32) {
        if self.info.is_complete() {
            return;
        }
        self.sink.draw(&self.info, pixel);
        self.info.advance_cursor();
    }

    /// Read the next `len` bytes of pixel data
    fn read_data(&mut self, len: usize) -> Result<u32, PifError> {
        let file = self.file.as_mut().ok_or(PifError::Io)?;
        let word = header::read_uint(&mut self.source, file, len)?;
        self.file_pos += len as u32;
        Ok(word)
    }

    /// Return to the pixel data after a palette lookup moved the stream
    fn restore_after_seek(&mut self) -> Result<(), PifError> {
        if self.palette.take_seek() {
            self.seek(self.info.image_data_offset + self.file_pos)?;
        }
        Ok(())
    }

    fn seek(&mut self, offset: u32) -> Result<(), PifError> {
        let file = self.file.as_mut().ok_or(PifError::Io)?;
        self.source.seek(file, offset).map_err(|_| PifError::Io)
    }
}
