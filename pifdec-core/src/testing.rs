//! Test doubles for the source and sink traits

use heapless::Vec;
use pifdec_format::ImageInfo;
use pifdec_hal::{ImageSource, PixelSink};

/// Serves a single in-memory file under any path
pub struct SliceSource<'a> {
    pub data: &'a [u8],
    pub fail_open: bool,
    pub fail_close: bool,
    pub opens: u32,
    pub closes: u32,
    pub seeks: u32,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            fail_open: false,
            fail_close: false,
            opens: 0,
            closes: 0,
            seeks: 0,
        }
    }
}

impl ImageSource for SliceSource<'_> {
    type File = usize;
    type Error = ();

    fn open(&mut self, _path: &str) -> Result<usize, ()> {
        if self.fail_open {
            return Err(());
        }
        self.opens += 1;
        Ok(0)
    }

    fn read(&mut self, file: &mut usize, buf: &mut [u8]) -> Result<(), ()> {
        let end = *file + buf.len();
        let bytes = self.data.get(*file..end).ok_or(())?;
        buf.copy_from_slice(bytes);
        *file = end;
        Ok(())
    }

    fn seek(&mut self, file: &mut usize, offset: u32) -> Result<(), ()> {
        if offset as usize > self.data.len() {
            return Err(());
        }
        self.seeks += 1;
        *file = offset as usize;
        Ok(())
    }

    fn close(&mut self, _file: usize) -> Result<(), ()> {
        self.closes += 1;
        if self.fail_close {
            Err(())
        } else {
            Ok(())
        }
    }
}

/// Records every callback
#[derive(Default)]
pub struct RecordingSink {
    /// `(cursor_x, cursor_y, pixel)` per draw
    pub pixels: Vec<(u16, u16, u32), 256>,
    pub prepared: u32,
    pub finished: u32,
    pub fail_prepare: bool,
    pub fail_finish: bool,
}

impl RecordingSink {
    pub fn values(&self) -> Vec<u32, 256> {
        self.pixels.iter().map(|&(_, _, pixel)| pixel).collect()
    }
}

impl PixelSink for RecordingSink {
    type Error = ();

    fn prepare(&mut self, _info: &ImageInfo) -> Result<(), ()> {
        self.prepared += 1;
        if self.fail_prepare {
            Err(())
        } else {
            Ok(())
        }
    }

    fn draw(&mut self, info: &ImageInfo, pixel: u32) {
        let _ = self.pixels.push((info.cursor_x, info.cursor_y, pixel));
    }

    fn finish(&mut self, _info: &ImageInfo) -> Result<(), ()> {
        self.finished += 1;
        if self.fail_finish {
            Err(())
        } else {
            Ok(())
        }
    }
}
