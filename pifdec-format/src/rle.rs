//! Run-length coding of pixel words
//!
//! The stream is a sequence of signed instruction bytes:
//! - `n > 0`: one pixel word follows, repeated `n` times
//! - `n < 0`: `-n` literal pixel words follow
//! - `0`: no-op, the next byte is read as an instruction
//!
//! Pixel words are 1-3 bytes, least significant byte first.

use crate::encoder::EncodeError;
use crate::le;

/// Longest run a single instruction can describe
pub const MAX_RUN: usize = 127;

/// A decoded pixel word and how many times to emit it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RleRun {
    /// Pixel word, little-endian assembled
    pub pixel: u32,
    /// Number of consecutive copies
    pub count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Next byte is an instruction
    Instruction,
    /// Reading the word to repeat
    Repeat { count: u8 },
    /// Reading literal words
    Literal { remaining: u8 },
}

/// Byte-at-a-time RLE decoder
///
/// Feed it the compressed stream one byte at a time; it yields a run
/// whenever a pixel word completes.
#[derive(Debug, Clone)]
pub struct RleParser {
    state: ParseState,
    word_bytes: u8,
    pixel: u32,
    filled: u8,
}

impl RleParser {
    /// Create a parser for pixel words of `word_bytes` bytes (clamped to 1..=3)
    pub fn new(word_bytes: usize) -> Self {
        Self {
            state: ParseState::Instruction,
            word_bytes: word_bytes.clamp(1, 3) as u8,
            pixel: 0,
            filled: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Instruction;
        self.pixel = 0;
        self.filled = 0;
    }

    /// Parser sits between instructions
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Instruction
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(run)` when a pixel word completes.
    pub fn feed(&mut self, byte: u8) -> Option<RleRun> {
        match self.state {
            ParseState::Instruction => {
                let instr = byte as i8;
                if instr > 0 {
                    self.state = ParseState::Repeat { count: instr as u8 };
                } else if instr < 0 {
                    self.state = ParseState::Literal {
                        remaining: instr.unsigned_abs(),
                    };
                }
                None
            }
            ParseState::Repeat { count } => {
                let pixel = self.accumulate(byte)?;
                self.state = ParseState::Instruction;
                Some(RleRun { pixel, count })
            }
            ParseState::Literal { remaining } => {
                let pixel = self.accumulate(byte)?;
                self.state = if remaining > 1 {
                    ParseState::Literal {
                        remaining: remaining - 1,
                    }
                } else {
                    ParseState::Instruction
                };
                Some(RleRun { pixel, count: 1 })
            }
        }
    }

    fn accumulate(&mut self, byte: u8) -> Option<u32> {
        self.pixel |= u32::from(byte) << (8 * self.filled);
        self.filled += 1;
        if self.filled < self.word_bytes {
            return None;
        }
        let pixel = self.pixel;
        self.pixel = 0;
        self.filled = 0;
        Some(pixel)
    }
}

struct Output<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl Output<'_> {
    fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        let slot = self
            .buffer
            .get_mut(self.len)
            .ok_or(EncodeError::BufferTooSmall)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn push_word(&mut self, word: u32, word_bytes: usize) -> Result<(), EncodeError> {
        let end = self.len + word_bytes;
        let dest = self
            .buffer
            .get_mut(self.len..end)
            .ok_or(EncodeError::BufferTooSmall)?;
        le::put_uint(dest, word, word_bytes);
        self.len = end;
        Ok(())
    }
}

fn run_length(words: &[u32]) -> usize {
    let first = words[0];
    words
        .iter()
        .take(MAX_RUN)
        .take_while(|&&w| w == first)
        .count()
}

/// Compress pixel words into `buffer`
///
/// Runs of two or more equal words become repeat instructions, everything
/// else is grouped into literal stretches. Returns the number of bytes
/// written.
pub fn compress(words: &[u32], word_bytes: usize, buffer: &mut [u8]) -> Result<usize, EncodeError> {
    if !(1..=3).contains(&word_bytes) {
        return Err(EncodeError::InvalidWordSize);
    }

    let mut out = Output { buffer, len: 0 };
    let mut i = 0;

    while i < words.len() {
        let run = run_length(&words[i..]);
        if run >= 2 {
            out.push(run as u8)?;
            out.push_word(words[i], word_bytes)?;
            i += run;
            continue;
        }

        let start = i;
        while i < words.len() && i - start < MAX_RUN {
            if i + 1 < words.len() && words[i] == words[i + 1] {
                break;
            }
            i += 1;
        }
        let literal = &words[start..i];
        out.push((-(literal.len() as i8)) as u8)?;
        for &word in literal {
            out.push_word(word, word_bytes)?;
        }
    }

    Ok(out.len)
}

/// Upper bound on the compressed size of `pixel_words` words
pub const fn max_compressed_len(pixel_words: usize, word_bytes: usize) -> usize {
    pixel_words * (word_bytes + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use proptest::prelude::*;

    fn decode(data: &[u8], word_bytes: usize) -> Vec<u32, 256> {
        let mut parser = RleParser::new(word_bytes);
        let mut out = Vec::new();
        for &byte in data {
            if let Some(run) = parser.feed(byte) {
                for _ in 0..run.count {
                    out.push(run.pixel).unwrap();
                }
            }
        }
        out
    }

    #[test]
    fn test_repeat_run() {
        let mut parser = RleParser::new(1);
        assert_eq!(parser.feed(0x03), None);
        assert_eq!(parser.feed(0x42), Some(RleRun { pixel: 0x42, count: 3 }));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_literal_run() {
        assert_eq!(decode(&[0xFE, 0x01, 0x02], 1).as_slice(), &[1, 2]);
    }

    #[test]
    fn test_zero_instruction_is_skipped() {
        assert_eq!(decode(&[0x00, 0x00, 0x02, 0x07], 1).as_slice(), &[7, 7]);
    }

    #[test]
    fn test_wide_words_little_endian() {
        assert_eq!(
            decode(&[0x02, 0x56, 0x34, 0x12], 3).as_slice(),
            &[0x12_3456, 0x12_3456]
        );
        assert_eq!(decode(&[0x01, 0x34, 0x12], 2).as_slice(), &[0x1234]);
    }

    #[test]
    fn test_most_negative_literal() {
        let mut data = [0u8; 129];
        data[0] = 0x80;
        for (i, slot) in data[1..].iter_mut().enumerate() {
            *slot = i as u8;
        }
        let decoded = decode(&data, 1);
        assert_eq!(decoded.len(), 128);
        assert_eq!(decoded[127], 127);
    }

    #[test]
    fn test_compress_mixed() {
        let words = [5, 5, 5, 1, 2, 3, 3];
        let mut buffer = [0u8; 32];
        let len = compress(&words, 1, &mut buffer).unwrap();
        assert_eq!(&buffer[..len], &[3, 5, 0xFE, 1, 2, 2, 3]);
        assert_eq!(decode(&buffer[..len], 1).as_slice(), &words);
    }

    #[test]
    fn test_compress_splits_long_runs() {
        let words = [9u32; 200];
        let mut buffer = [0u8; 16];
        let len = compress(&words, 2, &mut buffer).unwrap();
        assert_eq!(&buffer[..len], &[127, 9, 0, 73, 9, 0]);
    }

    #[test]
    fn test_compress_buffer_too_small() {
        let words = [1, 2, 3];
        let mut buffer = [0u8; 3];
        assert_eq!(
            compress(&words, 1, &mut buffer),
            Err(EncodeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_compress_rejects_word_size() {
        let mut buffer = [0u8; 8];
        assert_eq!(
            compress(&[1], 4, &mut buffer),
            Err(EncodeError::InvalidWordSize)
        );
    }

    proptest! {
        #[test]
        fn prop_compress_then_parse(
            word_bytes in 1usize..=3,
            picks in prop::collection::vec(0usize..3, 0..200),
            colors in prop::array::uniform3(any::<u32>()),
        ) {
            let mask = u32::MAX >> (32 - 8 * word_bytes);
            let words: std::vec::Vec<u32> = picks.iter().map(|&i| colors[i] & mask).collect();
            let mut buffer = [0u8; 800];
            let len = compress(&words, word_bytes, &mut buffer).unwrap();
            prop_assert!(len <= max_compressed_len(words.len(), word_bytes));
            let decoded = decode(&buffer[..len], word_bytes);
            prop_assert_eq!(decoded.as_slice(), words.as_slice());
        }
    }
}
