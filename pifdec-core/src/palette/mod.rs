//! Palette lookup
//!
//! Two kinds of palette exist:
//! - the built-in 16-colour table used by `Rgb16c` and `Monochrome`
//!   images ([`FixedPalette`])
//! - the per-file colour table of indexed images, read from the file or
//!   from a caller-loaned buffer ([`PaletteResolver`])

mod fixed;
mod resolver;

pub use fixed::{FixedPalette, CGA_RGB332, CGA_RGB565, CGA_RGB888, MONO_BLACK, MONO_WHITE};
pub use resolver::PaletteResolver;
