//! RAM image file format.
//!
//! A RAM image is a plain text file, one word per line:
//! - `*` is a set bit, any other character a clear bit
//! - Only the first 8 characters of a line count; the rest is annotation
//! - Blank lines and lines starting with `#` are ignored
//! - The first 15 word lines fill the code space, the next 15 the data
//!   space; anything further is ignored
//!
//! Glyph decoding is total, so hand-edited files always load; the only
//! failures are file I/O.

use crate::binary::Word;
use crate::cpu::{Memory, RAM_SIZE};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filename prefix for quick saves: the editor writes `saved-ram-1`,
/// `saved-ram-2`, ... picking the first free number.
pub const SAVE_FILE_PREFIX: &str = "saved-ram-";

/// A loaded RAM image: the flat word sequence, code space first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RamImage {
    /// Words in address order, Code then Data. At most `2 * RAM_SIZE`.
    pub words: Vec<Word>,
}

impl RamImage {
    /// Snapshot a memory into an image.
    pub fn from_memory(mem: &Memory) -> Self {
        Self {
            words: mem.dump_words(),
        }
    }

    /// Write the image into a memory, code space first.
    pub fn apply(&self, mem: &mut Memory) {
        mem.load_words(self.words.iter().copied());
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse image text into words.
pub fn parse_image(text: &str) -> RamImage {
    let words = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(2 * RAM_SIZE)
        .map(Word::from_glyphs)
        .collect();

    RamImage { words }
}

/// Format a memory as image text: glyph lines with a decimal annotation,
/// under `# code` and `# data` headers. Reloads bit-identically.
pub fn format_image(mem: &Memory) -> String {
    let words = mem.dump_words();
    let mut out = String::new();

    for (header, range) in [("# code\n", 0..RAM_SIZE), ("# data\n", RAM_SIZE..2 * RAM_SIZE)] {
        out.push_str(header);
        for word in &words[range] {
            out.push_str(&format!("{} {:3}\n", word, word.to_unsigned()));
        }
    }

    out
}

/// Load a RAM image from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RamImage, ImageError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ImageError::Io(path.as_ref().display().to_string(), e.to_string()))?;
    Ok(parse_image(&text))
}

/// Save a memory as a RAM image on disk.
pub fn save_image<P: AsRef<Path>>(path: P, mem: &Memory) -> Result<(), ImageError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|e| ImageError::Io(path.as_ref().display().to_string(), e.to_string()))?;

    file.write_all(format_image(mem).as_bytes())
        .map_err(|e| ImageError::Io(path.as_ref().display().to_string(), e.to_string()))?;

    Ok(())
}

/// First unused quick-save path in the current directory.
pub fn next_free_image_path() -> PathBuf {
    let mut i = 1u32;
    loop {
        let path = PathBuf::from(format!("{}{}", SAVE_FILE_PREFIX, i));
        if !path.exists() {
            return path;
        }
        i += 1;
    }
}

/// Errors that can occur while loading or saving RAM images.
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    #[error("I/O error on '{0}': {1}")]
    Io(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::AddrSpace;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let image = parse_image("# a comment\n\n*-------\n\n--------\n");
        assert_eq!(image.len(), 2);
        assert_eq!(image.words[0].to_unsigned(), 128);
        assert_eq!(image.words[1].to_unsigned(), 0);
    }

    #[test]
    fn test_parse_ignores_annotations() {
        let image = parse_image("*------* 129 whatever\n");
        assert_eq!(image.words[0].to_unsigned(), 129);
    }

    #[test]
    fn test_parse_caps_at_both_spaces() {
        let text = "********\n".repeat(100);
        let image = parse_image(&text);
        assert_eq!(image.len(), 2 * RAM_SIZE);
    }

    #[test]
    fn test_format_parse_roundtrip() {
        let mut mem = Memory::new();
        for i in 0..RAM_SIZE {
            mem.write(AddrSpace::Code, i, Word::from_int_saturating(i as i64 * 17));
            mem.write(AddrSpace::Data, i, Word::from_int_saturating(255 - i as i64));
        }

        let mut restored = Memory::new();
        parse_image(&format_image(&mem)).apply(&mut restored);

        assert_eq!(restored, mem);
    }

    #[test]
    fn test_image_apply() {
        let image = parse_image("----*---\n");
        let mut mem = Memory::new();
        image.apply(&mut mem);

        assert_eq!(mem.read(AddrSpace::Code, 0).to_unsigned(), 8);
    }
}
