//! RAM image persistence.
//!
//! The glyph-per-bit text format used to save and load machine memory.

mod ramfile;

pub use ramfile::{
    format_image, load_image, next_free_image_path, parse_image, save_image, ImageError, RamImage,
    SAVE_FILE_PREFIX,
};
