//! Binary number primitives.
//!
//! This module provides the core types for working with the machine's
//! fixed-width values:
//! - [`Word`] - An 8-bit word (memory cells, the accumulator)
//! - [`Nibble`] - A 4-bit value (opcodes, operands, addresses)

mod word;
mod ops;
pub mod arith;

pub use word::{Nibble, Word, GLYPH_CLEAR, GLYPH_SET};
pub use ops::BitOps;
pub use arith::{to_unsigned, encode_saturating, Rng};
