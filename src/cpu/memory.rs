//! Dual-address-space memory.
//!
//! The machine keeps instructions and data apart: one space of 15 words
//! for code, one of 15 words for data. Address 15 is never a storage slot;
//! as a program counter value it is the halt sentinel.
//!
//! Memory holds and mutates words without interpreting them - the
//! execution engine assigns meaning.

use crate::binary::Word;
use serde::{Deserialize, Serialize};

/// The number of words in each address space.
pub const RAM_SIZE: usize = 15;

/// One of the two address spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrSpace {
    /// Instruction space: fetched by the execution engine.
    Code,
    /// Data space: read and written by instructions.
    Data,
}

impl AddrSpace {
    /// Both spaces, in load/dump order.
    pub const ALL: [AddrSpace; 2] = [AddrSpace::Code, AddrSpace::Data];

    /// The other space.
    pub fn other(self) -> Self {
        match self {
            AddrSpace::Code => AddrSpace::Data,
            AddrSpace::Data => AddrSpace::Code,
        }
    }
}

/// The machine's memory: one code space and one data space, each exactly
/// [`RAM_SIZE`] words. Reads and writes never resize either space.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    code: [Word; RAM_SIZE],
    data: [Word; RAM_SIZE],
}

impl Memory {
    /// Create a memory with every word zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the word at `index` in `space`.
    ///
    /// # Panics
    /// Panics if `index` is out of range. Callers derive indices from 4-bit
    /// values restricted to [0, 14], so an out-of-range index is a
    /// programming error, not a runtime condition.
    #[inline]
    pub fn read(&self, space: AddrSpace, index: usize) -> Word {
        assert!(index < RAM_SIZE, "address {} out of range (0-{})", index, RAM_SIZE - 1);
        self.words(space)[index]
    }

    /// Replace the word at `index` in `space`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn write(&mut self, space: AddrSpace, index: usize, word: Word) {
        assert!(index < RAM_SIZE, "address {} out of range (0-{})", index, RAM_SIZE - 1);
        self.words_mut(space)[index] = word;
    }

    /// Read a single bit. Used by the editor; the execution engine works at
    /// word granularity.
    #[inline]
    pub fn read_bit(&self, space: AddrSpace, index: usize, bit: usize) -> bool {
        self.read(space, index).get(bit)
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, space: AddrSpace, index: usize, bit: usize, value: bool) {
        let mut word = self.read(space, index);
        word.set(bit, value);
        self.write(space, index, word);
    }

    /// All words of a space, in address order.
    pub fn words(&self, space: AddrSpace) -> &[Word; RAM_SIZE] {
        match space {
            AddrSpace::Code => &self.code,
            AddrSpace::Data => &self.data,
        }
    }

    fn words_mut(&mut self, space: AddrSpace) -> &mut [Word; RAM_SIZE] {
        match space {
            AddrSpace::Code => &mut self.code,
            AddrSpace::Data => &mut self.data,
        }
    }

    /// Fill memory from a flat word sequence: the first [`RAM_SIZE`] words
    /// fill Code in address order, the next [`RAM_SIZE`] fill Data, and
    /// anything beyond is ignored. Slots without a corresponding input word
    /// keep their current contents.
    pub fn load_words<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = Word>,
    {
        for (i, word) in words.into_iter().take(2 * RAM_SIZE).enumerate() {
            if i < RAM_SIZE {
                self.code[i] = word;
            } else {
                self.data[i - RAM_SIZE] = word;
            }
        }
    }

    /// Dump the full contents as a flat word sequence, Code then Data.
    pub fn dump_words(&self) -> Vec<Word> {
        self.code.iter().chain(self.data.iter()).copied().collect()
    }

    /// Zero every word in both spaces.
    pub fn clear(&mut self) {
        self.code = [Word::zero(); RAM_SIZE];
        self.data = [Word::zero(); RAM_SIZE];
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let non_zero = |words: &[Word; RAM_SIZE]| words.iter().filter(|w| !w.is_zero()).count();

        f.debug_struct("Memory")
            .field("non_zero_code", &non_zero(&self.code))
            .field("non_zero_data", &non_zero(&self.data))
            .field("words_per_space", &RAM_SIZE)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_write() {
        let mut mem = Memory::new();
        let value = Word::from_int_saturating(42);

        mem.write(AddrSpace::Data, 10, value);
        assert_eq!(mem.read(AddrSpace::Data, 10), value);
        // Spaces are independent
        assert!(mem.read(AddrSpace::Code, 10).is_zero());
    }

    #[test]
    fn test_memory_bit_access() {
        let mut mem = Memory::new();

        mem.write_bit(AddrSpace::Code, 3, 0, true);
        assert!(mem.read_bit(AddrSpace::Code, 3, 0));
        assert_eq!(mem.read(AddrSpace::Code, 3).to_unsigned(), 128);

        mem.write_bit(AddrSpace::Code, 3, 0, false);
        assert!(mem.read(AddrSpace::Code, 3).is_zero());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_memory_rejects_sentinel_index() {
        let mem = Memory::new();
        let _ = mem.read(AddrSpace::Code, RAM_SIZE);
    }

    #[test]
    fn test_load_fills_code_then_data() {
        let mut mem = Memory::new();
        let words: Vec<Word> = (0..2 * RAM_SIZE as i64)
            .map(|i| Word::from_int_saturating(i + 1))
            .collect();

        mem.load_words(words);

        assert_eq!(mem.read(AddrSpace::Code, 0).to_unsigned(), 1);
        assert_eq!(mem.read(AddrSpace::Code, 14).to_unsigned(), 15);
        assert_eq!(mem.read(AddrSpace::Data, 0).to_unsigned(), 16);
        assert_eq!(mem.read(AddrSpace::Data, 14).to_unsigned(), 30);
    }

    #[test]
    fn test_load_ignores_excess() {
        let mut mem = Memory::new();
        let words: Vec<Word> = (0..100).map(|_| Word::ones()).collect();

        mem.load_words(words);

        assert!(mem.read(AddrSpace::Data, 14).is_ones());
    }

    #[test]
    fn test_partial_load_keeps_remainder() {
        let mut mem = Memory::new();
        mem.write(AddrSpace::Data, 5, Word::ones());

        mem.load_words(vec![Word::from_int_saturating(9)]);

        assert_eq!(mem.read(AddrSpace::Code, 0).to_unsigned(), 9);
        assert!(mem.read(AddrSpace::Data, 5).is_ones());
    }

    #[test]
    fn test_dump_load_roundtrip() {
        let mut mem = Memory::new();
        for i in 0..RAM_SIZE {
            mem.write(AddrSpace::Code, i, Word::from_int_saturating(i as i64 * 3));
            mem.write(AddrSpace::Data, i, Word::from_int_saturating(200 - i as i64));
        }

        let mut restored = Memory::new();
        restored.load_words(mem.dump_words());

        assert_eq!(restored, mem);
    }

    #[test]
    fn test_clear() {
        let mut mem = Memory::new();
        mem.write(AddrSpace::Code, 1, Word::ones());
        mem.write(AddrSpace::Data, 2, Word::ones());

        mem.clear();

        assert!(mem.dump_words().iter().all(Word::is_zero));
    }
}
