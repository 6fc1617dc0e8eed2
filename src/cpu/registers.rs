//! CPU registers.
//!
//! The machine has two registers:
//! - ACC: 8-bit accumulator, the only computation register
//! - PC: 4-bit program counter; the all-set value 15 is the halt sentinel

use crate::binary::{Nibble, Word};
use serde::{Deserialize, Serialize};

/// The register file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// ACC: 8-bit accumulator.
    pub acc: Word,

    /// PC: 4-bit program counter. Execution halts before fetching once it
    /// reaches the all-set sentinel value.
    pub pc: Nibble,
}

impl Registers {
    /// Create a register file with both registers zeroed.
    pub fn new() -> Self {
        Self {
            acc: Word::zero(),
            pc: Nibble::zero(),
        }
    }

    /// Reset both registers to zero.
    pub fn reset(&mut self) {
        self.acc = Word::zero();
        self.pc = Nibble::zero();
    }

    /// Advance the program counter by one.
    ///
    /// Reuses the saturating encode; the counter only ever advances from
    /// values in [0, 14], where saturation and mod-16 increment agree, so
    /// 14 steps to 15 (the halt sentinel) and no further advance happens.
    pub fn advance_pc(&mut self) {
        self.pc = Nibble::from_int_saturating(i64::from(self.pc.to_unsigned()) + 1);
    }

    /// Set the program counter to an absolute address.
    pub fn jump(&mut self, target: Nibble) {
        self.pc = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let regs = Registers::new();
        assert_eq!(regs.acc.to_unsigned(), 0);
        assert_eq!(regs.pc.to_unsigned(), 0);
    }

    #[test]
    fn test_advance_pc() {
        let mut regs = Registers::new();
        regs.advance_pc();
        assert_eq!(regs.pc.to_unsigned(), 1);

        regs.pc = Nibble::from_int_saturating(14);
        regs.advance_pc();
        assert_eq!(regs.pc.to_unsigned(), 15);
        assert!(regs.pc.is_ones());
    }

    #[test]
    fn test_jump() {
        let mut regs = Registers::new();
        regs.jump(Nibble::from_int_saturating(7));
        assert_eq!(regs.pc.to_unsigned(), 7);
    }

    #[test]
    fn test_reset() {
        let mut regs = Registers::new();
        regs.acc = Word::ones();
        regs.pc = Nibble::ones();

        regs.reset();

        assert!(regs.acc.is_zero());
        assert_eq!(regs.pc.to_unsigned(), 0);
    }
}
