//! The 8-bit machine.
//!
//! This module implements the complete architecture:
//! - Two address spaces (code and data) of 15 eight-bit words each
//! - An accumulator CPU with a 4-bit program counter
//! - Eight instructions with saturating arithmetic; address 15 halts

pub mod memory;
pub mod registers;
pub mod decode;
pub mod execute;

pub use memory::{AddrSpace, Memory, RAM_SIZE};
pub use registers::Registers;
pub use decode::{decode, encode, Instruction};
pub use execute::{Cpu, CpuState};
