//! Property tests over the kernel, the image format, and the engine.

use bitlamp::binary::{encode_saturating, to_unsigned};
use bitlamp::cpu::{decode, encode};
use bitlamp::image::{format_image, parse_image};
use bitlamp::{AddrSpace, Cpu, Memory, Word};
use proptest::prelude::*;

proptest! {
    /// The saturating encode clamps to [0, 255] and round-trips inside it.
    #[test]
    fn saturating_encode_clamps(value in -100_000i64..100_000) {
        let bits = encode_saturating::<8>(value);
        prop_assert_eq!(i64::from(to_unsigned(&bits)), value.clamp(0, 255));
    }

    /// Formatting a word and reading the glyphs back is lossless.
    #[test]
    fn glyph_roundtrip(value in 0i64..=255) {
        let word = Word::from_int_saturating(value);
        prop_assert_eq!(Word::from_glyphs(&word.to_string()), word);
    }

    /// Every word decodes to an instruction that encodes back bit-for-bit.
    #[test]
    fn decode_encode_roundtrip(value in 0i64..=255) {
        let word = Word::from_int_saturating(value);
        prop_assert_eq!(encode(&decode(word)), word);
    }

    /// Saving and reloading an image reproduces memory bit-identically.
    #[test]
    fn image_roundtrip(bytes in prop::collection::vec(any::<u8>(), 30)) {
        let mut mem = Memory::new();
        mem.load_words(bytes.iter().map(|&b| Word::from_int_saturating(i64::from(b))));

        let mut restored = Memory::new();
        parse_image(&format_image(&mem)).apply(&mut restored);

        prop_assert_eq!(restored, mem);
    }

    /// Arbitrary code never breaks the machine: no panic, the program
    /// counter stays in its 4-bit domain, and a halted CPU stays halted.
    #[test]
    fn arbitrary_programs_execute_safely(
        code in prop::collection::vec(any::<u8>(), 15),
        data in prop::collection::vec(any::<u8>(), 15),
        budget in 0u64..500,
    ) {
        let mut mem = Memory::new();
        mem.load_words(
            code.iter()
                .chain(data.iter())
                .map(|&b| Word::from_int_saturating(i64::from(b))),
        );

        let mut cpu = Cpu::new();
        let executed = cpu.run_limited(&mut mem, budget);

        prop_assert!(executed <= budget);
        prop_assert!(cpu.regs.pc.to_unsigned() <= 15);
        if cpu.is_halted() {
            let frozen = mem.clone();
            prop_assert!(!cpu.step(&mut mem));
            prop_assert_eq!(mem, frozen);
        }
    }

    /// ADD can only raise the accumulator, SUB can only lower it, and both
    /// stay inside the byte range whatever the data word holds.
    #[test]
    fn add_sub_are_monotone(acc in 0i64..=255, operand in any::<u8>()) {
        let mut mem = Memory::new();
        mem.write(AddrSpace::Data, 0, Word::from_int_saturating(i64::from(operand)));

        // 0010 0000 = ADD 0
        mem.write(AddrSpace::Code, 0, Word::from_int_saturating(0x20));
        let mut cpu = Cpu::new();
        cpu.regs.acc = Word::from_int_saturating(acc);
        cpu.step(&mut mem);
        prop_assert!(i64::from(cpu.regs.acc.to_unsigned()) >= acc);

        // 0011 0000 = SUB 0
        mem.write(AddrSpace::Code, 0, Word::from_int_saturating(0x30));
        let mut cpu = Cpu::new();
        cpu.regs.acc = Word::from_int_saturating(acc);
        cpu.step(&mut mem);
        prop_assert!(i64::from(cpu.regs.acc.to_unsigned()) <= acc);
    }
}
