//! 6502 binary disassembler.
//!
//! Reads machine code instruction by instruction until the stream ends at an
//! opcode boundary. Running out of bytes in the middle of an instruction is
//! an I/O error; a byte outside the opcode table is `InvalidOpCode`.
//! Undocumented opcodes are listed with a `*` prefix, official ones with a
//! leading space, matching the trace format.

use std::io::{self, Read, Write};

use crate::cpu::opcode::{self, AddrMode, Instruction};
use crate::error::NervaError;

/// Address the first instruction is listed at when `display_memory_address`
/// is on (the conventional start of user RAM programs).
pub const LISTING_ORIGIN: u16 = 0x0600;

#[derive(Default)]
pub struct DisassembleConfig {
    /// Prefix each line with its memory address, starting at `LISTING_ORIGIN`.
    pub display_memory_address: bool,
    /// Show the raw instruction bytes between address and mnemonic.
    pub display_bytes: bool,
}

/// Disassemble `input` to one listing line per instruction.
pub fn disassemble<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    cfg: &DisassembleConfig,
) -> Result<(), NervaError> {
    let mut address = LISTING_ORIGIN;

    loop {
        let mut code = [0u8; 1];
        match input.read_exact(&mut code) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        }

        let op = opcode::lookup(code[0]).ok_or(NervaError::InvalidOpCode(code[0]))?;

        let mut args = [0u8; 2];
        input.read_exact(&mut args[..op.size() as usize - 1])?;
        let instr = Instruction::new(op, args);

        if cfg.display_memory_address {
            write!(output, "{:04X}  ", address)?;
        }
        if cfg.display_bytes {
            write!(output, "{:<8} ", instr.bytes_text())?;
        }
        writeln!(output, "{}", operation_text(&instr))?;

        address = address.wrapping_add(op.size());
    }

    Ok(())
}

/// Prefix, mnemonic and operand in listing form. Unlike the tracer this has
/// no CPU to resolve effective addresses against, so operands are printed as
/// written.
fn operation_text(instr: &Instruction) -> String {
    let prefix = if instr.opcode.unofficial { '*' } else { ' ' };
    let mnemonic = format!("{}{}", prefix, instr.opcode.mnemonic);

    match instr.opcode.mode {
        AddrMode::Implied => mnemonic,
        AddrMode::Accumulator => format!("{} A", mnemonic),
        AddrMode::Immediate => format!("{} #${:02X}", mnemonic, instr.byte_arg()),
        AddrMode::Relative => format!("{} ${:02X}", mnemonic, instr.byte_arg()),
        AddrMode::ZeroPage => format!("{} ${:02X}", mnemonic, instr.byte_arg()),
        AddrMode::ZeroPageX => format!("{} ${:02X},X", mnemonic, instr.byte_arg()),
        AddrMode::ZeroPageY => format!("{} ${:02X},Y", mnemonic, instr.byte_arg()),
        AddrMode::Absolute => format!("{} ${:04X}", mnemonic, instr.word_arg()),
        AddrMode::AbsoluteX => format!("{} ${:04X},X", mnemonic, instr.word_arg()),
        AddrMode::AbsoluteY => format!("{} ${:04X},Y", mnemonic, instr.word_arg()),
        AddrMode::Indirect => format!("{} (${:04X})", mnemonic, instr.word_arg()),
        AddrMode::IndirectX => format!("{} (${:02X},X)", mnemonic, instr.byte_arg()),
        AddrMode::IndirectY => format!("{} (${:02X}),Y", mnemonic, instr.byte_arg()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::assemble;

    fn disassemble_bytes(bytes: &[u8], cfg: &DisassembleConfig) -> Result<String, NervaError> {
        let mut out = Vec::new();
        disassemble(bytes, &mut out, cfg)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn lists_plain_operations() {
        let listing = disassemble_bytes(
            &[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xEA],
            &DisassembleConfig::default(),
        )
        .unwrap();

        assert_eq!(listing, " LDA #$01\n STA $0200\n NOP\n");
    }

    #[test]
    fn address_and_byte_columns_are_optional() {
        let cfg = DisassembleConfig {
            display_memory_address: true,
            display_bytes: true,
        };
        let listing = disassemble_bytes(&[0x4C, 0x34, 0x12, 0x48], &cfg).unwrap();

        assert_eq!(
            listing,
            "0600  4C 34 12  JMP $1234\n0603  48        PHA\n"
        );
    }

    #[test]
    fn undocumented_opcodes_are_starred() {
        let listing =
            disassemble_bytes(&[0xC7, 0x40], &DisassembleConfig::default()).unwrap();

        assert_eq!(listing, "*DCP $40\n");
    }

    #[test]
    fn unknown_byte_is_invalid_opcode() {
        assert!(matches!(
            disassemble_bytes(&[0x02], &DisassembleConfig::default()),
            Err(NervaError::InvalidOpCode(0x02))
        ));
    }

    #[test]
    fn truncated_instruction_is_an_io_error() {
        // LDA absolute needs two operand bytes; only one is present.
        assert!(matches!(
            disassemble_bytes(&[0xAD, 0x00], &DisassembleConfig::default()),
            Err(NervaError::Io(_))
        ));
    }

    #[test]
    fn listings_reassemble_to_the_same_bytes() {
        let original: Vec<u8> = vec![
            0xA2, 0x08, // LDX #$08
            0xCA, // DEX
            0x8E, 0x00, 0x02, // STX $0200
            0xE0, 0x03, // CPX #$03
            0xD0, 0xF8, // BNE $F8
            0xB1, 0x40, // LDA ($40),Y
            0x6C, 0x00, 0x03, // JMP ($0300)
            0xC7, 0x40, // *DCP $40
        ];

        let listing = disassemble_bytes(&original, &DisassembleConfig::default()).unwrap();
        let mut reassembled = Vec::new();
        assemble(listing.as_bytes(), &mut reassembled).unwrap();

        assert_eq!(reassembled, original);
    }
}
