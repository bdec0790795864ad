//! The opcode table: one entry per opcode byte the interpreter understands.
//!
//! Every entry fixes the mnemonic, addressing mode and base cycle count for
//! one opcode byte; instruction size falls out of the addressing mode. The
//! decoder, the executor, the assembler, the disassembler and the tracer all
//! share this table, so an opcode exists exactly once in the whole crate.
//!
//! Undocumented opcodes ([NESdev "CPU unofficial opcodes"](https://www.nesdev.org/wiki/CPU_unofficial_opcodes))
//! are included for the set exercised by nestest: the multi-mode NOPs, LAX,
//! SAX, SBC `$EB` and the read-modify-write combos DCP/ISB/SLO/RLA/SRE/RRA.
//! Base cycles are the no-page-cross case for reads and the worst case for
//! stores and read-modify-writes.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::util::join_bytes;

/// How an instruction derives its effective address and operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Accumulator,
    Immediate,
    Implied,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl AddrMode {
    /// Instruction length in bytes, opcode byte included.
    pub fn instruction_size(self) -> u16 {
        match self {
            AddrMode::Accumulator | AddrMode::Implied => 1,
            AddrMode::Immediate
            | AddrMode::Relative
            | AddrMode::ZeroPage
            | AddrMode::ZeroPageX
            | AddrMode::ZeroPageY
            | AddrMode::IndirectX
            | AddrMode::IndirectY => 2,
            AddrMode::Absolute | AddrMode::Indirect | AddrMode::AbsoluteX | AddrMode::AbsoluteY => {
                3
            }
        }
    }
}

impl fmt::Display for AddrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddrMode::Accumulator => "accumulator",
            AddrMode::Immediate => "immediate",
            AddrMode::Implied => "implied",
            AddrMode::Relative => "relative",
            AddrMode::Absolute => "absolute",
            AddrMode::AbsoluteX => "absolute,X",
            AddrMode::AbsoluteY => "absolute,Y",
            AddrMode::ZeroPage => "zero page",
            AddrMode::ZeroPageX => "zero page,X",
            AddrMode::ZeroPageY => "zero page,Y",
            AddrMode::Indirect => "indirect",
            AddrMode::IndirectX => "(indirect,X)",
            AddrMode::IndirectY => "(indirect),Y",
        };
        f.write_str(name)
    }
}

/// Instruction family. Execution dispatches on this alone; the addressing
/// mode only affects operand resolution and cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dcp,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Isb,
    Jmp,
    Jsr,
    Lax,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rla,
    Rol,
    Ror,
    Rra,
    Rti,
    Rts,
    Sax,
    Sbc,
    Sec,
    Sed,
    Sei,
    Slo,
    Sre,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Assembly spelling, as it appears in listings and traces.
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dcp => "DCP",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Isb => "ISB",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lax => "LAX",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rla => "RLA",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rra => "RRA",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sax => "SAX",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Slo => "SLO",
            Mnemonic::Sre => "SRE",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// Parse an assembly spelling. Uppercase only, like the listings this
    /// crate produces.
    pub fn parse(text: &str) -> Option<Mnemonic> {
        OPCODES
            .iter()
            .map(|op| op.mnemonic)
            .find(|m| m.as_str() == text)
    }

    /// Branch instructions take a relative operand; everything else with a
    /// one-byte `$NN` operand is zero page.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bmi
                | Mnemonic::Bne
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable table entry.
pub struct OpCode {
    pub code: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub cycles: u8,
    pub unofficial: bool,
}

impl OpCode {
    const fn new(code: u8, mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Self {
        OpCode {
            code,
            mnemonic,
            mode,
            cycles,
            unofficial: false,
        }
    }

    const fn undocumented(code: u8, mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Self {
        OpCode {
            code,
            mnemonic,
            mode,
            cycles,
            unofficial: true,
        }
    }

    /// Instruction length in bytes, opcode byte included.
    pub fn size(&self) -> u16 {
        self.mode.instruction_size()
    }
}

/// A decoded instruction: a table entry plus the raw operand bytes that
/// followed the opcode in the instruction stream. Built per fetch, discarded
/// after execution.
pub struct Instruction {
    pub opcode: &'static OpCode,
    args: [u8; 2],
}

impl Instruction {
    pub fn new(opcode: &'static OpCode, args: [u8; 2]) -> Self {
        Instruction { opcode, args }
    }

    /// The single operand byte of a 2-byte instruction.
    pub fn byte_arg(&self) -> u8 {
        self.args[0]
    }

    /// The little-endian operand word of a 3-byte instruction.
    pub fn word_arg(&self) -> u16 {
        join_bytes(self.args[0], self.args[1])
    }

    pub fn size(&self) -> u16 {
        self.opcode.size()
    }

    /// The encoded instruction bytes as listing text, e.g. `"4C F5 C5"`.
    pub fn bytes_text(&self) -> String {
        match self.size() {
            1 => format!("{:02X}", self.opcode.code),
            2 => format!("{:02X} {:02X}", self.opcode.code, self.args[0]),
            _ => format!(
                "{:02X} {:02X} {:02X}",
                self.opcode.code, self.args[0], self.args[1]
            ),
        }
    }
}

lazy_static! {
    /// Every opcode the interpreter understands. Official entries come
    /// first so that `find` resolves ambiguous (mnemonic, mode) pairs, such
    /// as `NOP` implied or `SBC #imm`, to the documented encoding.
    pub static ref OPCODES: Vec<OpCode> = {
        use AddrMode::*;
        use Mnemonic::*;

        vec![
            OpCode::new(0x69, Adc, Immediate, 2),
            OpCode::new(0x65, Adc, ZeroPage, 3),
            OpCode::new(0x75, Adc, ZeroPageX, 4),
            OpCode::new(0x6D, Adc, Absolute, 4),
            OpCode::new(0x7D, Adc, AbsoluteX, 4),
            OpCode::new(0x79, Adc, AbsoluteY, 4),
            OpCode::new(0x61, Adc, IndirectX, 6),
            OpCode::new(0x71, Adc, IndirectY, 5),
            OpCode::new(0x29, And, Immediate, 2),
            OpCode::new(0x25, And, ZeroPage, 3),
            OpCode::new(0x35, And, ZeroPageX, 4),
            OpCode::new(0x2D, And, Absolute, 4),
            OpCode::new(0x3D, And, AbsoluteX, 4),
            OpCode::new(0x39, And, AbsoluteY, 4),
            OpCode::new(0x21, And, IndirectX, 6),
            OpCode::new(0x31, And, IndirectY, 5),
            OpCode::new(0x0A, Asl, Accumulator, 2),
            OpCode::new(0x06, Asl, ZeroPage, 5),
            OpCode::new(0x16, Asl, ZeroPageX, 6),
            OpCode::new(0x0E, Asl, Absolute, 6),
            OpCode::new(0x1E, Asl, AbsoluteX, 7),
            OpCode::new(0x90, Bcc, Relative, 2),
            OpCode::new(0xB0, Bcs, Relative, 2),
            OpCode::new(0xF0, Beq, Relative, 2),
            OpCode::new(0x24, Bit, ZeroPage, 3),
            OpCode::new(0x2C, Bit, Absolute, 4),
            OpCode::new(0x30, Bmi, Relative, 2),
            OpCode::new(0xD0, Bne, Relative, 2),
            OpCode::new(0x10, Bpl, Relative, 2),
            OpCode::new(0x00, Brk, Implied, 7),
            OpCode::new(0x50, Bvc, Relative, 2),
            OpCode::new(0x70, Bvs, Relative, 2),
            OpCode::new(0x18, Clc, Implied, 2),
            OpCode::new(0xD8, Cld, Implied, 2),
            OpCode::new(0x58, Cli, Implied, 2),
            OpCode::new(0xB8, Clv, Implied, 2),
            OpCode::new(0xC9, Cmp, Immediate, 2),
            OpCode::new(0xC5, Cmp, ZeroPage, 3),
            OpCode::new(0xD5, Cmp, ZeroPageX, 4),
            OpCode::new(0xCD, Cmp, Absolute, 4),
            OpCode::new(0xDD, Cmp, AbsoluteX, 4),
            OpCode::new(0xD9, Cmp, AbsoluteY, 4),
            OpCode::new(0xC1, Cmp, IndirectX, 6),
            OpCode::new(0xD1, Cmp, IndirectY, 5),
            OpCode::new(0xE0, Cpx, Immediate, 2),
            OpCode::new(0xE4, Cpx, ZeroPage, 3),
            OpCode::new(0xEC, Cpx, Absolute, 4),
            OpCode::new(0xC0, Cpy, Immediate, 2),
            OpCode::new(0xC4, Cpy, ZeroPage, 3),
            OpCode::new(0xCC, Cpy, Absolute, 4),
            OpCode::new(0xC6, Dec, ZeroPage, 5),
            OpCode::new(0xD6, Dec, ZeroPageX, 6),
            OpCode::new(0xCE, Dec, Absolute, 6),
            OpCode::new(0xDE, Dec, AbsoluteX, 7),
            OpCode::new(0xCA, Dex, Implied, 2),
            OpCode::new(0x88, Dey, Implied, 2),
            OpCode::new(0x49, Eor, Immediate, 2),
            OpCode::new(0x45, Eor, ZeroPage, 3),
            OpCode::new(0x55, Eor, ZeroPageX, 4),
            OpCode::new(0x4D, Eor, Absolute, 4),
            OpCode::new(0x5D, Eor, AbsoluteX, 4),
            OpCode::new(0x59, Eor, AbsoluteY, 4),
            OpCode::new(0x41, Eor, IndirectX, 6),
            OpCode::new(0x51, Eor, IndirectY, 5),
            OpCode::new(0xE6, Inc, ZeroPage, 5),
            OpCode::new(0xF6, Inc, ZeroPageX, 6),
            OpCode::new(0xEE, Inc, Absolute, 6),
            OpCode::new(0xFE, Inc, AbsoluteX, 7),
            OpCode::new(0xE8, Inx, Implied, 2),
            OpCode::new(0xC8, Iny, Implied, 2),
            OpCode::new(0x4C, Jmp, Absolute, 3),
            OpCode::new(0x6C, Jmp, Indirect, 5),
            OpCode::new(0x20, Jsr, Absolute, 6),
            OpCode::new(0xA9, Lda, Immediate, 2),
            OpCode::new(0xA5, Lda, ZeroPage, 3),
            OpCode::new(0xB5, Lda, ZeroPageX, 4),
            OpCode::new(0xAD, Lda, Absolute, 4),
            OpCode::new(0xBD, Lda, AbsoluteX, 4),
            OpCode::new(0xB9, Lda, AbsoluteY, 4),
            OpCode::new(0xA1, Lda, IndirectX, 6),
            OpCode::new(0xB1, Lda, IndirectY, 5),
            OpCode::new(0xA2, Ldx, Immediate, 2),
            OpCode::new(0xA6, Ldx, ZeroPage, 3),
            OpCode::new(0xB6, Ldx, ZeroPageY, 4),
            OpCode::new(0xAE, Ldx, Absolute, 4),
            OpCode::new(0xBE, Ldx, AbsoluteY, 4),
            OpCode::new(0xA0, Ldy, Immediate, 2),
            OpCode::new(0xA4, Ldy, ZeroPage, 3),
            OpCode::new(0xB4, Ldy, ZeroPageX, 4),
            OpCode::new(0xAC, Ldy, Absolute, 4),
            OpCode::new(0xBC, Ldy, AbsoluteX, 4),
            OpCode::new(0x4A, Lsr, Accumulator, 2),
            OpCode::new(0x46, Lsr, ZeroPage, 5),
            OpCode::new(0x56, Lsr, ZeroPageX, 6),
            OpCode::new(0x4E, Lsr, Absolute, 6),
            OpCode::new(0x5E, Lsr, AbsoluteX, 7),
            OpCode::new(0xEA, Nop, Implied, 2),
            OpCode::new(0x09, Ora, Immediate, 2),
            OpCode::new(0x05, Ora, ZeroPage, 3),
            OpCode::new(0x15, Ora, ZeroPageX, 4),
            OpCode::new(0x0D, Ora, Absolute, 4),
            OpCode::new(0x1D, Ora, AbsoluteX, 4),
            OpCode::new(0x19, Ora, AbsoluteY, 4),
            OpCode::new(0x01, Ora, IndirectX, 6),
            OpCode::new(0x11, Ora, IndirectY, 5),
            OpCode::new(0x48, Pha, Implied, 3),
            OpCode::new(0x08, Php, Implied, 3),
            OpCode::new(0x68, Pla, Implied, 4),
            OpCode::new(0x28, Plp, Implied, 4),
            OpCode::new(0x2A, Rol, Accumulator, 2),
            OpCode::new(0x26, Rol, ZeroPage, 5),
            OpCode::new(0x36, Rol, ZeroPageX, 6),
            OpCode::new(0x2E, Rol, Absolute, 6),
            OpCode::new(0x3E, Rol, AbsoluteX, 7),
            OpCode::new(0x6A, Ror, Accumulator, 2),
            OpCode::new(0x66, Ror, ZeroPage, 5),
            OpCode::new(0x76, Ror, ZeroPageX, 6),
            OpCode::new(0x6E, Ror, Absolute, 6),
            OpCode::new(0x7E, Ror, AbsoluteX, 7),
            OpCode::new(0x40, Rti, Implied, 6),
            OpCode::new(0x60, Rts, Implied, 6),
            OpCode::new(0xE9, Sbc, Immediate, 2),
            OpCode::new(0xE5, Sbc, ZeroPage, 3),
            OpCode::new(0xF5, Sbc, ZeroPageX, 4),
            OpCode::new(0xED, Sbc, Absolute, 4),
            OpCode::new(0xFD, Sbc, AbsoluteX, 4),
            OpCode::new(0xF9, Sbc, AbsoluteY, 4),
            OpCode::new(0xE1, Sbc, IndirectX, 6),
            OpCode::new(0xF1, Sbc, IndirectY, 5),
            OpCode::new(0x38, Sec, Implied, 2),
            OpCode::new(0xF8, Sed, Implied, 2),
            OpCode::new(0x78, Sei, Implied, 2),
            OpCode::new(0x85, Sta, ZeroPage, 3),
            OpCode::new(0x95, Sta, ZeroPageX, 4),
            OpCode::new(0x8D, Sta, Absolute, 4),
            OpCode::new(0x9D, Sta, AbsoluteX, 5),
            OpCode::new(0x99, Sta, AbsoluteY, 5),
            OpCode::new(0x81, Sta, IndirectX, 6),
            OpCode::new(0x91, Sta, IndirectY, 6),
            OpCode::new(0x86, Stx, ZeroPage, 3),
            OpCode::new(0x96, Stx, ZeroPageY, 4),
            OpCode::new(0x8E, Stx, Absolute, 4),
            OpCode::new(0x84, Sty, ZeroPage, 3),
            OpCode::new(0x94, Sty, ZeroPageX, 4),
            OpCode::new(0x8C, Sty, Absolute, 4),
            OpCode::new(0xAA, Tax, Implied, 2),
            OpCode::new(0xA8, Tay, Implied, 2),
            OpCode::new(0xBA, Tsx, Implied, 2),
            OpCode::new(0x8A, Txa, Implied, 2),
            OpCode::new(0x9A, Txs, Implied, 2),
            OpCode::new(0x98, Tya, Implied, 2),
            // Undocumented NOPs: same bus activity as a load, result discarded.
            OpCode::undocumented(0x1A, Nop, Implied, 2),
            OpCode::undocumented(0x3A, Nop, Implied, 2),
            OpCode::undocumented(0x5A, Nop, Implied, 2),
            OpCode::undocumented(0x7A, Nop, Implied, 2),
            OpCode::undocumented(0xDA, Nop, Implied, 2),
            OpCode::undocumented(0xFA, Nop, Implied, 2),
            OpCode::undocumented(0x80, Nop, Immediate, 2),
            OpCode::undocumented(0x82, Nop, Immediate, 2),
            OpCode::undocumented(0x89, Nop, Immediate, 2),
            OpCode::undocumented(0xC2, Nop, Immediate, 2),
            OpCode::undocumented(0xE2, Nop, Immediate, 2),
            OpCode::undocumented(0x04, Nop, ZeroPage, 3),
            OpCode::undocumented(0x44, Nop, ZeroPage, 3),
            OpCode::undocumented(0x64, Nop, ZeroPage, 3),
            OpCode::undocumented(0x14, Nop, ZeroPageX, 4),
            OpCode::undocumented(0x34, Nop, ZeroPageX, 4),
            OpCode::undocumented(0x54, Nop, ZeroPageX, 4),
            OpCode::undocumented(0x74, Nop, ZeroPageX, 4),
            OpCode::undocumented(0xD4, Nop, ZeroPageX, 4),
            OpCode::undocumented(0xF4, Nop, ZeroPageX, 4),
            OpCode::undocumented(0x0C, Nop, Absolute, 4),
            OpCode::undocumented(0x1C, Nop, AbsoluteX, 4),
            OpCode::undocumented(0x3C, Nop, AbsoluteX, 4),
            OpCode::undocumented(0x5C, Nop, AbsoluteX, 4),
            OpCode::undocumented(0x7C, Nop, AbsoluteX, 4),
            OpCode::undocumented(0xDC, Nop, AbsoluteX, 4),
            OpCode::undocumented(0xFC, Nop, AbsoluteX, 4),
            OpCode::undocumented(0xA7, Lax, ZeroPage, 3),
            OpCode::undocumented(0xB7, Lax, ZeroPageY, 4),
            OpCode::undocumented(0xAF, Lax, Absolute, 4),
            OpCode::undocumented(0xBF, Lax, AbsoluteY, 4),
            OpCode::undocumented(0xA3, Lax, IndirectX, 6),
            OpCode::undocumented(0xB3, Lax, IndirectY, 5),
            OpCode::undocumented(0x87, Sax, ZeroPage, 3),
            OpCode::undocumented(0x97, Sax, ZeroPageY, 4),
            OpCode::undocumented(0x8F, Sax, Absolute, 4),
            OpCode::undocumented(0x83, Sax, IndirectX, 6),
            OpCode::undocumented(0xEB, Sbc, Immediate, 2),
            OpCode::undocumented(0xC7, Dcp, ZeroPage, 5),
            OpCode::undocumented(0xD7, Dcp, ZeroPageX, 6),
            OpCode::undocumented(0xCF, Dcp, Absolute, 6),
            OpCode::undocumented(0xDF, Dcp, AbsoluteX, 7),
            OpCode::undocumented(0xDB, Dcp, AbsoluteY, 7),
            OpCode::undocumented(0xC3, Dcp, IndirectX, 8),
            OpCode::undocumented(0xD3, Dcp, IndirectY, 8),
            OpCode::undocumented(0xE7, Isb, ZeroPage, 5),
            OpCode::undocumented(0xF7, Isb, ZeroPageX, 6),
            OpCode::undocumented(0xEF, Isb, Absolute, 6),
            OpCode::undocumented(0xFF, Isb, AbsoluteX, 7),
            OpCode::undocumented(0xFB, Isb, AbsoluteY, 7),
            OpCode::undocumented(0xE3, Isb, IndirectX, 8),
            OpCode::undocumented(0xF3, Isb, IndirectY, 8),
            OpCode::undocumented(0x07, Slo, ZeroPage, 5),
            OpCode::undocumented(0x17, Slo, ZeroPageX, 6),
            OpCode::undocumented(0x0F, Slo, Absolute, 6),
            OpCode::undocumented(0x1F, Slo, AbsoluteX, 7),
            OpCode::undocumented(0x1B, Slo, AbsoluteY, 7),
            OpCode::undocumented(0x03, Slo, IndirectX, 8),
            OpCode::undocumented(0x13, Slo, IndirectY, 8),
            OpCode::undocumented(0x27, Rla, ZeroPage, 5),
            OpCode::undocumented(0x37, Rla, ZeroPageX, 6),
            OpCode::undocumented(0x2F, Rla, Absolute, 6),
            OpCode::undocumented(0x3F, Rla, AbsoluteX, 7),
            OpCode::undocumented(0x3B, Rla, AbsoluteY, 7),
            OpCode::undocumented(0x23, Rla, IndirectX, 8),
            OpCode::undocumented(0x33, Rla, IndirectY, 8),
            OpCode::undocumented(0x47, Sre, ZeroPage, 5),
            OpCode::undocumented(0x57, Sre, ZeroPageX, 6),
            OpCode::undocumented(0x4F, Sre, Absolute, 6),
            OpCode::undocumented(0x5F, Sre, AbsoluteX, 7),
            OpCode::undocumented(0x5B, Sre, AbsoluteY, 7),
            OpCode::undocumented(0x43, Sre, IndirectX, 8),
            OpCode::undocumented(0x53, Sre, IndirectY, 8),
            OpCode::undocumented(0x67, Rra, ZeroPage, 5),
            OpCode::undocumented(0x77, Rra, ZeroPageX, 6),
            OpCode::undocumented(0x6F, Rra, Absolute, 6),
            OpCode::undocumented(0x7F, Rra, AbsoluteX, 7),
            OpCode::undocumented(0x7B, Rra, AbsoluteY, 7),
            OpCode::undocumented(0x63, Rra, IndirectX, 8),
            OpCode::undocumented(0x73, Rra, IndirectY, 8),
        ]
    };

    /// Decode index: opcode byte -> table entry.
    pub static ref OPCODES_MAP: HashMap<u8, &'static OpCode> =
        OPCODES.iter().map(|op| (op.code, op)).collect();
}

/// Table entry for an opcode byte, if the byte is a known instruction.
pub fn lookup(code: u8) -> Option<&'static OpCode> {
    OPCODES_MAP.get(&code).copied()
}

/// First table entry matching `(mnemonic, mode)`. Official encodings win
/// over undocumented ones because they come first in the table. Used by the
/// assembler to turn parsed text back into opcode bytes.
pub fn find(mnemonic: Mnemonic, mode: AddrMode) -> Option<&'static OpCode> {
    OPCODES
        .iter()
        .find(|op| op.mnemonic == mnemonic && op.mode == mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut seen = HashSet::new();
        for op in OPCODES.iter() {
            assert!(seen.insert(op.code), "duplicate opcode ${:02X}", op.code);
        }
    }

    #[test]
    fn sizes_follow_the_addressing_mode() {
        for op in OPCODES.iter() {
            let size = op.size();
            match op.mode {
                AddrMode::Accumulator | AddrMode::Implied => assert_eq!(size, 1),
                AddrMode::Absolute
                | AddrMode::Indirect
                | AddrMode::AbsoluteX
                | AddrMode::AbsoluteY => assert_eq!(size, 3),
                _ => assert_eq!(size, 2),
            }
        }
    }

    #[test]
    fn spot_check_cycles() {
        assert_eq!(lookup(0xA9).unwrap().cycles, 2); // LDA #imm
        assert_eq!(lookup(0x91).unwrap().cycles, 6); // STA (zp),Y: worst case
        assert_eq!(lookup(0xDF).unwrap().cycles, 7); // DCP abs,X: worst case
        assert_eq!(lookup(0x6C).unwrap().cycles, 5); // JMP (ind)
        assert_eq!(lookup(0x00).unwrap().cycles, 7); // BRK
    }

    #[test]
    fn unknown_byte_misses_the_table() {
        // $02 is one of the JAM opcodes; the interpreter treats it as fatal.
        assert!(lookup(0x02).is_none());
    }

    #[test]
    fn find_prefers_official_encodings() {
        assert_eq!(find(Mnemonic::Nop, AddrMode::Implied).unwrap().code, 0xEA);
        assert_eq!(find(Mnemonic::Sbc, AddrMode::Immediate).unwrap().code, 0xE9);
    }

    #[test]
    fn mnemonic_text_round_trips() {
        for op in OPCODES.iter() {
            assert_eq!(Mnemonic::parse(op.mnemonic.as_str()), Some(op.mnemonic));
        }
        assert_eq!(Mnemonic::parse("XYZ"), None);
    }
}
