//! Crate-wide error type.

use thiserror::Error;

use crate::cpu::opcode::AddrMode;

/// Everything that can go wrong while loading, decoding, assembling or
/// disassembling 6502 code. Each failure carries the value that caused it.
#[derive(Debug, Error)]
pub enum NervaError {
    /// The decoder hit a byte with no entry in the opcode table.
    #[error("invalid op code: ${0:02X}")]
    InvalidOpCode(u8),

    /// A mnemonic was asked to encode with an addressing mode it does not
    /// support (e.g. `LDX $NN,X`).
    #[error("invalid address mode: {0}")]
    InvalidAddressMode(AddrMode),

    /// The assembler saw an unrecognized mnemonic.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The assembler could not parse a line's operand.
    #[error("invalid syntax in line: {0}")]
    InvalidSyntax(String),

    /// The ROM does not start with `"NES\x1A"`.
    #[error("invalid magic number: {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// NROM supports exactly one or two 16 KiB PRG banks.
    #[error("unsupported PRG bank count: {0}")]
    InvalidPrgBankCount(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
