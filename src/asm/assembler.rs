//! 6502 text assembler.
//!
//! One instruction per line, uppercase mnemonics, `$`-prefixed hex operands:
//!
//! ```text
//! LDA #$01
//! STA $0200
//! ADC ($40),Y
//! ```
//!
//! Whitespace inside an operand is ignored, so both `$10,X` and `$10, X`
//! parse. A bare `$NN` operand is a relative offset on branch mnemonics and a
//! zero-page address on everything else. The `*` prefix the disassembler puts
//! on undocumented opcodes is accepted and skipped, so listings round-trip.

use std::io::{BufRead, Write};

use crate::cpu::opcode::{self, AddrMode, Mnemonic, OpCode};
use crate::error::NervaError;

/// Assemble a whole listing, writing machine code to `output`. Stops at the
/// first line that fails to parse or encode.
pub fn assemble<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<(), NervaError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (op, args) = encode_line(&line)?;
        output.write_all(&[op.code])?;
        output.write_all(&args[..op.size() as usize - 1])?;
    }

    Ok(())
}

/// Encode a single line into its table entry and operand bytes.
fn encode_line(line: &str) -> Result<(&'static OpCode, [u8; 2]), NervaError> {
    let text = line.trim();
    let text = text.strip_prefix('*').unwrap_or(text);

    let (mnemonic_text, operand_text) = match text.split_once(char::is_whitespace) {
        Some((m, rest)) => (m, rest),
        None => (text, ""),
    };
    // Commas may carry trailing spaces; the operand grammar is unambiguous
    // without any whitespace at all.
    let operand: String = operand_text.split_whitespace().collect();

    let mnemonic = Mnemonic::parse(mnemonic_text)
        .ok_or_else(|| NervaError::InvalidMnemonic(mnemonic_text.to_string()))?;

    let (mut mode, arg0, arg1) = parse_operand(&operand, line)?;

    // `$NN` is relative only for branches; elsewhere it addresses page zero.
    if mode == AddrMode::Relative && !mnemonic.is_branch() {
        mode = AddrMode::ZeroPage;
    }

    let op = opcode::find(mnemonic, mode).ok_or(NervaError::InvalidAddressMode(mode))?;
    Ok((op, [arg0, arg1]))
}

fn parse_operand(operand: &str, line: &str) -> Result<(AddrMode, u8, u8), NervaError> {
    if operand.is_empty() {
        return Ok((AddrMode::Implied, 0, 0));
    }
    if operand == "A" {
        return Ok((AddrMode::Accumulator, 0, 0));
    }

    if let Some(value) = operand.strip_prefix("#$") {
        let value = parse_hex8(value, line)?;
        return Ok((AddrMode::Immediate, value, 0));
    }

    if let Some(inner) = operand.strip_prefix('(') {
        // ($NN,X) | ($NNNN) | ($NN),Y
        if let Some(body) = inner.strip_suffix(')') {
            if let Some(addr) = body.strip_prefix('$') {
                if let Some(zero) = addr.strip_suffix(",X") {
                    let zero = parse_hex8(zero, line)?;
                    return Ok((AddrMode::IndirectX, zero, 0));
                }
                if addr.len() == 4 {
                    let (lo, hi) = parse_hex16(addr, line)?;
                    return Ok((AddrMode::Indirect, lo, hi));
                }
            }
        } else if let Some(zero) = inner
            .strip_prefix('$')
            .and_then(|body| body.strip_suffix("),Y"))
        {
            let zero = parse_hex8(zero, line)?;
            return Ok((AddrMode::IndirectY, zero, 0));
        }
    }

    if let Some(addr) = operand.strip_prefix('$') {
        if let Some(base) = addr.strip_suffix(",X") {
            return match base.len() {
                2 => Ok((AddrMode::ZeroPageX, parse_hex8(base, line)?, 0)),
                4 => {
                    let (lo, hi) = parse_hex16(base, line)?;
                    Ok((AddrMode::AbsoluteX, lo, hi))
                }
                _ => Err(NervaError::InvalidSyntax(line.to_string())),
            };
        }
        if let Some(base) = addr.strip_suffix(",Y") {
            return match base.len() {
                2 => Ok((AddrMode::ZeroPageY, parse_hex8(base, line)?, 0)),
                4 => {
                    let (lo, hi) = parse_hex16(base, line)?;
                    Ok((AddrMode::AbsoluteY, lo, hi))
                }
                _ => Err(NervaError::InvalidSyntax(line.to_string())),
            };
        }
        return match addr.len() {
            2 => Ok((AddrMode::Relative, parse_hex8(addr, line)?, 0)),
            4 => {
                let (lo, hi) = parse_hex16(addr, line)?;
                Ok((AddrMode::Absolute, lo, hi))
            }
            _ => Err(NervaError::InvalidSyntax(line.to_string())),
        };
    }

    Err(NervaError::InvalidSyntax(line.to_string()))
}

fn parse_hex8(text: &str, line: &str) -> Result<u8, NervaError> {
    if text.len() != 2 {
        return Err(NervaError::InvalidSyntax(line.to_string()));
    }
    u8::from_str_radix(text, 16).map_err(|_| NervaError::InvalidSyntax(line.to_string()))
}

/// Parse a 4-digit hex word into `(lo, hi)` operand bytes.
fn parse_hex16(text: &str, line: &str) -> Result<(u8, u8), NervaError> {
    let word =
        u16::from_str_radix(text, 16).map_err(|_| NervaError::InvalidSyntax(line.to_string()))?;
    Ok((word as u8, (word >> 8) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_text(text: &str) -> Result<Vec<u8>, NervaError> {
        let mut out = Vec::new();
        assemble(text.as_bytes(), &mut out)?;
        Ok(out)
    }

    #[test]
    fn assembles_every_addressing_mode() {
        let program = "\
BRK
ASL A
LDA #$01
LDA $10
LDA $10,X
LDX $10,Y
LDA $1234
LDA $1234,X
LDA $1234,Y
JMP ($1234)
LDA ($10,X)
LDA ($10),Y
BNE $FD";
        let bytes = assemble_text(program).unwrap();

        assert_eq!(
            bytes,
            vec![
                0x00, // BRK
                0x0A, // ASL A
                0xA9, 0x01, // LDA #$01
                0xA5, 0x10, // LDA $10
                0xB5, 0x10, // LDA $10,X
                0xB6, 0x10, // LDX $10,Y
                0xAD, 0x34, 0x12, // LDA $1234
                0xBD, 0x34, 0x12, // LDA $1234,X
                0xB9, 0x34, 0x12, // LDA $1234,Y
                0x6C, 0x34, 0x12, // JMP ($1234)
                0xA1, 0x10, // LDA ($10,X)
                0xB1, 0x10, // LDA ($10),Y
                0xD0, 0xFD, // BNE $FD
            ]
        );
    }

    #[test]
    fn accepts_spaces_after_commas() {
        assert_eq!(assemble_text("LDA $10, X").unwrap(), vec![0xB5, 0x10]);
        assert_eq!(assemble_text("LDA ($10, X)").unwrap(), vec![0xA1, 0x10]);
        assert_eq!(assemble_text("LDA ($10), Y").unwrap(), vec![0xB1, 0x10]);
    }

    #[test]
    fn bare_byte_operand_is_zero_page_except_for_branches() {
        assert_eq!(assemble_text("LDA $42").unwrap(), vec![0xA5, 0x42]);
        assert_eq!(assemble_text("BEQ $42").unwrap(), vec![0xF0, 0x42]);
    }

    #[test]
    fn starred_undocumented_lines_round_trip() {
        assert_eq!(assemble_text("*NOP $44").unwrap(), vec![0x04, 0x44]);
        assert_eq!(assemble_text("*LAX $10, Y").unwrap(), vec![0xB7, 0x10]);
    }

    #[test]
    fn unknown_mnemonic_is_reported() {
        assert!(matches!(
            assemble_text("FOO #$01"),
            Err(NervaError::InvalidMnemonic(m)) if m == "FOO"
        ));
    }

    #[test]
    fn bad_operand_is_a_syntax_error() {
        assert!(matches!(
            assemble_text("LDA #$GG"),
            Err(NervaError::InvalidSyntax(_))
        ));
        assert!(matches!(
            assemble_text("LDA $123"),
            Err(NervaError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn unsupported_mode_for_mnemonic_is_reported() {
        // LDX has no absolute,X encoding.
        assert!(matches!(
            assemble_text("LDX $1234,X"),
            Err(NervaError::InvalidAddressMode(AddrMode::AbsoluteX))
        ));
    }
}
