//! nestest-compatible execution tracing.
//!
//! One line per instruction, laid out so a run can be diffed directly
//! against the reference `nestest.log`:
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  -,  - CYC:7
//! ```
//!
//! The left 47 columns hold the program counter, the raw instruction bytes
//! and the disassembled operation (undocumented opcodes get a `*` prefix);
//! the right side is the register file *before* the instruction executes and
//! the running cycle total. The PPU columns are placeholders since the core
//! has no PPU. Formatting reads through the bus to preview effective
//! addresses and operands but never changes register state.

use crate::bus::Bus;
use crate::cpu::cpu::CPU;
use crate::cpu::opcode::{AddrMode, Instruction, Mnemonic};

/// Render the trace line for `instr` against the pre-execution CPU state.
pub fn line<B: Bus>(cpu: &mut CPU<B>, instr: &Instruction) -> String {
    let pc = cpu.pc;
    let bytes_text = instr.bytes_text();
    let op_text = operation_text(cpu, instr);
    let left = format!("{:04X}  {:<8} {}", pc, bytes_text, op_text);

    format!(
        "{:<47} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PPU:{:>3},{:>3} CYC:{}",
        left, cpu.a, cpu.x, cpu.y, cpu.status, cpu.sp, "-", "-", cpu.cycles
    )
}

/// `*`-or-space prefix, mnemonic, and the per-mode operand template with
/// effective address and value previews resolved through the bus.
fn operation_text<B: Bus>(cpu: &mut CPU<B>, instr: &Instruction) -> String {
    let prefix = if instr.opcode.unofficial { '*' } else { ' ' };
    let mnemonic = format!("{}{}", prefix, instr.opcode.mnemonic);

    let (address, operand, _) = cpu.fetch_operand(instr);

    match instr.opcode.mode {
        AddrMode::Implied => mnemonic,
        AddrMode::Accumulator => format!("{} A", mnemonic),
        AddrMode::Immediate => format!("{} #${:02X}", mnemonic, instr.byte_arg()),
        AddrMode::Relative => {
            // Branch operands display the resolved target.
            let target = cpu
                .pc
                .wrapping_add(instr.size())
                .wrapping_add(instr.byte_arg() as i8 as u16);
            format!("{} ${:04X}", mnemonic, target)
        }
        AddrMode::Absolute => {
            // JMP and JSR name a code address; there is no value to preview.
            if matches!(instr.opcode.mnemonic, Mnemonic::Jmp | Mnemonic::Jsr) {
                format!("{} ${:04X}", mnemonic, instr.word_arg())
            } else {
                format!("{} ${:04X} = {:02X}", mnemonic, instr.word_arg(), operand)
            }
        }
        AddrMode::AbsoluteX => format!(
            "{} ${:04X},X @ {:04X} = {:02X}",
            mnemonic,
            instr.word_arg(),
            address,
            operand
        ),
        AddrMode::AbsoluteY => format!(
            "{} ${:04X},Y @ {:04X} = {:02X}",
            mnemonic,
            instr.word_arg(),
            address,
            operand
        ),
        AddrMode::ZeroPage => format!("{} ${:02X} = {:02X}", mnemonic, instr.byte_arg(), operand),
        AddrMode::ZeroPageX => format!(
            "{} ${:02X},X @ {:02X} = {:02X}",
            mnemonic,
            instr.byte_arg(),
            address,
            operand
        ),
        AddrMode::ZeroPageY => format!(
            "{} ${:02X},Y @ {:02X} = {:02X}",
            mnemonic,
            instr.byte_arg(),
            address,
            operand
        ),
        AddrMode::Indirect => format!(
            "{} (${:04X}) = {:04X}",
            mnemonic,
            instr.word_arg(),
            address
        ),
        AddrMode::IndirectX => format!(
            "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
            mnemonic,
            instr.byte_arg(),
            instr.byte_arg().wrapping_add(cpu.x),
            address,
            operand
        ),
        AddrMode::IndirectY => {
            let inner = cpu.bus.read_word_same_page(instr.byte_arg() as u16);
            format!(
                "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                mnemonic,
                instr.byte_arg(),
                inner,
                address,
                operand
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::NesBus;

    fn cpu_with(program: &[(u16, u8)]) -> CPU<NesBus> {
        let mut bus = NesBus::new();
        for &(addr, byte) in program {
            bus.write(addr, byte);
        }
        let mut cpu = CPU::new(bus);
        cpu.sp = 0xFD;
        cpu.status = 0x24;
        cpu.cycles = 7;
        cpu
    }

    #[test]
    fn matches_the_nestest_prologue_line() {
        let mut cpu = cpu_with(&[(0xC000, 0x4C), (0xC001, 0xF5), (0xC002, 0xC5)]);
        cpu.pc = 0xC000;
        let instr = cpu.decode().unwrap();

        let line = line(&mut cpu, &instr);

        assert_eq!(&line[..25], "C000  4C F5 C5  JMP $C5F5");
        // Padding up to the register block, which starts at column 48.
        assert!(line[25..48].chars().all(|c| c == ' '));
        assert_eq!(
            &line[48..],
            "A:00 X:00 Y:00 P:24 SP:FD PPU:  -,  - CYC:7"
        );
    }

    #[test]
    fn unofficial_opcodes_get_a_star() {
        let mut cpu = cpu_with(&[(0xC000, 0x04), (0xC001, 0xA9)]);
        cpu.pc = 0xC000;
        let instr = cpu.decode().unwrap();

        let line = line(&mut cpu, &instr);

        assert!(line.starts_with("C000  04 A9    *NOP $A9 = 00"));
    }

    #[test]
    fn indirect_y_shows_inner_and_final_address() {
        // LDA ($33),Y with pointer $33 -> $0400, Y = 5
        let mut cpu = cpu_with(&[
            (0xC000, 0xB1),
            (0xC001, 0x33),
            (0x0033, 0x00),
            (0x0034, 0x04),
            (0x0405, 0x66),
        ]);
        cpu.pc = 0xC000;
        cpu.y = 0x05;
        let instr = cpu.decode().unwrap();

        let line = line(&mut cpu, &instr);

        assert!(line.contains("LDA ($33),Y = 0400 @ 0405 = 66"));
    }

    #[test]
    fn formatting_does_not_touch_register_state() {
        let mut cpu = cpu_with(&[(0xC000, 0xA9), (0xC001, 0x42)]);
        cpu.pc = 0xC000;
        let instr = cpu.decode().unwrap();

        let _ = line(&mut cpu, &instr);

        assert_eq!(cpu.pc, 0xC000);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.status, 0x24);
        assert_eq!(cpu.cycles, 7);
    }
}
