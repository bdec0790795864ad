//! The 6502 interpreter core.
//!
//! `CPU` owns the register file and the bus. One `step` performs a full
//! fetch/decode/execute round: the opcode byte at `pc` is looked up in the
//! opcode table, the operand bytes are captured into an [`Instruction`],
//! and execution dispatches on the mnemonic. During execution `pc` still
//! points at the current instruction; each executor advances it by the
//! instruction size or loads it outright for control transfers.
//!
//! Cycle accounting follows the hardware at instruction granularity: the
//! table carries base cycles, reads add one on an indexed page cross, taken
//! branches add one plus one more when the branch target crosses a page.
//! Stores and the undocumented read-modify-write combos always pay their
//! worst case, which is baked into their table entries.

use crate::bus::Bus;
use crate::cpu::flags::{
    FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
    FLAG_UNUSED, FLAG_ZERO,
};
use crate::cpu::opcode::{self, AddrMode, Instruction, Mnemonic};
use crate::cpu::trace;
use crate::error::NervaError;
use crate::util::{join_bytes, split_word};

/// Word at this address is loaded into `pc` on reset.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Word at this address is loaded into `pc` by BRK (and hardware IRQ).
pub const IRQ_VECTOR: u16 = 0xFFFE;
/// Reserved for NMI; the core never triggers it.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// The stack occupies this fixed page; `sp` indexes into it.
pub const STACK_BASE: u16 = 0x0100;

fn in_same_page(addr0: u16, addr1: u16) -> bool {
    addr0 & 0xFF00 == addr1 & 0xFF00
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: u64,
    pub bus: B,
    /// Emit one nestest-format trace line per instruction.
    pub verbose: bool,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        CPU {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: 0,
            cycles: 0,
            bus,
            verbose: false,
        }
    }

    /// Power-up state: registers cleared, `sp` at $FD, I and U set, `pc`
    /// from the $FFFC vector. Reset costs 7 cycles.
    /// See NESdev "CPU power up state".
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;
        self.pc = self.bus.read_word(RESET_VECTOR);
        self.cycles = 7;
    }

    /// Execute one instruction and return the cycles it consumed.
    pub fn step(&mut self) -> Result<u8, NervaError> {
        let instr = self.decode()?;

        if self.verbose {
            println!("{}", trace::line(self, &instr));
        }

        let cycles = self.execute(&instr);
        self.cycles += cycles as u64;

        Ok(cycles)
    }

    /// Step until the decoder hits an unknown opcode; the error is returned
    /// to the host, which decides whether that means "done".
    pub fn run(&mut self) -> Result<(), NervaError> {
        loop {
            self.step()?;
        }
    }

    /// Read the opcode byte at `pc` plus its operand bytes. `pc` is not
    /// advanced; executors do that.
    pub fn decode(&mut self) -> Result<Instruction, NervaError> {
        let code = self.bus.read(self.pc);
        let opcode = opcode::lookup(code).ok_or(NervaError::InvalidOpCode(code))?;

        let mut args = [0u8; 2];
        for (i, arg) in args.iter_mut().enumerate().take(opcode.size() as usize - 1) {
            *arg = self.bus.read(self.pc.wrapping_add(1 + i as u16));
        }

        Ok(Instruction::new(opcode, args))
    }

    /// Resolve `(effective_address, operand, page_crossed)` for an
    /// instruction against the current register file.
    ///
    /// Indexed zero-page modes wrap within page zero, indirect pointers are
    /// read with the same-page quirk, and `page_crossed` reports whether an
    /// indexed effective address left the page of its base (for relative
    /// mode: whether the branch target leaves the page of the next
    /// instruction).
    pub fn fetch_operand(&mut self, instr: &Instruction) -> (u16, u8, bool) {
        let mut address = 0u16;
        let mut operand = 0u8;
        let mut page_crossed = false;

        match instr.opcode.mode {
            AddrMode::Implied => {}
            AddrMode::Accumulator => {
                operand = self.a;
            }
            AddrMode::Immediate => {
                operand = instr.byte_arg();
            }
            AddrMode::Relative => {
                operand = instr.byte_arg();
                let base = self.pc.wrapping_add(instr.size());
                let target = base.wrapping_add(operand as i8 as u16);
                page_crossed = !in_same_page(base, target);
            }
            AddrMode::ZeroPage => {
                address = instr.byte_arg() as u16;
                operand = self.bus.read(address);
            }
            AddrMode::ZeroPageX => {
                address = instr.byte_arg().wrapping_add(self.x) as u16;
                operand = self.bus.read(address);
            }
            AddrMode::ZeroPageY => {
                address = instr.byte_arg().wrapping_add(self.y) as u16;
                operand = self.bus.read(address);
            }
            AddrMode::Absolute => {
                address = instr.word_arg();
                operand = self.bus.read(address);
            }
            AddrMode::AbsoluteX => {
                let base = instr.word_arg();
                address = base.wrapping_add(self.x as u16);
                operand = self.bus.read(address);
                page_crossed = !in_same_page(base, address);
            }
            AddrMode::AbsoluteY => {
                let base = instr.word_arg();
                address = base.wrapping_add(self.y as u16);
                operand = self.bus.read(address);
                page_crossed = !in_same_page(base, address);
            }
            AddrMode::Indirect => {
                address = self.bus.read_word_same_page(instr.word_arg());
                operand = self.bus.read(address);
            }
            AddrMode::IndirectX => {
                let pointer = instr.byte_arg().wrapping_add(self.x) as u16;
                address = self.bus.read_word_same_page(pointer);
                operand = self.bus.read(address);
            }
            AddrMode::IndirectY => {
                let inner = self.bus.read_word_same_page(instr.byte_arg() as u16);
                address = inner.wrapping_add(self.y as u16);
                operand = self.bus.read(address);
                page_crossed = !in_same_page(inner, address);
            }
        }

        (address, operand, page_crossed)
    }

    fn execute(&mut self, instr: &Instruction) -> u8 {
        match instr.opcode.mnemonic {
            Mnemonic::Adc => self.adc(instr),
            Mnemonic::And => self.and(instr),
            Mnemonic::Asl => self.asl(instr),
            Mnemonic::Bcc => self.branch(instr, !self.flag(FLAG_CARRY)),
            Mnemonic::Bcs => self.branch(instr, self.flag(FLAG_CARRY)),
            Mnemonic::Beq => self.branch(instr, self.flag(FLAG_ZERO)),
            Mnemonic::Bit => self.bit(instr),
            Mnemonic::Bmi => self.branch(instr, self.flag(FLAG_NEGATIVE)),
            Mnemonic::Bne => self.branch(instr, !self.flag(FLAG_ZERO)),
            Mnemonic::Bpl => self.branch(instr, !self.flag(FLAG_NEGATIVE)),
            Mnemonic::Brk => self.brk(instr),
            Mnemonic::Bvc => self.branch(instr, !self.flag(FLAG_OVERFLOW)),
            Mnemonic::Bvs => self.branch(instr, self.flag(FLAG_OVERFLOW)),
            Mnemonic::Clc => self.flag_op(instr, FLAG_CARRY, false),
            Mnemonic::Cld => self.flag_op(instr, FLAG_DECIMAL, false),
            Mnemonic::Cli => self.flag_op(instr, FLAG_INTERRUPT_DISABLE, false),
            Mnemonic::Clv => self.flag_op(instr, FLAG_OVERFLOW, false),
            Mnemonic::Cmp => self.compare(instr, self.a),
            Mnemonic::Cpx => self.compare(instr, self.x),
            Mnemonic::Cpy => self.compare(instr, self.y),
            Mnemonic::Dcp => self.dcp(instr),
            Mnemonic::Dec => self.dec(instr),
            Mnemonic::Dex => self.dex(instr),
            Mnemonic::Dey => self.dey(instr),
            Mnemonic::Eor => self.eor(instr),
            Mnemonic::Inc => self.inc(instr),
            Mnemonic::Inx => self.inx(instr),
            Mnemonic::Iny => self.iny(instr),
            Mnemonic::Isb => self.isb(instr),
            Mnemonic::Jmp => self.jmp(instr),
            Mnemonic::Jsr => self.jsr(instr),
            Mnemonic::Lax => self.lax(instr),
            Mnemonic::Lda => self.lda(instr),
            Mnemonic::Ldx => self.ldx(instr),
            Mnemonic::Ldy => self.ldy(instr),
            Mnemonic::Lsr => self.lsr(instr),
            Mnemonic::Nop => self.nop(instr),
            Mnemonic::Ora => self.ora(instr),
            Mnemonic::Pha => self.pha(instr),
            Mnemonic::Php => self.php(instr),
            Mnemonic::Pla => self.pla(instr),
            Mnemonic::Plp => self.plp(instr),
            Mnemonic::Rla => self.rla(instr),
            Mnemonic::Rol => self.rol(instr),
            Mnemonic::Ror => self.ror(instr),
            Mnemonic::Rra => self.rra(instr),
            Mnemonic::Rti => self.rti(instr),
            Mnemonic::Rts => self.rts(instr),
            Mnemonic::Sax => self.sax(instr),
            Mnemonic::Sbc => self.sbc(instr),
            Mnemonic::Sec => self.flag_op(instr, FLAG_CARRY, true),
            Mnemonic::Sed => self.flag_op(instr, FLAG_DECIMAL, true),
            Mnemonic::Sei => self.flag_op(instr, FLAG_INTERRUPT_DISABLE, true),
            Mnemonic::Slo => self.slo(instr),
            Mnemonic::Sre => self.sre(instr),
            Mnemonic::Sta => self.store(instr, self.a),
            Mnemonic::Stx => self.store(instr, self.x),
            Mnemonic::Sty => self.store(instr, self.y),
            Mnemonic::Tax => self.tax(instr),
            Mnemonic::Tay => self.tay(instr),
            Mnemonic::Tsx => self.tsx(instr),
            Mnemonic::Txa => self.txa(instr),
            Mnemonic::Txs => self.txs(instr),
            Mnemonic::Tya => self.tya(instr),
        }
    }

    // --- register and flag helpers -------------------------------------

    fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    fn set_flag(&mut self, flag: u8, set: bool) {
        if set {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    fn advance_pc(&mut self, instr: &Instruction) {
        self.pc = self.pc.wrapping_add(instr.size());
    }

    // --- stack ---------------------------------------------------------

    fn push(&mut self, value: u8) {
        self.bus.write(STACK_BASE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(STACK_BASE + self.sp as u16)
    }

    fn push_word(&mut self, value: u16) {
        let (lo, hi) = split_word(value);
        self.push(hi);
        self.push(lo);
    }

    fn pull_word(&mut self) -> u16 {
        let lo = self.pop();
        let hi = self.pop();
        join_bytes(lo, hi)
    }

    // --- arithmetic ----------------------------------------------------

    /// A <- A + value + C, setting C, Z, V, N. Shared by ADC, SBC (operand
    /// inverted), RRA and ISB. Decimal mode does not exist on the 2A03.
    fn add_to_accumulator(&mut self, value: u8) {
        let carry_in = if self.flag(FLAG_CARRY) { 1 } else { 0 };
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        // Signed overflow: both inputs share a sign bit the result lacks.
        self.set_flag(FLAG_OVERFLOW, (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    fn adc(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.add_to_accumulator(value);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn sbc(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        // SBC is ADC of the one's complement: borrow is inverted carry.
        self.add_to_accumulator(value ^ 0xFF);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn compare(&mut self, instr: &Instruction, register: u8) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        let result = register.wrapping_sub(value);

        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(result);

        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    // --- logical -------------------------------------------------------

    fn and(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn ora(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn eor(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn bit(&mut self, instr: &Instruction) -> u8 {
        let (_, value, _) = self.fetch_operand(instr);

        self.set_flag(FLAG_ZERO, self.a & value == 0);
        self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    // --- shifts and rotates --------------------------------------------

    /// Write a shift/rotate result back to A or memory depending on mode.
    fn store_shifted(&mut self, instr: &Instruction, address: u16, result: u8) {
        if instr.opcode.mode == AddrMode::Accumulator {
            self.a = result;
        } else {
            self.bus.write(address, result);
        }
    }

    fn asl(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value << 1;

        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        self.store_shifted(instr, address, result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn lsr(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value >> 1;

        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        self.store_shifted(instr, address, result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn rol(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let carry_in = if self.flag(FLAG_CARRY) { 0x01 } else { 0x00 };
        let result = (value << 1) | carry_in;

        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        self.store_shifted(instr, address, result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn ror(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let carry_in = if self.flag(FLAG_CARRY) { 0x80 } else { 0x00 };
        let result = (value >> 1) | carry_in;

        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        self.store_shifted(instr, address, result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    // --- increment / decrement -----------------------------------------

    fn inc(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value.wrapping_add(1);

        self.bus.write(address, result);
        self.update_zero_and_negative_flags(result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn dec(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value.wrapping_sub(1);

        self.bus.write(address, result);
        self.update_zero_and_negative_flags(result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn inx(&mut self, instr: &Instruction) -> u8 {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn iny(&mut self, instr: &Instruction) -> u8 {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn dex(&mut self, instr: &Instruction) -> u8 {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn dey(&mut self, instr: &Instruction) -> u8 {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    // --- loads, stores, transfers --------------------------------------

    fn lda(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.a = value;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn ldx(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.x = value;
        self.update_zero_and_negative_flags(self.x);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    fn ldy(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.y = value;
        self.update_zero_and_negative_flags(self.y);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    /// Undocumented: load A and X with the same operand.
    fn lax(&mut self, instr: &Instruction) -> u8 {
        let (_, value, page_crossed) = self.fetch_operand(instr);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    /// STA/STX/STY. Indexed stores never get a page-cross discount, so the
    /// table cycles apply as-is.
    fn store(&mut self, instr: &Instruction, value: u8) -> u8 {
        let (address, _, _) = self.fetch_operand(instr);
        self.bus.write(address, value);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// Undocumented: store A AND X, no flag changes.
    fn sax(&mut self, instr: &Instruction) -> u8 {
        let (address, _, _) = self.fetch_operand(instr);
        self.bus.write(address, self.a & self.x);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn tax(&mut self, instr: &Instruction) -> u8 {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn tay(&mut self, instr: &Instruction) -> u8 {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn tsx(&mut self, instr: &Instruction) -> u8 {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn txa(&mut self, instr: &Instruction) -> u8 {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// The one transfer that does not touch flags.
    fn txs(&mut self, instr: &Instruction) -> u8 {
        self.sp = self.x;
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn tya(&mut self, instr: &Instruction) -> u8 {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    // --- stack instructions --------------------------------------------

    fn pha(&mut self, instr: &Instruction) -> u8 {
        self.push(self.a);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// PHP pushes the software frame: B and U both set.
    fn php(&mut self, instr: &Instruction) -> u8 {
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    fn pla(&mut self, instr: &Instruction) -> u8 {
        self.a = self.pop();
        self.update_zero_and_negative_flags(self.a);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// Loading P from the stack masks B off and forces U on.
    fn plp(&mut self, instr: &Instruction) -> u8 {
        let value = self.pop();
        self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    // --- control transfer ----------------------------------------------

    fn jmp(&mut self, instr: &Instruction) -> u8 {
        let (address, _, _) = self.fetch_operand(instr);
        self.pc = address;
        instr.opcode.cycles
    }

    /// JSR pushes the address of its own last byte, not the next
    /// instruction; RTS compensates with the +1.
    fn jsr(&mut self, instr: &Instruction) -> u8 {
        let return_addr = self.pc.wrapping_add(instr.size()).wrapping_sub(1);
        self.push_word(return_addr);
        self.pc = instr.word_arg();
        instr.opcode.cycles
    }

    fn rts(&mut self, instr: &Instruction) -> u8 {
        self.pc = self.pull_word().wrapping_add(1);
        instr.opcode.cycles
    }

    fn rti(&mut self, instr: &Instruction) -> u8 {
        let value = self.pop();
        self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
        self.pc = self.pull_word();
        instr.opcode.cycles
    }

    fn brk(&mut self, instr: &Instruction) -> u8 {
        self.set_flag(FLAG_BREAK, true);
        // BRK has a padding byte: the pushed return address skips it.
        self.push_word(self.pc.wrapping_add(2));
        self.push(self.status | FLAG_UNUSED);
        self.set_flag(FLAG_INTERRUPT_DISABLE, true);
        self.pc = self.bus.read_word(IRQ_VECTOR);
        instr.opcode.cycles
    }

    fn branch(&mut self, instr: &Instruction, condition: bool) -> u8 {
        let (_, operand, page_crossed) = self.fetch_operand(instr);
        let mut cycles = instr.opcode.cycles;

        if condition {
            cycles += 1;
            if page_crossed {
                cycles += 1;
            }
            let base = self.pc.wrapping_add(instr.size());
            self.pc = base.wrapping_add(operand as i8 as u16);
        } else {
            self.advance_pc(instr);
        }

        cycles
    }

    // --- flag control and NOP ------------------------------------------

    fn flag_op(&mut self, instr: &Instruction, flag: u8, set: bool) -> u8 {
        self.set_flag(flag, set);
        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// Official NOP and the undocumented multi-byte ones. The memory forms
    /// perform the read (and charge for the page cross) but discard it.
    fn nop(&mut self, instr: &Instruction) -> u8 {
        let (_, _, page_crossed) = self.fetch_operand(instr);
        self.advance_pc(instr);
        read_cycles(instr, page_crossed)
    }

    // --- undocumented read-modify-writes -------------------------------

    /// DCP: DEC memory, then CMP with A.
    fn dcp(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value.wrapping_sub(1);
        self.bus.write(address, result);

        self.set_flag(FLAG_CARRY, self.a >= result);
        self.update_zero_and_negative_flags(self.a.wrapping_sub(result));

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// ISB (a.k.a. ISC): INC memory, then SBC it from A.
    fn isb(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value.wrapping_add(1);
        self.bus.write(address, result);

        self.add_to_accumulator(result ^ 0xFF);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// SLO: ASL memory, then ORA it into A.
    fn slo(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value << 1;
        self.bus.write(address, result);

        self.a |= result;
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(self.a);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// RLA: ROL memory, then AND it into A.
    fn rla(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let carry_in = if self.flag(FLAG_CARRY) { 0x01 } else { 0x00 };
        let result = (value << 1) | carry_in;
        self.bus.write(address, result);

        self.a &= result;
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(self.a);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// SRE: LSR memory, then EOR it into A.
    fn sre(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let result = value >> 1;
        self.bus.write(address, result);

        self.a ^= result;
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(self.a);

        self.advance_pc(instr);
        instr.opcode.cycles
    }

    /// RRA: ROR memory, then ADC it to A. The rotate's carry-out is the
    /// addition's carry-in.
    fn rra(&mut self, instr: &Instruction) -> u8 {
        let (address, value, _) = self.fetch_operand(instr);
        let carry_in = if self.flag(FLAG_CARRY) { 0x80 } else { 0x00 };
        let result = (value >> 1) | carry_in;
        self.bus.write(address, result);

        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.add_to_accumulator(result);

        self.advance_pc(instr);
        instr.opcode.cycles
    }
}

/// Base cycles plus the indexed page-cross penalty read instructions pay.
fn read_cycles(instr: &Instruction, page_crossed: bool) -> u8 {
    if page_crossed {
        instr.opcode.cycles + 1
    } else {
        instr.opcode.cycles
    }
}
