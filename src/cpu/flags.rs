//! 6502 processor status register (P) flag bits.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3; // NES 2A03 ignores it; SED/CLD still flip the bit
pub const FLAG_BREAK: u8 = 1 << 4; // set in the frame pushed by BRK/PHP, clear for IRQ/NMI
pub const FLAG_UNUSED: u8 = 1 << 5; // always reads as 1
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;
