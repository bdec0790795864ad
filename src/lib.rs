//! Nerva: an NES (Nintendo Entertainment System) cartridge loader and
//! 6502 CPU interpreter written in Rust.
//!
//! Implements the CPU side of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the Ricoh
//! 2A03's 6502 core (binary arithmetic only, no decimal mode), the CPU memory
//! map with its RAM/PPU-register mirroring, and [iNES](https://www.nesdev.org/wiki/INES)
//! cartridge loading for NROM boards. Execution is cycle-accurate at
//! instruction granularity and traces can be checked line-by-line against
//! `nestest.log`.
//!
//! ## Modules (NESdev references)
//!
//! - **asm** – text assembler and binary disassembler over the shared opcode table
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): flat 64 KiB,
//!   RAM mirrors every 2 KiB, PPU register mirrors every 8 bytes
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading: header, trainer,
//!   PRG/CHR banks, PlayChoice data
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: full official + undocumented
//!   opcode set, nestest-compatible tracing
//! - **error** – crate-wide error type
//! - **util** – little-endian byte/word conversion

pub mod asm;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod util;
