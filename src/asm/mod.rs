//! Text assembler and binary disassembler.
//!
//! Both directions run over the CPU's opcode table, so anything the
//! interpreter can execute disassembles, and every listing the disassembler
//! emits assembles back to the same bytes.

pub mod assembler;
pub mod disassembler;

pub use assembler::assemble;
pub use disassembler::{disassemble, DisassembleConfig};
