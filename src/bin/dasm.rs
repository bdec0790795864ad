//! 6502 disassembler: machine code on stdin, listing on stdout.

use std::io;
use std::process;

use ansi_term::Colour::Red;
use clap::Parser;

use nerva::asm::{self, DisassembleConfig};

#[derive(Parser)]
#[command(
    name = "nerva-dasm",
    version,
    about = "Disassemble 6502 machine code from stdin to a listing on stdout"
)]
struct Args {
    /// Show the memory address of each instruction
    #[arg(short = 'm', long)]
    memory_addresses: bool,

    /// Show the raw instruction bytes
    #[arg(short = 'b', long)]
    bytes: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let cfg = DisassembleConfig {
        display_memory_address: args.memory_addresses,
        display_bytes: args.bytes,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = asm::disassemble(stdin.lock(), &mut out, &cfg) {
        eprintln!("{} {}", Red.bold().paint("ERROR"), err);
        process::exit(1);
    }
}
