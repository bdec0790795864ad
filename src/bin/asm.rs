//! 6502 assembler: text on stdin, machine code on stdout.

use std::io::{self, Write};
use std::process;

use ansi_term::Colour::Red;
use clap::Parser;

use nerva::asm;

#[derive(Parser)]
#[command(
    name = "nerva-asm",
    version,
    about = "Assemble 6502 source from stdin to machine code on stdout"
)]
struct Args {}

fn main() {
    env_logger::init();
    let _ = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = asm::assemble(stdin.lock(), &mut out);
    if let Err(err) = result.and_then(|()| out.flush().map_err(Into::into)) {
        eprintln!("{} {}", Red.bold().paint("ERROR"), err);
        process::exit(1);
    }
}
