//! NES emulator entry point.
//!
//! Loads an iNES cartridge, maps its PRG into the CPU address space and
//! interprets 6502 code until the interpreter reports an error (for CPU test
//! ROMs that is how a run ends). With `--verbose` every instruction prints a
//! nestest-compatible trace line that can be diffed against a reference log.
//!
//! Usage: `nerva [rom.nes] [-v] [--nestest]` — the ROM is read from stdin
//! when no path is given.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

use ansi_term::Colour::Red;
use clap::Parser;

use nerva::bus::NesBus;
use nerva::cartridge::Cartridge;
use nerva::cpu::CPU;
use nerva::error::NervaError;

#[derive(Parser)]
#[command(name = "nerva", version, about = "NES (6502) emulator and cartridge loader")]
struct Args {
    /// iNES ROM file; read from stdin when omitted
    rom: Option<PathBuf>,

    /// Print one nestest-format trace line per instruction
    #[arg(short, long)]
    verbose: bool,

    /// Start at $C000 (nestest automation entry) instead of the reset vector
    #[arg(long)]
    nestest: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("{} {}", Red.bold().paint("ERROR"), err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), NervaError> {
    let cart = match &args.rom {
        Some(path) => Cartridge::load(File::open(path)?)?,
        None => Cartridge::load(io::stdin().lock())?,
    };

    let mut bus = NesBus::new();
    bus.load_cartridge(&cart)?;

    let mut cpu = CPU::new(bus);
    cpu.verbose = args.verbose;
    cpu.reset();

    // nestest's automated mode bypasses the reset vector. See the notes
    // shipped with the ROM: "start at $C000 and compare against the log".
    if args.nestest {
        cpu.pc = 0xC000;
    }

    cpu.run()
}
