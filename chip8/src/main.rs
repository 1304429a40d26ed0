use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::DEFAULT_CLOCK_HZ;
use chip8_core::FaultPolicy;

mod keymap;
mod run;

/// A Chip-8 virtual machine with an SDL2 frontend.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instruction dispatch rate in cycles per second
    #[arg(long, default_value_t = DEFAULT_CLOCK_HZ)]
    clock: u32,

    /// Halt on unsupported opcodes instead of skipping them
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let policy = if args.strict {
        FaultPolicy::Strict
    } else {
        FaultPolicy::Lenient
    };
    run::run(&args.rom, args.clock, policy)
}
