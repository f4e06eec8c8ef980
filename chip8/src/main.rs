use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chip8_vm::constants::{
    DEFAULT_CYCLES_PER_FRAME, DEFAULT_FRAME_RATE, DEFAULT_STACK_DEPTH, PROGRAM_START,
};
use chip8_vm::{disassemble, Config};

mod keymap;
mod run;

/// Nesting the CLI accepts; the interpreter itself takes any depth.
const MIN_STACK_DEPTH: u64 = 12;
const MAX_STACK_DEPTH: u64 = 16;

/// Runs a CHIP-8 ROM in an SDL2 window.
///
/// Keypad:
///
///   1 2 3 C          1 2 3 4
///   4 5 6 D    ->    Q W E R
///   7 8 9 E          A S D F
///   A 0 B F          Z X C V
///
/// Hold Space to run without frame pacing, press Escape to quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per frame
    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_FRAME)]
    cycles_per_frame: usize,

    /// Frames (and timer ticks) per second
    #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Maximum subroutine nesting
    #[arg(
        long,
        default_value_t = DEFAULT_STACK_DEPTH as u64,
        value_parser = clap::value_parser!(u64).range(MIN_STACK_DEPTH..=MAX_STACK_DEPTH),
    )]
    stack_depth: u64,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Print a listing of the ROM instead of running it
    #[arg(short, long)]
    disassemble: bool,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::default()
            .with_stack_depth(self.stack_depth as usize)
            .with_cycles_per_frame(self.cycles_per_frame);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);

    if args.disassemble {
        let mut rom = Vec::new();
        reader
            .read_to_end(&mut rom)
            .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;
        for line in disassemble(&rom, PROGRAM_START) {
            println!("{}", line);
        }
        return Ok(());
    }

    run::run(&mut reader, args.config(), args.frame_rate, args.scale)
}
