// This code is licensed under MIT license (see LICENSE for details)

//! nybble: an educational 8-bit computer, as a command line

use gumdrop::Options;
use nybble::{prelude::*, program};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Options)]
struct Arguments {
    #[options(help = "Load a program written as 8-bit binary lines.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Print a live disassembly trace while running.")]
    pub debug: bool,
    #[options(help = "Disassemble the program instead of running it.")]
    pub list: bool,
    #[options(help = "Stop after at most N steps.", meta = "N")]
    pub max_steps: Option<usize>,
    #[options(help = "Dump the registers and program counter after the run.")]
    pub dump: bool,
    #[options(help = "Write a memory snapshot to PATH after the run.", meta = "PATH")]
    pub snapshot: Option<PathBuf>,
}

pub fn main() {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: Arguments) -> Result<()> {
    let source = std::fs::read_to_string(&options.file)?;
    let bytes = program::parse(&source)?;

    if options.list {
        for (addr, &byte) in bytes.iter().enumerate() {
            println!("{:02x}: {byte:08b}  {}", addr.bright_black(), Insn::decode(byte));
        }
        return Ok(());
    }

    let mut machine = Machine::new();
    machine.load_program(&source)?;
    machine.cpu.debug = options.debug;

    match options.max_steps {
        // a caller-owned deadline: run() itself never gives up
        Some(steps) => {
            for _ in 0..steps {
                if machine.cpu.pc().is_halted() {
                    break;
                }
                machine.step()?;
            }
        }
        None => {
            machine.run()?;
        }
    }

    let text = machine.cpu.out().text();
    if !text.is_empty() {
        println!("{text}");
    }
    if options.dump {
        machine.cpu.dump();
    }
    if let Some(path) = options.snapshot {
        std::fs::write(path, machine.snapshot())?;
    }
    Ok(())
}
