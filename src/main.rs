//! bitlamp - CLI Entry Point
//!
//! Commands:
//! - `bitlamp edit [image]` - Interactive lightbulb editor
//! - `bitlamp run <image>` - Run an image to completion
//! - `bitlamp dump <image>` - Print an image listing

use clap::{Parser, Subcommand};
use serde::Serialize;

use bitlamp::cpu::decode;
use bitlamp::{load_image, AddrSpace, Cpu, Memory};

#[derive(Parser)]
#[command(name = "bitlamp")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An educational 8-bit lightbulb computer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive editor, optionally preloading a RAM image
    Edit {
        /// Path to a RAM image file
        image: Option<String>,
    },
    /// Run an image until it halts
    Run {
        /// Path to the RAM image to execute
        image: String,
        /// Maximum number of cycles to run (default: 10000)
        #[arg(short, long, default_value = "10000")]
        max_cycles: u64,
        /// Show one line per executed instruction
        #[arg(short, long)]
        trace: bool,
        /// Print the final machine state as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print a listing of an image without running it
    Dump {
        /// Path to the RAM image
        image: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Edit { image }) => {
            edit_image(image.as_deref());
        }
        Some(Commands::Run {
            image,
            max_cycles,
            trace,
            json,
        }) => {
            run_image(&image, max_cycles, trace, json);
        }
        Some(Commands::Dump { image }) => {
            dump_image(&image);
        }
        None => {
            // Bare invocation drops straight into an empty editor
            edit_image(None);
        }
    }
}

fn load_into_memory(path: &str) -> Memory {
    let image = match load_image(path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("❌ Failed to load image: {}", e);
            std::process::exit(1);
        }
    };

    let mut mem = Memory::new();
    image.apply(&mut mem);
    mem
}

#[cfg(feature = "tui")]
fn edit_image(path: Option<&str>) {
    use bitlamp::run_editor;
    use std::path::PathBuf;

    let (mem, file) = match path {
        Some(p) => (load_into_memory(p), Some(PathBuf::from(p))),
        None => (Memory::new(), None),
    };

    if let Err(e) = run_editor(mem, file) {
        eprintln!("❌ Editor error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn edit_image(_path: Option<&str>) {
    eprintln!("❌ Built without the 'tui' feature; only `run` and `dump` are available.");
    std::process::exit(1);
}

/// Final machine state for `run --json`.
#[derive(Serialize)]
struct FinalState {
    halted: bool,
    cycles: u64,
    acc: u32,
    pc: u32,
    data: Vec<u32>,
}

fn run_image(path: &str, max_cycles: u64, trace: bool, json: bool) {
    let mut mem = load_into_memory(path);
    let mut cpu = Cpu::new();

    if trace {
        println!("━━━ Execution ━━━");
        loop {
            if cpu.cycles >= max_cycles {
                break;
            }
            let pc = cpu.regs.pc.to_unsigned();
            let more = cpu.step(&mut mem);
            if let Some(instr) = cpu.current_instruction() {
                println!(
                    "{:2}: {:9}  ACC={:3}",
                    pc,
                    instr.to_string(),
                    cpu.regs.acc.to_unsigned()
                );
            }
            if !more {
                break;
            }
        }
    } else {
        let _ = cpu.run_limited(&mut mem, max_cycles);
    }

    if json {
        let state = FinalState {
            halted: cpu.is_halted(),
            cycles: cpu.cycles,
            acc: cpu.regs.acc.to_unsigned(),
            pc: cpu.regs.pc.to_unsigned(),
            data: mem
                .words(AddrSpace::Data)
                .iter()
                .map(bitlamp::Word::to_unsigned)
                .collect(),
        };
        match serde_json::to_string_pretty(&state) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ Failed to serialize state: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!("━━━ Result ━━━");
    println!("Cycles: {}", cpu.cycles);
    println!("State: {:?}", cpu.state);
    println!(
        "ACC: {} ({})",
        cpu.regs.acc,
        cpu.regs.acc.to_unsigned()
    );
    println!();
    println!("Data space:");
    for (i, word) in mem.words(AddrSpace::Data).iter().enumerate() {
        println!("{:2}: {} {:3}", i, word, word.to_unsigned());
    }

    if !cpu.is_halted() {
        println!();
        println!(
            "⚠️  Reached max cycles limit ({}). Use --max-cycles to increase.",
            max_cycles
        );
    }
}

fn dump_image(path: &str) {
    let mem = load_into_memory(path);

    println!("Code space:");
    for (i, word) in mem.words(AddrSpace::Code).iter().enumerate() {
        println!("{:2}: {} {:3}  {}", i, word, word.to_unsigned(), decode(*word));
    }
    println!();
    println!("Data space:");
    for (i, word) in mem.words(AddrSpace::Data).iter().enumerate() {
        println!("{:2}: {} {:3}", i, word, word.to_unsigned());
    }
}
