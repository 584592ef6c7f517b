use std::{env, error::Error, fs, path::PathBuf};

use nes6502::cpu;
use nes6502::emulator::Emulator;

const DEFAULT_BASE: u16 = 0x8000;
const DEFAULT_CYCLE_BUDGET: u64 = 1_000_000;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut program_path: Option<PathBuf> = None;
    let mut base = DEFAULT_BASE;
    let mut cycle_budget = DEFAULT_CYCLE_BUDGET;
    let mut trace = false;
    let mut load_state: Option<PathBuf> = None;
    let mut save_state: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base" => {
                if let Some(value) = args.next() {
                    match parse_u16(&value) {
                        Some(addr) => base = addr,
                        None => {
                            eprintln!("invalid --base address: {value}");
                            return Ok(());
                        }
                    }
                } else {
                    eprintln!("--base requires an address");
                    return Ok(());
                }
            }
            "--cycles" => {
                if let Some(value) = args.next() {
                    match value.parse::<u64>() {
                        Ok(budget) => cycle_budget = budget,
                        Err(_) => {
                            eprintln!("invalid --cycles value: {value}");
                            return Ok(());
                        }
                    }
                } else {
                    eprintln!("--cycles requires a value");
                    return Ok(());
                }
            }
            "--trace" => trace = true,
            "--load-state" => {
                if let Some(path) = args.next() {
                    load_state = Some(PathBuf::from(path));
                } else {
                    eprintln!("--load-state requires a file path");
                    return Ok(());
                }
            }
            "--save-state" => {
                if let Some(path) = args.next() {
                    save_state = Some(PathBuf::from(path));
                } else {
                    eprintln!("--save-state requires a file path");
                    return Ok(());
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if program_path.is_none() => program_path = Some(PathBuf::from(arg)),
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                return Ok(());
            }
        }
    }

    let program_path = match program_path {
        Some(path) => path,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let program = fs::read(&program_path)?;

    let mut emulator = Emulator::new();
    emulator.load_program(base, &program);
    emulator.reset();

    if let Some(path) = load_state {
        emulator.load_state_from_file(&path)?;
    }

    while emulator.cycles() < cycle_budget {
        if trace {
            let pc = emulator.cpu.pc;
            let opcode = emulator.bus.read(pc);
            println!(
                "{:04X}  {:02X} {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
                pc,
                opcode,
                cpu::describe(opcode).mnemonic,
                emulator.cpu.a,
                emulator.cpu.x,
                emulator.cpu.y,
                emulator.cpu.status(),
                emulator.cpu.sp,
                emulator.cycles(),
            );
        }
        emulator.step_instruction();
    }

    println!(
        "Finished after {} cycles. A={:#04X} X={:#04X} Y={:#04X} PC={:#06X}",
        emulator.cycles(),
        emulator.cpu.a,
        emulator.cpu.x,
        emulator.cpu.y,
        emulator.cpu.pc,
    );

    if let Some(path) = save_state {
        if let Err(err) = emulator.save_state_to_file(&path) {
            eprintln!("warning: failed to write state to {}: {err}", path.display());
        }
    }

    Ok(())
}

fn parse_u16(value: &str) -> Option<u16> {
    let trimmed = value.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(trimmed, 16).ok()
}

fn print_usage() {
    eprintln!(
        "Usage: nes6502 <program.bin> [--base <hexaddr>] [--cycles <n>] [--trace] \
         [--load-state <file>] [--save-state <file>]"
    );
    eprintln!("  Loads a raw 6502 program, wires the reset vector to its base");
    eprintln!("  address and clocks the CPU until the cycle budget is spent.");
    eprintln!("Options:");
    eprintln!("  --base <hexaddr>      Load address and reset target (default 8000)");
    eprintln!("  --cycles <n>          Cycle budget before stopping (default 1000000)");
    eprintln!("  --trace               Print one line per executed instruction");
    eprintln!("  --load-state <file>   Restore a machine state after reset");
    eprintln!("  --save-state <file>   Snapshot the machine state after the run");
    eprintln!("  --help                Show this message");
}
