//! RV32I pipeline simulator CLI.
//!
//! This binary runs a program on one of the five pipeline variants. It performs:
//! 1. **Run:** Load an image (raw, hex, or ELF), tick until halt or the cycle limit,
//!    then print registers, board outputs and statistics.
//! 2. **Variants:** List the selectable microarchitectures and their ids.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rvpipe_core::config::{Config, Variant};
use rvpipe_core::sim::loader::ImageFormat;
use rvpipe_core::sim::{RunOutcome, Simulator};

/// Exit status when the cycle limit is reached before halt.
const EXIT_CYCLE_LIMIT: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Cycle-accurate RV32I five-stage pipeline simulator",
    long_about = "Run an RV32I program on a five-stage pipeline with a selectable hazard and \
                  branch-prediction microarchitecture.\n\nExamples:\n  \
                  rvpipe run prog.hex --variant gshare --stats\n  \
                  rvpipe run prog.elf --config board.json --trace\n  \
                  rvpipe variants"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it stores to the halt sentinel.
    Run {
        /// Program image.
        image: PathBuf,

        /// Microarchitecture variant: id 0-4 or a name such as `forward-gshare`.
        #[arg(short, long)]
        variant: Option<String>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle limit (overrides the configuration).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Image format; detected from the contents and extension when omitted.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Value presented on the switch inputs.
        #[arg(long, value_parser = parse_u32)]
        switches: Option<u32>,

        /// Emit per-stage trace events and a pipeline diagram every cycle.
        #[arg(long)]
        trace: bool,

        /// Print simulation statistics.
        #[arg(long)]
        stats: bool,

        /// Print the final state as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the pipeline variants.
    Variants,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Bin,
    Hex,
    Elf,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bin => Self::Bin,
            FormatArg::Hex => Self::Hex,
            FormatArg::Elf => Self::Elf,
        }
    }
}

/// Final machine state, for `--json`.
#[derive(Serialize, Debug)]
struct Summary {
    variant: &'static str,
    variant_id: u8,
    halted: bool,
    cycles: u64,
    retired: u64,
    cpi: f64,
    pc: u32,
    leds: u32,
    seven_seg: u32,
    regs: Vec<u32>,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("'{s}': {e}"))
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Variants => {
            for v in Variant::ALL {
                println!("  {}  {}", v.id(), v.name());
            }
        }
        Commands::Run {
            image,
            variant,
            config,
            max_cycles,
            format,
            switches,
            trace,
            stats,
            json,
        } => {
            init_tracing(trace);
            let args = RunArgs {
                image,
                variant,
                config,
                max_cycles,
                format: format.map(ImageFormat::from),
                switches,
                trace,
                stats,
                json,
            };
            match cmd_run(&args) {
                Ok(code) => process::exit(code),
                Err(e) => {
                    eprintln!("\n[!] FATAL: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

/// Installs the `fmt` subscriber; `RUST_LOG` wins over the default level.
fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct RunArgs {
    image: PathBuf,
    variant: Option<String>,
    config: Option<PathBuf>,
    max_cycles: Option<u64>,
    format: Option<ImageFormat>,
    switches: Option<u32>,
    trace: bool,
    stats: bool,
    json: bool,
}

/// Builds the simulator, runs it, and reports. Returns the process exit code.
fn cmd_run(args: &RunArgs) -> rvpipe_core::common::Result<i32> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(v) = &args.variant {
        config = config.with_variant(v.parse()?);
    }
    if let Some(limit) = args.max_cycles {
        config.general.max_cycles = limit;
    }
    if args.trace {
        config.general.trace_instructions = true;
    }

    tracing::debug!(
        variant = %config.pipeline.variant,
        alignment = ?config.pipeline.alignment,
        max_cycles = config.general.max_cycles,
        "configuration resolved"
    );

    let mut sim = Simulator::new(&config)?;
    let _ = sim.load_image(&args.image, args.format)?;
    if let Some(value) = args.switches {
        sim.set_switches(value);
    }

    if !args.json {
        println!("[*] Variant: {}", sim.variant());
        println!(
            "    Image: {}  Start PC: {:#010x}  RAM: {} KiB",
            args.image.display(),
            sim.pc(),
            config.memory.ram_size / 1024
        );
    }

    let limit = config.general.max_cycles;
    if args.trace {
        while !sim.is_halted() && sim.stats().cycles < limit {
            sim.cpu.print_pipeline_diagram();
            let report = sim.tick();
            if let Some(w) = report.reg_write {
                eprintln!("      x{:<2} <- {:#010x}", w.rd, w.value);
            }
            if let Some(io) = report.io_write {
                eprintln!("      [{:#010x}] <- {:#010x}", io.addr, io.data);
            }
        }
    }
    let outcome = sim.run_to_completion();

    let code = match outcome {
        RunOutcome::Halted { .. } => 0,
        RunOutcome::CycleLimit { .. } => EXIT_CYCLE_LIMIT,
    };

    if args.json {
        let summary = Summary {
            variant: sim.variant().name(),
            variant_id: sim.variant().id(),
            halted: sim.is_halted(),
            cycles: sim.stats().cycles,
            retired: sim.stats().instructions_retired,
            cpi: sim.stats().cpi(),
            pc: sim.pc(),
            leds: sim.system().leds(),
            seven_seg: sim.system().seven_seg(),
            regs: sim.cpu.regs.snapshot().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(code);
    }

    match outcome {
        RunOutcome::Halted { cycles } => println!("\n[*] Halted after {cycles} cycles"),
        RunOutcome::CycleLimit { cycles } => {
            println!("\n[!] Cycle limit reached after {cycles} cycles");
        }
    }
    sim.cpu.dump_state();
    println!(
        "LEDS = {:#010x}   SEVEN_SEG = {:#010x}",
        sim.system().leds(),
        sim.system().seven_seg()
    );
    if args.stats {
        sim.stats().print();
    }
    Ok(code)
}
