mod cli_parser;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli_parser::CliParser;
use ls8_runtime::{ExecutionResult, HaltReason, Machine, MachineConfig};
use ls8_spec::Program;
use tracing_subscriber::EnvFilter;


fn main() -> ExitCode {

    let args = CliParser::parse();
    init_logging(&args);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}


/// `RUST_LOG` wins; otherwise warn, raised by `-v` and `--trace`.
fn init_logging(args: &CliParser) {

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(args.verbose, args.trace)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}


fn default_filter(verbose: bool, trace: bool) -> &'static str {

    match (verbose, trace) {
        (true, true) => "debug,ls8::trace=trace",
        (true, false) => "debug",
        (false, true) => "warn,ls8::trace=trace",
        (false, false) => "warn",
    }
}


fn load_program(args: &CliParser) -> Result<Program> {

    let path = args.input_file.as_path();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read input file \"{}\"", path.display()))?;

    if args.asm {
        ls8_assembler::assemble(&text)
            .with_context(|| format!("Could not assemble \"{}\"", path.display()))
    } else {
        Ok(Program::from_image(&text))
    }
}


fn run(args: &CliParser) -> Result<ExitCode> {

    let program = load_program(args)?;

    if let Some(out) = &args.emit_image {
        let image = ls8_assembler::to_image_text(program.code());
        fs::write(out, image)
            .with_context(|| format!("Could not write image \"{}\"", out.display()))?;
        return Ok(ExitCode::SUCCESS);
    }

    if args.disassemble {
        print!("{}", ls8_disassembler::disassemble_program(&program));
        return Ok(ExitCode::SUCCESS);
    }

    // trace lines already go out through the subscriber
    let mut config = MachineConfig {
        trace: args.trace,
        trace_buffer: 0,
        ..MachineConfig::default()
    };
    if let Some(max_cycles) = args.max_cycles {
        config.max_cycles = max_cycles;
    }

    let mut machine = Machine::with_program(&program, config)
        .context("Could not load program")?;

    let result = machine
        .run_with(|value| println!("{value}"))
        .context("Execution failed")?;

    Ok(ExitCode::from(exit_status(&result)))
}


/// 0 on HLT, 2 when the cycle limit stopped the program
fn exit_status(result: &ExecutionResult) -> u8 {

    match result.halt_reason {
        HaltReason::Halt => 0,
        HaltReason::CycleLimit => {
            tracing::warn!(cycles = result.cycles, "stopped at the cycle limit");
            2
        }
    }
}
