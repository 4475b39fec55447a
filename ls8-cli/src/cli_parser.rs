use std::path::PathBuf;

use clap::Parser;


#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct CliParser {

    /// The program image to execute (one binary byte per line).
    #[clap(required = true)]
    pub input_file: PathBuf,

    /// Treat the input as assembly source instead of a program image.
    #[clap(long)]
    pub asm: bool,

    /// Print a listing of the loaded program and exit.
    #[clap(long)]
    pub disassemble: bool,

    /// Write the assembled program image to this file and exit.
    #[clap(long, value_name = "OUT", requires = "asm")]
    pub emit_image: Option<PathBuf>,

    /// Print a TRACE line before every cycle.
    #[clap(long)]
    pub trace: bool,

    /// Stop after this many cycles.
    #[clap(long, value_name = "N")]
    pub max_cycles: Option<u64>,

    /// Execute in verbose mode.
    #[clap(short='v', long)]
    pub verbose: bool,

}
