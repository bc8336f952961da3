//! Translates an AIGER file to an SMT-LIB2 (QF_UF) script.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use libaig::{Aig, AigOptions};

#[derive(Parser, Debug)]
#[command(name = "aig2sat", about = "Translate an AIGER file to SMT-LIB2")]
struct Cli {
    /// Path to an AIGER file (ASCII `.aag` or binary `.aig`).
    path: String,
    /// Where to write the SMT-LIB2 script. Defaults to standard output.
    output: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut aig = Aig::load_file(&cli.path, AigOptions::default())?;

    let mut out: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    aig.to_sat_stream(&mut out)?;
    out.flush()?;

    Ok(())
}
