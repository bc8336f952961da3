//! Prints an AIG's header counts.

use anyhow::Result;
use clap::Parser;
use libaig::{Aig, AigOptions};

#[derive(Parser, Debug)]
#[command(name = "aig-ls", about = "Print an AIGER file's header counts")]
struct Cli {
    /// Path to an AIGER file (ASCII `.aag` or binary `.aig`).
    path: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let aig = Aig::load_file(&cli.path, AigOptions::default())?;

    println!("M = {}", aig.max_index());
    println!("I = {}", aig.input_count());
    println!("L = {}", aig.latch_count());
    println!("O = {}", aig.output_count());
    println!("A = {}", aig.and_count());

    Ok(())
}
