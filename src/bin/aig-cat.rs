//! Echoes an AIGER file back out in canonical ASCII form.

use anyhow::Result;
use clap::Parser;
use libaig::{Aig, AigOptions, Node};

#[derive(Parser, Debug)]
#[command(name = "aig-cat", about = "Echo an AIGER file back out as canonical ASCII")]
struct Cli {
    /// Path to an AIGER file (ASCII `.aag` or binary `.aig`).
    path: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut aig = Aig::load_file(&cli.path, AigOptions::default())?;

    println!(
        "aag {} {} {} {} {}",
        aig.max_index(),
        aig.input_count(),
        aig.latch_count(),
        aig.output_count(),
        aig.and_count()
    );

    // Force the symbol table up front so every `get_*` call below can
    // attach a name without each one paying to force it individually.
    aig.load_symbols()?;

    let mut it = aig.iter();
    while let Some(node) = it.next(&mut aig)? {
        let symbol = node.name().map(|n| format!(" (symbol = {n})")).unwrap_or_default();
        match node {
            Node::Constant { .. } => {}
            Node::Input { variable_index, .. } => println!("{}{symbol}", variable_index * 2),
            Node::Latch {
                current,
                next,
                next_negated,
                ..
            } => println!("{} {}{symbol}", current * 2, next * 2 + u64::from(next_negated)),
            Node::Output {
                target_variable_index,
                negated,
                ..
            } => println!("{}{symbol}", target_variable_index * 2 + u64::from(negated)),
            Node::And {
                lhs,
                rhs0,
                rhs0_negated,
                rhs1,
                rhs1_negated,
            } => println!(
                "{} {} {}{symbol}",
                lhs * 2,
                rhs0 * 2 + u64::from(rhs0_negated),
                rhs1 * 2 + u64::from(rhs1_negated)
            ),
        }
    }

    Ok(())
}
