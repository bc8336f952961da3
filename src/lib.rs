//! A reader for the AIGER And-Inverter Graph file format (both the ASCII
//! `aag` and binary `aig` dialects of AIGER 1.9).
//!
//! Parsing is section-staged and resumable: an [`Aig`] only reads as far
//! into its source as some accessor demands, tracking where it left off in
//! an internal cursor. [`AigOptions::eager`] opts into reading everything
//! up front instead.
//!
//! Binary-dialect AND-gate decoding (the delta run-length encoding) is not
//! implemented; random access into a binary file's AND-gate section (or any
//! operation that has to walk through it, such as `lookup_by_name`) returns
//! [`Error::Unsupported`]. Everything else a binary file holds (header,
//! inputs, latches, outputs, symbol table, provided the symbol table is
//! reached without needing to pass through the AND section) works
//! normally.

pub mod aig;
mod bitbuffer;
mod buffers;
mod cursor;
pub mod error;
mod iter;
mod level;
pub mod literal;
pub mod node;
pub mod options;
mod parser;
mod sat;
mod symtab;

pub use aig::Aig;
pub use error::{Error, Result};
pub use iter::NodeIter;
pub use literal::Literal;
pub use node::Node;
pub use options::AigOptions;
