//! The central AIG store.
//!
//! Owns the resumable parser, the four packed buffers, the symbol table,
//! and (once computed) the level cache. Every read method is "pull":
//! nothing beyond the header is read until some accessor demands it, and
//! an `eager` store simply demands everything up front in its constructor.

use std::fs::File;
use std::io::{Cursor as IoCursor, Read};
use std::path::Path;

use crate::buffers::Buffers;
use crate::error::{Error, Result};
use crate::literal::Literal;
use crate::node::Node;
use crate::options::AigOptions;
use crate::parser::{ParserState, Source};
use crate::symtab::SymbolTable;

/// An AIGER And-Inverter Graph, parsed lazily from some byte source.
pub struct Aig {
    options: AigOptions,
    parser: ParserState,
    buffers: Buffers,
    symtab: SymbolTable,
    level_cache: Option<Vec<Option<u64>>>,
}

impl Aig {
    /// An empty graph (`M = I = L = O = A = 0`), with no backing source.
    pub fn new(options: AigOptions) -> Self {
        let empty: Box<dyn Read> = Box::new(std::io::empty());
        let mut parser = ParserState::new(Source::new(empty), options.strict);
        parser.header = Some(crate::parser::Header {
            max_index: 0,
            input_count: 0,
            latch_count: 0,
            output_count: 0,
            and_count: 0,
            binary: false,
        });
        parser.cursor.section = crate::cursor::Section::Done;

        Aig {
            options,
            parser,
            buffers: Buffers::new(),
            symtab: SymbolTable::new(0),
            level_cache: None,
        }
    }

    /// Opens and parses (at least the header of) the file at `path`.
    pub fn load_file<P: AsRef<Path>>(path: P, options: AigOptions) -> Result<Self> {
        Self::load_stream(File::open(path.as_ref())?, options)
    }

    /// Parses (at least the header of) an arbitrary byte stream.
    pub fn load_stream<R: Read + 'static>(reader: R, options: AigOptions) -> Result<Self> {
        Self::from_boxed(Box::new(reader), options)
    }

    /// Parses (at least the header of) an in-memory AIGER text.
    pub fn parse_string(text: &str, options: AigOptions) -> Result<Self> {
        Self::load_stream(IoCursor::new(text.as_bytes().to_owned()), options)
    }

    fn from_boxed(reader: Box<dyn Read>, options: AigOptions) -> Result<Self> {
        let mut parser = ParserState::new(Source::new(reader), options.strict);
        let header = parser.parse_header()?;
        let symtab_len = (header.input_count + header.latch_count + header.output_count) as usize;

        let mut aig = Aig {
            options,
            parser,
            buffers: Buffers::new(),
            symtab: SymbolTable::new(symtab_len),
            level_cache: None,
        };
        if options.eager {
            aig.parser.parse_all(&mut aig.buffers, &mut aig.symtab)?;
        }
        Ok(aig)
    }

    // -- header counts --------------------------------------------------

    pub fn max_index(&self) -> u64 {
        self.parser.header().max_index
    }

    pub fn input_count(&self) -> u64 {
        self.parser.header().input_count
    }

    pub fn latch_count(&self) -> u64 {
        self.parser.header().latch_count
    }

    pub fn output_count(&self) -> u64 {
        self.parser.header().output_count
    }

    pub fn and_count(&self) -> u64 {
        self.parser.header().and_count
    }

    pub fn is_binary(&self) -> bool {
        self.parser.header().binary
    }

    pub fn options(&self) -> AigOptions {
        self.options
    }

    fn lit_limit(&self) -> u64 {
        2 * self.max_index() + 1
    }

    // -- random access ----------------------------------------------------
    //
    // The plain accessors (`get_input`, `get_latch`, `get_output`) force
    // their own section to be parsed, then attach a name only if the
    // symbol table has *already* been populated that far by some other
    // means (an eager load, an earlier `parse_symtab`/`parse_all`, or a
    // prior `lookup_by_name`). They never themselves trigger a fresh
    // symbol-table parse: doing so would force every AND gate to be read
    // first (the symbol table is the last section in the file), which
    // would make a plain `get_input` on a binary file fail with
    // `Unsupported` even when the input section itself parsed cleanly.
    // Only `lookup_by_name` (and the explicit `parse_symtab`/`parse_all`)
    // pay that cost. The `_no_symbol` siblings skip even the cheap
    // already-parsed lookup.

    pub fn get_input_no_symbol(&mut self, i: u64) -> Result<Node<'_>> {
        if i >= self.input_count() {
            return Err(Error::out_of_range(format!(
                "input index {i} is out of range (I={})",
                self.input_count()
            )));
        }
        self.parser.parse_inputs(i, &mut self.buffers, &mut self.symtab)?;
        Ok(Node::Input {
            variable_index: i + 1,
            name: None,
        })
    }

    pub fn get_input(&mut self, i: u64) -> Result<Node<'_>> {
        let variable_index = match self.get_input_no_symbol(i)? {
            Node::Input { variable_index, .. } => variable_index,
            _ => unreachable!(),
        };
        let name = self.symtab.get(i as usize);
        Ok(Node::Input { variable_index, name })
    }

    pub fn get_latch_no_symbol(&mut self, i: u64) -> Result<Node<'_>> {
        if i >= self.latch_count() {
            return Err(Error::out_of_range(format!(
                "latch index {i} is out of range (L={})",
                self.latch_count()
            )));
        }
        self.parser.parse_latches(i, &mut self.buffers, &mut self.symtab)?;
        let limit = self.lit_limit();
        let next = Literal::from_raw(self.buffers.latch_next.get(i, limit)?);
        Ok(Node::Latch {
            current: self.input_count() + i + 1,
            next: next.var(),
            next_negated: next.negated(),
            name: None,
        })
    }

    pub fn get_latch(&mut self, i: u64) -> Result<Node<'_>> {
        let (current, next, next_negated) = match self.get_latch_no_symbol(i)? {
            Node::Latch {
                current,
                next,
                next_negated,
                ..
            } => (current, next, next_negated),
            _ => unreachable!(),
        };
        let slot = self.input_count() + i;
        let name = self.symtab.get(slot as usize);
        Ok(Node::Latch {
            current,
            next,
            next_negated,
            name,
        })
    }

    pub fn get_output_no_symbol(&mut self, i: u64) -> Result<Node<'_>> {
        if i >= self.output_count() {
            return Err(Error::out_of_range(format!(
                "output index {i} is out of range (O={})",
                self.output_count()
            )));
        }
        self.parser.parse_outputs(i, &mut self.buffers, &mut self.symtab)?;
        let limit = self.lit_limit();
        let lit = Literal::from_raw(self.buffers.outputs.get(i, limit)?);
        Ok(Node::Output {
            target_variable_index: lit.var(),
            negated: lit.negated(),
            name: None,
        })
    }

    pub fn get_output(&mut self, i: u64) -> Result<Node<'_>> {
        let (target_variable_index, negated) = match self.get_output_no_symbol(i)? {
            Node::Output {
                target_variable_index,
                negated,
                ..
            } => (target_variable_index, negated),
            _ => unreachable!(),
        };
        let slot = self.input_count() + self.latch_count() + i;
        let name = self.symtab.get(slot as usize);
        Ok(Node::Output {
            target_variable_index,
            negated,
            name,
        })
    }

    /// AND gates never carry a name, so this is identical to
    /// [`Aig::get_and`]; kept for symmetry with the other kinds.
    pub fn get_and_no_symbol(&mut self, i: u64) -> Result<Node<'_>> {
        if i >= self.and_count() {
            return Err(Error::out_of_range(format!(
                "AND index {i} is out of range (A={})",
                self.and_count()
            )));
        }
        self.parser.parse_ands(i, &mut self.buffers, &mut self.symtab)?;
        let limit = self.lit_limit();

        let lhs = if self.buffers.lhs_materialized {
            Literal::from_raw(self.buffers.and_lhs.get(i, limit)?).var()
        } else {
            self.input_count() + self.latch_count() + i + 1
        };
        let rhs0 = Literal::from_raw(self.buffers.and_rhs.get(2 * i, limit)?);
        let rhs1 = Literal::from_raw(self.buffers.and_rhs.get(2 * i + 1, limit)?);

        Ok(Node::And {
            lhs,
            rhs0: rhs0.var(),
            rhs0_negated: rhs0.negated(),
            rhs1: rhs1.var(),
            rhs1_negated: rhs1.negated(),
        })
    }

    pub fn get_and(&mut self, i: u64) -> Result<Node<'_>> {
        self.get_and_no_symbol(i)
    }

    /// Dispatches on a variable index: `0` is the constant, then the
    /// contiguous input, latch and AND-gate ranges.
    pub fn get_node(&mut self, v: u64) -> Result<Node<'_>> {
        let i = self.input_count();
        let l = self.latch_count();
        let a = self.and_count();

        if v == 0 {
            Ok(Node::Constant { is_true: false })
        } else if v <= i {
            self.get_input(v - 1)
        } else if v <= i + l {
            self.get_latch(v - i - 1)
        } else if v <= i + l + a {
            self.get_and(v - i - l - 1)
        } else {
            Err(Error::out_of_range(format!(
                "variable {v} is out of range (M={})",
                self.max_index()
            )))
        }
    }

    /// Forces the symbol table (and therefore every earlier section,
    /// including AND gates) to be fully parsed, so that subsequent
    /// `get_input`/`get_latch`/`get_output` calls can attach names without
    /// forcing anything themselves.
    ///
    /// Callers that want every available name attached while walking
    /// `iter()` (`aig-cat`, for instance) should call this first: the
    /// plain accessors never force a fresh symbol-table read on their own
    /// (see the module-level note above `get_input_no_symbol`).
    pub fn load_symbols(&mut self) -> Result<()> {
        self.parser.parse_symtab(u64::MAX, &mut self.buffers, &mut self.symtab)
    }

    /// Forces every section of the source to be parsed, equivalent to what
    /// [`crate::options::AigOptions::eager`] does at construction time.
    pub fn parse_all(&mut self) -> Result<()> {
        self.parser.parse_all(&mut self.buffers, &mut self.symtab)
    }

    /// Forces a full symbol-table parse (and therefore every earlier
    /// section, including AND gates), then finds the node named `name`.
    pub fn lookup_by_name(&mut self, name: &str) -> Result<Node<'_>> {
        self.load_symbols()?;
        let slot = self
            .symtab
            .position_of(name)
            .ok_or_else(|| Error::NotFound(format!("no symbol named '{name}'")))?;

        let i = self.input_count();
        let l = self.latch_count();
        let slot = slot as u64;
        if slot < i {
            self.get_input(slot)
        } else if slot < i + l {
            self.get_latch(slot - i)
        } else {
            self.get_output(slot - i - l)
        }
    }

    pub(crate) fn level_cache_mut(&mut self) -> &mut Option<Vec<Option<u64>>> {
        &mut self.level_cache
    }
}
