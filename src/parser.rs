//! Section-staged, resumable AIGER parser.
//!
//! One method per section (`parse_header`, `parse_inputs`, `parse_latches`,
//! `parse_outputs`, `parse_ands`, `parse_symtab`, `parse_all`), each
//! idempotent and cursor-advancing: calling it with an `upto` already
//! consumed returns immediately; calling it with a higher `upto` reads
//! forward, completing any earlier unread sections first.
//!
//! Binary AND-gate decoding (run-length delta bytes) is intentionally
//! unimplemented, see [`ParserState::parse_ands`].

use std::io::Read;

use crate::buffers::Buffers;
use crate::cursor::{Cursor, Section};
use crate::error::{Error, Result};
use crate::literal::Literal;
use crate::symtab::SymbolTable;

/// A byte-at-a-time cursor over an arbitrary `Read`, with one byte of
/// pushback (needed to implement the format's "peek, then decide" grammar)
/// and a running position used in error messages.
pub(crate) struct Source {
    reader: Box<dyn Read>,
    pending: Option<u8>,
    pos: u64,
}

impl Source {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Source {
            reader,
            pending: None,
            pos: 0,
        }
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn peek(&mut self) -> Result<Option<u8>> {
        if self.pending.is_none() {
            let mut buf = [0u8; 1];
            let n = self.reader.read(&mut buf)?;
            self.pending = if n == 0 { None } else { Some(buf[0]) };
        }
        Ok(self.pending)
    }

    pub fn next(&mut self) -> Result<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.pending = None;
            self.pos += 1;
        }
        Ok(b)
    }

    fn expect(&mut self, want: u8) -> Result<()> {
        match self.next()? {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(Error::illegal(
                self.pos,
                format!("expected '{}', found '{}'", want as char, c as char),
            )),
            None => Err(Error::illegal(
                self.pos,
                format!("expected '{}', found end of input", want as char),
            )),
        }
    }
}

/// Parsed five-field AIGER header.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    pub max_index: u64,
    pub input_count: u64,
    pub latch_count: u64,
    pub output_count: u64,
    pub and_count: u64,
    pub binary: bool,
}

/// Owns the byte source, the strict/lax policy, and the parse cursor.
pub(crate) struct ParserState {
    pub source: Source,
    pub strict: bool,
    pub header: Option<Header>,
    pub cursor: Cursor,
}

impl ParserState {
    pub fn new(source: Source, strict: bool) -> Self {
        ParserState {
            source,
            strict,
            header: None,
            cursor: Cursor::new(),
        }
    }

    pub(crate) fn header(&self) -> Header {
        self.header.expect("header parsed before use")
    }

    // -- low-level tokenizing -------------------------------------------

    /// Strict: exactly one space. Lax: any run of whitespace (zero or more).
    fn skip_separator(&mut self) -> Result<()> {
        if self.strict {
            self.source.expect(b' ')
        } else {
            self.skip_whitespace_lax()
        }
    }

    fn skip_whitespace_lax(&mut self) -> Result<()> {
        while let Some(c) = self.source.peek()? {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.source.next()?;
        }
        Ok(())
    }

    /// Strict: exactly one newline. Lax: any run of whitespace.
    fn skip_line_end(&mut self) -> Result<()> {
        if self.strict {
            self.source.expect(b'\n')
        } else {
            self.skip_whitespace_lax()
        }
    }

    fn parse_decimal(&mut self) -> Result<u64> {
        let pos = self.source.pos();
        let mut value: u64 = 0;
        let mut matched = false;

        loop {
            let Some(c) = self.source.peek()? else {
                break;
            };
            if !c.is_ascii_digit() {
                break;
            }
            self.source.next()?;
            let digit = u64::from(c - b'0');
            if (u64::MAX - digit) / 10 < value {
                return Err(Error::Overflow(pos));
            }
            value = value * 10 + digit;
            matched = true;
        }

        if !matched {
            return Err(Error::illegal(pos, "expected a decimal digit"));
        }
        Ok(value)
    }

    fn parse_literal(&mut self, max_index: u64) -> Result<Literal> {
        let raw = self.parse_decimal()?;
        if raw > 2 * max_index + 1 {
            return Err(Error::out_of_range(format!(
                "literal {raw} exceeds 2*M+1 ({})",
                2 * max_index + 1
            )));
        }
        Ok(Literal::from_raw(raw))
    }

    fn require_end_of_line(&mut self, line_no_context: &str) -> Result<()> {
        self.skip_line_end()
            .map_err(|_| Error::illegal(self.source.pos(), format!("missing newline after {line_no_context}")))
    }

    // -- header -----------------------------------------------------------

    pub fn parse_header(&mut self) -> Result<Header> {
        if !self.strict {
            self.skip_whitespace_lax()?;
        }

        self.source.expect(b'a')?;
        let binary = match self.source.next()? {
            Some(b'a') => false,
            Some(b'i') => true,
            Some(c) => {
                return Err(Error::illegal(
                    self.source.pos(),
                    format!("expected 'a' or 'i' in magic, found '{}'", c as char),
                ))
            }
            None => return Err(Error::illegal(self.source.pos(), "unexpected end of input in magic")),
        };
        self.source.expect(b'g')?;

        self.skip_separator()?;
        let max_index = self.parse_decimal()?;
        self.skip_separator()?;
        let input_count = self.parse_decimal()?;
        self.skip_separator()?;
        let latch_count = self.parse_decimal()?;
        self.skip_separator()?;
        let output_count = self.parse_decimal()?;
        self.skip_separator()?;
        let and_count = self.parse_decimal()?;
        self.require_end_of_line("the header line")?;

        if max_index < input_count + latch_count + and_count {
            return Err(Error::out_of_range(format!(
                "M={max_index} is smaller than I+L+A={}",
                input_count + latch_count + and_count
            )));
        }
        if binary && self.strict && max_index != input_count + latch_count + and_count {
            return Err(Error::out_of_range(format!(
                "strict binary dialect requires M = I+L+A, got M={max_index}, I+L+A={}",
                input_count + latch_count + and_count
            )));
        }

        let header = Header {
            max_index,
            input_count,
            latch_count,
            output_count,
            and_count,
            binary,
        };
        self.header = Some(header);
        Ok(header)
    }

    // -- sections -----------------------------------------------------------

    /// Recursively finishes every section strictly before `target`.
    fn ensure_sections_before(&mut self, target: Section, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        while self.cursor.section < target {
            self.finish_current_section(buffers, symtab)?;
        }
        Ok(())
    }

    fn finish_current_section(&mut self, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        match self.cursor.section {
            Section::InInputs => self.parse_inputs(u64::MAX, buffers, symtab),
            Section::InLatches => self.parse_latches(u64::MAX, buffers, symtab),
            Section::InOutputs => self.parse_outputs(u64::MAX, buffers, symtab),
            Section::InAnds => self.parse_ands(u64::MAX, buffers, symtab),
            Section::InSymtab => self.parse_symtab(u64::MAX, buffers, symtab),
            Section::Done => Ok(()),
        }
    }

    pub fn parse_inputs(&mut self, upto: u64, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::InInputs, buffers, symtab)?;
        if self.cursor.section != Section::InInputs {
            return Ok(());
        }

        let header = self.header();
        let target = upto.saturating_add(1).min(header.input_count);

        if header.binary {
            // Input literals are entirely inferable; nothing to read.
            self.cursor.advance_to(header.input_count);
        } else {
            while self.cursor.index < target {
                let i = self.cursor.index;
                let lit = self.parse_literal(header.max_index)?;
                self.require_end_of_line("an input line")?;

                if self.strict {
                    let canonical = Literal::new(i + 1, false);
                    if lit != canonical {
                        return Err(Error::illegal(
                            self.source.pos(),
                            format!("input {i} literal {lit} is not canonical ({canonical})"),
                        ));
                    }
                }
                self.cursor.advance_to(i + 1);
            }
        }

        if self.cursor.index >= header.input_count {
            self.cursor.finish_section();
        }
        Ok(())
    }

    pub fn parse_latches(&mut self, upto: u64, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::InLatches, buffers, symtab)?;
        if self.cursor.section != Section::InLatches {
            return Ok(());
        }

        let header = self.header();
        let target = upto.saturating_add(1).min(header.latch_count);
        let lit_limit = 2 * header.max_index + 1;

        while self.cursor.index < target {
            let i = self.cursor.index;

            if !header.binary {
                let current = self.parse_literal(header.max_index)?;
                self.skip_separator()?;
                if self.strict {
                    let canonical = Literal::new(header.input_count + i + 1, false);
                    if current != canonical {
                        return Err(Error::illegal(
                            self.source.pos(),
                            format!("latch {i} current literal {current} is not canonical ({canonical})"),
                        ));
                    }
                }
            }

            let next = self.parse_literal(header.max_index)?;
            self.require_end_of_line("a latch line")?;
            buffers.latch_next.append(next.raw(), lit_limit)?;
            self.cursor.advance_to(i + 1);
        }

        if self.cursor.index >= header.latch_count {
            self.cursor.finish_section();
        }
        Ok(())
    }

    pub fn parse_outputs(&mut self, upto: u64, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::InOutputs, buffers, symtab)?;
        if self.cursor.section != Section::InOutputs {
            return Ok(());
        }

        let header = self.header();
        let target = upto.saturating_add(1).min(header.output_count);
        let lit_limit = 2 * header.max_index + 1;

        while self.cursor.index < target {
            let i = self.cursor.index;
            let lit = self.parse_literal(header.max_index)?;
            self.require_end_of_line("an output line")?;
            buffers.outputs.append(lit.raw(), lit_limit)?;
            self.cursor.advance_to(i + 1);
        }

        if self.cursor.index >= header.output_count {
            self.cursor.finish_section();
        }
        Ok(())
    }

    /// Parses AND gates up to (and including) index `upto`.
    ///
    /// Binary-dialect AND gates are delta run-length encoded: each gate's
    /// two operands are stored as two variable-length "reverse" deltas
    /// relative to the gate's own (always-inferred) LHS literal, 7 bits per
    /// byte with the high bit as a continuation flag, see
    /// `examples/BramOtte-MCHPRS/crates/aigrs/src/networks/aiger.rs`'s
    /// `Aiger::parse`/`Aiger::serialize` for the exact algorithm. This
    /// reader does not implement that decoder; binary files whose AND
    /// section would need to be read return `Error::Unsupported`.
    pub fn parse_ands(&mut self, upto: u64, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::InAnds, buffers, symtab)?;
        if self.cursor.section != Section::InAnds {
            return Ok(());
        }

        let header = self.header();
        let target = upto.saturating_add(1).min(header.and_count);
        let lit_limit = 2 * header.max_index + 1;

        if header.binary {
            if self.cursor.index < target {
                return Err(Error::Unsupported(
                    "binary AND-gate (delta run-length) decoding is not implemented".into(),
                ));
            }
        } else {
            while self.cursor.index < target {
                let i = self.cursor.index;
                let lhs = self.parse_literal(header.max_index)?;
                self.skip_separator()?;
                let rhs0 = self.parse_literal(header.max_index)?;
                self.skip_separator()?;
                let rhs1 = self.parse_literal(header.max_index)?;
                self.require_end_of_line("an AND gate line")?;

                let canonical_lhs = Literal::new(header.input_count + header.latch_count + i + 1, false);
                let inferable = lhs == canonical_lhs;

                if !inferable && self.strict {
                    return Err(Error::illegal(
                        self.source.pos(),
                        format!("AND gate {i} lhs literal {lhs} is not canonical ({canonical_lhs})"),
                    ));
                }

                if !inferable && buffers.and_lhs.is_empty() && !buffers.lhs_materialized {
                    // Back-fill every prior (inferable) gate's LHS before
                    // switching to explicit storage.
                    for j in 0..i {
                        let inferred = Literal::new(header.input_count + header.latch_count + j + 1, false);
                        buffers.and_lhs.append(inferred.raw(), lit_limit)?;
                    }
                    buffers.lhs_materialized = true;
                }
                if buffers.lhs_materialized {
                    buffers.and_lhs.append(lhs.raw(), lit_limit)?;
                } else if !inferable {
                    unreachable!("lhs_materialized must be set before storing a deviating LHS");
                }

                buffers.and_rhs.append(rhs0.raw(), lit_limit)?;
                buffers.and_rhs.append(rhs1.raw(), lit_limit)?;
                self.cursor.advance_to(i + 1);
            }
        }

        if self.cursor.index >= header.and_count {
            self.cursor.finish_section();
        }
        Ok(())
    }

    pub fn parse_symtab(&mut self, upto: u64, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::InSymtab, buffers, symtab)?;
        if self.cursor.section != Section::InSymtab {
            return Ok(());
        }

        let header = self.header();
        let total = header.input_count + header.latch_count + header.output_count;

        loop {
            if self.cursor.index > upto || self.cursor.index >= total {
                break;
            }

            let Some(c) = self.source.peek()? else {
                // clean end of stream terminates symbol parsing
                self.cursor.section = Section::Done;
                return Ok(());
            };

            if c == b'c' {
                self.cursor.section = Section::Done;
                return Ok(());
            }

            let kind = match self.source.next()? {
                Some(k @ (b'i' | b'l' | b'o')) => k,
                Some(other) => {
                    return Err(Error::illegal(
                        self.source.pos(),
                        format!("expected 'i', 'l', 'o' or 'c', found '{}'", other as char),
                    ))
                }
                None => unreachable!("peek just confirmed a byte is available"),
            };

            let pos_in_kind = self.parse_decimal()?;
            self.skip_separator()?;

            let mut raw_name = Vec::new();
            loop {
                match self.source.next()? {
                    None | Some(b'\n') => break,
                    Some(b) => raw_name.push(b),
                }
            }
            let name = String::from_utf8_lossy(&raw_name).into_owned();

            let (count, base) = match kind {
                b'i' => (header.input_count, 0),
                b'l' => (header.latch_count, header.input_count),
                b'o' => (header.output_count, header.input_count + header.latch_count),
                _ => unreachable!(),
            };
            if pos_in_kind >= count {
                return Err(Error::out_of_range(format!(
                    "symbol position {pos_in_kind} is out of range for kind '{}'",
                    kind as char
                )));
            }

            let slot = base + pos_in_kind;
            symtab.set(slot as usize, name, self.strict)?;
            self.cursor.advance_to(self.cursor.index + 1);
        }

        if self.cursor.index >= total {
            self.cursor.section = Section::Done;
        }
        Ok(())
    }

    pub fn parse_all(&mut self, buffers: &mut Buffers, symtab: &mut SymbolTable) -> Result<()> {
        self.ensure_sections_before(Section::Done, buffers, symtab)?;
        if self.cursor.section != Section::Done {
            self.finish_current_section(buffers, symtab)?;
        }
        Ok(())
    }
}
