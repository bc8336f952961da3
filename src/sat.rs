//! SMT-LIB2 (QF_UF over `Bool`) rendering of an AIG.
//!
//! Grammar matches the original C `sat.c` exactly: each node gets a
//! `(declare-fun sV () Bool)` (with its name, if any, trailing as a `;`
//! comment), then every latch and AND gate gets a defining
//! `(assert (= ...))`. Constants, inputs and outputs have no constraint:
//! a constant is a literal term, an input is free, and an output is not a
//! variable in its own right.

use std::io::Write;

use crate::aig::Aig;
use crate::error::Result;
use crate::node::Node;

fn term(node: &Node<'_>) -> String {
    match *node {
        Node::Constant { is_true: true } => "True".to_string(),
        Node::Constant { is_true: false } => "False".to_string(),
        Node::Input { variable_index, .. } => format!("s{variable_index}"),
        Node::Output {
            target_variable_index,
            ..
        } => format!("s{target_variable_index}"),
        Node::Latch { current, .. } => format!("s{current}"),
        Node::And { lhs, .. } => format!("s{lhs}"),
    }
}

fn write_define<W: Write>(node: &Node<'_>, w: &mut W) -> std::io::Result<()> {
    if node.is_constant() || node.is_output() {
        // An output's term is its target's term (`s<target_variable_index>`),
        // declared once when the target itself is visited. The target's own
        // name (if any) governs the trailing comment, not the output's.
        return Ok(());
    }
    write!(w, "(declare-fun {} () Bool)", term(node))?;
    if let Some(name) = node.name() {
        write!(w, " ; {name}")?;
    }
    writeln!(w)
}

fn write_constraint<W: Write>(node: &Node<'_>, w: &mut W) -> std::io::Result<()> {
    match *node {
        Node::Constant { .. } | Node::Input { .. } | Node::Output { .. } => Ok(()),
        Node::Latch {
            next, next_negated, ..
        } => {
            write!(w, "(assert (= {} ", term(node))?;
            if next_negated {
                write!(w, "(not s{next})")?;
            } else {
                write!(w, "s{next}")?;
            }
            writeln!(w, "))")
        }
        Node::And {
            rhs0,
            rhs0_negated,
            rhs1,
            rhs1_negated,
            ..
        } => {
            write!(w, "(assert (= {} (and ", term(node))?;
            if rhs0_negated {
                write!(w, "(not s{rhs0})")?;
            } else {
                write!(w, "s{rhs0}")?;
            }
            write!(w, " ")?;
            if rhs1_negated {
                write!(w, "(not s{rhs1})")?;
            } else {
                write!(w, "s{rhs1}")?;
            }
            writeln!(w, ")))")
        }
    }
}

impl Aig {
    /// The SMT term for a single node: `sV` for everything but the
    /// constants, which are `True`/`False`. A free-standing associated
    /// function (no `self`) rather than a method, since a `Node<'_>`
    /// already borrows the `Aig` it came from; taking `&self` here too
    /// would make `Aig::node_sat_term(aig.get_node(v)?)` unborrowable for
    /// the same reason [`crate::level`] and [`crate::iter`] key off a plain
    /// variable index instead of a borrowed `Node`. Exposed for callers
    /// building their own SMT-LIB2 ad-hoc rather than through
    /// [`Aig::to_sat_stream`].
    pub fn node_sat_term(node: &Node<'_>) -> String {
        term(node)
    }

    /// The `declare-fun` line for a single node, or an empty string for a
    /// constant or an output (an output shares its target's declaration).
    pub fn node_sat_define(node: &Node<'_>) -> String {
        let mut buf = Vec::new();
        write_define(node, &mut buf).expect("writing SMT-LIB2 to an in-memory buffer cannot fail");
        String::from_utf8(buf).expect("SMT-LIB2 output is always ASCII")
    }

    /// The defining `assert` line for a single node, or an empty string for
    /// a constant, an input, or an output (none of which add a constraint).
    pub fn node_sat_constraint(node: &Node<'_>) -> String {
        let mut buf = Vec::new();
        write_constraint(node, &mut buf).expect("writing SMT-LIB2 to an in-memory buffer cannot fail");
        String::from_utf8(buf).expect("SMT-LIB2 output is always ASCII")
    }

    /// Renders the whole graph as SMT-LIB2: one pass of `declare-fun`s
    /// followed by one pass of defining `assert`s, each in default node
    /// order.
    pub fn to_sat_stream<W: Write>(&mut self, w: &mut W) -> Result<()> {
        let mut it = self.iter();
        while let Some(node) = it.next(self)? {
            write_define(&node, w)?;
        }

        let mut it = self.iter();
        while let Some(node) = it.next(self)? {
            write_constraint(&node, w)?;
        }
        Ok(())
    }

    pub fn to_sat_string(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.to_sat_stream(&mut buf)?;
        Ok(String::from_utf8(buf).expect("SMT-LIB2 output is always ASCII"))
    }
}
