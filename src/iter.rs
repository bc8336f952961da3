//! Node iteration.
//!
//! The original C implementation dispatches through a trio of function
//! pointers (`has_next`/`next`/`free`) plus a type-erased state pointer so a
//! single iterator type can be repurposed for fan-out traversal. The Rust
//! equivalent is a tagged enum with one `next` method that matches on the
//! tag, no heap indirection, no vtable.
//!
//! Both variants need `&mut Aig` on every step (advancing the resumable
//! parser is itself a mutation), so `NodeIter` does not implement
//! `std::iter::Iterator` (it borrows the store fresh on each call instead
//! of holding a reference for its own lifetime, which sidesteps having to
//! lend out a borrow across repeated calls to the same iterator).

use crate::aig::Aig;
use crate::error::Result;
use crate::node::Node;

#[derive(Debug, Clone, Copy)]
enum Kind {
    All,
    Fanout { predecessor: u64 },
}

/// An iterator over an [`Aig`]'s nodes, in canonical order
/// (inputs, latches, outputs, AND gates) or restricted to a node's fan-out.
#[derive(Debug, Clone, Copy)]
pub struct NodeIter {
    kind: Kind,
    index: u64,
}

impl NodeIter {
    /// Default iteration order: `inputs[0..I), latches[0..L), outputs[0..O),
    /// ands[0..A)`.
    pub fn all() -> Self {
        NodeIter {
            kind: Kind::All,
            index: 0,
        }
    }

    /// Every latch whose `next` references `predecessor`, and every AND
    /// gate either of whose RHS references it.
    ///
    /// Takes a variable index rather than a borrowed [`Node`] so that
    /// `aig.iter_fanout(v)` can follow immediately after `aig.get_node(v)`
    /// on the same store: a `Node` borrowed from this `Aig` would still be
    /// holding it borrowed right when this call needs `&mut Aig`.
    pub fn fanout(aig: &mut Aig, predecessor: u64) -> Result<Self> {
        let mut it = NodeIter {
            kind: Kind::Fanout { predecessor },
            index: 0,
        };
        it.skip_to_match(aig)?;
        Ok(it)
    }

    pub fn has_next(&self, aig: &Aig) -> bool {
        match self.kind {
            Kind::All => self.index < aig.total_node_count(),
            Kind::Fanout { .. } => self.index < aig.latch_count() + aig.and_count(),
        }
    }

    /// Returns the next node, advancing the iterator, or `None` once
    /// exhausted.
    pub fn next<'a>(&mut self, aig: &'a mut Aig) -> Result<Option<Node<'a>>> {
        if !self.has_next(aig) {
            return Ok(None);
        }

        let node = match self.kind {
            Kind::All => self.fetch_all(aig, self.index)?,
            Kind::Fanout { .. } => self.fetch_fanout_candidate(aig, self.index)?,
        };

        self.index += 1;
        if matches!(self.kind, Kind::Fanout { .. }) {
            self.skip_to_match(aig)?;
        }
        Ok(Some(node))
    }

    fn fetch_all<'a>(&self, aig: &'a mut Aig, index: u64) -> Result<Node<'a>> {
        let i = aig.input_count();
        let l = aig.latch_count();
        let o = aig.output_count();

        if index < i {
            aig.get_input(index)
        } else if index < i + l {
            aig.get_latch(index - i)
        } else if index < i + l + o {
            aig.get_output(index - i - l)
        } else {
            aig.get_and(index - i - l - o)
        }
    }

    fn fetch_fanout_candidate<'a>(&self, aig: &'a mut Aig, index: u64) -> Result<Node<'a>> {
        let l = aig.latch_count();
        if index < l {
            aig.get_latch_no_symbol(index)
        } else {
            aig.get_and_no_symbol(index - l)
        }
    }

    /// Advances `self.index` until it lands on a matching fan-out node (for
    /// `Kind::Fanout`) or runs off the end. A no-op for `Kind::All`.
    fn skip_to_match(&mut self, aig: &mut Aig) -> Result<()> {
        let Kind::Fanout { predecessor } = self.kind else {
            return Ok(());
        };
        let bound = aig.latch_count() + aig.and_count();
        while self.index < bound {
            let is_match = {
                let node = self.fetch_fanout_candidate(aig, self.index)?;
                is_fanout_of(&node, predecessor)
            };
            if is_match {
                break;
            }
            self.index += 1;
        }
        Ok(())
    }
}

fn is_fanout_of(node: &Node<'_>, predecessor: u64) -> bool {
    match *node {
        Node::Latch { next, .. } => next == predecessor,
        Node::And { rhs0, rhs1, .. } => rhs0 == predecessor || rhs1 == predecessor,
        _ => false,
    }
}

impl Aig {
    /// Total number of nodes a default-order iterator yields:
    /// `I + L + O + A`.
    pub fn total_node_count(&self) -> u64 {
        self.input_count() + self.latch_count() + self.output_count() + self.and_count()
    }

    pub fn iter(&self) -> NodeIter {
        NodeIter::all()
    }

    pub fn iter_fanout(&mut self, predecessor: u64) -> Result<NodeIter> {
        NodeIter::fanout(self, predecessor)
    }

    /// Number of nodes `iter_fanout(predecessor)` would yield.
    pub fn fanout_count(&mut self, predecessor: u64) -> Result<u64> {
        let mut it = self.iter_fanout(predecessor)?;
        let mut count = 0u64;
        while it.has_next(self) {
            it.next(self)?;
            count += 1;
        }
        Ok(count)
    }
}
