//! The four packed-edge buffers owned by an [`crate::aig::Aig`] store.

use crate::bitbuffer::BitBuffer;

/// Per-section packed storage, as laid out in the format's data model.
#[derive(Debug, Default)]
pub(crate) struct Buffers {
    /// Literal of each latch's next-state, one per latch.
    pub latch_next: BitBuffer,
    /// Literal of each output, one per output.
    pub outputs: BitBuffer,
    /// Literal of each AND gate's LHS. Empty until the first gate whose LHS
    /// deviates from its inferable canonical position; from then on holds
    /// exactly `lhs_materialized`-many back-filled-then-explicit entries.
    pub and_lhs: BitBuffer,
    pub lhs_materialized: bool,
    /// Two literals per AND gate, interleaved (`rhs0, rhs1, rhs0, rhs1, ...`).
    pub and_rhs: BitBuffer,
}

impl Buffers {
    pub fn new() -> Self {
        Self::default()
    }
}
