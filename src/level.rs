//! Node levels: longest path length to a constant or input.
//!
//! Memoized per [`crate::aig::Aig`] in a cache sized `max_index + 1` (slot
//! `v` holds the level of variable `v`), not `max_index`: a plain
//! off-by-one in the naive version of this cache would panic the first time
//! `level` was asked for the node at `max_index` itself.
//!
//! Keyed by variable index rather than by a borrowed [`Node`](crate::node::Node):
//! a node fetched from this same store already holds a borrow of it (its
//! `name` field), so taking `&Node` here would make `aig.level(&node)`
//! unborrowable whenever `node` came from `aig.get_node(..)` on the same
//! store.

use crate::aig::Aig;
use crate::error::{Error, Result};
use crate::node::Node;

impl Aig {
    /// The longest path from the node at `variable_index` down to a
    /// constant or input: `0` for constants and inputs, `1 +
    /// max(level(predecessor))` for latches and AND gates.
    pub fn level(&mut self, variable_index: u64) -> Result<u64> {
        if let Some(level) = self.cached_level(variable_index) {
            return Ok(level);
        }

        // Extract only the Copy fields we need; holding on to the `Node`
        // itself would keep `self` borrowed across the recursive calls
        // below.
        let predecessors = match self.get_node(variable_index)? {
            Node::Constant { .. } | Node::Input { .. } => None,
            Node::Latch { next, .. } => Some((next, None)),
            Node::And { rhs0, rhs1, .. } => Some((rhs0, Some(rhs1))),
            Node::Output { .. } => {
                return Err(Error::invalid_argument(
                    "outputs are not addressed by variable index and have no level",
                ))
            }
        };

        let level = match predecessors {
            None => 0,
            Some((a, None)) => 1 + self.level(a)?,
            Some((a, Some(b))) => 1 + self.level(a)?.max(self.level(b)?),
        };

        self.store_level(variable_index, level);
        Ok(level)
    }

    fn cached_level(&mut self, v: u64) -> Option<u64> {
        self.level_cache_mut()
            .as_ref()
            .and_then(|cache| cache.get(v as usize).copied().flatten())
    }

    fn store_level(&mut self, v: u64, level: u64) {
        let max_index = self.max_index();
        let cache = self
            .level_cache_mut()
            .get_or_insert_with(|| vec![None; (max_index + 1) as usize]);
        if (v as usize) >= cache.len() {
            cache.resize((v as usize) + 1, None);
        }
        cache[v as usize] = Some(level);
    }
}
