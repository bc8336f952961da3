//! Flat symbol table: one optional name per (kind, position) slot.
//!
//! Slot assignment mirrors the data model: input `i` lives at slot `i`,
//! latch `l` at `I + l`, output `o` at `I + L + o`.

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    names: Vec<Option<String>>,
}

impl SymbolTable {
    pub fn new(len: usize) -> Self {
        SymbolTable {
            names: vec![None; len],
        }
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).and_then(|n| n.as_deref())
    }

    /// Records `name` for `slot`. In strict mode, a second name for an
    /// already-named slot is an error; in lax mode it overwrites.
    pub fn set(&mut self, slot: usize, name: String, strict: bool) -> Result<()> {
        let entry = self
            .names
            .get_mut(slot)
            .ok_or_else(|| Error::out_of_range(format!("symbol slot {slot} is out of range")))?;
        if entry.is_some() && strict {
            return Err(Error::AlreadyExists(format!(
                "duplicate symbol name for slot {slot}"
            )));
        }
        *entry = Some(name);
        Ok(())
    }

    /// Linear scan for the first slot named `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
    }
}
