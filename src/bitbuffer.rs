//! Append-only packed array of fixed-width unsigned integers.
//!
//! Each buffer is untyped with respect to width: the caller supplies an
//! inclusive `limit` on every `append`/`get` call and the buffer derives the
//! bit width from it. Callers must pass a consistent `limit` for all calls
//! against the same logical buffer; in debug builds this is checked.

use crate::error::{Error, Result};

/// Number of bits needed to store any value in `0..=limit`.
fn width(limit: u64) -> u32 {
    if limit == 0 {
        1
    } else {
        64 - limit.leading_zeros()
    }
}

#[derive(Debug, Default, Clone)]
pub struct BitBuffer {
    bits: Vec<u8>,
    bit_len: u64,
    #[cfg(debug_assertions)]
    last_limit: Option<u64>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value`, which must be `<= limit`.
    pub fn append(&mut self, value: u64, limit: u64) -> Result<()> {
        debug_assert!(
            value <= limit,
            "attempt to store an out-of-range value in a bit buffer"
        );
        self.check_limit(limit);

        let w = width(limit) as u64;
        let start = self.bit_len;
        let needed_bytes = ((start + w + 7) / 8) as usize;
        let additional = needed_bytes.saturating_sub(self.bits.len());
        if additional > 0 {
            self.bits
                .try_reserve(additional)
                .map_err(|_| Error::OutOfMemory)?;
            self.bits.resize(needed_bytes, 0);
        }

        for i in 0..w {
            if (value >> i) & 1 != 0 {
                let pos = start + i;
                let byte = (pos / 8) as usize;
                let off = (pos % 8) as u32;
                self.bits[byte] |= 1 << off;
            }
        }
        self.bit_len += w;
        Ok(())
    }

    /// Retrieves the `index`-th stored value, assuming the same `limit` used
    /// to append it.
    pub fn get(&self, index: u64, limit: u64) -> Result<u64> {
        self.check_limit(limit);

        let w = width(limit) as u64;
        let start = index
            .checked_mul(w)
            .ok_or_else(|| Error::out_of_range("bit buffer index overflowed"))?;
        if start + w > self.bit_len {
            return Err(Error::out_of_range(format!(
                "index {index} is beyond the {} items stored",
                self.bit_len / w
            )));
        }

        let mut value: u64 = 0;
        for i in (0..w).rev() {
            let pos = start + i;
            let byte = (pos / 8) as usize;
            let off = (pos % 8) as u32;
            let bit = (self.bits[byte] >> off) & 1;
            value = (value << 1) | u64::from(bit);
        }
        Ok(value)
    }

    /// Number of items stored so far, assuming every append used `limit`.
    pub fn len(&self, limit: u64) -> u64 {
        let w = width(limit) as u64;
        self.bit_len / w
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Drops all storage, leaving the buffer usable for a new `limit`.
    pub fn reset(&mut self) {
        self.bits.clear();
        self.bits.shrink_to_fit();
        self.bit_len = 0;
        #[cfg(debug_assertions)]
        {
            self.last_limit = None;
        }
    }

    #[cfg(debug_assertions)]
    fn check_limit(&mut self, limit: u64) {
        if let Some(last) = self.last_limit {
            debug_assert_eq!(
                last, limit,
                "bit buffer used with inconsistent limit across calls"
            );
        }
        self.last_limit = Some(limit);
    }

    #[cfg(not(debug_assertions))]
    fn check_limit(&self, _limit: u64) {}
}
