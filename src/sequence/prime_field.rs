use crate::{
    foundation::core::Domain,
    foundation::error::DissolveResult,
    sequence::RevealSequence,
};

/// Fermat prime `2^16 + 1`.
pub const PRIME: u64 = 65_537;
/// `2^15 - 1`, a primitive root modulo [`PRIME`].
pub const PRIMITIVE_ROOT: u64 = 32_767;

/// Permutation driven by a multiplicative walk modulo a prime.
///
/// A counter `k` runs through every residue of `[1, PRIME)` by repeated
/// multiplication with [`PRIMITIVE_ROOT`]. Each `k` emits the pixel numbers
/// `N + k - PRIME`, stepping down by `PRIME - 1` while non-negative, which
/// partitions `[0, N)` across the walk. Indices are row-major over the true
/// width, so nothing is discarded.
#[derive(Clone, Debug)]
pub struct PrimeFieldSequence {
    total: u64,
    row_stride: u64,
    start_k: u64,
    k: u64,
    pending: Option<u64>,
    exhausted: bool,
}

impl PrimeFieldSequence {
    /// Start the walk at `1 + seed % (PRIME - 1)`.
    pub fn new(domain: Domain, seed: u64) -> DissolveResult<Self> {
        let total = domain.pixel_count();
        let start_k = 1 + seed % (PRIME - 1);
        Ok(Self {
            total,
            row_stride: u64::from(domain.width),
            start_k,
            k: start_k,
            pending: first_pixel(total, start_k),
            exhausted: false,
        })
    }

    /// Counter value the walk started from.
    pub fn start_k(&self) -> u64 {
        self.start_k
    }
}

fn first_pixel(total: u64, k: u64) -> Option<u64> {
    (total + k).checked_sub(PRIME)
}

impl RevealSequence for PrimeFieldSequence {
    fn next_index(&mut self) -> Option<u64> {
        loop {
            if self.exhausted {
                return None;
            }
            if let Some(j) = self.pending {
                self.pending = j.checked_sub(PRIME - 1);
                return Some(j);
            }
            self.k = (self.k * PRIMITIVE_ROOT) % PRIME;
            if self.k == self.start_k {
                self.exhausted = true;
                return None;
            }
            self.pending = first_pixel(self.total, self.k);
        }
    }

    fn row_stride(&self) -> u64 {
        self.row_stride
    }

    fn period(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/prime_field.rs"]
mod tests;
