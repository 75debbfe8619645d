use crate::{
    foundation::core::Domain,
    foundation::error::{DissolveError, DissolveResult},
    sequence::{
        RevealSequence,
        taps::{MAX_REGISTER_BITS, feedback_mask, period_for, register_bits_for},
    },
};

/// Full-period Galois LFSR over the padded domain of a [`Domain`].
///
/// Rows are padded to the next power of two so an index maps back to `(x, y)`
/// with a mask and a shift. Indices that land in padding (or past the last
/// row) are valid draws that the caller discards.
#[derive(Clone, Debug)]
pub struct LfsrSequence {
    bits: u32,
    mask: u64,
    seed_state: u64,
    state: u64,
    row_stride: u64,
    exhausted: bool,
}

impl LfsrSequence {
    /// Size the register for `domain` and derive a nonzero start state from `seed`.
    pub fn new(domain: Domain, seed: u64) -> DissolveResult<Self> {
        let width = u64::from(domain.width);
        let height = u64::from(domain.height);
        let row_stride = width.next_power_of_two();

        // Every in-bounds index must sit below the register period.
        let span = row_stride
            .checked_mul(height - 1)
            .and_then(|v| v.checked_add(width))
            .ok_or_else(|| DissolveError::invalid_domain("padded domain overflows u64"))?;
        let bits = register_bits_for(span).ok_or_else(|| {
            DissolveError::invalid_domain(format!(
                "{}x{} needs a register wider than {MAX_REGISTER_BITS} bits",
                domain.width, domain.height
            ))
        })?;
        let mask = feedback_mask(bits).ok_or_else(|| {
            DissolveError::invalid_domain(format!("no feedback mask for {bits}-bit register"))
        })?;
        let seed_state = 1 + seed % period_for(bits);

        Ok(Self {
            bits,
            mask,
            seed_state,
            state: seed_state,
            row_stride,
            exhausted: false,
        })
    }

    /// Register width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Start (and final) register value.
    pub fn seed_state(&self) -> u64 {
        self.seed_state
    }

    /// Whether a full period has been emitted.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// One Galois step: shift right, fold the mask back in when a 1 drops out.
    pub fn step(state: u64, mask: u64) -> u64 {
        let out = state & 1;
        let shifted = state >> 1;
        if out == 1 { shifted ^ mask } else { shifted }
    }
}

impl RevealSequence for LfsrSequence {
    fn next_index(&mut self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        self.state = Self::step(self.state, self.mask);
        if self.state == self.seed_state {
            self.exhausted = true;
        }
        Some(self.state - 1)
    }

    fn row_stride(&self) -> u64 {
        self.row_stride
    }

    fn period(&self) -> u64 {
        period_for(self.bits)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/lfsr.rs"]
mod tests;
