pub mod lfsr;
pub mod prime_field;
pub mod taps;

use crate::{
    foundation::core::{Coord, Domain},
    foundation::error::DissolveResult,
};

/// Source of linear pixel indices in a deterministic, non-repeating order.
///
/// Implementations hold only a constant amount of state. An index maps to
/// `(index % row_stride, index / row_stride)`; indices outside the domain are
/// routine and must be discarded by the consumer.
pub trait RevealSequence: std::fmt::Debug {
    /// Next index, or `None` once the full period has been emitted.
    fn next_index(&mut self) -> Option<u64>;

    /// Row length of the (possibly padded) index space.
    fn row_stride(&self) -> u64;

    /// Number of indices emitted over a full period, discards included.
    fn period(&self) -> u64;
}

impl<S: RevealSequence + ?Sized> RevealSequence for Box<S> {
    fn next_index(&mut self) -> Option<u64> {
        (**self).next_index()
    }

    fn row_stride(&self) -> u64 {
        (**self).row_stride()
    }

    fn period(&self) -> u64 {
        (**self).period()
    }
}

/// Which permutation drives the reveal order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    /// Galois LFSR over a power-of-two padded domain.
    #[default]
    Lfsr,
    /// Multiplicative walk modulo `2^16 + 1`.
    PrimeField,
}

/// Build a boxed generator for `domain`.
pub fn create_sequence(
    kind: SequenceKind,
    domain: Domain,
    seed: u64,
) -> DissolveResult<Box<dyn RevealSequence>> {
    match kind {
        SequenceKind::Lfsr => Ok(Box::new(lfsr::LfsrSequence::new(domain, seed)?)),
        SequenceKind::PrimeField => Ok(Box::new(prime_field::PrimeFieldSequence::new(
            domain, seed,
        )?)),
    }
}

/// Iterator that drops out-of-bounds draws and yields only real coordinates.
#[derive(Debug)]
pub struct InBoundsCoords<S> {
    seq: S,
    domain: Domain,
    discarded: u64,
}

impl<S: RevealSequence> InBoundsCoords<S> {
    /// Wrap `seq`, filtering against `domain`.
    pub fn new(seq: S, domain: Domain) -> Self {
        Self {
            seq,
            domain,
            discarded: 0,
        }
    }

    /// Draws dropped so far because they fell outside the domain.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// The wrapped generator.
    pub fn sequence(&self) -> &S {
        &self.seq
    }
}

impl<S: RevealSequence> Iterator for InBoundsCoords<S> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let stride = self.seq.row_stride();
        while let Some(index) = self.seq.next_index() {
            match self.domain.coord_at(index, stride) {
                Some(c) => return Some(c),
                None => self.discarded += 1,
            }
        }
        None
    }
}

/// Full reveal order for `domain`, as produced for a transition with the same
/// kind and seed.
pub fn reveal_order(
    kind: SequenceKind,
    domain: Domain,
    seed: u64,
) -> DissolveResult<InBoundsCoords<Box<dyn RevealSequence>>> {
    Ok(InBoundsCoords::new(
        create_sequence(kind, domain, seed)?,
        domain,
    ))
}

#[cfg(test)]
#[path = "../tests/unit/sequence/coverage.rs"]
mod tests;
