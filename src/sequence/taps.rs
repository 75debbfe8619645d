//! Maximal-length Galois feedback masks, one per register width.
//!
//! Shifting right and XOR-ing the mask whenever a 1 falls out walks every
//! nonzero `k`-bit state exactly once before returning to the start.

/// Widest register the table covers.
pub const MAX_REGISTER_BITS: u32 = 32;

static FEEDBACK_MASKS: [u64; MAX_REGISTER_BITS as usize + 1] = [
    0x0000_0000, // unused
    0x0000_0001,
    0x0000_0003,
    0x0000_0006,
    0x0000_000C,
    0x0000_0014,
    0x0000_0030,
    0x0000_0060,
    0x0000_00B8,
    0x0000_0110,
    0x0000_0240,
    0x0000_0500,
    0x0000_0E08,
    0x0000_1C80,
    0x0000_3802,
    0x0000_6000,
    0x0000_D008,
    0x0001_2000,
    0x0002_0400,
    0x0007_2000,
    0x0009_0000,
    0x0014_0000,
    0x0030_0000,
    0x0042_0000,
    0x00E1_0000,
    0x0120_0000,
    0x0200_0023,
    0x0400_0013,
    0x0900_0000,
    0x1400_0000,
    0x2000_0029,
    0x4800_0000,
    0x8020_0003,
];

/// Feedback mask for a `bits`-wide register, if the table covers it.
pub fn feedback_mask(bits: u32) -> Option<u64> {
    if bits == 0 || bits > MAX_REGISTER_BITS {
        return None;
    }
    Some(FEEDBACK_MASKS[bits as usize])
}

/// Smallest register width whose period `2^k - 1` is at least `span`.
pub fn register_bits_for(span: u64) -> Option<u32> {
    (1..=MAX_REGISTER_BITS).find(|&k| (1u64 << k) - 1 >= span)
}

/// Period of a maximal-length register of width `bits`.
pub fn period_for(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/taps.rs"]
mod tests;
