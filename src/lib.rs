//! Deterministic pixel-dissolve scene transitions.
//!
//! A dissolve replaces every pixel of an outgoing image with the matching pixel
//! of an incoming image, one pixel at a time, in an order that looks random but
//! is fixed by a seed and never visits a position twice.
//!
//! # Pieces
//!
//! 1. **Reveal order**: a [`RevealSequence`] walks a padded index space with
//!    constant memory. The default is a full-period Galois LFSR
//!    ([`LfsrSequence`]); [`PrimeFieldSequence`] is a multiplicative walk modulo
//!    `2^16 + 1`. [`InBoundsCoords`] drops draws that land outside the image.
//! 2. **Controller**: [`DissolveTransition`] maps elapsed time to a pixel count
//!    and copies that many incoming pixels into the output per
//!    [`tick`](DissolveTransition::tick).
//! 3. **Surfaces**: any [`PixelSurface`] (a raw [`PixelBuffer`] or an
//!    `image::RgbaImage`) bound through a [`FrameBinding`].
//! 4. **Driver** (optional): [`run_to_completion`] ticks a transition with a
//!    fixed [`FrameClock`] and hands every frame to a sink.
//!
//! The core performs no IO; [`load_image_pair`] and [`write_png`] are helpers
//! for hosts such as the bundled `dissolve` binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod drive;
mod foundation;
mod sequence;
mod surface;
mod transition;

pub use assets::{decode_image, ensure_parent_dir, load_image, load_image_pair, write_png};
pub use drive::{DriveStats, FrameClock, render_at, run_to_completion};
pub use foundation::core::{Coord, Domain};
pub use foundation::error::{DissolveError, DissolveResult};
pub use sequence::lfsr::LfsrSequence;
pub use sequence::prime_field::{PRIME, PRIMITIVE_ROOT, PrimeFieldSequence};
pub use sequence::taps::{MAX_REGISTER_BITS, feedback_mask, register_bits_for};
pub use sequence::{InBoundsCoords, RevealSequence, SequenceKind, create_sequence, reveal_order};
pub use surface::{FrameBinding, PixelBuffer, PixelSurface};
pub use transition::controller::{DissolveTransition, Phase, TickReport};
pub use transition::spec::{
    DEFAULT_DURATION_SECS, DEFAULT_FPS, DissolveSpec, duration_from_secs, frame_duration_from_fps,
    parse_transition_kind,
};
