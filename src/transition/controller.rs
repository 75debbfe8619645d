use std::time::Duration;

use crate::{
    foundation::core::Domain,
    foundation::error::{DissolveError, DissolveResult},
    sequence::{InBoundsCoords, RevealSequence, SequenceKind, create_sequence},
    surface::{FrameBinding, PixelSurface},
    transition::spec::DissolveSpec,
};

/// Lifecycle phase of a [`DissolveTransition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started; the output shows the outgoing image.
    Idle,
    /// Revealing pixels as time advances.
    Running,
    /// Elapsed time frozen; no reveals.
    Paused,
    /// Every pixel revealed; the output shows the incoming image.
    Finished,
}

/// Outcome of one [`DissolveTransition::tick`].
#[derive(Debug)]
pub struct TickReport {
    /// Phase after the tick.
    pub phase: Phase,
    /// Pixels copied during this tick.
    pub revealed_this_tick: u64,
    /// Pixels revealed since the run started.
    pub revealed: u64,
    /// Pixels in the domain.
    pub total: u64,
    /// Recovered fault, if the reveal order ran dry early.
    pub anomaly: Option<DissolveError>,
}

type Coords = InBoundsCoords<Box<dyn RevealSequence>>;

/// Time-driven dissolve from an outgoing to an incoming image.
///
/// The controller owns phase, elapsed time and reveal progress. Buffers are
/// borrowed only for the duration of [`tick`](Self::tick).
#[derive(Debug)]
pub struct DissolveTransition {
    domain: Domain,
    duration: Duration,
    seed: u64,
    kind: SequenceKind,
    phase: Phase,
    elapsed: Duration,
    revealed: u64,
    coords: Option<Coords>,
    // Output must be reset to the outgoing image on the next tick.
    restore_pending: bool,
}

impl DissolveTransition {
    /// Create an idle LFSR-ordered transition.
    pub fn new(width: u32, height: u32, duration: Duration, seed: u64) -> DissolveResult<Self> {
        Self::with_kind(width, height, duration, seed, SequenceKind::Lfsr)
    }

    /// Create an idle transition with an explicit reveal order.
    pub fn with_kind(
        width: u32,
        height: u32,
        duration: Duration,
        seed: u64,
        kind: SequenceKind,
    ) -> DissolveResult<Self> {
        let domain = Domain::new(width, height)?;
        if duration.is_zero() {
            return Err(DissolveError::validation("duration must be > 0"));
        }
        // Surface oversized domains now rather than at start.
        create_sequence(kind, domain, seed)?;

        Ok(Self {
            domain,
            duration,
            seed,
            kind,
            phase: Phase::Idle,
            elapsed: Duration::ZERO,
            revealed: 0,
            coords: None,
            restore_pending: true,
        })
    }

    /// Create a transition from a validated [`DissolveSpec`].
    pub fn from_spec(spec: &DissolveSpec, width: u32, height: u32) -> DissolveResult<Self> {
        spec.validate()?;
        Self::with_kind(width, height, spec.duration()?, spec.seed, spec.order)
    }

    /// Bind outgoing, incoming and output surfaces matching this transition's domain.
    pub fn bind<'a, S: PixelSurface>(
        &self,
        outgoing: &'a S,
        incoming: &'a S,
        output: &'a mut S,
    ) -> DissolveResult<FrameBinding<'a, S>> {
        let binding = FrameBinding::new(outgoing, incoming, output)?;
        self.check_binding(&binding)?;
        Ok(binding)
    }

    fn check_binding<S: PixelSurface>(&self, frames: &FrameBinding<'_, S>) -> DissolveResult<()> {
        let bound = frames.domain();
        if bound != self.domain {
            return Err(DissolveError::buffer_mismatch(format!(
                "buffers are {}x{}, transition is {}x{}",
                bound.width, bound.height, self.domain.width, self.domain.height
            )));
        }
        Ok(())
    }

    /// Begin or resume revealing.
    ///
    /// From Idle this builds a fresh reveal order and schedules the output to
    /// be reset to the outgoing image. Ignored while Running or Finished.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) -> DissolveResult<()> {
        match self.phase {
            Phase::Idle => {
                let seq = create_sequence(self.kind, self.domain, self.seed)?;
                self.coords = Some(InBoundsCoords::new(seq, self.domain));
                self.elapsed = Duration::ZERO;
                self.revealed = 0;
                self.restore_pending = true;
                self.phase = Phase::Running;
            }
            Phase::Paused => self.phase = Phase::Running,
            Phase::Running | Phase::Finished => {
                tracing::debug!(phase = ?self.phase, "start ignored");
            }
        }
        Ok(())
    }

    /// Freeze progress. Ignored unless Running.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        } else {
            tracing::debug!(phase = ?self.phase, "pause ignored");
        }
    }

    /// Pause when Running, otherwise start.
    pub fn toggle(&mut self) -> DissolveResult<()> {
        if self.phase == Phase::Running {
            self.pause();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Return to Idle from any phase, dropping the reveal order and progress.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.coords = None;
        self.elapsed = Duration::ZERO;
        self.revealed = 0;
        self.restore_pending = true;
    }

    /// Advance the clock by `dt` and reveal up to the matching pixel count.
    ///
    /// Only Running accumulates time. A pending output reset (after start from
    /// Idle, or reset) is applied first regardless of phase.
    pub fn tick<S: PixelSurface>(
        &mut self,
        dt: Duration,
        frames: &mut FrameBinding<'_, S>,
    ) -> DissolveResult<TickReport> {
        self.check_binding(frames)?;

        if self.restore_pending {
            frames.restore_outgoing();
            self.restore_pending = false;
        }

        if self.phase != Phase::Running {
            return Ok(self.report(0, None));
        }

        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let total = self.total();
        let target = self.target_revealed();

        let mut revealed_this_tick = 0u64;
        let mut anomaly = None;
        while self.revealed < target {
            match self.coords.as_mut().and_then(Iterator::next) {
                Some(c) => {
                    frames.reveal(c);
                    self.revealed += 1;
                    revealed_this_tick += 1;
                }
                None => {
                    tracing::warn!(
                        revealed = self.revealed,
                        total,
                        "reveal order exhausted early; finishing"
                    );
                    anomaly = Some(DissolveError::GeneratorExhausted {
                        revealed: self.revealed,
                        total,
                    });
                    frames.show_incoming();
                    self.revealed = total;
                    break;
                }
            }
        }

        if self.revealed == total {
            self.finish();
        }

        Ok(self.report(revealed_this_tick, anomaly))
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.coords = None;
        tracing::debug!(total = self.total(), elapsed = ?self.elapsed, "dissolve finished");
    }

    fn report(&self, revealed_this_tick: u64, anomaly: Option<DissolveError>) -> TickReport {
        TickReport {
            phase: self.phase,
            revealed_this_tick,
            revealed: self.revealed,
            total: self.total(),
            anomaly,
        }
    }

    /// `floor(elapsed / duration * total)`, clamped to `total`, in exact integer math.
    pub fn target_revealed(&self) -> u64 {
        let total = self.total();
        let scaled = u128::from(total) * self.elapsed.as_nanos() / self.duration.as_nanos();
        scaled.min(u128::from(total)) as u64
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pixels revealed in the current run.
    pub fn revealed(&self) -> u64 {
        self.revealed
    }

    /// Pixels in the domain.
    pub fn total(&self) -> u64 {
        self.domain.pixel_count()
    }

    /// Running time accumulated in the current run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Fraction of pixels revealed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.revealed as f64 / self.total() as f64
    }

    /// Grid this transition covers.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Configured transition length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Seed for the reveal order.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Permutation used for the reveal order.
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    #[cfg(test)]
    pub(crate) fn replace_sequence(&mut self, seq: Box<dyn RevealSequence>) {
        self.coords = Some(InBoundsCoords::new(seq, self.domain));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/controller.rs"]
mod tests;
