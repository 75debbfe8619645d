use std::time::Duration;

use crate::{
    foundation::error::{DissolveError, DissolveResult},
    surface::{FrameBinding, PixelSurface},
    transition::{
        controller::{DissolveTransition, Phase, TickReport},
        spec::{DEFAULT_FPS, frame_duration_from_fps},
    },
};

/// Fixed-step frame clock standing in for a display's vsync.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    fps: f64,
    frame: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            // 1 / DEFAULT_FPS
            frame: Duration::from_millis(80),
        }
    }
}

impl FrameClock {
    /// Clock ticking `fps` times per second.
    pub fn new(fps: f64) -> DissolveResult<Self> {
        let frame = frame_duration_from_fps(fps)?;
        Ok(Self { fps, frame })
    }

    /// Frames per second.
    pub fn fps(self) -> f64 {
        self.fps
    }

    /// Time between two frames.
    pub fn frame_duration(self) -> Duration {
        self.frame
    }

    /// Frames needed to cover `d`, rounded up.
    pub fn frames_for(self, d: Duration) -> u64 {
        (d.as_secs_f64() * self.fps).ceil() as u64
    }
}

/// Totals from [`run_to_completion`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveStats {
    /// Frames handed to the sink, including the initial outgoing frame.
    pub frames: u64,
    /// Ticks that reported a recovered anomaly.
    pub anomalies: u64,
}

/// Run `transition` from a fresh start until Finished, one tick per frame.
///
/// Frame 0 is the untouched outgoing image; every following frame advances
/// the clock by one frame duration. The sink sees each composited output.
#[tracing::instrument(skip(transition, frames, sink))]
pub fn run_to_completion<S, F>(
    transition: &mut DissolveTransition,
    frames: &mut FrameBinding<'_, S>,
    clock: FrameClock,
    mut sink: F,
) -> DissolveResult<DriveStats>
where
    S: PixelSurface,
    F: FnMut(u64, &TickReport, &S) -> DissolveResult<()>,
{
    transition.reset();
    transition.start()?;

    // One spare frame absorbs rounding in the per-frame duration.
    let max_frames = clock.frames_for(transition.duration()).saturating_add(2);
    let dt = clock.frame_duration();
    let mut stats = DriveStats::default();

    let mut report = transition.tick(Duration::ZERO, frames)?;
    loop {
        if report.anomaly.is_some() {
            stats.anomalies += 1;
        }
        sink(stats.frames, &report, frames.output())?;
        stats.frames += 1;

        if report.phase == Phase::Finished {
            break;
        }
        if stats.frames >= max_frames {
            return Err(DissolveError::validation(format!(
                "dissolve did not finish within {max_frames} frames"
            )));
        }
        report = transition.tick(dt, frames)?;
    }

    tracing::info!(frames = stats.frames, "dissolve rendered");
    Ok(stats)
}

/// Composite the frame `at` into the run, from a fresh start.
pub fn render_at<S: PixelSurface>(
    transition: &mut DissolveTransition,
    frames: &mut FrameBinding<'_, S>,
    at: Duration,
) -> DissolveResult<TickReport> {
    transition.reset();
    transition.start()?;
    transition.tick(at, frames)
}

#[cfg(test)]
#[path = "../tests/unit/drive/drive.rs"]
mod tests;
