use std::time::Duration;

use crate::{
    foundation::error::{DissolveError, DissolveResult},
    sequence::SequenceKind,
};

/// Transition length used when none is configured.
pub const DEFAULT_DURATION_SECS: f64 = 4.0;
/// Frame rate of the headless driver when none is configured.
pub const DEFAULT_FPS: f64 = 12.5;

/// Serializable description of a dissolve run.
///
/// Every field has a default, so `{}` is a valid spec.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DissolveSpec {
    /// Transition kind; only `"dissolve"` is accepted.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Total transition time in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Seed for the reveal order.
    #[serde(default)]
    pub seed: u64,
    /// Permutation used to order reveals.
    #[serde(default)]
    pub order: SequenceKind,
    /// Frames per second for the headless driver.
    #[serde(default = "default_fps")]
    pub fps: f64,
}

fn default_kind() -> String {
    "dissolve".to_string()
}

fn default_duration_secs() -> f64 {
    DEFAULT_DURATION_SECS
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

impl Default for DissolveSpec {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            duration_secs: DEFAULT_DURATION_SECS,
            seed: 0,
            order: SequenceKind::default(),
            fps: DEFAULT_FPS,
        }
    }
}

impl DissolveSpec {
    /// Parse and validate a JSON spec.
    pub fn from_json_str(s: &str) -> DissolveResult<Self> {
        let spec: Self = serde_json::from_str(s).map_err(|e| DissolveError::serde(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Pretty JSON form.
    pub fn to_json_string(&self) -> DissolveResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DissolveError::serde(e.to_string()))
    }

    /// Check kind, duration and frame rate.
    pub fn validate(&self) -> DissolveResult<()> {
        parse_transition_kind(&self.kind)?;
        self.duration()?;
        self.frame_duration()?;
        Ok(())
    }

    /// Duration as a [`Duration`], rejecting non-positive or non-finite values.
    pub fn duration(&self) -> DissolveResult<Duration> {
        duration_from_secs(self.duration_secs)
    }

    /// Time between driver frames at the configured `fps`.
    pub fn frame_duration(&self) -> DissolveResult<Duration> {
        frame_duration_from_fps(self.fps)
    }
}

/// Convert seconds to a positive [`Duration`].
pub fn duration_from_secs(secs: f64) -> DissolveResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(DissolveError::validation(
            "duration_secs must be finite and > 0",
        ));
    }
    let d = Duration::try_from_secs_f64(secs)
        .map_err(|e| DissolveError::validation(format!("duration_secs: {e}")))?;
    if d.is_zero() {
        return Err(DissolveError::validation(
            "duration_secs rounds to zero nanoseconds",
        ));
    }
    Ok(d)
}

/// Convert a frame rate to the positive [`Duration`] between frames.
///
/// Rates so low that one frame outlasts `Duration::MAX`, or so high that a
/// frame rounds to zero nanoseconds, are rejected.
pub fn frame_duration_from_fps(fps: f64) -> DissolveResult<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(DissolveError::validation("fps must be finite and > 0"));
    }
    let d = Duration::try_from_secs_f64(1.0 / fps)
        .map_err(|e| DissolveError::validation(format!("fps {fps}: {e}")))?;
    if d.is_zero() {
        return Err(DissolveError::validation(format!(
            "fps {fps} rounds to a zero frame duration"
        )));
    }
    Ok(d)
}

/// Normalize a transition kind name; everything but dissolve is rejected.
pub fn parse_transition_kind(kind: &str) -> DissolveResult<&'static str> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(DissolveError::validation("transition kind must be non-empty"));
    }
    match kind.as_str() {
        "dissolve" => Ok("dissolve"),
        "cut" | "wipe" | "slide" | "crossfade" => Err(DissolveError::validation(format!(
            "transition kind '{kind}' is not supported"
        ))),
        _ => Err(DissolveError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/spec.rs"]
mod tests;
