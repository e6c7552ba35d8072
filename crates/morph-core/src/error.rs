use thiserror::Error;

/// Construction-time configuration failures.
///
/// Every variant is fatal for the scene being built: a scene with mismatched
/// keyframes or a broken phase table is never constructed, so the per-frame
/// path has no error surface at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no keyframes supplied")]
    NoKeyframes,
    #[error("keyframe '{0}' has no points")]
    EmptyKeyframe(String),
    #[error("keyframe '{0}' registered twice")]
    DuplicateKeyframe(String),
    #[error("phase '{phase}' references unknown keyframe '{keyframe}'")]
    UnknownKeyframe { phase: String, keyframe: String },
    #[error("keyframe '{name}' has {actual} points, expected {expected}")]
    PointCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("phase '{0}' blends two keyframes and cannot oscillate")]
    OscillationOnMorph(String),
    #[error("phase table is empty")]
    EmptyPhaseTable,
    #[error("phase '{name}' has inverted range [{start}, {end}]")]
    InvertedPhase { name: String, start: f32, end: f32 },
    #[error("phase table must cover [0, 1] without gaps: expected {expected} at '{name}', found {found}")]
    PhaseGap {
        name: String,
        expected: f32,
        found: f32,
    },
    #[error("invalid tuning '{name}' = {value}: {reason}")]
    InvalidTuning {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Checks that a per-frame blend factor lies in `(0, 1]`.
pub(crate) fn check_unit_factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTuning {
            name,
            value,
            reason: "must be in (0, 1]",
        })
    }
}
