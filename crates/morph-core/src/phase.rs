//! Ordered scroll phases.
//!
//! A [`PhaseTable`] partitions `[0, 1]` into contiguous intervals. Each
//! [`Phase`] names the keyframes it blends, the easing of its local progress,
//! an optional time-based oscillation, and a [`Motion`] row of functions
//! that place the camera and object for that interval. One lookup per frame
//! selects the row; there are no if/else chains keyed on scroll ranges.

use crate::constants::{OSCILLATION_ATTACK, WIDTH_EPSILON};
use crate::easing::{smoothstep, Easing};
use crate::error::ConfigError;
use crate::keyframe::spherical;
use glam::Vec3;
use smallvec::SmallVec;

/// Inputs available to every per-phase function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseInput {
    /// Overall scroll progress in `[0, 1]`.
    pub progress: f32,
    /// Progress within the active phase in `[0, 1]`.
    pub local_t: f32,
    /// `local_t` after the phase easing.
    pub eased: f32,
    /// Seconds since the scene started.
    pub elapsed: f32,
    pub hovered: bool,
}

pub type VecFn = fn(&PhaseInput) -> Vec3;
pub type ScalarFn = fn(&PhaseInput) -> f32;

/// Camera and object choreography for one phase.
///
/// Adjacent phases must agree at their shared boundary for `eye` (and should
/// for the rest) so the view never jumps.
#[derive(Clone, Copy)]
pub struct Motion {
    pub eye: VecFn,
    pub look_at: VecFn,
    /// Base orientation, Euler XYZ radians.
    pub tilt: VecFn,
    /// Target spin speed per axis, radians per second.
    pub spin: VecFn,
    pub opacity: ScalarFn,
    pub accent_opacity: ScalarFn,
    pub accent_scale: ScalarFn,
    pub scale: ScalarFn,
    pub offset: VecFn,
}

fn default_eye(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 5.0)
}
fn zero(_: &PhaseInput) -> Vec3 {
    Vec3::ZERO
}
fn one(_: &PhaseInput) -> f32 {
    1.0
}
fn none(_: &PhaseInput) -> f32 {
    0.0
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Motion").finish_non_exhaustive()
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            eye: default_eye,
            look_at: zero,
            tilt: zero,
            spin: zero,
            opacity: one,
            accent_opacity: none,
            accent_scale: one,
            scale: one,
            offset: zero,
        }
    }
}

/// Which keyframes a phase draws from, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Hold(&'static str),
    Morph {
        from: &'static str,
        to: &'static str,
    },
}

/// Time-based motion overlaid on a held keyframe. It fades in over the first
/// [`OSCILLATION_ATTACK`] of the phase and is scaled by `1 - eased * settle`,
/// so with `settle = 1` it is exactly zero at both ends of the phase.
/// Blending phases carry no overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Oscillation {
    /// Radial ripple driven by the point's own spherical angles plus a global
    /// breathing pulse.
    SphereRipple { amplitude: f32, settle: f32 },
    /// Vertical sway: `y += sin(elapsed * frequency + x * spatial) * amplitude`.
    VerticalSway {
        amplitude: f32,
        frequency: f32,
        spatial: f32,
        settle: f32,
    },
}

impl Oscillation {
    pub fn settle(&self) -> f32 {
        match *self {
            Oscillation::SphereRipple { settle, .. } | Oscillation::VerticalSway { settle, .. } => {
                settle.clamp(0.0, 1.0)
            }
        }
    }

    /// Amplitude multiplier at the given local and eased phase progress.
    #[inline]
    pub fn strength(&self, local_t: f32, eased: f32) -> f32 {
        smoothstep(local_t / OSCILLATION_ATTACK) * (1.0 - eased * self.settle())
    }

    /// Displace `base` at time `elapsed` with overall strength `strength`.
    pub fn apply(&self, base: Vec3, elapsed: f32, strength: f32) -> Vec3 {
        if strength == 0.0 {
            return base;
        }
        match *self {
            Oscillation::SphereRipple { amplitude, .. } => {
                let radius = base.length();
                if radius < WIDTH_EPSILON {
                    return base;
                }
                let theta = base.z.atan2(base.x);
                let phi = (base.y / radius).clamp(-1.0, 1.0).acos();
                let t = elapsed;
                let slow = (phi * 4.0 + t * 1.8).sin() * 0.35;
                let longitudinal = (theta * 3.0 + t * 2.2).sin() * 0.25;
                let diagonal = (theta * 5.0 + phi * 5.0 + t * 2.5).cos() * 0.2;
                let fine = (phi * 8.0 + theta * 8.0 + t * 3.0).sin() * 0.1;
                let pulse = (t * 1.5).sin() * 0.1;
                let ripple = (slow + longitudinal + diagonal + fine + pulse) * amplitude * strength;
                spherical(radius + ripple, phi, theta)
            }
            Oscillation::VerticalSway {
                amplitude,
                frequency,
                spatial,
                ..
            } => {
                let sway = (elapsed * frequency + base.x * spatial).sin() * amplitude * strength;
                base + Vec3::new(0.0, sway, 0.0)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Phase {
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
    pub blend: Blend,
    pub easing: Easing,
    pub oscillation: Option<Oscillation>,
    pub motion: Motion,
}

impl Phase {
    pub fn new(name: &'static str, start: f32, end: f32, blend: Blend) -> Self {
        Self {
            name,
            start,
            end,
            blend,
            easing: Easing::default(),
            oscillation: None,
            motion: Motion::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_oscillation(mut self, oscillation: Oscillation) -> Self {
        self.oscillation = Some(oscillation);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Progress within this phase; a zero-width phase counts as complete.
    #[inline]
    pub fn local_t(&self, progress: f32) -> f32 {
        let width = self.end - self.start;
        if width < WIDTH_EPSILON {
            return 1.0;
        }
        ((progress - self.start) / width).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct PhaseTable {
    phases: SmallVec<[Phase; 4]>,
}

impl PhaseTable {
    /// Validates that the phases are ordered, contiguous and cover `[0, 1]`,
    /// and that oscillations only sit on held phases and come to rest before
    /// the next phase takes over.
    pub fn new(phases: impl IntoIterator<Item = Phase>) -> Result<Self, ConfigError> {
        let phases: SmallVec<[Phase; 4]> = phases.into_iter().collect();
        if phases.is_empty() {
            return Err(ConfigError::EmptyPhaseTable);
        }
        let last = phases.len() - 1;
        let mut expected = 0.0_f32;
        for (i, phase) in phases.iter().enumerate() {
            if let Some(osc) = phase.oscillation {
                if matches!(phase.blend, Blend::Morph { .. }) {
                    return Err(ConfigError::OscillationOnMorph(phase.name.to_string()));
                }
                if i < last && osc.settle() < 1.0 {
                    return Err(ConfigError::InvalidTuning {
                        name: "settle",
                        value: osc.settle(),
                        reason: "must be 1 when another phase follows",
                    });
                }
            }
            if !(phase.start.is_finite() && phase.end.is_finite()) || phase.end < phase.start {
                return Err(ConfigError::InvertedPhase {
                    name: phase.name.to_string(),
                    start: phase.start,
                    end: phase.end,
                });
            }
            if (phase.start - expected).abs() > WIDTH_EPSILON {
                return Err(ConfigError::PhaseGap {
                    name: phase.name.to_string(),
                    expected,
                    found: phase.start,
                });
            }
            expected = phase.end;
        }
        if (expected - 1.0).abs() > WIDTH_EPSILON {
            let last = &phases[phases.len() - 1];
            return Err(ConfigError::PhaseGap {
                name: last.name.to_string(),
                expected: 1.0,
                found: expected,
            });
        }
        Ok(Self { phases })
    }

    #[inline]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Active phase for `progress`: intervals are half-open `[start, end)`
    /// except the last, which also owns `1.0`.
    pub fn index_for(&self, progress: f32) -> usize {
        self.phases
            .iter()
            .position(|p| progress < p.end)
            .unwrap_or(self.phases.len() - 1)
    }

    /// Select the active phase and compute its per-phase inputs.
    pub fn sample(&self, progress: f32, elapsed: f32, hovered: bool) -> (usize, PhaseInput) {
        let progress = progress.clamp(0.0, 1.0);
        let index = self.index_for(progress);
        let phase = &self.phases[index];
        let local_t = phase.local_t(progress);
        (
            index,
            PhaseInput {
                progress,
                local_t,
                eased: phase.easing.apply(local_t),
                elapsed,
                hovered,
            },
        )
    }
}
