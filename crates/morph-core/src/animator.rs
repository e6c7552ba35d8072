//! Scroll-phase animator.
//!
//! Each frame maps scroll progress to the active phase, blends that phase's
//! keyframes pointwise into the interleaved position buffer and derives the
//! camera, rotation and opacity from the phase's [`Motion`](crate::Motion)
//! row. Progress is passed in explicitly every frame; the animator never
//! reads a shared global.

use crate::constants::SPIN_SMOOTHING;
use crate::easing::{approach, approach_vec3};
use crate::error::{check_unit_factor, ConfigError};
use crate::keyframe_set::KeyframeSet;
use crate::phase::{Blend, Oscillation, PhaseTable};
use crate::rotation::SpinAccumulator;
use crate::state::{CameraPose, FrameState};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorTuning {
    /// Per-frame blend of spin speed toward its phase target.
    pub spin_smoothing: f32,
    /// Spin speed at construction, so the first frames do not ramp up from rest.
    pub initial_spin: Vec3,
    /// When set, tilt/scale/offset chase their phase targets by this factor
    /// instead of following them exactly.
    pub transform_smoothing: Option<f32>,
}

impl Default for AnimatorTuning {
    fn default() -> Self {
        Self {
            spin_smoothing: SPIN_SMOOTHING,
            initial_spin: Vec3::ZERO,
            transform_smoothing: None,
        }
    }
}

/// Per-frame inputs from the scroll source and the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// `None` when the reference element is unavailable this frame.
    pub progress: Option<f32>,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the scene started.
    pub elapsed: f32,
    pub hovered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Hold(usize),
    Morph(usize, usize),
}

#[derive(Clone, Debug)]
struct Transform {
    tilt: Vec3,
    scale: f32,
    offset: Vec3,
}

pub struct Animator {
    keyframes: KeyframeSet,
    phases: PhaseTable,
    sources: SmallVec<[Source; 4]>,
    tuning: AnimatorTuning,
    spin: SpinAccumulator,
    transform: Option<Transform>,
    state: FrameState,
}

impl Animator {
    pub fn new(
        keyframes: KeyframeSet,
        phases: PhaseTable,
        tuning: AnimatorTuning,
    ) -> Result<Self, ConfigError> {
        if keyframes.is_empty() {
            return Err(ConfigError::NoKeyframes);
        }
        check_unit_factor("spin_smoothing", tuning.spin_smoothing)?;
        if let Some(f) = tuning.transform_smoothing {
            check_unit_factor("transform_smoothing", f)?;
        }
        let resolve = |phase: &str, name: &str| {
            keyframes
                .index_of(name)
                .ok_or_else(|| ConfigError::UnknownKeyframe {
                    phase: phase.to_string(),
                    keyframe: name.to_string(),
                })
        };
        let mut sources = SmallVec::new();
        for phase in phases.phases() {
            sources.push(match phase.blend {
                Blend::Hold(name) => Source::Hold(resolve(phase.name, name)?),
                Blend::Morph { from, to } => {
                    Source::Morph(resolve(phase.name, from)?, resolve(phase.name, to)?)
                }
            });
        }

        let n = keyframes.point_count();
        let mut state = FrameState::new(n);
        let first = match sources[0] {
            Source::Hold(a) | Source::Morph(a, _) => a,
        };
        if let Some(cloud) = keyframes.get(first) {
            state.positions.copy_from_slice(&cloud.to_interleaved());
        }
        log::info!(
            "[animator] {} keyframes x {} points, {} phases ({})",
            keyframes.len(),
            n,
            phases.len(),
            phases
                .phases()
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Ok(Self {
            spin: SpinAccumulator::new(tuning.initial_spin, tuning.spin_smoothing),
            keyframes,
            phases,
            sources,
            tuning,
            transform: None,
            state,
        })
    }

    /// Produce the frame for `input`. When progress is unavailable (or not
    /// finite) the previous frame is returned untouched.
    pub fn frame(&mut self, input: &FrameInput) -> &FrameState {
        let Some(progress) = input.progress.filter(|p| p.is_finite()) else {
            log::debug!("[animator] progress unavailable; holding last frame");
            return &self.state;
        };
        let (index, pin) = self.phases.sample(progress, input.elapsed, input.hovered);
        let phase = &self.phases.phases()[index];
        let motion = phase.motion;

        let (from, to, t) = match self.sources[index] {
            Source::Hold(a) => (a, a, 0.0),
            Source::Morph(a, b) => (a, b, pin.eased),
        };
        if let (Some(a), Some(b)) = (self.keyframes.get(from), self.keyframes.get(to)) {
            let overlay = phase.oscillation.map(|o| (o, o.strength(pin.local_t, pin.eased)));
            blend_into(
                &mut self.state.positions,
                a.points(),
                b.points(),
                t,
                overlay,
                pin.elapsed,
            );
        }

        let target = Transform {
            tilt: (motion.tilt)(&pin),
            scale: (motion.scale)(&pin),
            offset: (motion.offset)(&pin),
        };
        let transform = match (self.transform.take(), self.tuning.transform_smoothing) {
            (Some(prev), Some(f)) => Transform {
                tilt: approach_vec3(prev.tilt, target.tilt, f),
                scale: approach(prev.scale, target.scale, f),
                offset: approach_vec3(prev.offset, target.offset, f),
            },
            _ => target,
        };
        let spin = self.spin.step(input.dt, (motion.spin)(&pin));

        let s = &mut self.state;
        s.rotation = transform.tilt + spin;
        s.scale = transform.scale;
        s.offset = transform.offset;
        s.camera = CameraPose {
            eye: (motion.eye)(&pin),
            target: (motion.look_at)(&pin),
        };
        s.opacity = (motion.opacity)(&pin).clamp(0.0, 1.0);
        s.accent_opacity = (motion.accent_opacity)(&pin).clamp(0.0, 1.0);
        s.accent_scale = (motion.accent_scale)(&pin).max(0.0);
        s.progress = pin.progress;
        s.phase = index;
        s.mark_dirty();
        self.transform = Some(transform);
        &self.state
    }

    #[inline]
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    #[inline]
    pub fn keyframes(&self) -> &KeyframeSet {
        &self.keyframes
    }

    #[inline]
    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.keyframes.point_count()
    }

    #[inline]
    pub fn spin(&self) -> &SpinAccumulator {
        &self.spin
    }
}

/// Pointwise convex blend `a[i] + (b[i] - a[i]) * t` written into the
/// interleaved buffer, with an optional oscillation applied to `a[i]` first.
fn blend_into(
    out: &mut [f32],
    a: &[Vec3],
    b: &[Vec3],
    t: f32,
    overlay: Option<(Oscillation, f32)>,
    elapsed: f32,
) {
    for ((dst, &pa), &pb) in out.chunks_exact_mut(3).zip(a).zip(b) {
        let src = match overlay {
            Some((osc, strength)) => osc.apply(pa, elapsed, strength),
            None => pa,
        };
        let p = if t >= 1.0 { pb } else { src + (pb - src) * t };
        dst[0] = p.x;
        dst[1] = p.y;
        dst[2] = p.z;
    }
}
