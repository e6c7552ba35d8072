//! Ready-made scroll scenes.
//!
//! Every scene is the same [`Animator`] with a different keyframe set and
//! phase table; nothing here is scene-specific code beyond the choreography
//! functions plugged into each phase's [`Motion`].

use crate::accents::{edge_points, label_points, TrackPin, DEFAULT_TRACK_PINS};
use crate::animator::{Animator, AnimatorTuning};
use crate::constants::*;
use crate::easing::{smoothstep, Easing};
use crate::error::ConfigError;
use crate::keyframe::{
    generate, DiscParams, DiscPlane, Layout, PointCloud, SphereParams, SpiralParams, WaveParams,
};
use crate::keyframe_set::KeyframeSet;
use crate::phase::{Blend, Motion, Oscillation, Phase, PhaseInput, PhaseTable};
use crate::progress::Travel;
use crate::state::Lens;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Rippling sphere -> receding tunnel -> flat vinyl, camera flies through.
    SoundToVinyl,
    /// Equalizer bars -> vinyl facing the camera.
    WaveToVinyl,
    /// Single spinning record with track pins; hover slows the spin.
    SpinningDisc,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sound" | "morph" => Some(Preset::SoundToVinyl),
            "wave" => Some(Preset::WaveToVinyl),
            "disc" => Some(Preset::SpinningDisc),
            _ => None,
        }
    }

    pub fn default_point_count(self) -> usize {
        match self {
            Preset::SoundToVinyl => SOUND_POINT_COUNT,
            Preset::WaveToVinyl => WAVE_POINT_COUNT,
            Preset::SpinningDisc => DISC_GROOVE_RINGS * DISC_GROOVE_POINTS_PER_RING,
        }
    }

    /// Build the scene with `point_count` points per keyframe (preset default
    /// when `None`).
    pub fn build(self, point_count: Option<usize>, seed: u64) -> Result<ScrollScene, ConfigError> {
        let n = point_count.unwrap_or_else(|| self.default_point_count());
        log::info!("[scene] building {:?} with {} points", self, n);
        match self {
            Preset::SoundToVinyl => sound_to_vinyl(n, seed),
            Preset::WaveToVinyl => wave_to_vinyl(n, seed),
            Preset::SpinningDisc => spinning_disc(n, seed),
        }
    }
}

/// An animator plus everything the front-end needs to drive and draw it.
pub struct ScrollScene {
    pub animator: Animator,
    pub travel: Travel,
    pub lens: Lens,
    /// Non-morphing overlay (label, rim, pins), drawn with the accent transform.
    pub accent: PointCloud,
    /// Hover targets, in disc-local coordinates via [`TrackPin::position`].
    pub pins: &'static [TrackPin],
    pub disc_radius: f32,
}

// ---------------- Sound -> tunnel -> vinyl ----------------

const SOUND_CAMERA_Z: f32 = 8.0;
const TUNNEL_EXIT_Z: f32 = -15.0;
const TUNNEL_LOOK_AHEAD: f32 = 8.0;

fn origin(_: &PhaseInput) -> Vec3 {
    Vec3::ZERO
}

fn sound_eye(p: &PhaseInput) -> Vec3 {
    let idle = 1.0 - p.eased;
    Vec3::new(
        (p.elapsed * 0.3).cos() * 0.2 * idle,
        (p.elapsed * 0.5).sin() * 0.2 * idle,
        SOUND_CAMERA_Z,
    )
}

fn sound_tilt(p: &PhaseInput) -> Vec3 {
    // Second half of the phase leans the cloud toward the tunnel orientation.
    Vec3::new(FRAC_PI_2 * smoothstep((p.local_t - 0.5) * 2.0), 0.0, 0.0)
}

fn sound_spin(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.08, 0.12, 0.0)
}

fn sound_opacity(_: &PhaseInput) -> f32 {
    0.85
}

fn label_fade(p: &PhaseInput) -> f32 {
    (p.progress - LABEL_FADE_START) * LABEL_FADE_RATE
}

fn label_grow(p: &PhaseInput) -> f32 {
    ((p.progress - LABEL_GROW_START) * LABEL_GROW_RATE).max(0.0)
}

#[inline]
fn tunnel_envelope(t: f32) -> f32 {
    4.0 * t * (1.0 - t)
}

fn tunnel_z(p: &PhaseInput) -> f32 {
    SOUND_CAMERA_Z + p.eased * (TUNNEL_EXIT_Z - SOUND_CAMERA_Z)
}

fn tunnel_eye(p: &PhaseInput) -> Vec3 {
    let env = tunnel_envelope(p.local_t);
    let swirl = p.local_t * TAU;
    Vec3::new(swirl.sin() * 0.3 * env, swirl.cos() * 0.3 * env, tunnel_z(p))
}

fn tunnel_look_at(p: &PhaseInput) -> Vec3 {
    let env = tunnel_envelope(p.local_t);
    Vec3::new(
        (p.elapsed * 2.0).sin() * 0.1 * env,
        (p.elapsed * 1.5).cos() * 0.1 * env,
        tunnel_z(p) - TUNNEL_LOOK_AHEAD,
    )
}

fn tunnel_tilt(_: &PhaseInput) -> Vec3 {
    Vec3::new(FRAC_PI_2, 0.0, 0.0)
}

fn tunnel_spin(p: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 0.3 * (1.0 + p.local_t))
}

fn vinyl_eye(p: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, p.eased * 3.0, TUNNEL_EXIT_Z + p.eased * 19.0)
}

fn vinyl_look_at(p: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, TUNNEL_EXIT_Z - TUNNEL_LOOK_AHEAD).lerp(Vec3::ZERO, p.eased)
}

fn vinyl_tilt(p: &PhaseInput) -> Vec3 {
    Vec3::new(FRAC_PI_2 * (1.0 - p.eased) - 0.4 * PI * p.eased, 0.0, 0.0)
}

fn vinyl_spin(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 0.2)
}

fn sound_to_vinyl(n: usize, seed: u64) -> Result<ScrollScene, ConfigError> {
    let keyframes = KeyframeSet::new()
        .with("sphere", generate(&Layout::Sphere(SphereParams::default()), n, seed))?
        .with("spiral", generate(&Layout::Spiral(SpiralParams::default()), n, seed ^ 1))?
        .with("vinyl", generate(&Layout::Disc(DiscParams::default()), n, seed ^ 2))?;

    let base = Motion {
        opacity: sound_opacity,
        accent_opacity: label_fade,
        accent_scale: label_grow,
        ..Motion::default()
    };
    let phases = PhaseTable::new([
        Phase::new(
            "sound",
            0.0,
            SOUND_PHASE_END,
            Blend::Morph { from: "sphere", to: "spiral" },
        )
        .with_motion(Motion {
            eye: sound_eye,
            look_at: origin,
            tilt: sound_tilt,
            spin: sound_spin,
            ..base
        }),
        Phase::new("tunnel", SOUND_PHASE_END, TUNNEL_PHASE_END, Blend::Hold("spiral"))
            .with_oscillation(Oscillation::VerticalSway {
                amplitude: 0.05,
                frequency: 2.0,
                spatial: 1.5,
                settle: 1.0,
            })
            .with_motion(Motion {
                eye: tunnel_eye,
                look_at: tunnel_look_at,
                tilt: tunnel_tilt,
                spin: tunnel_spin,
                ..base
            }),
        Phase::new(
            "vinyl",
            TUNNEL_PHASE_END,
            1.0,
            Blend::Morph { from: "spiral", to: "vinyl" },
        )
        .with_motion(Motion {
            eye: vinyl_eye,
            look_at: vinyl_look_at,
            tilt: vinyl_tilt,
            spin: vinyl_spin,
            ..base
        }),
    ])?;

    let animator = Animator::new(
        keyframes,
        phases,
        AnimatorTuning {
            initial_spin: Vec3::new(0.08, 0.12, 0.0),
            ..AnimatorTuning::default()
        },
    )?;
    Ok(ScrollScene {
        animator,
        travel: Travel::Viewports(SOUND_TRAVEL_VIEWPORTS),
        lens: Lens::default(),
        accent: label_points(12, 25, 0.23, 0.01, DiscPlane::Xz),
        pins: &[],
        disc_radius: VINYL_OUTER_RADIUS,
    })
}

// ---------------- Wave -> vinyl ----------------

fn wave_eye(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 5.0)
}

fn wave_tilt(p: &PhaseInput) -> Vec3 {
    Vec3::new(-0.3 * p.progress, 0.0, 0.0)
}

fn wave_spin(p: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 0.0, 0.1 * p.progress)
}

fn wave_opacity(_: &PhaseInput) -> f32 {
    0.9
}

fn wave_label_fade(p: &PhaseInput) -> f32 {
    (p.progress - WAVE_LABEL_FADE_START) * WAVE_LABEL_FADE_RATE
}

fn wave_label_grow(p: &PhaseInput) -> f32 {
    p.progress
}

fn wave_to_vinyl(n: usize, seed: u64) -> Result<ScrollScene, ConfigError> {
    let vinyl = DiscParams {
        inner_radius: 0.3,
        outer_radius: VINYL_OUTER_RADIUS,
        jitter: 0.02,
        plane: DiscPlane::Xy,
        ..DiscParams::default()
    };
    let keyframes = KeyframeSet::new()
        .with("wave", generate(&Layout::Wave(WaveParams::default()), n, seed))?
        .with("vinyl", generate(&Layout::Disc(vinyl), n, seed ^ 2))?;
    let phases = PhaseTable::new([Phase::new(
        "wave",
        0.0,
        1.0,
        Blend::Morph { from: "wave", to: "vinyl" },
    )
    .with_easing(Easing::Linear)
    .with_motion(Motion {
        eye: wave_eye,
        look_at: origin,
        tilt: wave_tilt,
        spin: wave_spin,
        opacity: wave_opacity,
        accent_opacity: wave_label_fade,
        accent_scale: wave_label_grow,
        ..Motion::default()
    })])?;

    let animator = Animator::new(keyframes, phases, AnimatorTuning::default())?;
    Ok(ScrollScene {
        animator,
        travel: Travel::Viewports(WAVE_TRAVEL_VIEWPORTS),
        lens: Lens {
            fovy_degrees: 50.0,
            ..Lens::default()
        },
        accent: label_points(15, 30, 0.28, 0.01, DiscPlane::Xy),
        pins: &[],
        disc_radius: VINYL_OUTER_RADIUS,
    })
}

// ---------------- Spinning disc ----------------

fn disc_eye(_: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, 2.0, 4.0)
}

fn disc_tilt(p: &PhaseInput) -> Vec3 {
    Vec3::new(-0.5 + p.progress * 1.2, 0.0, 0.0)
}

fn disc_spin(p: &PhaseInput) -> Vec3 {
    let speed = if p.hovered {
        DISC_HOVER_SPIN
    } else {
        DISC_IDLE_SPIN + p.progress * DISC_SCROLL_SPIN
    };
    Vec3::new(0.0, speed, 0.0)
}

fn disc_scale(p: &PhaseInput) -> f32 {
    0.6 + p.progress * 2.0
}

fn disc_offset(p: &PhaseInput) -> Vec3 {
    Vec3::new(0.0, -0.5 + p.progress * 3.0, -2.0 + p.progress * 4.0)
}

fn disc_opacity(_: &PhaseInput) -> f32 {
    0.5
}

fn disc_accent_opacity(_: &PhaseInput) -> f32 {
    0.9
}

/// Small ring marker around each pin.
fn pin_markers(pins: &[TrackPin], disc_radius: f32) -> Vec<Vec3> {
    const MARKER_RADIUS: f32 = 0.03;
    const MARKER_POINTS: usize = 16;
    let mut out = Vec::with_capacity(pins.len() * (MARKER_POINTS + 1));
    for pin in pins {
        let center = pin.position(disc_radius);
        out.push(center);
        for i in 0..MARKER_POINTS {
            let a = i as f32 / MARKER_POINTS as f32 * TAU;
            out.push(center + DiscPlane::Xz.place(a, MARKER_RADIUS, 0.0));
        }
    }
    out
}

fn spinning_disc(n: usize, seed: u64) -> Result<ScrollScene, ConfigError> {
    let radius = SPIN_DISC_RADIUS;
    let grooves = DiscParams {
        rings: DISC_GROOVE_RINGS,
        inner_radius: radius * 0.25,
        outer_radius: radius * 0.95,
        jitter: 0.003,
        angle_jitter: 0.02,
        plane: DiscPlane::Xz,
    };
    let keyframes = KeyframeSet::new().with("grooves", generate(&Layout::Disc(grooves), n, seed))?;
    // Grooves shimmer faintly once the record is on screen
    let phases = PhaseTable::new([Phase::new("spin", 0.0, 1.0, Blend::Hold("grooves"))
        .with_oscillation(Oscillation::SphereRipple {
            amplitude: 0.02,
            settle: 0.0,
        })
        .with_motion(Motion {
            eye: disc_eye,
            look_at: origin,
            tilt: disc_tilt,
            spin: disc_spin,
            opacity: disc_opacity,
            accent_opacity: disc_accent_opacity,
            scale: disc_scale,
            offset: disc_offset,
            ..Motion::default()
        })])?;
    let animator = Animator::new(
        keyframes,
        phases,
        AnimatorTuning {
            initial_spin: Vec3::new(0.0, 0.15, 0.0),
            transform_smoothing: Some(DISC_TRANSFORM_SMOOTHING),
            ..AnimatorTuning::default()
        },
    )?;

    let mut accent: Vec<Vec3> = label_points(15, 40, radius * 0.22, 0.01, DiscPlane::Xz)
        .points()
        .to_vec();
    accent.extend_from_slice(edge_points(radius, 3, 200, 0.008).points());
    accent.extend(pin_markers(&DEFAULT_TRACK_PINS, radius));

    Ok(ScrollScene {
        animator,
        travel: Travel::SectionFraction(DISC_TRAVEL_SECTION_FRACTION),
        lens: Lens::default(),
        accent: PointCloud::from_points(accent),
        pins: &DEFAULT_TRACK_PINS,
        disc_radius: radius,
    })
}
