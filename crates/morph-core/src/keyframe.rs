//! Procedural keyframe layouts.
//!
//! Every generator writes exactly `count` points. Ring- and bar-based layouts
//! distribute `count / rings` points per ring; any remainder is clamped to the
//! last generated point so no slot is left at the origin and nothing is
//! written past `count`.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

/// Fixed-length, immutable ordered set of 3D points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Interleaved `x, y, z` copy, length `3 * len()`.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            out.extend_from_slice(&[p.x, p.y, p.z]);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Sphere,
    Spiral,
    Disc,
    Wave,
}

/// Sphere with a rippled surface ("blob").
#[derive(Clone, Debug, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub rings: usize,
    /// Multiplier on the summed surface ripples; 0 gives a perfect sphere.
    pub surface_detail: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            rings: SPHERE_RINGS,
            surface_detail: 1.0,
        }
    }
}

/// Receding helix whose radius pinches in the middle ("tunnel").
#[derive(Clone, Debug, PartialEq)]
pub struct SpiralParams {
    pub turns: f32,
    pub length: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub wave_amplitude: f32,
    pub noise: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            turns: TUNNEL_TURNS,
            length: TUNNEL_LENGTH,
            outer_radius: TUNNEL_OUTER_RADIUS,
            inner_radius: TUNNEL_INNER_RADIUS,
            wave_amplitude: TUNNEL_WAVE_AMPLITUDE,
            noise: TUNNEL_NOISE_AMPLITUDE,
        }
    }
}

/// Plane a flat layout lies in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscPlane {
    /// Horizontal, `y = 0`.
    #[default]
    Xz,
    /// Facing the default camera, `z = 0`.
    Xy,
}

impl DiscPlane {
    /// Place polar coordinates `(cos, sin) * r` on the plane, `lift` along its normal.
    #[inline]
    pub fn place(self, angle: f32, r: f32, lift: f32) -> Vec3 {
        match self {
            DiscPlane::Xz => Vec3::new(angle.cos() * r, lift, angle.sin() * r),
            DiscPlane::Xy => Vec3::new(angle.cos() * r, angle.sin() * r, lift),
        }
    }
}

/// Flat concentric rings ("vinyl").
#[derive(Clone, Debug, PartialEq)]
pub struct DiscParams {
    pub rings: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Upper bound of the random outward radius offset.
    pub jitter: f32,
    /// Upper bound of the random angular offset, radians.
    pub angle_jitter: f32,
    pub plane: DiscPlane,
}

impl Default for DiscParams {
    fn default() -> Self {
        Self {
            rings: VINYL_RINGS,
            inner_radius: VINYL_INNER_RADIUS,
            outer_radius: VINYL_OUTER_RADIUS,
            jitter: VINYL_JITTER,
            angle_jitter: 0.0,
            plane: DiscPlane::Xz,
        }
    }
}

/// Row of vertical equalizer bars.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveParams {
    pub bars: usize,
    pub width: f32,
    pub height_scale: f32,
    pub x_jitter: f32,
    pub z_jitter: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            bars: WAVE_BARS,
            width: WAVE_WIDTH,
            height_scale: 1.0,
            x_jitter: 0.05,
            z_jitter: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    Sphere(SphereParams),
    Spiral(SpiralParams),
    Disc(DiscParams),
    Wave(WaveParams),
}

impl Layout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Layout::Sphere(_) => LayoutKind::Sphere,
            Layout::Spiral(_) => LayoutKind::Spiral,
            Layout::Disc(_) => LayoutKind::Disc,
            Layout::Wave(_) => LayoutKind::Wave,
        }
    }
}

/// Generate `count` points for `layout`. Jitter terms draw from a `StdRng`
/// seeded with `seed`, so the output is reproducible per seed.
pub fn generate(layout: &Layout, count: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(count);
    match layout {
        Layout::Sphere(p) => sphere(p, count, &mut points),
        Layout::Spiral(p) => spiral(p, count, &mut rng, &mut points),
        Layout::Disc(p) => disc(p, count, &mut rng, &mut points),
        Layout::Wave(p) => wave(p, count, &mut rng, &mut points),
    }
    clamp_remainder(&mut points, count);
    log::debug!(
        "[keyframe] {:?} generated {} points (seed {})",
        layout.kind(),
        points.len(),
        seed
    );
    PointCloud::from_points(points)
}

/// Rings actually used and points per ring for a ring-based layout.
#[inline]
fn ring_slots(count: usize, rings: usize) -> (usize, usize) {
    let used = rings.max(1).min(count.max(1));
    (used, count / used)
}

fn clamp_remainder(points: &mut Vec<Vec3>, count: usize) {
    points.truncate(count);
    if let Some(&last) = points.last() {
        points.resize(count, last);
    }
}

#[inline]
fn surface_ripple(phi: f32, theta: f32) -> f32 {
    let latitudinal = (phi * 5.0).sin() * 0.25;
    let diagonal = (theta * 4.0 + phi * 3.0).sin() * 0.2;
    let crossed = (theta * 6.0).cos() * (phi * 6.0).sin() * 0.15;
    let fine = (theta * 10.0 + phi * 10.0).sin() * 0.08;
    let blob = (phi * 3.0).cos() * (theta * 3.0).sin() * 0.12;
    latitudinal + diagonal + crossed + fine + blob
}

#[inline]
pub(crate) fn spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

fn sphere(p: &SphereParams, count: usize, out: &mut Vec<Vec3>) {
    let (rings, per_ring) = ring_slots(count, p.rings);
    let phi_den = (rings.saturating_sub(1)).max(1) as f32;
    for ring in 0..rings {
        let phi = ring as f32 / phi_den * PI;
        for i in 0..per_ring {
            let theta = i as f32 / per_ring as f32 * TAU;
            let radius = p.radius + p.surface_detail * surface_ripple(phi, theta);
            out.push(spherical(radius, phi, theta));
        }
    }
}

fn spiral(p: &SpiralParams, count: usize, rng: &mut StdRng, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let t = i as f32 / count as f32;
        let angle = t * TAU * p.turns;
        let bell = (t * PI).sin();
        let radius = p.outer_radius - bell * (p.outer_radius - p.inner_radius);
        let wave = (angle * 3.0).sin() * p.wave_amplitude;
        let noise = (rng.gen::<f32>() - 0.5) * p.noise;
        let r = radius + wave + noise;
        out.push(Vec3::new(angle.cos() * r, angle.sin() * r, -t * p.length));
    }
}

fn disc(p: &DiscParams, count: usize, rng: &mut StdRng, out: &mut Vec<Vec3>) {
    let (rings, per_ring) = ring_slots(count, p.rings);
    for ring in 0..rings {
        let span = p.outer_radius - p.inner_radius;
        let radius = p.inner_radius + ring as f32 / rings as f32 * span;
        for i in 0..per_ring {
            let angle = i as f32 / per_ring as f32 * TAU + rng.gen::<f32>() * p.angle_jitter;
            let r = radius + rng.gen::<f32>() * p.jitter;
            out.push(p.plane.place(angle, r, 0.0));
        }
    }
}

fn wave(p: &WaveParams, count: usize, rng: &mut StdRng, out: &mut Vec<Vec3>) {
    let (bars, per_bar) = ring_slots(count, p.bars);
    for bar in 0..bars {
        let x = (bar as f32 / bars as f32 - 0.5) * p.width;
        let b = bar as f32;
        let bar_height =
            ((b * 0.5).sin() * 0.5 + (b * 0.3).sin() * 0.3 + 0.5) * 2.0 * p.height_scale;
        for i in 0..per_bar {
            let ratio = i as f32 / per_bar as f32;
            out.push(Vec3::new(
                x + (rng.gen::<f32>() - 0.5) * p.x_jitter,
                (ratio - 0.5) * bar_height,
                (rng.gen::<f32>() - 0.5) * p.z_jitter,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_slots_never_exceed_count() {
        assert_eq!(ring_slots(1200, 100), (100, 12));
        assert_eq!(ring_slots(7, 100), (7, 1));
        assert_eq!(ring_slots(0, 100), (1, 0));
        assert_eq!(ring_slots(10, 0), (1, 10));
    }

    #[test]
    fn remainder_repeats_last_point() {
        let mut pts = vec![Vec3::X, Vec3::Y];
        clamp_remainder(&mut pts, 4);
        assert_eq!(pts, vec![Vec3::X, Vec3::Y, Vec3::Y, Vec3::Y]);
        let mut empty: Vec<Vec3> = Vec::new();
        clamp_remainder(&mut empty, 3);
        assert!(empty.is_empty());
    }
}
