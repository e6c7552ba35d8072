//! Accent layers drawn on top of a disc: centre label, rim and track pins.
//!
//! These clouds are never morphed, so their lengths are independent of the
//! animator's point count.

use crate::keyframe::{DiscPlane, PointCloud};
use glam::Vec3;
use std::f32::consts::TAU;

/// Filled centre label: ring `r` of `rings` sits at `r / rings * radius` and
/// carries `floor(base_points * r / rings)` points, `lift` above the disc plane.
pub fn label_points(
    rings: usize,
    base_points: usize,
    radius: f32,
    lift: f32,
    plane: DiscPlane,
) -> PointCloud {
    let mut points = Vec::new();
    for r in 1..=rings {
        let ring_radius = r as f32 / rings as f32 * radius;
        let in_ring = base_points * r / rings;
        for i in 0..in_ring {
            let angle = i as f32 / in_ring as f32 * TAU;
            points.push(plane.place(angle, ring_radius, lift));
        }
    }
    PointCloud::from_points(points)
}

/// A few tightly spaced rings at the disc rim.
pub fn edge_points(radius: f32, rings: usize, per_ring: usize, spacing: f32) -> PointCloud {
    let mut points = Vec::with_capacity(rings * per_ring);
    for r in 0..rings {
        let ring_radius = radius + r as f32 * spacing;
        for i in 0..per_ring {
            let angle = i as f32 / per_ring as f32 * TAU;
            points.push(DiscPlane::Xz.place(angle, ring_radius, 0.0));
        }
    }
    PointCloud::from_points(points)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPin {
    pub name: &'static str,
    pub angle_degrees: f32,
    /// Fraction of the disc radius.
    pub radius: f32,
}

pub const DEFAULT_TRACK_PINS: [TrackPin; 6] = [
    TrackPin { name: "Side A - Track 1", angle_degrees: 0.0, radius: 0.85 },
    TrackPin { name: "Side A - Track 2", angle_degrees: 45.0, radius: 0.75 },
    TrackPin { name: "Side A - Track 3", angle_degrees: 90.0, radius: 0.65 },
    TrackPin { name: "Side B - Track 1", angle_degrees: 180.0, radius: 0.85 },
    TrackPin { name: "Side B - Track 2", angle_degrees: 225.0, radius: 0.75 },
    TrackPin { name: "Side B - Track 3", angle_degrees: 270.0, radius: 0.65 },
];

pub const PIN_LIFT: f32 = 0.02;

impl TrackPin {
    /// Disc-local position of the pin.
    pub fn position(&self, disc_radius: f32) -> Vec3 {
        let rad = self.angle_degrees.to_radians();
        Vec3::new(
            rad.cos() * self.radius * disc_radius,
            PIN_LIFT,
            rad.sin() * self.radius * disc_radius,
        )
    }
}
