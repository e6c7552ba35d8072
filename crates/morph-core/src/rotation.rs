use crate::easing::approach_vec3;
use glam::Vec3;

/// Per-axis continuous spin, the one piece of state carried from frame to
/// frame. Speeds chase their target by a fixed blend factor so toggling the
/// target (hover on/off) never snaps; angles integrate `speed * dt`.
#[derive(Clone, Debug)]
pub struct SpinAccumulator {
    angle: Vec3,
    speed: Vec3,
    smoothing: f32,
}

impl SpinAccumulator {
    pub fn new(initial_speed: Vec3, smoothing: f32) -> Self {
        Self {
            angle: Vec3::ZERO,
            speed: initial_speed,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Blend speed toward `target_speed`, then advance the angle by `dt` seconds.
    pub fn step(&mut self, dt: f32, target_speed: Vec3) -> Vec3 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if target_speed.is_finite() {
            self.speed = approach_vec3(self.speed, target_speed, self.smoothing);
        }
        self.angle += self.speed * dt;
        self.angle
    }

    #[inline]
    pub fn angle(&self) -> Vec3 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> Vec3 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut spin = SpinAccumulator::new(Vec3::new(0.0, 1.0, 0.0), 0.5);
        spin.step(0.5, Vec3::new(0.0, 1.0, 0.0));
        let before = spin.angle();
        spin.step(-1.0, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(spin.angle(), before);
    }
}
