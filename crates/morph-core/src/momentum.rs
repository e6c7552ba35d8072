//! Velocity-damped follower for drag- and wheel-driven carousels.
//!
//! Pointer callbacks mutate `target`/`velocity`; the frame tick calls
//! [`MomentumFollower::step`], which decays velocity geometrically while no
//! drag is active and eases the rendered position toward the target.

use crate::constants::*;
use crate::easing::approach;
use crate::error::{check_unit_factor, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumTuning {
    /// Per-frame velocity multiplier while coasting, in (0, 1).
    pub friction: f32,
    /// Per-frame blend of the rendered position toward the target, in (0, 1].
    pub smoothing: f32,
    /// Target change per pixel of drag.
    pub drag_sensitivity: f32,
    /// Velocity per pixel of the latest drag delta.
    pub velocity_sensitivity: f32,
    /// Velocity impulse per wheel delta unit.
    pub wheel_sensitivity: f32,
}

impl Default for MomentumTuning {
    fn default() -> Self {
        Self {
            friction: CARD_FRICTION,
            smoothing: CARD_SMOOTHING,
            drag_sensitivity: CARD_DRAG_SENSITIVITY,
            velocity_sensitivity: CARD_VELOCITY_SENSITIVITY,
            wheel_sensitivity: CARD_WHEEL_SENSITIVITY,
        }
    }
}

impl MomentumTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::InvalidTuning {
                name: "friction",
                value: self.friction,
                reason: "must be in (0, 1)",
            });
        }
        check_unit_factor("smoothing", self.smoothing)
    }
}

#[derive(Clone, Debug)]
pub struct MomentumFollower {
    tuning: MomentumTuning,
    target: f32,
    position: f32,
    velocity: f32,
    dragging: bool,
    last_pointer: f32,
}

impl MomentumFollower {
    pub fn new(tuning: MomentumTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            target: 0.0,
            position: 0.0,
            velocity: 0.0,
            dragging: false,
            last_pointer: 0.0,
        })
    }

    pub fn pointer_down(&mut self, pointer: f32) {
        self.dragging = true;
        self.last_pointer = pointer;
        self.velocity = 0.0;
    }

    pub fn pointer_move(&mut self, pointer: f32) {
        if !self.dragging || !pointer.is_finite() {
            return;
        }
        let delta = pointer - self.last_pointer;
        self.target += delta * self.tuning.drag_sensitivity;
        self.velocity = delta * self.tuning.velocity_sensitivity;
        self.last_pointer = pointer;
    }

    /// Ends a drag; also used for pointer-leave.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn wheel(&mut self, delta: f32) {
        if delta.is_finite() {
            self.velocity += delta * self.tuning.wheel_sensitivity;
        }
    }

    /// Advance one frame and return the eased position.
    pub fn step(&mut self) -> f32 {
        if !self.dragging {
            self.velocity *= self.tuning.friction;
            self.target += self.velocity;
        }
        self.position = approach(self.position, self.target, self.tuning.smoothing);
        self.position
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
