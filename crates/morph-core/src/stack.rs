//! Card-stack carousel: a vertical loop of cards scrolled by drag and wheel
//! momentum, rendered as point grids through the same [`FrameState`] the
//! scroll animator produces.

use crate::constants::*;
use crate::easing::map_linear;
use crate::error::ConfigError;
use crate::momentum::{MomentumFollower, MomentumTuning};
use crate::state::{CameraPose, FrameState, Lens};
use glam::{EulerRot, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStack {
    pub count: usize,
    pub spacing: f32,
    /// Stack travel per unit of follower position.
    pub scroll_scale: f32,
    /// Lowest y a card reaches before wrapping back to the top.
    pub wrap_floor: f32,
}

impl Default for CardStack {
    fn default() -> Self {
        Self {
            count: CARD_COUNT,
            spacing: CARD_SPACING,
            scroll_scale: CARD_SCROLL_SCALE,
            wrap_floor: CARD_WRAP_FLOOR,
        }
    }
}

/// Placement of one card for the current scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub position: Vec3,
    /// Euler XYZ radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl CardStack {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidTuning {
                name: "count",
                value: 0.0,
                reason: "stack needs at least one card",
            });
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ConfigError::InvalidTuning {
                name: "spacing",
                value: self.spacing,
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Height of one full loop of the stack.
    #[inline]
    pub fn span(&self) -> f32 {
        self.count as f32 * self.spacing
    }

    pub fn pose(&self, index: usize, scroll: f32) -> CardPose {
        let raw = index as f32 * self.spacing - scroll * self.scroll_scale;
        let y = (raw - self.wrap_floor).rem_euclid(self.span()) + self.wrap_floor;
        let z = -y.abs() * 0.8 - 1.0;
        CardPose {
            position: Vec3::new(0.0, y, z),
            rotation: Vec3::new(0.5, 0.0, (y + 1.0).max(0.0) * 0.15 * 0.1),
            scale: map_linear(z, -5.0, 0.0, 0.6, 1.2).max(0.3),
            opacity: (1.0 - y.abs() * 0.15).clamp(0.2, 1.0),
        }
    }
}

/// Evenly spaced `grid` x `grid` points on a square card of side `size`,
/// centred on the origin in the XY plane.
pub fn card_grid(grid: usize, size: f32) -> Vec<Vec3> {
    let grid = grid.max(2);
    let step = size / (grid - 1) as f32;
    let half = size * 0.5;
    let mut points = Vec::with_capacity(grid * grid);
    for row in 0..grid {
        for col in 0..grid {
            points.push(Vec3::new(
                col as f32 * step - half,
                row as f32 * step - half,
                0.0,
            ));
        }
    }
    points
}

pub struct StackAnimator {
    stack: CardStack,
    follower: MomentumFollower,
    card: Vec<Vec3>,
    state: FrameState,
}

impl StackAnimator {
    pub const CAMERA: CameraPose = CameraPose {
        eye: Vec3::new(0.0, 3.0, 4.0),
        target: Vec3::new(0.0, 0.0, -2.0),
    };

    pub fn new(stack: CardStack, tuning: MomentumTuning) -> Result<Self, ConfigError> {
        stack.validate()?;
        let follower = MomentumFollower::new(tuning)?;
        let card = card_grid(CARD_GRID, CARD_SIZE);
        let mut state = FrameState::new(stack.count * card.len());
        state.camera = Self::CAMERA;
        log::info!(
            "[stack] {} cards x {} points, spacing {}",
            stack.count,
            card.len(),
            stack.spacing
        );
        let mut animator = Self {
            stack,
            follower,
            card,
            state,
        };
        animator.layout(0.0);
        Ok(animator)
    }

    pub fn lens() -> Lens {
        Lens {
            fovy_degrees: 50.0,
            ..Lens::default()
        }
    }

    /// Input side of the carousel; pointer and wheel events go here.
    #[inline]
    pub fn follower_mut(&mut self) -> &mut MomentumFollower {
        &mut self.follower
    }

    #[inline]
    pub fn follower(&self) -> &MomentumFollower {
        &self.follower
    }

    #[inline]
    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    #[inline]
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    /// Advance the momentum one frame and lay the cards out at the new scroll.
    pub fn frame(&mut self) -> &FrameState {
        let scroll = self.follower.step();
        self.layout(scroll);
        &self.state
    }

    fn layout(&mut self, scroll: f32) {
        let per_card = self.card.len();
        for index in 0..self.stack.count {
            let pose = self.stack.pose(index, scroll);
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                pose.rotation.x,
                pose.rotation.y,
                pose.rotation.z,
            );
            let base = index * per_card;
            let dst = &mut self.state.positions[base * 3..(base + per_card) * 3];
            for (out, &p) in dst.chunks_exact_mut(3).zip(&self.card) {
                let w = rotation * (p * pose.scale) + pose.position;
                out[0] = w.x;
                out[1] = w.y;
                out[2] = w.z;
            }
            self.state.point_alpha[base..base + per_card].fill(pose.opacity);
        }
        self.state.progress = scroll;
        self.state.mark_dirty();
    }
}
