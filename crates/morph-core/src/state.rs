//! Per-frame output handed to the renderer, plus the camera description it
//! is viewed through.
//!
//! These types avoid platform-specific APIs; the web frontend turns them into
//! GPU uniforms and instance buffers.

use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

/// Perspective lens; the aspect ratio comes from the canvas at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(pose: CameraPose, lens: Lens, aspect: f32) -> Self {
        Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: lens.fovy_degrees.to_radians(),
            znear: lens.znear,
            zfar: lens.zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through pixel `(sx, sy)` of a `width` x `height` target.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize_or_zero();
        (self.eye, rd)
    }
}

/// Everything the renderer needs for one frame.
///
/// `positions` is the interleaved `x, y, z` buffer of length `3 * N`; it is
/// rewritten in place and flagged dirty whenever a new frame is produced.
#[derive(Clone, Debug)]
pub struct FrameState {
    pub positions: Vec<f32>,
    /// Per-point alpha multiplier, length `N`.
    pub point_alpha: Vec<f32>,
    /// Euler XYZ radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub offset: Vec3,
    pub opacity: f32,
    pub accent_opacity: f32,
    pub accent_scale: f32,
    pub camera: CameraPose,
    pub progress: f32,
    pub phase: usize,
    dirty: bool,
}

impl FrameState {
    pub fn new(point_count: usize) -> Self {
        Self {
            positions: vec![0.0; point_count * 3],
            point_alpha: vec![1.0; point_count],
            rotation: Vec3::ZERO,
            scale: 1.0,
            offset: Vec3::ZERO,
            opacity: 1.0,
            accent_opacity: 0.0,
            accent_scale: 1.0,
            camera: CameraPose::default(),
            progress: 0.0,
            phase: 0,
            dirty: true,
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_alpha.len()
    }

    #[inline]
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let i = index * 3;
        self.positions
            .get(i..i + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the buffers changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.offset)
    }

    /// Model matrix for the accent layer, which shares the main transform.
    pub fn accent_matrix(&self) -> Mat4 {
        self.model_matrix() * Mat4::from_scale(Vec3::splat(self.accent_scale))
    }
}
