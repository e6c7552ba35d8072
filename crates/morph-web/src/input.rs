use crate::constants::PIN_HOVER_RADIUS;
use glam::Vec2;
use morph_core::{pick_nearest, Camera, FrameState, Lens, TrackPin};
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    /// Canvas backing-store pixels.
    pub x: f32,
    pub y: f32,
    pub inside: bool,
    pub down: bool,
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Index of the track pin under the pointer, tested against the pins as
/// currently placed by the accent transform.
pub fn hovered_pin(
    pointer: &PointerState,
    canvas: &web::HtmlCanvasElement,
    state: &FrameState,
    lens: Lens,
    pins: &[TrackPin],
    disc_radius: f32,
) -> Option<usize> {
    if !pointer.inside || pins.is_empty() {
        return None;
    }
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let camera = Camera::new(state.camera, lens, width / height.max(1.0));
    let (ro, rd) = camera.screen_ray(pointer.x, pointer.y, width, height);
    let model = state.accent_matrix();
    let radius = PIN_HOVER_RADIUS * state.scale * state.accent_scale;
    pick_nearest(
        ro,
        rd,
        pins.iter()
            .map(|pin| model.transform_point3(pin.position(disc_radius))),
        radius,
    )
}
