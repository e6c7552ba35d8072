use morph_core::ScrollSample;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Trimmed, non-empty attribute value.
pub fn attr(el: &web::Element, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// How far `section`'s top has scrolled above the viewport top, with the
/// sizes [`morph_core::Travel`] resolves against. `None` once the section
/// has left the document or the window is gone.
pub fn scroll_sample(section: &web::Element) -> Option<ScrollSample> {
    if !section.is_connected() {
        return None;
    }
    let window = web::window()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let rect = section.get_bounding_client_rect();
    Some(ScrollSample {
        scrolled_px: -rect.top() as f32,
        viewport_height: viewport_height as f32,
        section_height: rect.height() as f32,
    })
}
