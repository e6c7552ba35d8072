use crate::constants::WIDTH_EPSILON;

/// Scroll distance that maps to progress 0 -> 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Travel {
    /// Multiples of the viewport height.
    Viewports(f32),
    /// Fraction of the reference section's own height.
    SectionFraction(f32),
    Pixels(f32),
}

impl Travel {
    pub fn distance_px(&self, viewport_height: f32, section_height: f32) -> f32 {
        match *self {
            Travel::Viewports(n) => viewport_height * n,
            Travel::SectionFraction(f) => section_height * f,
            Travel::Pixels(px) => px,
        }
    }
}

/// One read of the scroll source: how far the reference section's top has
/// moved above the viewport top, plus the sizes needed to resolve [`Travel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub scrolled_px: f32,
    pub viewport_height: f32,
    pub section_height: f32,
}

impl ScrollSample {
    pub fn progress(&self, travel: Travel) -> Option<f32> {
        let distance = travel.distance_px(self.viewport_height, self.section_height);
        scroll_progress(self.scrolled_px, distance)
    }
}

/// `clamp(scrolled / travel, 0, 1)`, with the denominator held at a small
/// epsilon. `None` when either input is not finite.
pub fn scroll_progress(scrolled_px: f32, travel_px: f32) -> Option<f32> {
    if !scrolled_px.is_finite() || !travel_px.is_finite() {
        return None;
    }
    let travel = travel_px.max(WIDTH_EPSILON);
    Some((scrolled_px / travel).clamp(0.0, 1.0))
}
