use glam::Vec3;

/// Blend curve applied to a phase's local progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Cubic Hermite `t²(3 − 2t)`: zero velocity at both ends of a phase.
    #[default]
    Smoothstep,
    Linear,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Smoothstep => smoothstep(t),
            Easing::Linear => t.clamp(0.0, 1.0),
        }
    }
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Exponential follow step: `value += (target - value) * factor`.
#[inline]
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

#[inline]
pub fn approach_vec3(value: Vec3, target: Vec3, factor: f32) -> Vec3 {
    value + (target - value) * factor
}

/// Linear remap of `x` from `[in_min, in_max]` to `[out_min, out_max]` (unclamped).
#[inline]
pub fn map_linear(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() < crate::constants::WIDTH_EPSILON {
        return out_min;
    }
    out_min + (x - in_min) * (out_max - out_min) / span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn map_linear_degenerate_range_returns_low_output() {
        assert_eq!(map_linear(3.0, 1.0, 1.0, 0.6, 1.2), 0.6);
        assert!((map_linear(-2.5, -5.0, 0.0, 0.6, 1.2) - 0.9).abs() < 1e-6);
    }
}
