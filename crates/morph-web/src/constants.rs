// Front-end tuning: colours, sprite sizes and DOM hooks.

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

// Sprite sizes in world units
pub const POINT_SIZE: f32 = 0.03;
pub const ACCENT_POINT_SIZE: f32 = 0.025;
pub const CARD_POINT_SIZE: f32 = 0.035;

pub const POINT_COLOR: [f32; 4] = [0.92, 0.9, 0.86, 1.0];
pub const ACCENT_COLOR: [f32; 4] = [1.0, 0.42, 0.2, 1.0];
pub const PIN_HOVER_RADIUS: f32 = 0.12; // pick sphere around each pin, disc-local

// Canvas data attributes
pub const ATTR_SCENE: &str = "data-scene";
pub const ATTR_SECTION: &str = "data-section";
pub const ATTR_POINTS: &str = "data-points";
pub const ATTR_SEED: &str = "data-seed";

pub const DEFAULT_SEED: u64 = 42;
// Elapsed-time step cap; tab switches otherwise produce one huge spin jump
pub const MAX_FRAME_DT: f32 = 0.1;
