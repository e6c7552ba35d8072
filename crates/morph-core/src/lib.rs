pub mod accents;
pub mod animator;
pub mod constants;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod keyframe_set;
pub mod momentum;
pub mod phase;
pub mod picking;
pub mod presets;
pub mod progress;
pub mod rotation;
pub mod stack;
pub mod state;
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use accents::*;
pub use animator::*;
pub use easing::*;
pub use error::*;
pub use keyframe::*;
pub use keyframe_set::*;
pub use momentum::*;
pub use phase::*;
pub use picking::*;
pub use presets::*;
pub use progress::*;
pub use rotation::*;
pub use stack::*;
pub use state::*;
