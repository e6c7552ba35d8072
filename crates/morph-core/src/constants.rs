// Shared tuning constants for the morph scenes.
//
// Phase boundaries are kept exactly as the scenes were tuned by eye; they are
// configuration, not derived values.

// Scroll phases (sound -> tunnel -> vinyl)
pub const SOUND_PHASE_END: f32 = 0.4; // sphere finishes morphing into the tunnel
pub const TUNNEL_PHASE_END: f32 = 0.85; // camera exits the tunnel, disc forms
pub const LABEL_FADE_START: f32 = 0.85;
pub const LABEL_FADE_RATE: f32 = 6.67; // label opacity per unit of progress
pub const LABEL_GROW_START: f32 = 0.8;
pub const LABEL_GROW_RATE: f32 = 5.0;

// Wave -> vinyl
pub const WAVE_LABEL_FADE_START: f32 = 0.4;
pub const WAVE_LABEL_FADE_RATE: f32 = 2.5;

// Scroll travel (how far the reference section scrolls for progress 0 -> 1)
pub const SOUND_TRAVEL_VIEWPORTS: f32 = 3.0; // 400vh section
pub const WAVE_TRAVEL_VIEWPORTS: f32 = 1.5; // 250vh section
pub const DISC_TRAVEL_SECTION_FRACTION: f32 = 0.5; // 200vh section

// Point counts
pub const SOUND_POINT_COUNT: usize = 12_000;
pub const WAVE_POINT_COUNT: usize = 8_000;
pub const DISC_GROOVE_RINGS: usize = 60;
pub const DISC_GROOVE_POINTS_PER_RING: usize = 180;

// Sphere ("blob") layout
pub const SPHERE_RADIUS: f32 = 2.0;
pub const SPHERE_RINGS: usize = 100;

// Tunnel ("spiral") layout
pub const TUNNEL_TURNS: f32 = 12.0;
pub const TUNNEL_LENGTH: f32 = 20.0;
pub const TUNNEL_OUTER_RADIUS: f32 = 2.8;
pub const TUNNEL_INNER_RADIUS: f32 = 0.8;
pub const TUNNEL_WAVE_AMPLITUDE: f32 = 0.15;
pub const TUNNEL_NOISE_AMPLITUDE: f32 = 0.08;

// Disc ("vinyl") layout
pub const VINYL_RINGS: usize = 50;
pub const VINYL_INNER_RADIUS: f32 = 0.4;
pub const VINYL_OUTER_RADIUS: f32 = 2.5;
pub const VINYL_JITTER: f32 = 0.008;
pub const SPIN_DISC_RADIUS: f32 = 1.8;

// Wave bars
pub const WAVE_BARS: usize = 40;
pub const WAVE_WIDTH: f32 = 8.0;

// Spin
pub const SPIN_SMOOTHING: f32 = 0.02; // per-frame speed blend toward target
pub const DISC_IDLE_SPIN: f32 = 0.2;
pub const DISC_SCROLL_SPIN: f32 = 2.0;
pub const DISC_HOVER_SPIN: f32 = 0.03;
pub const DISC_TRANSFORM_SMOOTHING: f32 = 0.12;

// Oscillation overlays
pub const OSCILLATION_ATTACK: f32 = 0.25; // fraction of a phase spent fading the overlay in

// Momentum follower (card carousel)
pub const CARD_FRICTION: f32 = 0.95;
pub const CARD_SMOOTHING: f32 = 0.1;
pub const CARD_DRAG_SENSITIVITY: f32 = -0.01; // dragging up advances the stack
pub const CARD_VELOCITY_SENSITIVITY: f32 = -0.005;
pub const CARD_WHEEL_SENSITIVITY: f32 = 0.002;
pub const CARD_COUNT: usize = 10;
pub const CARD_SPACING: f32 = 0.4;
pub const CARD_SCROLL_SCALE: f32 = 0.5;
pub const CARD_WRAP_FLOOR: f32 = -2.0; // cards scrolled below this re-enter at the top
pub const CARD_SIZE: f32 = 1.2;
pub const CARD_GRID: usize = 24; // points per card edge

// Numeric guards
pub const WIDTH_EPSILON: f32 = 1e-6; // minimum phase width / travel distance
