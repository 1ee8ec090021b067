// Shared tuning constants used by both web and native frontends.
// Parameter structs take their defaults from here.

// Particle budget
pub const INITIAL_PARTICLE_COUNT: usize = 5000;
pub const MIN_PARTICLE_COUNT: usize = 500; // governor floor
pub const PARTICLE_COUNT_STEP: usize = 500; // removed per governor reduction

// Pattern geometry
pub const SPHERE_RADIUS: f32 = 10.0;
pub const SPIRAL_RADIUS_PER_INDEX: f32 = 0.05;
pub const SPIRAL_ANGLE_PER_INDEX: f32 = 0.1;
pub const SPIRAL_RISE_PER_INDEX: f32 = 0.02;
pub const SPIRAL_Y_OFFSET: f32 = -10.0;
pub const HEART_SCALE: f32 = 0.5;
pub const HEART_Y_OFFSET: f32 = 5.0; // recenters the curve near the origin
pub const HEART_Z_JITTER: f32 = 2.5; // half-width of the z thickness

// Gesture calibration (normalized landmark space)
pub const OPEN_HAND_THRESHOLD: f32 = 0.35;
pub const CLOSED_HAND_THRESHOLD: f32 = 0.20;
pub const OPEN_EXPANSION: f32 = 2.5;
pub const CLOSED_EXPANSION: f32 = 0.2;
pub const NEUTRAL_EXPANSION: f32 = 1.0;

// Rotation mapping
pub const ROTATION_DEAD_ZONE: f32 = 0.05;
pub const ROTATION_SENSITIVITY: f32 = 2.0;
pub const MAX_ROTATION_SPEED: f32 = 0.05; // radians per frame

// Mouse fallback buckets (height fraction, 1 = top of viewport)
pub const POINTER_NEUTRAL_BAND: f32 = 0.1;
pub const POINTER_OPEN_THRESHOLD: f32 = 0.6;

// Motion smoothing
pub const MOTION_LERP: f32 = 0.05;
pub const MORPH_LERP: f32 = 0.08;
pub const IDLE_ROLL_PER_FRAME: f32 = 0.001;
pub const FPS_SMOOTHING: f32 = 0.9; // weight kept from the previous estimate
pub const INITIAL_FPS: f32 = 60.0;

// Heart pulse and positional noise
pub const PULSE_SPEED: f32 = 3.0;
pub const PULSE_AMPLITUDE: f32 = 0.1;
pub const NOISE_AMPLITUDE: f32 = 0.05;
pub const NOISE_SPATIAL_FREQ: f32 = 0.5;

// Performance governor
pub const LOW_FPS_THRESHOLD: f32 = 25.0;
pub const GOVERNOR_COOLDOWN_SEC: f64 = 2.0;

// Rendering defaults
pub const DEFAULT_PARTICLE_COLOR: [f32; 3] = [0.0, 1.0, 1.0]; // cyan
pub const DEFAULT_POINT_SIZE: f32 = 0.15; // world units
pub const CAMERA_Z: f32 = 30.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
