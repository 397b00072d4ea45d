//! Disc Rush - a reflex arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Round simulation (discs, fragments, spawning, bonus, scoring)
//! - `renderer`: Drawing surface abstraction and per-frame driver
//! - `ui`: HUD text and the sink the front end implements
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

/// Game configuration constants
///
/// Velocities and accelerations are in pixels per frame, matching the
/// display-refresh cadence of the frame loop.
pub mod consts {
    /// Maximum logical time advanced per clock step (ms)
    pub const MAX_CLOCK_STEP_MS: f64 = 100.0;
    /// Nominal frame duration used by headless drivers (ms)
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Disc radius bounds before the round-progress shrink
    pub const BASE_DISC_RADIUS: f32 = 20.0;
    pub const MIN_BASE_DISC_RADIUS: f32 = 10.0;
    /// Base radius is at most min(width, height) / this
    pub const DISC_RADIUS_DIVISOR: f32 = 20.0;
    /// Base disc speed is min(width, height) / this
    pub const DISC_SPEED_DIVISOR: f32 = 100.0;

    /// Hit forgiveness: effective radius multiplier per pointer kind
    pub const MOUSE_HIT_SCALE: f32 = 1.5;
    pub const TOUCH_HIT_SCALE: f32 = 2.0;

    /// Points awarded per disc color
    pub const RED_POINTS: i64 = 10;
    pub const GREEN_POINTS: i64 = 20;
    pub const BLUE_POINTS: i64 = 30;
    pub const YELLOW_POINTS: i64 = 40;
    pub const TRAP_POINTS: i64 = -50;
    /// Multiplier applied when the hit color matches the active bonus
    pub const BONUS_MULTIPLIER: i64 = 2;

    /// Fragment physics
    pub const FRAGMENT_GRAVITY: f32 = 0.3;
    pub const FRAGMENT_FADE_SPEED: f32 = 0.015;
    pub const FRAGMENT_MIN_SPEED: f32 = 4.0;
    pub const FRAGMENT_MAX_SPEED: f32 = 7.0;
    pub const FRAGMENT_MIN_SIZE: f32 = 3.0;
    /// Fragment velocity is scaled by min(width, height) / this
    pub const FRAGMENT_VELOCITY_REFERENCE: f32 = 800.0;
    /// Angular jitter half-width (radians) around each burst slot
    pub const FRAGMENT_ANGLE_JITTER: f32 = 0.25;
    /// Rotation speed half-width (radians per frame)
    pub const FRAGMENT_MAX_SPIN: f32 = 0.2;
    /// Fragment count bounds per shattered disc
    pub const MIN_FRAGMENTS: usize = 8;
    pub const MAX_FRAGMENTS: usize = 15;
}
