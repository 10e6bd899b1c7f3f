/// Game tuning parameters for Quest Pong.
///
/// Distances are arena units (the playfield is laid out like an 800x500
/// canvas), speeds are units per second and accelerations units per second
/// squared. Y grows downward: the top wall is `y = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    pub const PADDLE_MARGIN: f32 = 30.0; // gap between side wall and paddle face
    pub const PADDLE_SPEED: f32 = 420.0;

    // Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_INITIAL_SPEED: f32 = 360.0;
    pub const BALL_MAX_SPEED: f32 = 960.0;
    pub const BALL_SPEED_INCREMENT: f32 = 30.0; // added per paddle hit
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const SERVE_ANGLE_SPREAD: f32 = std::f32::consts::PI / 12.0;

    // Score
    pub const WIN_SCORE: u8 = 5;

    // Frame loop
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    pub const MIN_FRAME_MS: f64 = 15.0; // frames closer than this are skipped
    pub const MAX_DT: f32 = 0.1;
    pub const COUNTDOWN_SECS: f32 = 3.0;
    pub const SERVE_DELAY_SECS: f32 = 1.0; // pause between points
    pub const TRAIL_LENGTH: usize = 12;

    // Pitches
    pub const RANDOM_CURVE_PROBABILITY: f64 = 0.35;
    pub const WOBBLE_PERIOD: f32 = 0.6;
    pub const WOBBLE_AMPLITUDE: f32 = 420.0;
    pub const WOBBLE_RANDOM_JITTER: f32 = 60.0;
    pub const LATE_CURVE_THRESHOLD: f32 = 0.55; // fraction of the flight
    pub const LATE_CURVE_WINDOW: f32 = 0.25;
    pub const LATE_CURVE_ACCEL: f32 = 900.0;

    // AI
    pub const AI_ERROR_MARGIN: f32 = 30.0;
    pub const AI_MIN_SPEED_MULTIPLIER: f32 = 0.5;
    pub const AI_ERROR_UPDATE_BASE_MS: f32 = 500.0;
    pub const AI_ERROR_UPDATE_VARIANCE_MS: f32 = 400.0;
    pub const AI_DEAD_ZONE: f32 = 8.0;
    pub const AI_RECENTER_URGENCY: f32 = 0.4;

    // Quest modifier bounds
    pub const MODIFIER_MIN: f32 = 0.25;
    pub const MODIFIER_MAX: f32 = 4.0;
}
