/// Game loop timing and control system
///
/// Implements a fixed timestep game loop with a variable per-frame update.
/// Movement logic runs on the fixed steps while sprite animation runs once
/// per frame; both receive a [`Tick`] describing the game time and how far
/// the step deviated from the nominal frame duration.
use std::time::{Duration, Instant};

/// Frame rate the game is tuned for
pub const TARGET_FRAME_RATE: u32 = 60;

/// Target fixed update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of fixed steps per frame to prevent spiral of death
const MAX_FIXED_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Ratio of an actual step duration to the nominal duration at `target_fps`
///
/// Close to 1.0 when the game runs at its target rate, 2.0 when a frame took
/// twice as long, and so on.
pub fn time_delta_fraction(delta: f32, target_fps: u32) -> f32 {
    if target_fps == 0 {
        return 1.0;
    }
    delta / (1.0 / target_fps as f32)
}

/// Timing handed to every state machine update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Game time in seconds at this step
    pub time: f32,
    /// Duration of this step in seconds
    pub delta: f32,
    /// `delta` relative to the nominal step at the target frame rate
    pub delta_fraction: f32,
}

impl Tick {
    pub fn new(time: f32, delta: f32) -> Self {
        Self {
            time,
            delta,
            delta_fraction: time_delta_fraction(delta, TARGET_FRAME_RATE),
        }
    }

    /// A nominal step ending at `time`
    pub fn at(time: f32) -> Self {
        Self::new(time, 1.0 / TARGET_FRAME_RATE as f32)
    }
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Unpaused time since the loop started, in seconds
    game_time: f32,

    /// Time of the last fixed step handed out, in seconds
    fixed_time: f32,

    /// Whether the game is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total fixed updates executed
    update_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Time since last frame, in seconds
    frame_delta: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            game_time: 0.0,
            fixed_time: 0.0,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame using the wall clock, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Begin a new frame that lasted `frame_time`, returns the number of fixed updates to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // If paused, game time stands still
        if self.paused {
            self.frame_delta = 0.0;
            return 0;
        }

        self.frame_delta = frame_time.as_secs_f32();
        self.game_time += self.frame_delta;
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_FIXED_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }
        if self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!("Dropping {:?} of simulation after a long frame", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        // This frame's fixed steps end where the leftover begins, so they
        // share a clock with `frame_tick`
        self.fixed_time = self.game_time
            - self.accumulator.as_secs_f32()
            - updates as f32 * FIXED_TIMESTEP;

        self.update_count += updates as u64;
        updates
    }

    /// Tick for the next fixed update; call once per update returned by `begin_frame`
    pub fn fixed_tick(&mut self) -> Tick {
        self.fixed_time += FIXED_TIMESTEP;
        Tick::new(self.fixed_time, FIXED_TIMESTEP)
    }

    /// Tick for the per-frame update
    pub fn frame_tick(&self) -> Tick {
        Tick::new(self.game_time, self.frame_delta)
    }

    /// Get the delta time since last frame (in seconds)
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Unpaused game time in seconds
    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of fixed updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
