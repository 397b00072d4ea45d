//! Round state and core simulation types
//!
//! Everything a round mutates lives in one owned `RoundState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bonus::BonusScheduler;
use super::disc::{Disc, DiscColor};
use super::fragment::Fragment;
use super::schedule::{Scheduler, TimerHandle};
use crate::tuning::Tuning;

/// Drawable area in pixels. Changes whenever the surface is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions; all size-relative quantities derive from it
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Timers and the frame loop are live
    Running,
    /// Time ran out; final score shown
    Ended,
    /// The drawing surface failed mid-round; last frame left on screen
    Halted,
}

/// Active bonus as shown by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusView {
    pub color: DiscColor,
    pub seconds_left: u32,
}

/// State changes pushed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    /// Restart requested; lingering end-of-round UI should go away
    EndScreenDismissed,
    TimerChanged(u32),
    ScoreChanged(i64),
    BonusChanged(Option<BonusView>),
    DiscHit {
        position: Vec2,
        points: i64,
        doubled: bool,
    },
    RoundEnded {
        final_score: i64,
    },
    Halted,
}

/// Handles of the round's live schedules
#[derive(Debug, Clone, Default)]
pub(crate) struct RoundTimers {
    pub spawn: Option<TimerHandle>,
    pub countdown: Option<TimerHandle>,
    pub bonus_start: Option<TimerHandle>,
    pub bonus_tick: Option<TimerHandle>,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Balance knobs
    pub tuning: Tuning,
    /// Current surface dimensions
    pub arena: Arena,
    /// Current phase
    pub phase: RoundPhase,
    /// Whole seconds left on the round clock
    pub remaining_secs: u32,
    /// Score (may go negative)
    pub score: i64,
    /// Live discs in spawn order (newest last)
    pub discs: Vec<Disc>,
    /// Live shatter fragments
    pub fragments: Vec<Fragment>,
    /// Bonus color state machine
    pub bonus: BonusScheduler,
    /// Frames stepped this round
    pub frame_count: u64,
    pub(crate) scheduler: Scheduler,
    pub(crate) timers: RoundTimers,
    pub(crate) rng: Pcg32,
    seed: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl RoundState {
    /// Create an idle round with the given seed
    pub fn new(arena: Arena, tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let remaining_secs = tuning.round_duration_secs;
        Self {
            tuning,
            arena,
            phase: RoundPhase::Idle,
            remaining_secs,
            score: 0,
            discs: Vec::new(),
            fragments: Vec::new(),
            bonus: BonusScheduler::default(),
            frame_count: 0,
            scheduler: Scheduler::new(),
            timers: RoundTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Round progress in [0, 1]: 0 at start, 1 when the clock hits zero
    pub fn time_scale(&self) -> f32 {
        let duration = self.tuning.round_duration_secs.max(1) as f32;
        (1.0 - self.remaining_secs as f32 / duration).clamp(0.0, 1.0)
    }

    /// Logical milliseconds elapsed on the round clock
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Number of schedules still pending
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn bonus_view(&self) -> Option<BonusView> {
        self.bonus.view()
    }
}
