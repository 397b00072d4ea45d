//! Bonus rounds: one scoring color pays double for a fixed window
//!
//! Once the first window opens it re-rolls forever while the round runs;
//! two consecutive bonus colors are never the same.

use rand::Rng;

use super::disc::DiscColor;
use super::schedule::Task;
use super::state::{BonusView, GameEvent, RoundState};
use crate::consts::BONUS_MULTIPLIER;

/// Bonus state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BonusState {
    #[default]
    Inactive,
    Active { color: DiscColor, seconds_left: u32 },
}

/// Pick a scoring color uniformly, never repeating `exclude`
pub fn pick_bonus_color(exclude: Option<DiscColor>, rng: &mut impl Rng) -> DiscColor {
    let pool: Vec<DiscColor> = DiscColor::SCORING
        .iter()
        .copied()
        .filter(|c| Some(*c) != exclude)
        .collect();
    pool[rng.random_range(0..pool.len())]
}

/// Tracks the current bonus color and its countdown
#[derive(Debug, Clone, Default)]
pub struct BonusScheduler {
    state: BonusState,
}

impl BonusScheduler {
    pub fn state(&self) -> BonusState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, BonusState::Active { .. })
    }

    pub fn active_color(&self) -> Option<DiscColor> {
        match self.state {
            BonusState::Active { color, .. } => Some(color),
            BonusState::Inactive => None,
        }
    }

    pub fn view(&self) -> Option<BonusView> {
        match self.state {
            BonusState::Active {
                color,
                seconds_left,
            } => Some(BonusView {
                color,
                seconds_left,
            }),
            BonusState::Inactive => None,
        }
    }

    /// Open a new window with a color different from the current one
    pub fn activate(&mut self, window_secs: u32, rng: &mut impl Rng) -> DiscColor {
        let color = pick_bonus_color(self.active_color(), rng);
        self.state = BonusState::Active {
            color,
            seconds_left: window_secs,
        };
        color
    }

    /// One second off the window. Reaching zero re-rolls immediately.
    /// Returns the new color when a re-roll happened.
    pub fn tick(&mut self, window_secs: u32, rng: &mut impl Rng) -> Option<DiscColor> {
        let BonusState::Active {
            color,
            seconds_left,
        } = self.state
        else {
            return None;
        };

        let seconds_left = seconds_left.saturating_sub(1);
        if seconds_left == 0 {
            Some(self.activate(window_secs, rng))
        } else {
            self.state = BonusState::Active {
                color,
                seconds_left,
            };
            None
        }
    }

    /// Force a specific bonus (debug hooks and tests)
    pub fn force(&mut self, color: DiscColor, seconds_left: u32) {
        self.state = BonusState::Active {
            color,
            seconds_left,
        };
    }

    pub fn clear(&mut self) {
        self.state = BonusState::Inactive;
    }

    /// Score multiplier for hitting `color` right now
    pub fn multiplier_for(&self, color: DiscColor) -> i64 {
        if self.active_color() == Some(color) {
            BONUS_MULTIPLIER
        } else {
            1
        }
    }
}

impl RoundState {
    /// First activation, one bonus delay after the round starts
    pub(crate) fn bonus_start(&mut self) {
        self.timers.bonus_start = None;
        if !self.is_running() {
            return;
        }

        let color = self.bonus.activate(self.tuning.bonus_window_secs, &mut self.rng);
        log::info!("Bonus round activated: {}", color.as_str());

        if let Some(handle) = self.timers.bonus_tick.take() {
            self.scheduler.cancel(handle);
        }
        self.timers.bonus_tick = Some(self.scheduler.schedule_every(1000.0, Task::BonusTick));
        self.push_event(GameEvent::BonusChanged(self.bonus_view()));
    }

    /// Bonus countdown handler
    pub(crate) fn bonus_tick(&mut self) {
        if !self.is_running() {
            return;
        }

        if let Some(color) = self.bonus.tick(self.tuning.bonus_window_secs, &mut self.rng) {
            log::info!("New bonus round activated: {}", color.as_str());
        }
        self.push_event(GameEvent::BonusChanged(self.bonus_view()));
    }
}
