//! Round lifecycle and time stepping
//!
//! Two clocks drive a round: `advance_clock` moves logical wall time and
//! fires the spawn, countdown and bonus schedules; `step_frame` moves the
//! entities once per displayed frame.

use super::schedule::Task;
use super::state::{Arena, GameEvent, RoundPhase, RoundState};

impl RoundState {
    /// Begin a fresh round, discarding whatever the previous one left behind
    pub fn start(&mut self) {
        self.tuning = self.tuning.clone().sanitized();
        self.scheduler.reset();
        self.timers = Default::default();

        self.phase = RoundPhase::Running;
        self.score = 0;
        self.remaining_secs = self.tuning.round_duration_secs;
        self.discs.clear();
        self.fragments.clear();
        self.bonus.clear();
        self.frame_count = 0;

        let bonus_delay_ms = self.tuning.bonus_delay_secs as f64 * 1000.0;
        self.timers.bonus_start = Some(self.scheduler.schedule_after(bonus_delay_ms, Task::BonusStart));
        self.timers.spawn = Some(
            self.scheduler
                .schedule_after(self.tuning.spawn_interval_ms, Task::SpawnDisc),
        );
        self.timers.countdown = Some(self.scheduler.schedule_every(1000.0, Task::Countdown));

        log::info!(
            "Round started: {}s, arena {}x{}",
            self.remaining_secs,
            self.arena.width,
            self.arena.height
        );
        self.push_event(GameEvent::RoundStarted);
        self.push_event(GameEvent::TimerChanged(self.remaining_secs));
        self.push_event(GameEvent::ScoreChanged(self.score));
        self.push_event(GameEvent::BonusChanged(None));
    }

    /// Start again from the end screen
    pub fn restart(&mut self) {
        log::info!("Round restarted");
        self.push_event(GameEvent::EndScreenDismissed);
        self.start();
    }

    /// Time ran out: freeze, clear the field, report the final score.
    /// Only the first call after a start has any effect.
    pub fn end(&mut self) {
        if !self.is_running() {
            return;
        }

        self.phase = RoundPhase::Ended;
        self.cancel_schedules();
        self.bonus.clear();
        self.discs.clear();
        self.fragments.clear();

        log::info!("Round over, final score {}", self.score);
        self.push_event(GameEvent::BonusChanged(None));
        self.push_event(GameEvent::RoundEnded {
            final_score: self.score,
        });
    }

    /// Stop the round after the drawing surface failed. Entities stay as
    /// they are so the last rendered frame remains meaningful.
    pub fn halt(&mut self, reason: &str) {
        if !self.is_running() {
            return;
        }

        log::warn!("Round halted: {}", reason);
        self.phase = RoundPhase::Halted;
        self.cancel_schedules();
        self.push_event(GameEvent::Halted);
    }

    fn cancel_schedules(&mut self) {
        self.scheduler.cancel_all();
        self.timers = Default::default();
    }

    /// Track the surface size. Zero-sized surfaces (hidden canvas) are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let arena = Arena::new(width, height);
        if arena != self.arena {
            log::debug!("Arena resized to {}x{}", width, height);
            self.arena = arena;
        }
    }

    /// Advance the round clock by `dt_ms`, firing every schedule that falls due
    pub fn advance_clock(&mut self, dt_ms: f64) {
        if !self.is_running() {
            return;
        }

        let until = self.scheduler.now_ms() + dt_ms.max(0.0);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(until);
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::SpawnDisc => self.spawn_tick(),
            Task::Countdown => self.countdown_tick(),
            Task::BonusStart => self.bonus_start(),
            Task::BonusTick => self.bonus_tick(),
        }
    }

    /// Round clock handler: one second off, end at zero
    fn countdown_tick(&mut self) {
        if !self.is_running() {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.push_event(GameEvent::TimerChanged(self.remaining_secs));
        if self.remaining_secs == 0 {
            self.end();
        }
    }

    /// Move every disc (with wall reflection) and every fragment one frame,
    /// dropping fragments that have faded out
    pub fn step_frame(&mut self) {
        if !self.is_running() {
            return;
        }

        self.frame_count += 1;
        let arena = self.arena;
        for disc in &mut self.discs {
            disc.update(&arena);
        }
        self.fragments.retain_mut(|f| f.update());
    }
}
