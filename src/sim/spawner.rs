//! Disc spawning with an accelerating cadence

use super::disc::Disc;
use super::schedule::Task;
use super::state::RoundState;
use crate::tuning::Tuning;

/// Delay until the next spawn at round progress `time_scale`.
///
/// Shrinks linearly from the base interval (to 30% of it by default) and
/// never drops below the minimum interval, nor below 1 ms.
pub fn next_spawn_interval(time_scale: f32, tuning: &Tuning) -> f64 {
    let t = time_scale.clamp(0.0, 1.0) as f64;
    let interval = tuning.spawn_interval_ms * (1.0 - t * tuning.spawn_acceleration);
    // A zero delay re-arms at the current instant and never lets the clock move
    interval.max(tuning.min_spawn_interval_ms).max(1.0)
}

impl RoundState {
    /// Spawn timer handler: add one disc, then re-arm with the updated interval
    pub(crate) fn spawn_tick(&mut self) {
        if !self.is_running() {
            return;
        }

        let id = self.next_entity_id();
        let time_scale = self.time_scale();
        let disc = Disc::spawn(id, &self.arena, time_scale, &self.tuning, &mut self.rng);
        log::debug!(
            "Spawned {} disc #{} r={:.1} at ({:.0}, {:.0})",
            disc.color.as_str(),
            disc.id,
            disc.radius,
            disc.pos.x,
            disc.pos.y
        );
        self.discs.push(disc);

        let interval = next_spawn_interval(time_scale, &self.tuning);
        if let Some(handle) = self.timers.spawn.take() {
            self.scheduler.cancel(handle);
        }
        self.timers.spawn = Some(self.scheduler.schedule_after(interval, Task::SpawnDisc));
    }
}
