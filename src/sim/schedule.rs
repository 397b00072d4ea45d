//! Logical-time scheduler
//!
//! Stands in for browser intervals and timeouts. Time only moves when the
//! owner advances it, so schedules are deterministic and testable. Timers
//! due at the same instant fire in the order they were scheduled.

/// Handle returned by the scheduler; pass it to `cancel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Work a timer triggers when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Create one disc and reschedule the spawn cadence
    SpawnDisc,
    /// One second off the round clock
    Countdown,
    /// First bonus activation
    BonusStart,
    /// One second off the active bonus window
    BonusTick,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    due_ms: f64,
    period_ms: Option<f64>,
    task: Task,
}

/// Pending one-shot and repeating timers on a logical clock
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_handle: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Fire `task` once, `delay_ms` from now
    pub fn schedule_after(&mut self, delay_ms: f64, task: Task) -> TimerHandle {
        self.insert(delay_ms.max(0.0), None, task)
    }

    /// Fire `task` every `period_ms`, first fire one period from now
    pub fn schedule_every(&mut self, period_ms: f64, task: Task) -> TimerHandle {
        // Zero periods would never let the clock move
        let period = period_ms.max(1.0);
        self.insert(period, Some(period), task)
    }

    fn insert(&mut self, delay_ms: f64, period_ms: Option<f64>, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            task,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Task> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.0.cmp(&b.handle.0))
            })
            .map(|(i, _)| i)?;

        let Timer {
            due_ms,
            period_ms,
            task,
            ..
        } = self.timers[index];
        self.now_ms = self.now_ms.max(due_ms);
        match period_ms {
            Some(period) => self.timers[index].due_ms = due_ms + period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(task)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Clear all timers and rewind the clock to zero
    pub fn reset(&mut self) {
        self.timers.clear();
        self.now_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, until_ms: f64) -> Vec<(f64, Task)> {
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(until_ms) {
            fired.push((scheduler.now_ms(), task));
        }
        scheduler.advance_to(until_ms);
        fired
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut s = Scheduler::new();
        s.schedule_after(500.0, Task::BonusStart);

        assert!(drain(&mut s, 499.0).is_empty());
        assert_eq!(drain(&mut s, 500.0), vec![(500.0, Task::BonusStart)]);
        assert!(drain(&mut s, 10_000.0).is_empty());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut s = Scheduler::new();
        s.schedule_every(1000.0, Task::Countdown);

        let fired = drain(&mut s, 3500.0);
        assert_eq!(
            fired,
            vec![
                (1000.0, Task::Countdown),
                (2000.0, Task::Countdown),
                (3000.0, Task::Countdown),
            ]
        );
        assert_eq!(s.now_ms(), 3500.0);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn test_order_by_due_then_insertion() {
        let mut s = Scheduler::new();
        s.schedule_after(1000.0, Task::SpawnDisc);
        s.schedule_every(1000.0, Task::Countdown);
        s.schedule_after(200.0, Task::BonusTick);

        let tasks: Vec<Task> = drain(&mut s, 1000.0).into_iter().map(|(_, t)| t).collect();
        assert_eq!(tasks, vec![Task::BonusTick, Task::SpawnDisc, Task::Countdown]);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let spawn = s.schedule_after(100.0, Task::SpawnDisc);
        let tick = s.schedule_every(100.0, Task::BonusTick);

        assert!(s.cancel(spawn));
        assert!(!s.cancel(spawn));
        assert!(!s.is_pending(spawn));
        assert!(s.is_pending(tick));

        s.cancel_all();
        assert!(drain(&mut s, 1000.0).is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance_to(2000.0);
        s.schedule_after(300.0, Task::SpawnDisc);

        assert!(s.pop_due(2299.0).is_none());
        assert_eq!(s.pop_due(2300.0), Some(Task::SpawnDisc));
    }

    #[test]
    fn test_reset_rewinds_clock() {
        let mut s = Scheduler::new();
        s.schedule_every(10.0, Task::Countdown);
        drain(&mut s, 55.0);

        s.reset();
        assert_eq!(s.now_ms(), 0.0);
        assert_eq!(s.pending(), 0);
    }
}
