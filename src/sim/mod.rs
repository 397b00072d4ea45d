//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic and
//! free of rendering or platform dependencies:
//! - Seeded RNG only
//! - Logical clock advanced by the caller
//! - Frame stepping in pixels per frame

pub mod bonus;
pub mod disc;
pub mod fragment;
pub mod round;
pub mod schedule;
pub mod scoring;
pub mod spawner;
pub mod state;

pub use bonus::{BonusScheduler, BonusState, pick_bonus_color};
pub use disc::{Disc, DiscColor, PointerKind, base_radius, scaled_radius, speed_multiplier};
pub use fragment::{Fragment, fragment_count, shatter};
pub use schedule::{Scheduler, Task, TimerHandle};
pub use scoring::{HitOutcome, hit_test, shot_points};
pub use spawner::next_spawn_interval;
pub use state::{Arena, BonusView, GameEvent, RoundPhase, RoundState};
