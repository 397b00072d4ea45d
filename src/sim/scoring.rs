//! Shot resolution: hit testing, points, shatter

use glam::Vec2;

use super::bonus::BonusScheduler;
use super::disc::{Disc, DiscColor, PointerKind};
use super::fragment::shatter;
use super::state::{GameEvent, RoundState};

/// Result of a shot that hit a disc
#[derive(Debug, Clone, PartialEq)]
pub struct HitOutcome {
    pub disc_id: u32,
    pub color: DiscColor,
    pub position: Vec2,
    /// Signed points added to the score
    pub points: i64,
    /// Bonus multiplier applied
    pub doubled: bool,
    /// Fragments spawned by the shatter
    pub fragments: usize,
}

/// Index of the disc hit by a shot at `point`, newest first
pub fn hit_test(discs: &[Disc], point: Vec2, pointer: PointerKind) -> Option<usize> {
    discs.iter().rposition(|d| d.contains_point(point, pointer))
}

/// Points for hitting `color` under the current bonus
pub fn shot_points(color: DiscColor, bonus: &BonusScheduler) -> (i64, bool) {
    let multiplier = bonus.multiplier_for(color);
    (color.points() * multiplier, multiplier > 1)
}

impl RoundState {
    /// Resolve a click/tap at surface coordinates. At most one disc is hit.
    pub fn resolve_shot(&mut self, point: Vec2, pointer: PointerKind) -> Option<HitOutcome> {
        if !self.is_running() {
            return None;
        }

        let index = hit_test(&self.discs, point, pointer)?;
        let disc = self.discs.remove(index);

        let (points, doubled) = shot_points(disc.color, &self.bonus);
        if doubled {
            log::debug!("Bonus points awarded!");
        }
        self.score += points;

        let fragments = shatter(&disc, &self.arena, &mut self.rng);
        let fragment_count = fragments.len();
        self.fragments.extend(fragments);

        log::debug!(
            "Hit {} disc #{} for {} (score {})",
            disc.color.as_str(),
            disc.id,
            points,
            self.score
        );
        self.push_event(GameEvent::DiscHit {
            position: disc.pos,
            points,
            doubled,
        });
        self.push_event(GameEvent::ScoreChanged(self.score));

        Some(HitOutcome {
            disc_id: disc.id,
            color: disc.color,
            position: disc.pos,
            points,
            doubled,
            fragments: fragment_count,
        })
    }
}
