//! HUD text and the sink the presentation layer implements
//!
//! The simulation never touches the page. It queues `GameEvent`s, and
//! `apply_events` turns them into calls on a `HudSink`.

use glam::Vec2;

use crate::sim::{DiscColor, GameEvent};

pub fn timer_text(remaining_secs: u32) -> String {
    format!("Time: {}s", remaining_secs)
}

pub fn score_text(score: i64) -> String {
    format!("Score: {}", score)
}

pub fn bonus_text(seconds_left: u32) -> String {
    format!("Double points for this color: {}s", seconds_left)
}

pub fn final_score_text(score: i64) -> String {
    format!("Game Over!\nFinal Score: {}", score)
}

/// Floating marker shown where a disc was hit ("+20", "-50")
pub fn hit_marker_text(points: i64) -> String {
    if points >= 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

/// Display targets driven by round events
pub trait HudSink {
    fn set_timer(&mut self, text: &str);

    fn set_score(&mut self, text: &str);

    /// Show or update the bonus banner with its color swatch
    fn show_bonus(&mut self, color: DiscColor, text: &str);

    fn hide_bonus(&mut self);

    /// Round began: hide the start button, instructions and any final score
    fn round_started(&mut self);

    /// Show the final score and the restart button
    fn show_final_score(&mut self, text: &str);

    /// Hide the restart button left over from the previous round
    fn dismiss_end_screen(&mut self);

    fn show_hit_marker(&mut self, _position: Vec2, _text: &str, _positive: bool) {}

    fn round_halted(&mut self) {}
}

/// Apply queued events to a HUD, oldest first
pub fn apply_events<H, I>(hud: &mut H, events: I)
where
    H: HudSink + ?Sized,
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        match event {
            GameEvent::RoundStarted => hud.round_started(),
            GameEvent::EndScreenDismissed => hud.dismiss_end_screen(),
            GameEvent::TimerChanged(secs) => hud.set_timer(&timer_text(secs)),
            GameEvent::ScoreChanged(score) => hud.set_score(&score_text(score)),
            GameEvent::BonusChanged(Some(view)) => {
                hud.show_bonus(view.color, &bonus_text(view.seconds_left))
            }
            GameEvent::BonusChanged(None) => hud.hide_bonus(),
            GameEvent::DiscHit {
                position, points, ..
            } => hud.show_hit_marker(position, &hit_marker_text(points), points >= 0),
            GameEvent::RoundEnded { final_score } => {
                hud.show_final_score(&final_score_text(final_score))
            }
            GameEvent::Halted => hud.round_halted(),
        }
    }
}
