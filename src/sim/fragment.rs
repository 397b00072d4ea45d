//! Shatter fragments spawned when a disc is destroyed
//!
//! Purely decorative: fragments never affect scoring. Each one flies out
//! ballistically, spins, and fades at a fixed rate until it disappears.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::disc::{Disc, DiscColor};
use super::state::Arena;
use crate::consts::*;

/// A single spinning, fading square
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub color: DiscColor,
    /// Side length of the square
    pub size: f32,
    /// Radians
    pub rotation: f32,
    /// Radians per frame
    pub rotation_speed: f32,
    /// 1.0 when spawned, visible while > 0
    pub opacity: f32,
}

impl Fragment {
    /// Launch a fragment from `pos` along `angle` at `speed`, scaled to the arena
    pub fn new(
        pos: Vec2,
        color: DiscColor,
        angle: f32,
        speed: f32,
        parent_radius: f32,
        arena: &Arena,
        rng: &mut impl Rng,
    ) -> Self {
        let velocity_scale = arena.min_dimension() / FRAGMENT_VELOCITY_REFERENCE;
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed * velocity_scale,
            color,
            size: (parent_radius / 4.0).max(FRAGMENT_MIN_SIZE),
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * 2.0 * FRAGMENT_MAX_SPIN,
            opacity: 1.0,
        }
    }

    /// Advance one frame. Returns false once the fragment has faded out.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += FRAGMENT_GRAVITY;
        self.rotation += self.rotation_speed;
        self.opacity -= FRAGMENT_FADE_SPEED;
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Number of fragments a disc of this radius breaks into
pub fn fragment_count(radius: f32) -> usize {
    (radius.max(0.0).floor() as usize).clamp(MIN_FRAGMENTS, MAX_FRAGMENTS)
}

/// Break a disc into fragments spread evenly around a full circle
pub fn shatter(disc: &Disc, arena: &Arena, rng: &mut impl Rng) -> Vec<Fragment> {
    let count = fragment_count(disc.radius);
    (0..count)
        .map(|j| {
            let jitter = (rng.random::<f32>() * 2.0 - 1.0) * FRAGMENT_ANGLE_JITTER;
            let angle = j as f32 / count as f32 * TAU + jitter;
            let speed = FRAGMENT_MIN_SPEED
                + rng.random::<f32>() * (FRAGMENT_MAX_SPEED - FRAGMENT_MIN_SPEED);
            Fragment::new(disc.pos, disc.color, angle, speed, disc.radius, arena, rng)
        })
        .collect()
}
