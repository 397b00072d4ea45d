//! Disc entities: geometry, difficulty-scaled derivation, wall reflection

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Arena;
use crate::consts::*;
use crate::tuning::Tuning;

/// Disc color tag; decides the point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscColor {
    Red,
    Green,
    Blue,
    Yellow,
    /// Negative-value disc
    Trap,
}

impl DiscColor {
    /// Colors that score positively (and the bonus pool)
    pub const SCORING: [DiscColor; 4] = [
        DiscColor::Red,
        DiscColor::Green,
        DiscColor::Blue,
        DiscColor::Yellow,
    ];

    /// Base point value for hitting a disc of this color
    pub fn points(self) -> i64 {
        match self {
            DiscColor::Red => RED_POINTS,
            DiscColor::Green => GREEN_POINTS,
            DiscColor::Blue => BLUE_POINTS,
            DiscColor::Yellow => YELLOW_POINTS,
            DiscColor::Trap => TRAP_POINTS,
        }
    }

    pub fn is_trap(self) -> bool {
        self == DiscColor::Trap
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscColor::Red => "red",
            DiscColor::Green => "green",
            DiscColor::Blue => "blue",
            DiscColor::Yellow => "yellow",
            DiscColor::Trap => "trap",
        }
    }

    /// Roll a spawn color: trap with `trap_chance`, otherwise a uniform scoring color
    pub fn roll(rng: &mut impl Rng, trap_chance: f64) -> Self {
        if rng.random::<f64>() < trap_chance {
            DiscColor::Trap
        } else {
            Self::SCORING[rng.random_range(0..Self::SCORING.len())]
        }
    }
}

/// What kind of pointer produced a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    /// Touch gets a larger forgiveness margin
    Touch,
}

impl PointerKind {
    /// Multiplier applied to a disc's radius for hit testing
    pub fn hit_scale(self) -> f32 {
        match self {
            PointerKind::Mouse => MOUSE_HIT_SCALE,
            PointerKind::Touch => TOUCH_HIT_SCALE,
        }
    }
}

/// Disc radius before the round-progress shrink, scaled to the arena
pub fn base_radius(arena: &Arena) -> f32 {
    (arena.min_dimension() / DISC_RADIUS_DIVISOR).clamp(MIN_BASE_DISC_RADIUS, BASE_DISC_RADIUS)
}

/// Radius for a disc spawned at `time_scale` (100% down to 50% by default)
pub fn scaled_radius(arena: &Arena, time_scale: f32, tuning: &Tuning) -> f32 {
    base_radius(arena) * (1.0 - time_scale * tuning.radius_shrink)
}

/// Speed multiplier for a disc spawned at `time_scale` (1.0x up to 2.5x by default)
pub fn speed_multiplier(time_scale: f32, tuning: &Tuning) -> f32 {
    1.0 + time_scale * tuning.speed_ramp
}

/// A moving circular target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub color: DiscColor,
}

impl Disc {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: DiscColor) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Build a disc for the current arena and round progress
    pub fn spawn(
        id: u32,
        arena: &Arena,
        time_scale: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Self {
        let time_scale = time_scale.clamp(0.0, 1.0);
        let radius = scaled_radius(arena, time_scale, tuning);
        let speed = arena.min_dimension() / DISC_SPEED_DIVISOR * speed_multiplier(time_scale, tuning);

        // Keep the whole disc on screen
        let margin = radius * 2.0;
        let pos = Vec2::new(
            spawn_coord(arena.width, margin, rng),
            spawn_coord(arena.height, margin, rng),
        );

        let color = DiscColor::roll(rng, tuning.trap_chance);
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * speed,
            (rng.random::<f32>() - 0.5) * speed,
        );

        Self::new(id, pos, vel, radius, color)
    }

    /// Effective hit radius for the given pointer kind
    pub fn hit_radius(&self, pointer: PointerKind) -> f32 {
        self.radius * pointer.hit_scale()
    }

    /// True if `point` lies within the forgiving hit radius
    pub fn contains_point(&self, point: Vec2, pointer: PointerKind) -> bool {
        self.pos.distance(point) <= self.hit_radius(pointer)
    }

    /// Advance one frame and reflect off the walls.
    ///
    /// A velocity component flips when the leading edge on that axis reaches
    /// the wall it is heading toward. Position is not clamped, so the disc may
    /// overshoot by up to one frame of velocity.
    pub fn update(&mut self, arena: &Arena) {
        self.pos += self.vel;

        if (self.vel.x < 0.0 && self.pos.x - self.radius <= 0.0)
            || (self.vel.x > 0.0 && self.pos.x + self.radius >= arena.width)
        {
            self.vel.x = -self.vel.x;
        }
        if (self.vel.y < 0.0 && self.pos.y - self.radius <= 0.0)
            || (self.vel.y > 0.0 && self.pos.y + self.radius >= arena.height)
        {
            self.vel.y = -self.vel.y;
        }
    }
}

/// Uniform coordinate in [margin, extent - margin]; centered when the arena is too small
fn spawn_coord(extent: f32, margin: f32, rng: &mut impl Rng) -> f32 {
    let span = extent - margin * 2.0;
    if span > 0.0 {
        margin + rng.random::<f32>() * span
    } else {
        extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn disc_at(x: f32, y: f32, radius: f32) -> Disc {
        Disc::new(1, Vec2::new(x, y), Vec2::ZERO, radius, DiscColor::Red)
    }

    #[test]
    fn test_contains_point_mouse_and_touch() {
        let disc = disc_at(100.0, 100.0, 10.0);

        assert!(disc.contains_point(Vec2::new(100.0, 100.0), PointerKind::Mouse));
        // Exactly on the 1.5x boundary
        assert!(disc.contains_point(Vec2::new(115.0, 100.0), PointerKind::Mouse));
        assert!(!disc.contains_point(Vec2::new(116.0, 100.0), PointerKind::Mouse));

        // Touch reaches 2x
        assert!(disc.contains_point(Vec2::new(116.0, 100.0), PointerKind::Touch));
        assert!(disc.contains_point(Vec2::new(100.0, 120.0), PointerKind::Touch));
        assert!(!disc.contains_point(Vec2::new(100.0, 121.0), PointerKind::Touch));
    }

    #[test]
    fn test_base_radius_scales_with_arena() {
        assert_eq!(base_radius(&Arena::new(1920.0, 1080.0)), 20.0);
        assert_eq!(base_radius(&Arena::new(300.0, 600.0)), 15.0);
        assert_eq!(base_radius(&Arena::new(100.0, 100.0)), 10.0);
    }

    #[test]
    fn test_difficulty_ramp() {
        let tuning = Tuning::default();
        let arena = Arena::new(800.0, 600.0);

        assert_eq!(scaled_radius(&arena, 0.0, &tuning), 20.0);
        assert_eq!(scaled_radius(&arena, 1.0, &tuning), 10.0);
        assert_eq!(speed_multiplier(0.0, &tuning), 1.0);
        assert_eq!(speed_multiplier(1.0, &tuning), 2.5);
    }

    #[test]
    fn test_spawn_stays_inside_margin() {
        let tuning = Tuning::default();
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);

        for i in 0..200 {
            let disc = Disc::spawn(i, &arena, 0.5, &tuning, &mut rng);
            let margin = disc.radius * 2.0;
            assert!(disc.pos.x >= margin && disc.pos.x <= arena.width - margin);
            assert!(disc.pos.y >= margin && disc.pos.y <= arena.height - margin);

            // Per-axis speed is at most half the scaled base speed
            let max_component = arena.min_dimension() / DISC_SPEED_DIVISOR * 1.75 / 2.0;
            assert!(disc.vel.x.abs() <= max_component);
            assert!(disc.vel.y.abs() <= max_component);
        }
    }

    #[test]
    fn test_spawn_in_tiny_arena_is_centered() {
        let tuning = Tuning::default();
        let arena = Arena::new(30.0, 30.0);
        let mut rng = Pcg32::seed_from_u64(1);

        let disc = Disc::spawn(1, &arena, 0.0, &tuning, &mut rng);
        assert_eq!(disc.pos, Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_trap_rate() {
        let mut rng = Pcg32::seed_from_u64(42);
        let traps = (0..10_000)
            .filter(|_| DiscColor::roll(&mut rng, 0.1).is_trap())
            .count();
        assert!((800..1200).contains(&traps), "trap count {}", traps);

        assert!((0..100).all(|_| !DiscColor::roll(&mut rng, 0.0).is_trap()));
        assert!((0..100).all(|_| DiscColor::roll(&mut rng, 1.0).is_trap()));
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let arena = Arena::new(200.0, 200.0);
        let mut disc = disc_at(188.0, 100.0, 10.0);
        disc.vel = Vec2::new(3.0, 0.0);

        disc.update(&arena);
        assert_eq!(disc.pos.x, 191.0);
        assert_eq!(disc.vel.x, -3.0);

        // Heading back in: no second flip
        disc.update(&arena);
        assert_eq!(disc.vel.x, -3.0);
        assert_eq!(disc.pos.x, 188.0);
    }

    #[test]
    fn test_disc_outside_after_shrink_heads_back_in() {
        // Arena shrank under a disc that is now past the right edge
        let arena = Arena::new(100.0, 100.0);
        let mut disc = disc_at(150.0, 50.0, 10.0);
        disc.vel = Vec2::new(-2.0, 0.0);

        for _ in 0..5 {
            disc.update(&arena);
            assert_eq!(disc.vel.x, -2.0);
        }
    }

    proptest! {
        #[test]
        fn prop_bounce_keeps_disc_within_one_frame(
            x in 0.0f32..1.0,
            y in 0.0f32..1.0,
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
            radius in 5.0f32..20.0,
        ) {
            let arena = Arena::new(400.0, 300.0);
            let pos = Vec2::new(
                radius + x * (arena.width - 2.0 * radius),
                radius + y * (arena.height - 2.0 * radius),
            );
            let mut disc = Disc::new(1, pos, Vec2::new(vx, vy), radius, DiscColor::Blue);
            let before = disc.vel;

            disc.update(&arena);

            prop_assert!(disc.pos.x - disc.radius >= -before.x.abs() - 1e-3);
            prop_assert!(disc.pos.x + disc.radius <= arena.width + before.x.abs() + 1e-3);
            prop_assert!(disc.pos.y - disc.radius >= -before.y.abs() - 1e-3);
            prop_assert!(disc.pos.y + disc.radius <= arena.height + before.y.abs() + 1e-3);

            let crossed_x = (before.x < 0.0 && disc.pos.x - radius <= 0.0)
                || (before.x > 0.0 && disc.pos.x + radius >= arena.width);
            if crossed_x {
                prop_assert_eq!(disc.vel.x, -before.x);
            } else {
                prop_assert_eq!(disc.vel.x, before.x);
            }
            prop_assert_eq!(disc.radius, radius);
        }
    }
}
