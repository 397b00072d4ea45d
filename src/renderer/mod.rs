//! Rendering module
//!
//! The game draws through the `Surface` trait: a 2D canvas in the browser,
//! a recording surface for headless runs and tests. `frame` is the per-frame
//! driver the front end calls from its animation callback.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::{Disc, Fragment, RoundState};

/// Drawing failed; the current round cannot continue rendering
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The drawing context is gone (canvas detached, context lost)
    Lost,
    /// A draw call was rejected
    Draw(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Lost => write!(f, "drawing context lost"),
            SurfaceError::Draw(msg) => write!(f, "draw call failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A 2D drawing target with pixel dimensions
pub trait Surface {
    /// Current size in pixels (may change between frames)
    fn size(&self) -> (f32, f32);

    fn clear(&mut self) -> Result<(), SurfaceError>;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4])
    -> Result<(), SurfaceError>;

    /// Filled square of side `size` centered on `center`, rotated by
    /// `rotation` radians; alpha comes from `color[3]`
    fn fill_rotated_square(
        &mut self,
        center: Vec2,
        size: f32,
        rotation: f32,
        color: [f32; 4],
    ) -> Result<(), SurfaceError>;
}

/// What the front end should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Round still running; request another frame
    Continue,
    /// Round over or halted; stop the loop
    Stop,
}

/// Run one display frame: sync the arena, clear, step entities, draw.
///
/// A surface failure halts the round instead of propagating, leaving the
/// last good frame on screen.
pub fn frame<S: Surface + ?Sized>(state: &mut RoundState, surface: &mut S) -> FrameStatus {
    if !state.is_running() {
        return FrameStatus::Stop;
    }

    let (width, height) = surface.size();
    state.resize(width, height);

    if let Err(e) = surface.clear() {
        state.halt(&e.to_string());
        return FrameStatus::Stop;
    }

    state.step_frame();

    if let Err(e) = draw_entities(state, surface) {
        state.halt(&e.to_string());
        return FrameStatus::Stop;
    }

    if state.is_running() {
        FrameStatus::Continue
    } else {
        FrameStatus::Stop
    }
}

/// Draw discs then fragments on top
pub fn draw_entities<S: Surface + ?Sized>(
    state: &RoundState,
    surface: &mut S,
) -> Result<(), SurfaceError> {
    for disc in &state.discs {
        draw_disc(surface, disc)?;
    }
    for fragment in &state.fragments {
        draw_fragment(surface, fragment)?;
    }
    Ok(())
}

pub fn draw_disc<S: Surface + ?Sized>(surface: &mut S, disc: &Disc) -> Result<(), SurfaceError> {
    surface.fill_circle(disc.pos, disc.radius, colors::disc(disc.color))
}

pub fn draw_fragment<S: Surface + ?Sized>(
    surface: &mut S,
    fragment: &Fragment,
) -> Result<(), SurfaceError> {
    let color = colors::with_alpha(colors::disc(fragment.color), fragment.opacity);
    surface.fill_rotated_square(fragment.pos, fragment.size, fragment.rotation, color)
}

/// Flat colors for game elements
pub mod colors {
    use crate::sim::DiscColor;

    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const TRAP: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub fn disc(color: DiscColor) -> [f32; 4] {
        match color {
            DiscColor::Red => RED,
            DiscColor::Green => GREEN,
            DiscColor::Blue => BLUE,
            DiscColor::Yellow => YELLOW,
            DiscColor::Trap => TRAP,
        }
    }

    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }

    /// CSS `rgba()` string for canvas fill styles
    pub fn css(color: [f32; 4]) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
            color[3].clamp(0.0, 1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, DiscColor, GameEvent, RoundPhase};
    use crate::tuning::Tuning;

    fn running_round() -> RoundState {
        let mut state = RoundState::new(Arena::new(800.0, 600.0), Tuning::default(), 77);
        state.start();
        state
    }

    #[test]
    fn test_css_colors() {
        assert_eq!(colors::css(colors::RED), "rgba(255, 0, 0, 1)");
        assert_eq!(
            colors::css(colors::with_alpha(colors::YELLOW, 0.5)),
            "rgba(255, 255, 0, 0.5)"
        );
    }

    #[test]
    fn test_frame_draws_discs_then_fragments() {
        let mut state = running_round();
        state.discs.push(Disc::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            12.0,
            DiscColor::Red,
        ));
        state.resolve_shot(Vec2::new(100.0, 100.0), crate::sim::PointerKind::Mouse);
        state.discs.push(Disc::new(
            2,
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
            12.0,
            DiscColor::Trap,
        ));

        let mut surface = RecordingSurface::new(800.0, 600.0);
        assert_eq!(frame(&mut state, &mut surface), FrameStatus::Continue);

        let commands = surface.commands();
        assert!(matches!(
            commands[0],
            DrawCommand::Circle { color, .. } if color == colors::TRAP
        ));
        let squares = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RotatedSquare { .. }))
            .count();
        assert_eq!(squares, state.fragments.len());
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_fragment_draw_matches_updated_state() {
        let mut state = running_round();
        state.discs.push(Disc::new(
            1,
            Vec2::new(400.0, 300.0),
            Vec2::ZERO,
            16.0,
            DiscColor::Blue,
        ));
        state.resolve_shot(Vec2::new(400.0, 300.0), crate::sim::PointerKind::Touch);

        let mut surface = RecordingSurface::new(800.0, 600.0);
        frame(&mut state, &mut surface);

        let drawn: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RotatedSquare {
                    center,
                    size,
                    rotation,
                    color,
                } => Some((*center, *size, *rotation, color[3])),
                _ => None,
            })
            .collect();
        assert_eq!(drawn.len(), state.fragments.len());
        for (f, (center, size, rotation, alpha)) in state.fragments.iter().zip(drawn) {
            assert_eq!(center, f.pos);
            assert_eq!(size, f.size);
            assert_eq!(rotation, f.rotation);
            assert_eq!(alpha, f.opacity);
        }
    }

    #[test]
    fn test_frame_tracks_surface_size() {
        let mut state = running_round();
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        frame(&mut state, &mut surface);
        assert_eq!(state.arena, Arena::new(1280.0, 720.0));
    }

    #[test]
    fn test_lost_surface_halts_round() {
        let mut state = running_round();
        state.advance_clock(2_500.0);
        let discs = state.discs.clone();

        let mut surface = RecordingSurface::new(800.0, 600.0);
        surface.lose_context();

        assert_eq!(frame(&mut state, &mut surface), FrameStatus::Stop);
        assert_eq!(state.phase, RoundPhase::Halted);
        assert_eq!(state.discs, discs);
        assert!(state.drain_events().contains(&GameEvent::Halted));
        assert_eq!(frame(&mut state, &mut surface), FrameStatus::Stop);
    }

    #[test]
    fn test_frame_stops_when_idle() {
        let mut state = RoundState::new(Arena::new(800.0, 600.0), Tuning::default(), 1);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        assert_eq!(frame(&mut state, &mut surface), FrameStatus::Stop);
        assert_eq!(surface.frames(), 0);
    }

    #[test]
    fn test_surface_error_display() {
        assert_eq!(SurfaceError::Lost.to_string(), "drawing context lost");
        assert_eq!(
            SurfaceError::Draw("arc".into()).to_string(),
            "draw call failed: arc"
        );
    }
}
