//! Headless surface that records draw calls
//!
//! Used by the native build and by tests to inspect exactly what a frame drew.

use glam::Vec2;

use super::{Surface, SurfaceError};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    RotatedSquare {
        center: Vec2,
        size: f32,
        rotation: f32,
        color: [f32; 4],
    },
}

/// Records the draw calls of the most recent frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    frames: u64,
    lost: bool,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Make every following call fail with `SurfaceError::Lost`
    pub fn lose_context(&mut self) {
        self.lost = true;
    }

    /// Draw calls since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames cleared so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn check(&self) -> Result<(), SurfaceError> {
        if self.lost {
            Err(SurfaceError::Lost)
        } else {
            Ok(())
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        self.commands.clear();
        self.frames += 1;
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    ) -> Result<(), SurfaceError> {
        self.check()?;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn fill_rotated_square(
        &mut self,
        center: Vec2,
        size: f32,
        rotation: f32,
        color: [f32; 4],
    ) -> Result<(), SurfaceError> {
        self.check()?;
        self.commands.push(DrawCommand::RotatedSquare {
            center,
            size,
            rotation,
            color,
        });
        Ok(())
    }
}
