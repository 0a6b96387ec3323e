//! Paint context - the main drawing API

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::Path;
use crate::primitives::{Rect, Size};

/// Fill style for shapes
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Color(Color),
    Gradient(Gradient),
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Color(color)
    }
}

impl From<Gradient> for FillStyle {
    fn from(gradient: Gradient) -> Self {
        FillStyle::Gradient(gradient)
    }
}

/// Stroke style
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Clear { rect: Rect },
    FillPath { path: Path, style: FillStyle },
    StrokePath { path: Path, style: StrokeStyle },
}

/// A 2D drawing surface.
///
/// Implemented by real render targets and by the recording [`PaintContext`].
pub trait Canvas {
    /// Current surface size in logical pixels
    fn size(&self) -> Size;

    /// Erase a region back to transparent
    fn clear_rect(&mut self, rect: Rect);

    fn fill_path(&mut self, path: &Path, style: &FillStyle);

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle);

    /// Erase the whole surface
    fn clear(&mut self) {
        let rect = self.size().to_rect();
        self.clear_rect(rect);
    }
}

/// Canvas that records commands instead of rasterizing them.
///
/// Every `clear` that covers the whole surface drops previously recorded
/// commands, so the command list always describes exactly one visible frame.
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    size: Size,
}

impl PaintContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            commands: Vec::new(),
            size: Size::new(width, height),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Change the surface size. Resizing a surface erases it.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        self.commands.clear();
    }

    /// Paths filled since the last full clear
    pub fn filled_paths(&self) -> impl Iterator<Item = (&Path, &FillStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            PaintCommand::FillPath { path, style } => Some((path, style)),
            _ => None,
        })
    }

    /// Paths stroked since the last full clear
    pub fn stroked_paths(&self) -> impl Iterator<Item = (&Path, &StrokeStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            PaintCommand::StrokePath { path, style } => Some((path, style)),
            _ => None,
        })
    }
}

impl Canvas for PaintContext {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        let full = self.size.to_rect();
        if rect.x <= full.x
            && rect.y <= full.y
            && rect.x + rect.width >= full.width
            && rect.y + rect.height >= full.height
        {
            self.commands.clear();
        }
        self.commands.push(PaintCommand::Clear { rect });
    }

    fn fill_path(&mut self, path: &Path, style: &FillStyle) {
        self.commands.push(PaintCommand::FillPath {
            path: path.clone(),
            style: style.clone(),
        });
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        self.commands.push(PaintCommand::StrokePath {
            path: path.clone(),
            style: style.clone(),
        });
    }
}
