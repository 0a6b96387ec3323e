//! DOLO Paint/Canvas API
//!
//! A 2D drawing API for the decorative backdrop effects, similar to an HTML
//! canvas 2D context.
//!
//! # Features
//!
//! - Path drawing (move/line/close)
//! - Fills with colors and radial gradients
//! - Strokes
//! - A [`Canvas`] trait for real surfaces and a recording [`PaintContext`]

pub mod color;
pub mod context;
pub mod gradient;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{Canvas, FillStyle, PaintCommand, PaintContext, StrokeStyle};
pub use gradient::{Gradient, GradientStop};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::{Rect, Size};
