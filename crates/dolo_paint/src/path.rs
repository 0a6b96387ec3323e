//! Path building and representation

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether the last command closes the current subpath
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Vertices in drawing order (move and line targets)
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::default(),
        }
    }

    /// Builder with room for `capacity` commands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            path: Path {
                commands: SmallVec::with_capacity(capacity),
            },
        }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.path
            .commands
            .push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.path
            .commands
            .push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Connect a sequence of points: the first is a move, the rest are lines
    pub fn polyline(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        for (i, p) in points.into_iter().enumerate() {
            let cmd = if i == 0 {
                PathCommand::MoveTo(p)
            } else {
                PathCommand::LineTo(p)
            };
            self.path.commands.push(cmd);
        }
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_closes() {
        let path = PathBuilder::new()
            .polyline([
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ])
            .close()
            .build();

        assert_eq!(path.commands().len(), 4);
        assert!(matches!(path.commands()[0], PathCommand::MoveTo(_)));
        assert!(path.is_closed());
        assert_eq!(path.vertices().count(), 3);
    }

    #[test]
    fn test_open_line() {
        let path = PathBuilder::new().move_to(0.0, 0.0).line_to(0.0, 5.0).build();
        assert!(!path.is_closed());
        assert_eq!(
            path.vertices().collect::<Vec<_>>(),
            vec![Point::new(0.0, 0.0), Point::new(0.0, 5.0)]
        );
    }
}
