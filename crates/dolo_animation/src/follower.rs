//! Lagged pointer follower
//!
//! The outline is drawn around a center that glides after the pointer instead
//! of sticking to it: velocity gains a small pull toward the target, loses a
//! fixed share every frame, and is capped per axis so a sudden pointer jump
//! cannot snap the outline across the screen.

use crate::config::OutlineConfig;
use dolo_paint::Point;

/// Smoothed center position and velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedCenter {
    pub position: Point,
    /// Velocity in pixels per nominal frame
    pub velocity: Point,
}

impl SmoothedCenter {
    /// Center at rest at `position`
    pub fn at_rest(position: Point) -> Self {
        Self {
            position,
            velocity: Point::ZERO,
        }
    }

    /// Advance one frame toward `target`.
    ///
    /// Velocity is updated once per frame regardless of `dt`; only the
    /// position integration scales with elapsed nominal frames.
    pub fn step(&mut self, target: Point, dt: f32, config: &OutlineConfig) {
        let max = config.max_center_speed;

        let mut vx = self.velocity.x + (target.x - self.position.x) * config.follow_strength;
        let mut vy = self.velocity.y + (target.y - self.position.y) * config.follow_strength;

        vx *= config.center_damping;
        vy *= config.center_damping;

        vx = vx.clamp(-max, max);
        vy = vy.clamp(-max, max);

        self.velocity = Point::new(vx, vy);
        self.position.x += vx * dt;
        self.position.y += vy * dt;
    }

    /// Speed in pixels per nominal frame
    pub fn speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.y)
    }

    /// Direction of travel in radians, `atan2(vy, vx)`
    pub fn heading(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }
}
