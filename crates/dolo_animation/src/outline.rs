//! Reactive outline simulation and drawing
//!
//! [`OutlineAnimator`] is the per-frame core: it owns the smoothed center and
//! the sample ring, turns a frame timestamp plus the latest pointer target
//! into new state, and paints the result. It knows nothing about scheduling;
//! see [`OutlineLoop`](crate::OutlineLoop) for the self-rescheduling task.

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::follower::SmoothedCenter;
use crate::ring::SampleRing;
use dolo_paint::{Canvas, FillStyle, Gradient, Path, PathBuilder, Point, StrokeStyle};
use std::sync::atomic::{AtomicU64, Ordering};

/// Latest pointer position, written by the pointer listener and read once
/// per frame.
///
/// Both coordinates live in one atomic word so a frame never sees `x` from
/// one pointer event and `y` from another.
#[derive(Debug)]
pub struct PointerTarget {
    packed: AtomicU64,
}

impl PointerTarget {
    pub fn new(point: Point) -> Self {
        Self {
            packed: AtomicU64::new(pack(point)),
        }
    }

    pub fn set(&self, point: Point) {
        self.packed.store(pack(point), Ordering::Release);
    }

    pub fn get(&self) -> Point {
        unpack(self.packed.load(Ordering::Acquire))
    }
}

fn pack(point: Point) -> u64 {
    ((point.x.to_bits() as u64) << 32) | point.y.to_bits() as u64
}

fn unpack(bits: u64) -> Point {
    Point::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Summary of one simulated frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Elapsed nominal frames integrated this frame
    pub dt: f32,
    pub center: Point,
    pub velocity: Point,
    pub speed: f32,
    /// Smallest and largest sample radius after the update
    pub min_radius: f32,
    pub max_radius: f32,
}

/// Per-frame simulation of the reactive outline
#[derive(Clone, Debug)]
pub struct OutlineAnimator {
    config: OutlineConfig,
    center: SmoothedCenter,
    ring: SampleRing,
    last_timestamp: Option<f64>,
}

impl OutlineAnimator {
    /// Animator at rest, centered on `origin`
    pub fn new(config: OutlineConfig, origin: Point) -> Result<Self> {
        config.validate()?;
        let ring = SampleRing::new(config.sample_count);
        Ok(Self {
            config,
            center: SmoothedCenter::at_rest(origin),
            ring,
            last_timestamp: None,
        })
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn center(&self) -> &SmoothedCenter {
        &self.center
    }

    pub fn ring(&self) -> &SampleRing {
        &self.ring
    }

    /// Elapsed nominal frames since the previous update.
    ///
    /// The first update after construction integrates nothing: the baseline
    /// is that frame's timestamp, not the moment of mount, so the interval
    /// between start and the first frame is dropped. Timestamps that go
    /// backwards count as zero, and long gaps are capped by
    /// `max_frame_delta` unless it is 0.
    fn frame_delta(&mut self, now_ms: f64) -> f32 {
        let elapsed = self
            .last_timestamp
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_timestamp = Some(now_ms);

        let dt = (elapsed / self.config.frame_ms as f64) as f32;
        match self.config.frame_delta_cap() {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Advance the simulation to `now_ms` with the pointer at `target`
    pub fn update(&mut self, now_ms: f64, target: Point) -> FrameStats {
        let dt = self.frame_delta(now_ms);

        self.center.step(target, dt, &self.config);
        let speed = self.center.speed();
        let heading = self.center.heading();

        self.ring.step(now_ms, speed, heading, dt, &self.config);

        let (lo, hi) = self.ring.offset_range();
        FrameStats {
            dt,
            center: self.center.position,
            velocity: self.center.velocity,
            speed,
            min_radius: self.config.base_radius + lo,
            max_radius: self.config.base_radius + hi,
        }
    }

    /// Closed outline through every sample in angle order
    pub fn outline_path(&self) -> Path {
        PathBuilder::with_capacity(self.ring.len() + 1)
            .polyline(self.ring.points(self.center.position, self.config.base_radius))
            .close()
            .build()
    }

    /// Radial fill centered on the smoothed center, fading out at
    /// `gradient_reach * base_radius`
    pub fn fill_style(&self) -> FillStyle {
        let fill = self.config.fill_color;
        Gradient::radial_simple(
            self.center.position,
            self.config.gradient_radius(),
            fill,
            fill.with_alpha(0.0),
        )
        .into()
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.config.stroke_color, self.config.stroke_width)
    }

    /// Replace the canvas contents with the current outline
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear();
        let path = self.outline_path();
        canvas.fill_path(&path, &self.fill_style());
        canvas.stroke_path(&path, &self.stroke_style());
    }

    /// Update then draw
    pub fn frame(&mut self, now_ms: f64, target: Point, canvas: &mut dyn Canvas) -> FrameStats {
        let stats = self.update(now_ms, target);
        self.draw(canvas);
        tracing::trace!(
            dt = stats.dt,
            x = stats.center.x,
            y = stats.center.y,
            speed = stats.speed,
            "outline frame"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dolo_paint::{PaintCommand, PaintContext};

    const FRAME: f64 = 16.666;

    #[test]
    fn test_pointer_target_round_trips() {
        let target = PointerTarget::new(Point::new(1.5, -2.25));
        assert_eq!(target.get(), Point::new(1.5, -2.25));
        target.set(Point::new(-1e6, 3.0e7));
        assert_eq!(target.get(), Point::new(-1e6, 3.0e7));
    }

    #[test]
    fn test_first_update_integrates_nothing() {
        let mut animator = OutlineAnimator::new(OutlineConfig::default(), Point::ZERO).unwrap();
        let stats = animator.update(5000.0, Point::new(1000.0, 1000.0));
        assert_eq!(stats.dt, 0.0);
        assert_eq!(stats.center, Point::ZERO);
        assert_eq!(stats.velocity, Point::new(4.0, 4.0));
    }

    #[test]
    fn test_nominal_frames_integrate_one_step() {
        let mut animator = OutlineAnimator::new(OutlineConfig::default(), Point::ZERO).unwrap();
        animator.update(0.0, Point::ZERO);
        let stats = animator.update(FRAME, Point::ZERO);
        assert!((stats.dt - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut animator = OutlineAnimator::new(OutlineConfig::default(), Point::ZERO).unwrap();
        animator.update(0.0, Point::ZERO);
        let stats = animator.update(60_000.0, Point::new(500.0, 0.0));
        assert_eq!(stats.dt, 4.0);
        assert!(stats.center.x <= 4.0 * 4.0);

        let unclamped = OutlineConfig {
            max_frame_delta: 0.0,
            ..Default::default()
        };
        let mut animator = OutlineAnimator::new(unclamped, Point::ZERO).unwrap();
        animator.update(0.0, Point::ZERO);
        let stats = animator.update(100.0 * FRAME, Point::ZERO);
        assert!((stats.dt - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_timestamp_counts_as_zero() {
        let mut animator = OutlineAnimator::new(OutlineConfig::default(), Point::ZERO).unwrap();
        animator.update(1000.0, Point::ZERO);
        let stats = animator.update(900.0, Point::new(10.0, 10.0));
        assert_eq!(stats.dt, 0.0);
    }

    #[test]
    fn test_draw_clears_then_fills_and_strokes() {
        let mut animator =
            OutlineAnimator::new(OutlineConfig::default(), Point::new(400.0, 300.0)).unwrap();
        let mut canvas = PaintContext::new(800.0, 600.0);

        animator.frame(0.0, Point::new(400.0, 300.0), &mut canvas);
        animator.frame(FRAME, Point::new(400.0, 300.0), &mut canvas);

        // Only the latest frame remains
        let commands = canvas.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], PaintCommand::Clear { .. }));

        let (path, fill) = canvas.filled_paths().next().unwrap();
        assert!(path.is_closed());
        assert_eq!(path.vertices().count(), 100);
        match fill {
            FillStyle::Gradient(Gradient::Radial { center, radius, .. }) => {
                assert_eq!(*center, Point::new(400.0, 300.0));
                assert!((radius - 288.0).abs() < 1e-4);
            }
            other => panic!("expected radial gradient, got {other:?}"),
        }

        let (stroked, stroke) = canvas.stroked_paths().next().unwrap();
        assert_eq!(stroked, path);
        assert_eq!(stroke.width, 1.0);
    }

    #[test]
    fn test_motion_stretches_leading_edge() {
        let mut animator = OutlineAnimator::new(OutlineConfig::default(), Point::ZERO).unwrap();
        let target = Point::new(5000.0, 0.0);
        let mut now = 0.0;
        for _ in 0..120 {
            animator.update(now, target);
            now += FRAME;
        }
        assert!(animator.center().speed() > 0.5);

        let samples = animator.ring().samples();
        // Sample 0 faces +x (the heading), sample 50 faces away from it
        let leading = samples[0].value;
        let trailing = samples[50].value;
        assert!(leading > trailing + 2.0);
    }
}
