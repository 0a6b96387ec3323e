//! Sample ring
//!
//! The outline is a circle sampled at N fixed angles. Each sample carries a
//! radial offset driven toward a per-frame target by a damped spring. The
//! target is the sum of two terms:
//!
//! - **breathing**: an idle sine wave, phase-shifted by angle so the ring
//!   undulates instead of pulsing uniformly
//! - **stretch**: a gaussian bump facing the direction of travel, present
//!   only while the center moves faster than the stretch threshold

use crate::config::OutlineConfig;
use dolo_paint::Point;
use std::f32::consts::TAU;

/// One sample of the ring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSample {
    angle: f32,
    /// Radial offset from the base radius, in pixels
    pub value: f32,
    /// Radial velocity, in pixels per nominal frame
    pub velocity: f32,
}

impl RingSample {
    /// Fixed angle of this sample in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

/// Fixed-size ring of radial springs.
///
/// Sample `i` always sits at angle `i / N * 2π`; the ring never grows,
/// shrinks or reorders.
#[derive(Clone, Debug)]
pub struct SampleRing {
    samples: Box<[RingSample]>,
}

impl SampleRing {
    /// Ring of `count` samples at rest (zero offset)
    pub fn new(count: usize) -> Self {
        let samples = (0..count)
            .map(|i| RingSample {
                angle: (i as f32 / count as f32) * TAU,
                value: 0.0,
                velocity: 0.0,
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[RingSample] {
        &self.samples
    }

    /// Advance every sample's spring by `dt` nominal frames
    pub fn step(&mut self, now_ms: f64, speed: f32, heading: f32, dt: f32, config: &OutlineConfig) {
        for sample in self.samples.iter_mut() {
            let target = breathing_term(sample.angle, now_ms, config)
                + stretch_term(sample.angle, speed, heading, config);

            sample.velocity += (target - sample.value) * config.spring_stiffness * dt;
            sample.velocity *= config.spring_damping;
            sample.value += sample.velocity * dt;
        }
    }

    /// Outline vertices around `center`, in angle order
    pub fn points(&self, center: Point, base_radius: f32) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().map(move |s| {
            let radius = base_radius + s.value;
            Point::new(
                center.x + s.angle.cos() * radius,
                center.y + s.angle.sin() * radius,
            )
        })
    }

    /// Smallest and largest radial offset currently on the ring
    pub fn offset_range(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.value), hi.max(s.value))
            })
    }
}

/// Signed angle from `b` to `a`, wrapped to `[-π, π]`
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = a - b;
    d.sin().atan2(d.cos())
}

/// Motion-aligned bulge for the sample at `angle`.
///
/// Zero at or below the stretch threshold, otherwise
/// `exp(-d² / width) * speed * gain` where `d` is the angular distance to the
/// heading.
pub fn stretch_term(angle: f32, speed: f32, heading: f32, config: &OutlineConfig) -> f32 {
    if speed <= config.stretch_threshold {
        return 0.0;
    }
    let d = angular_distance(angle, heading);
    (-(d * d) / config.stretch_width).exp() * speed * config.stretch_gain
}

/// Idle oscillation for the sample at `angle`, bounded by the amplitude
pub fn breathing_term(angle: f32, now_ms: f64, config: &OutlineConfig) -> f32 {
    let phase = now_ms * config.breathing_frequency as f64 + (angle * config.breathing_lobes) as f64;
    phase.sin() as f32 * config.breathing_amplitude
}
