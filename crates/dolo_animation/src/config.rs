//! Effect configuration
//!
//! Defaults reproduce the landing page's reference look. Every field can be
//! overridden from a config file; missing keys fall back to the defaults.

use crate::error::{AnimationError, Result};
use dolo_paint::Color;
use serde::{Deserialize, Serialize};

/// Tuning for the reactive outline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Idle ring size in pixels
    pub base_radius: f32,
    /// Number of samples around the ring; controls curve smoothness
    pub sample_count: usize,
    /// Pull of the pointer on the center per frame; controls lag
    pub follow_strength: f32,
    /// Per-frame velocity retention of the center; controls glide length
    pub center_damping: f32,
    /// Pull of each sample toward its target offset; controls responsiveness
    pub spring_stiffness: f32,
    /// Per-frame velocity retention of each sample; controls settle speed
    pub spring_damping: f32,

    /// Per-axis cap on center velocity, in pixels per nominal frame
    pub max_center_speed: f32,
    /// Center speed above which the ring stretches toward the motion
    pub stretch_threshold: f32,
    /// Stretch offset per unit of center speed
    pub stretch_gain: f32,
    /// Angular spread of the stretch bump (denominator of the gaussian)
    pub stretch_width: f32,
    /// Peak idle oscillation of each sample, in pixels
    pub breathing_amplitude: f32,
    /// Idle oscillation rate in radians per millisecond
    pub breathing_frequency: f32,
    /// Number of undulation lobes around the ring
    pub breathing_lobes: f32,

    /// Gradient fade-out radius as a multiple of `base_radius`
    pub gradient_reach: f32,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,

    /// Duration of one nominal frame in milliseconds
    pub frame_ms: f32,
    /// Largest step, in nominal frames, a single update may integrate.
    /// `0` integrates whatever time has passed.
    pub max_frame_delta: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            base_radius: 160.0,
            sample_count: 100,
            follow_strength: 0.008,
            center_damping: 0.95,
            spring_stiffness: 0.06,
            spring_damping: 0.9,
            max_center_speed: 4.0,
            stretch_threshold: 0.5,
            stretch_gain: 2.0,
            stretch_width: 1.5,
            breathing_amplitude: 4.0,
            breathing_frequency: 0.0008,
            breathing_lobes: 2.0,
            gradient_reach: 1.8,
            fill_color: Color::rgba(200, 200, 200, 0.10),
            stroke_color: Color::rgba(180, 180, 180, 0.18),
            stroke_width: 1.0,
            frame_ms: 16.666,
            max_frame_delta: 4.0,
        }
    }
}

impl OutlineConfig {
    /// Reject values that would break the ring or the integrators
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < 3 {
            return Err(AnimationError::invalid(
                "sample_count",
                format!("must be at least 3, got {}", self.sample_count),
            ));
        }

        let finite = [
            ("follow_strength", self.follow_strength),
            ("spring_stiffness", self.spring_stiffness),
            ("max_center_speed", self.max_center_speed),
            ("stretch_threshold", self.stretch_threshold),
            ("stretch_gain", self.stretch_gain),
            ("breathing_amplitude", self.breathing_amplitude),
            ("breathing_frequency", self.breathing_frequency),
            ("breathing_lobes", self.breathing_lobes),
            ("stroke_width", self.stroke_width),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(AnimationError::invalid(field, "must be finite"));
            }
        }

        let positive = [
            ("base_radius", self.base_radius),
            ("stretch_width", self.stretch_width),
            ("gradient_reach", self.gradient_reach),
            ("frame_ms", self.frame_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnimationError::invalid(
                    field,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        for (field, value) in [
            ("center_damping", self.center_damping),
            ("spring_damping", self.spring_damping),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnimationError::invalid(
                    field,
                    format!("must be within [0, 1], got {value}"),
                ));
            }
        }

        if self.max_center_speed < 0.0 {
            return Err(AnimationError::invalid(
                "max_center_speed",
                "must not be negative",
            ));
        }

        if !(self.max_frame_delta.is_finite() && self.max_frame_delta >= 0.0) {
            return Err(AnimationError::invalid(
                "max_frame_delta",
                format!("must be 0 (unclamped) or positive, got {}", self.max_frame_delta),
            ));
        }

        Ok(())
    }

    /// Frame delta cap, if clamping is enabled
    pub fn frame_delta_cap(&self) -> Option<f32> {
        (self.max_frame_delta > 0.0).then_some(self.max_frame_delta)
    }

    /// Radius at which the fill gradient becomes fully transparent
    pub fn gradient_radius(&self) -> f32 {
        self.base_radius * self.gradient_reach
    }
}

/// Tuning for the vertical line grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between lines in pixels
    pub spacing: f32,
    pub line_width: f32,
    pub light_color: Color,
    pub dark_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 80.0,
            line_width: 1.0,
            light_color: Color::rgba(0, 0, 0, 0.08),
            dark_color: Color::rgba(255, 255, 255, 0.12),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing >= 1.0) {
            return Err(AnimationError::invalid(
                "spacing",
                format!("must be at least 1 pixel, got {}", self.spacing),
            ));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(AnimationError::invalid(
                "line_width",
                format!("must be positive, got {}", self.line_width),
            ));
        }
        Ok(())
    }
}
