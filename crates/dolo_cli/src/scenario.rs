//! Scenario definition for headless backdrop runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sequence of host events and frame advances.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Idle run of `frames` frames with no pointer activity
    pub fn idle(frames: u32) -> Self {
        Self {
            steps: vec![ScenarioStep::Tick { frames }],
        }
    }

    /// Total frames requested by `tick` steps
    pub fn tick_frames(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                ScenarioStep::Tick { frames } => *frames as u64,
                _ => 0,
            })
            .sum()
    }
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Advance `frames` nominal frames
    Tick { frames: u32 },
    /// Advance the clock by `ms` in a single frame, like a backgrounded tab
    /// resuming
    Wait { ms: f64 },
    /// Move the pointer
    Pointer { x: f32, y: f32 },
    /// Resize both surfaces
    Resize { width: u32, height: u32 },
    /// Flip between light and dark
    ToggleScheme,
    /// Stop the outline loop
    Stop,
    /// Start the outline loop again
    Start,
}
