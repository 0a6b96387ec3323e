//! Report output model for headless backdrop runs.

use anyhow::{bail, Result};
use dolo_core::ColorScheme;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Outline loop state as reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedState {
    Running,
    Stopped,
}

/// Machine-readable summary of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Outline frames drawn across every start
    pub frames_rendered: u64,
    pub elapsed_ms: f64,
    pub final_state: ReportedState,
    /// Smoothed center when the scenario ended, if running
    pub center: Option<[f32; 2]>,
    pub velocity: Option<[f32; 2]>,
    /// Largest per-axis center speed seen in any frame
    pub max_velocity_component: f32,
    pub min_radius: Option<f32>,
    pub max_radius: Option<f32>,
    pub grid_redraws: u64,
    pub scheme: ColorScheme,
    /// Frame requests still outstanding after teardown
    pub pending_frames_after_teardown: usize,
    /// Listeners still attached after teardown
    pub listeners_after_teardown: usize,
}

impl SimulationReport {
    /// Whether teardown left anything scheduled or subscribed
    pub fn leaked(&self) -> bool {
        self.pending_frames_after_teardown > 0 || self.listeners_after_teardown > 0
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationReport {
        SimulationReport {
            frames_rendered: 3,
            elapsed_ms: 50.0,
            final_state: ReportedState::Running,
            center: Some([640.0, 360.0]),
            velocity: Some([0.0, 0.0]),
            max_velocity_component: 0.0,
            min_radius: Some(156.0),
            max_radius: Some(164.0),
            grid_redraws: 1,
            scheme: ColorScheme::Light,
            pending_frames_after_teardown: 0,
            listeners_after_teardown: 0,
        }
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let report = sample();
        assert!(report.write_to_path(Path::new("/tmp/report.json")).is_err());
        assert!(report.write_to_path(Path::new("../report.json")).is_err());
    }

    #[test]
    fn test_writer_emits_json() {
        let mut out = Vec::new();
        sample().write_to_writer(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["final_state"], "running");
        assert_eq!(value["scheme"], "light");
        assert_eq!(value["frames_rendered"], 3);
        assert!(!sample().leaked());
    }
}
