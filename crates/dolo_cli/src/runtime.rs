//! Headless host that owns the surfaces, the frame clock and the event
//! dispatcher, and feeds them to the backdrop effects.

use crate::config::DoloConfig;
use crate::report::{ReportedState, SimulationReport};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{Context, Result};
use dolo_animation::{GridBackground, HostContext, LoopState, OutlineLoop};
use dolo_core::{ColorScheme, Event, EventDispatcher, FrameClock};
use dolo_paint::{Canvas, PaintContext};

/// The two stacked background layers of the landing page
pub struct Backdrop {
    clock: FrameClock,
    events: EventDispatcher,
    grid_layer: PaintContext,
    outline_layer: PaintContext,
    grid: GridBackground,
    outline: OutlineLoop,
    scheme: ColorScheme,
    tick_ms: f64,
    frames_rendered: u64,
    max_velocity_component: f32,
}

impl Backdrop {
    pub fn new(config: &DoloConfig) -> Result<Self> {
        config.validate()?;
        let (width, height) = (config.viewport.width as f32, config.viewport.height as f32);
        Ok(Self {
            clock: FrameClock::new(),
            events: EventDispatcher::new(),
            grid_layer: PaintContext::new(width, height),
            outline_layer: PaintContext::new(width, height),
            grid: GridBackground::new(config.grid.clone()).context("invalid [grid] section")?,
            outline: OutlineLoop::new(config.outline.clone())
                .context("invalid [outline] section")?,
            scheme: config.viewport.scheme,
            tick_ms: config.run.tick_ms,
            frames_rendered: 0,
            max_velocity_component: 0.0,
        })
    }

    /// Mount the grid and start the outline
    pub fn mount(&mut self) {
        self.grid.mount(&mut self.events, self.scheme);
        self.grid.paint_if_dirty(&mut self.grid_layer);
        self.start_outline();
    }

    /// Stop the outline and detach the grid
    pub fn unmount(&mut self) {
        let mut host = HostContext::new(&mut self.clock, &mut self.events);
        self.outline.stop(&mut host);
        self.grid.unmount(&mut self.events);
    }

    fn start_outline(&mut self) -> LoopState {
        let mut host = HostContext::new(&mut self.clock, &mut self.events);
        self.outline
            .start(Some(&self.outline_layer as &dyn Canvas), &mut host)
    }

    /// Advance the clock by `ms` and run every frame that came due
    pub fn advance(&mut self, ms: f64) {
        for due in self.clock.advance(ms) {
            let mut host = HostContext::new(&mut self.clock, &mut self.events);
            if self.outline.on_frame(due, &mut self.outline_layer, &mut host) {
                self.frames_rendered += 1;
                if let Some(stats) = self.outline.last_stats() {
                    let peak = stats.velocity.x.abs().max(stats.velocity.y.abs());
                    self.max_velocity_component = self.max_velocity_component.max(peak);
                }
            }
        }
        self.grid.paint_if_dirty(&mut self.grid_layer);
    }

    /// Apply one scenario step
    pub fn apply(&mut self, step: &ScenarioStep) {
        let timestamp = self.clock.now_ms() as u64;
        match *step {
            ScenarioStep::Tick { frames } => {
                for _ in 0..frames {
                    self.advance(self.tick_ms);
                }
            }
            ScenarioStep::Wait { ms } => self.advance(ms),
            ScenarioStep::Pointer { x, y } => {
                self.events
                    .dispatch(&mut Event::pointer_move(x, y, timestamp));
            }
            ScenarioStep::Resize { width, height } => {
                self.grid_layer.resize(width as f32, height as f32);
                self.outline_layer.resize(width as f32, height as f32);
                self.events
                    .dispatch(&mut Event::resize(width, height, timestamp));
            }
            ScenarioStep::ToggleScheme => {
                self.scheme = self.scheme.toggle();
                self.events
                    .dispatch(&mut Event::scheme_change(self.scheme, timestamp));
            }
            ScenarioStep::Stop => {
                let mut host = HostContext::new(&mut self.clock, &mut self.events);
                self.outline.stop(&mut host);
            }
            ScenarioStep::Start => {
                self.start_outline();
            }
        }
    }

    pub fn outline(&self) -> &OutlineLoop {
        &self.outline
    }

    pub fn grid(&self) -> &GridBackground {
        &self.grid
    }

    pub fn outline_layer(&self) -> &PaintContext {
        &self.outline_layer
    }

    pub fn grid_layer(&self) -> &PaintContext {
        &self.grid_layer
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn pending_frames(&self) -> usize {
        self.clock.pending_count()
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Summarize the run, tear everything down and record what was left behind
    pub fn finish(mut self) -> SimulationReport {
        let animator = self.outline.animator();
        let center = animator.map(|a| {
            let c = a.center();
            [c.position.x, c.position.y]
        });
        let velocity = animator.map(|a| {
            let c = a.center();
            [c.velocity.x, c.velocity.y]
        });
        let radii = animator.map(|a| {
            let (lo, hi) = a.ring().offset_range();
            let base = a.config().base_radius;
            (base + lo, base + hi)
        });
        let final_state = match self.outline.state() {
            LoopState::Running => ReportedState::Running,
            LoopState::Stopped => ReportedState::Stopped,
        };
        let elapsed_ms = self.clock.now_ms();
        let grid_redraws = self.grid.redraw_count();

        self.unmount();

        SimulationReport {
            frames_rendered: self.frames_rendered,
            elapsed_ms,
            final_state,
            center,
            velocity,
            max_velocity_component: self.max_velocity_component,
            min_radius: radii.map(|(lo, _)| lo),
            max_radius: radii.map(|(_, hi)| hi),
            grid_redraws,
            scheme: self.scheme,
            pending_frames_after_teardown: self.clock.pending_count(),
            listeners_after_teardown: self.events.listener_count(),
        }
    }
}

/// Run `scenario` against a freshly mounted backdrop
pub fn run_scenario(config: &DoloConfig, scenario: &Scenario) -> Result<SimulationReport> {
    let mut backdrop = Backdrop::new(config)?;
    backdrop.mount();
    tracing::info!(
        steps = scenario.steps.len(),
        width = config.viewport.width,
        height = config.viewport.height,
        "running scenario"
    );

    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "scenario step");
        backdrop.apply(step);
    }

    let report = backdrop.finish();
    if report.leaked() {
        tracing::warn!(
            pending = report.pending_frames_after_teardown,
            listeners = report.listeners_after_teardown,
            "teardown left work behind"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_paints_grid_and_schedules_outline() {
        let mut backdrop = Backdrop::new(&DoloConfig::default()).unwrap();
        backdrop.mount();

        assert_eq!(backdrop.grid().redraw_count(), 1);
        assert_eq!(backdrop.pending_frames(), 1);
        // outline pointer listener + grid resize and scheme listeners
        assert_eq!(backdrop.listener_count(), 3);
        assert!(backdrop.outline().is_running());
    }

    #[test]
    fn test_toggle_scheme_repaints_grid_once() {
        let mut backdrop = Backdrop::new(&DoloConfig::default()).unwrap();
        backdrop.mount();

        backdrop.apply(&ScenarioStep::ToggleScheme);
        backdrop.apply(&ScenarioStep::Tick { frames: 5 });

        assert_eq!(backdrop.scheme(), ColorScheme::Dark);
        assert_eq!(backdrop.grid().redraw_count(), 2);
        assert_eq!(backdrop.grid().scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_resize_keeps_outline_running() {
        let mut backdrop = Backdrop::new(&DoloConfig::default()).unwrap();
        backdrop.mount();
        backdrop.apply(&ScenarioStep::Tick { frames: 2 });
        backdrop.apply(&ScenarioStep::Resize {
            width: 640,
            height: 480,
        });
        backdrop.apply(&ScenarioStep::Tick { frames: 1 });

        assert!(backdrop.outline().is_running());
        assert_eq!(backdrop.outline_layer().size().width, 640.0);
        assert_eq!(backdrop.outline_layer().filled_paths().count(), 1);
        assert_eq!(backdrop.grid().redraw_count(), 2);
    }

    #[test]
    fn test_finish_tears_down() {
        let mut backdrop = Backdrop::new(&DoloConfig::default()).unwrap();
        backdrop.mount();
        backdrop.apply(&ScenarioStep::Tick { frames: 3 });

        let report = backdrop.finish();
        assert_eq!(report.frames_rendered, 3);
        assert_eq!(report.final_state, ReportedState::Running);
        assert!(!report.leaked());
    }
}
