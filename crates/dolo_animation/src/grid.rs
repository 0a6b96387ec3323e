//! Vertical line grid behind the page content
//!
//! Unlike the outline, the grid is not animated. It repaints only when the
//! surface is resized or the color scheme flips, both observed through
//! explicit subscriptions that [`GridBackground::unmount`] hands back.

use crate::config::GridConfig;
use crate::error::Result;
use dolo_core::events::{event_types, EventData, WINDOW};
use dolo_core::{ColorScheme, EventDispatcher, Subscription};
use dolo_paint::{Canvas, Color, PathBuilder, StrokeStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State shared with the event listeners
#[derive(Debug, Default)]
struct GridSignals {
    dirty: AtomicBool,
    dark: AtomicBool,
}

impl GridSignals {
    fn scheme(&self) -> ColorScheme {
        if self.dark.load(Ordering::Acquire) {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

pub struct GridBackground {
    config: GridConfig,
    signals: Arc<GridSignals>,
    subscriptions: Vec<Subscription>,
    redraws: u64,
}

impl GridBackground {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            signals: Arc::new(GridSignals::default()),
            subscriptions: Vec::new(),
            redraws: 0,
        })
    }

    /// Attach resize and scheme listeners and request the initial paint
    pub fn mount(&mut self, events: &mut EventDispatcher, scheme: ColorScheme) {
        if self.is_mounted() {
            return;
        }
        self.signals.dark.store(scheme.is_dark(), Ordering::Release);
        self.signals.dirty.store(true, Ordering::Release);

        let on_resize = self.signals.clone();
        let resize = events.subscribe(WINDOW, event_types::RESIZE, move |_| {
            on_resize.dirty.store(true, Ordering::Release);
        });

        let on_scheme = self.signals.clone();
        let scheme_change = events.subscribe(WINDOW, event_types::SCHEME_CHANGE, move |event| {
            if let EventData::Scheme(scheme) = event.data {
                on_scheme.dark.store(scheme.is_dark(), Ordering::Release);
                on_scheme.dirty.store(true, Ordering::Release);
            }
        });

        self.subscriptions = vec![resize, scheme_change];
        tracing::debug!("grid mounted");
    }

    /// Detach all listeners
    pub fn unmount(&mut self, events: &mut EventDispatcher) {
        for subscription in self.subscriptions.drain(..) {
            events.unsubscribe(subscription);
        }
        self.signals.dirty.store(false, Ordering::Release);
        tracing::debug!("grid unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn needs_redraw(&self) -> bool {
        self.signals.dirty.load(Ordering::Acquire)
    }

    pub fn scheme(&self) -> ColorScheme {
        self.signals.scheme()
    }

    /// Number of repaints since construction
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Line color for `scheme`
    pub fn line_color(&self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => self.config.light_color,
            ColorScheme::Dark => self.config.dark_color,
        }
    }

    /// Repaint if a resize or scheme change happened since the last paint
    pub fn paint_if_dirty(&mut self, canvas: &mut dyn Canvas) -> bool {
        if !self.signals.dirty.swap(false, Ordering::AcqRel) {
            return false;
        }
        self.paint(canvas);
        true
    }

    /// Clear the surface and draw one vertical line every `spacing` pixels
    pub fn paint(&mut self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        let style = StrokeStyle::new(self.line_color(self.scheme()), self.config.line_width);

        canvas.clear();
        let lines = line_count(size.width, self.config.spacing);
        for i in 0..lines {
            let x = (i as f64 * self.config.spacing as f64) as f32;
            let line = PathBuilder::new()
                .move_to(x, 0.0)
                .line_to(x, size.height)
                .build();
            canvas.stroke_path(&line, &style);
        }

        self.redraws += 1;
        tracing::trace!(lines, scheme = %self.scheme(), "grid painted");
    }
}

/// Lines at x = 0, spacing, 2 * spacing, ... while x < width
fn line_count(width: f32, spacing: f32) -> u64 {
    if !(width > 0.0) {
        return 0;
    }
    // Saturating float-to-int cast keeps an absurd width finite
    (width as f64 / spacing as f64).ceil() as u64
}
