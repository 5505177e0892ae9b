use std::time::Duration;

use crate::control_system::roads::Road;
use crate::hardware::NumericDisplay;

/// Largest value a four-digit display can show.
pub const DISPLAY_MAX: u32 = 9999;

/// Pushes the scheduler's live wait-time vector to the per-road displays.
///
/// `render` runs at least once per scheduler second; `maybe_render` adds the
/// finer refresh cadence in between, purely for smoother perceived updates.
pub struct DisplayCoordinator<D> {
    display: D,
    refresh: Duration,
    last_render_at: Option<Duration>,
}

impl<D: NumericDisplay> DisplayCoordinator<D> {
    pub fn new(display: D, refresh: Duration) -> Self {
        Self {
            display,
            refresh,
            last_render_at: None,
        }
    }

    /// One-time startup pass: set brightness and blank every display to 0.
    pub fn init(&mut self, roads: &[Road], brightness: u8) {
        for road in roads {
            self.display.set_brightness(road.id, brightness);
            self.display.show(road.id, 0);
        }
    }

    /// Pushes every road's current wait time, clamped to the displayable
    /// range. Wait times are unsigned, so the lower clamp is structural.
    pub fn render(&mut self, roads: &[Road], now: Duration) {
        for road in roads {
            let value = road.wait_time_secs.min(DISPLAY_MAX) as u16;
            self.display.show(road.id, value);
        }
        self.last_render_at = Some(now);
    }

    /// Re-renders only when the refresh cadence has elapsed since the last
    /// push; called from the scheduler's sub-tick loop.
    pub fn maybe_render(&mut self, roads: &[Road], now: Duration) {
        let due = match self.last_render_at {
            Some(last) => now.saturating_sub(last) >= self.refresh,
            None => true,
        };
        if due {
            self.render(roads, now);
        }
    }

    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }
}
