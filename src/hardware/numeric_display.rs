use crate::control_system::roads::RoadId;

/// Four-digit countdown display mounted on one road. `show` is idempotent;
/// callers guarantee `value` is already clamped to the representable range.
pub trait NumericDisplay {
    /// One-time brightness setup (0..7), applied during controller startup.
    fn set_brightness(&mut self, road: RoadId, level: u8);
    fn show(&mut self, road: RoadId, value: u16);
}

/// Display for the demo binary: logs the pushed values instead of driving a
/// real digit module.
#[derive(Debug, Default)]
pub struct LoggingNumericDisplay;

impl NumericDisplay for LoggingNumericDisplay {
    fn set_brightness(&mut self, road: RoadId, level: u8) {
        log::debug!("{}: display brightness set to {}", road, level);
    }

    fn show(&mut self, road: RoadId, value: u16) {
        log::trace!("{}: display shows {}", road, value);
    }
}

/// Test display that keeps the full history of values pushed per road.
#[derive(Debug)]
pub struct RecordingNumericDisplay {
    pub shown: Vec<Vec<u16>>,
    pub brightness: Vec<Option<u8>>,
}

impl RecordingNumericDisplay {
    pub fn new(num_roads: usize) -> Self {
        Self {
            shown: vec![Vec::new(); num_roads],
            brightness: vec![None; num_roads],
        }
    }

    /// Latest value pushed to a road's display, if any.
    pub fn last_shown(&self, road: RoadId) -> Option<u16> {
        self.shown[road.0 as usize].last().copied()
    }
}

impl NumericDisplay for RecordingNumericDisplay {
    fn set_brightness(&mut self, road: RoadId, level: u8) {
        self.brightness[road.0 as usize] = Some(level);
    }

    fn show(&mut self, road: RoadId, value: u16) {
        self.shown[road.0 as usize].push(value);
    }
}
