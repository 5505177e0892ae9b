use crate::control_system::roads::{LightState, RoadId};

/// Drives the red/yellow/green lamps of one road. Idempotent: re-applying the
/// current state is a no-op at the hardware level and requires no ack.
pub trait LightActuator {
    fn set_state(&mut self, road: RoadId, state: LightState);
}

/// Actuator for the demo binary: logs every lamp change instead of toggling
/// GPIO pins.
#[derive(Debug, Default)]
pub struct LoggingLightActuator;

impl LightActuator for LoggingLightActuator {
    fn set_state(&mut self, road: RoadId, state: LightState) {
        log::debug!("{}: lamps set to {:?}", road, state);
    }
}

/// Test actuator that records every `(road, state)` write in order, so tests
/// can assert the mutual-exclusion safety property over a whole cycle.
#[derive(Debug, Default)]
pub struct RecordingLightActuator {
    pub writes: Vec<(RoadId, LightState)>,
}

impl RecordingLightActuator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LightActuator for RecordingLightActuator {
    fn set_state(&mut self, road: RoadId, state: LightState) {
        self.writes.push((road, state));
    }
}
