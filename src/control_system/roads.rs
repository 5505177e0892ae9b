use std::fmt;
use std::time::Duration;

/// Stable index of a road approach at the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadId(pub u8);

impl RoadId {
    /// Letter name used in diagnostics: road 0 is "A", road 1 is "B", ...
    pub fn letter(&self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Road {}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    Red,
    Yellow,
    Green,
}

impl LightState {
    /// The single phase-transition function: RED -> YELLOW -> GREEN -> RED.
    /// Only the road currently taking its turn ever advances; every other
    /// road stays RED.
    pub fn next(self) -> LightState {
        match self {
            LightState::Red => LightState::Yellow,
            LightState::Yellow => LightState::Green,
            LightState::Green => LightState::Red,
        }
    }
}

/// Represents one physical approach to the intersection.
#[derive(Debug, Clone)]
pub struct Road {
    /// Unique identifier for the road, also used for naming and pin lookup.
    pub id: RoadId,
    /// Confirmed vehicle arrivals since the last reset.
    pub vehicle_tally: u32,
    /// Green seconds granted for the cycle in progress; fixed for the whole
    /// cycle once the allocation runs.
    pub allocated_green_secs: u32,
    /// Current light phase; mutated only by the phase scheduler.
    pub light_state: LightState,
    /// Estimated seconds until this road next turns green (its own countdown
    /// while it holds the floor). Never negative.
    pub wait_time_secs: u32,
    /// Timestamp of the most recent counted detection, for debouncing.
    pub last_detection_at: Option<Duration>,
}

impl Road {
    pub fn new(index: u8) -> Self {
        Self {
            id: RoadId(index),
            vehicle_tally: 0,
            allocated_green_secs: 0,
            light_state: LightState::Red,
            wait_time_secs: 0,
            last_detection_at: None,
        }
    }

    /// Builds the fixed set of roads in traversal order.
    pub fn create_roads(count: usize) -> Vec<Road> {
        (0..count).map(|i| Road::new(i as u8)).collect()
    }

    /// Explicit tally reset; the only operation allowed to decrease a tally.
    pub fn reset_tally(&mut self) {
        self.vehicle_tally = 0;
    }
}
