use rand::rngs::ThreadRng;
use rand::Rng;

use crate::control_system::roads::RoadId;

/// One ranging attempt against the proximity sensor of a road.
///
/// Returns the measured distance in centimeters, or `None` when no echo came
/// back within the sensor's bounded timeout. A timeout is a normal reading,
/// not an error; the detector maps it to "no object present".
pub trait DistanceSensor {
    fn measure(&mut self, road: RoadId) -> Option<f64>;
}

/// Simulated ultrasonic sensor bank used by the demo binary.
///
/// Each road alternates between empty stretches and vehicle "dwells": while a
/// dwell is active the sensor reports a distance inside the presence window,
/// otherwise it reports distant background or, occasionally, no echo at all.
pub struct SimulatedDistanceSensor {
    rng: ThreadRng,
    arrival_probability: f64,
    dwell_remaining: Vec<u32>,
}

impl SimulatedDistanceSensor {
    pub fn new(num_roads: usize, arrival_probability: f64) -> Self {
        Self {
            rng: rand::rng(),
            arrival_probability,
            dwell_remaining: vec![0; num_roads],
        }
    }
}

impl DistanceSensor for SimulatedDistanceSensor {
    fn measure(&mut self, road: RoadId) -> Option<f64> {
        let slot = match self.dwell_remaining.get_mut(road.0 as usize) {
            Some(slot) => slot,
            None => return None,
        };

        if *slot == 0 && self.rng.random_bool(self.arrival_probability) {
            // A vehicle pulls up and sits in front of the sensor for a few
            // consecutive samples.
            *slot = self.rng.random_range(2..6);
        }

        if *slot > 0 {
            *slot -= 1;
            Some(self.rng.random_range(2.5..6.5))
        } else if self.rng.random_bool(0.02) {
            // Lost echo.
            None
        } else {
            Some(self.rng.random_range(20.0..200.0))
        }
    }
}

/// Scripted sensor for tests: pops one pre-programmed reading per call,
/// per road, and reports "no echo" once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedDistanceSensor {
    readings: Vec<Vec<Option<f64>>>,
}

impl ScriptedDistanceSensor {
    pub fn new(num_roads: usize) -> Self {
        Self {
            readings: vec![Vec::new(); num_roads],
        }
    }

    pub fn push(&mut self, road: RoadId, reading: Option<f64>) {
        self.readings[road.0 as usize].push(reading);
    }

    /// Queues the same reading `count` times for a road.
    pub fn push_repeated(&mut self, road: RoadId, reading: Option<f64>, count: usize) {
        for _ in 0..count {
            self.push(road, reading);
        }
    }
}

impl DistanceSensor for ScriptedDistanceSensor {
    fn measure(&mut self, road: RoadId) -> Option<f64> {
        let queue = self.readings.get_mut(road.0 as usize)?;
        if queue.is_empty() {
            None
        } else {
            queue.remove(0)
        }
    }
}

/// Sensor that reports the same reading forever; handy for scheduler tests
/// that only care about timing, not arrivals.
pub struct ConstantDistanceSensor {
    reading: Option<f64>,
}

impl ConstantDistanceSensor {
    pub fn new(reading: Option<f64>) -> Self {
        Self { reading }
    }

    /// A sensor that never sees anything.
    pub fn silent() -> Self {
        Self::new(None)
    }
}

impl DistanceSensor for ConstantDistanceSensor {
    fn measure(&mut self, _road: RoadId) -> Option<f64> {
        self.reading
    }
}
