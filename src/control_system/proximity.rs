use crate::control_system::roads::RoadId;
use crate::hardware::DistanceSensor;

/// Distance band, in centimeters, inside which a reading counts as a vehicle.
/// The lower bound screens out sensor self-noise, the upper bound screens out
/// distant background; both bounds are exclusive.
#[derive(Debug, Clone, Copy)]
pub struct DetectionWindow {
    pub min_cm: f64,
    pub max_cm: f64,
}

impl DetectionWindow {
    pub fn new(min_cm: f64, max_cm: f64) -> Self {
        Self { min_cm, max_cm }
    }

    pub fn contains(&self, distance_cm: f64) -> bool {
        distance_cm > self.min_cm && distance_cm < self.max_cm
    }
}

/// Converts raw distance samples into a binary "object present" signal for
/// one road. A lost echo always resolves to "not present"; the detector never
/// raises false alarms on missing data.
pub struct ProximityDetector<S> {
    sensor: S,
    window: DetectionWindow,
}

impl<S: DistanceSensor> ProximityDetector<S> {
    pub fn new(sensor: S, window: DetectionWindow) -> Self {
        Self { sensor, window }
    }

    pub fn detect(&mut self, road: RoadId) -> bool {
        match self.sensor.measure(road) {
            Some(distance_cm) => self.window.contains(distance_cm),
            None => false,
        }
    }
}
