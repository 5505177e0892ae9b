use std::env;
use std::process;
use std::time::Duration;

use smart_traffic_system::clock::SystemClock;
use smart_traffic_system::config::ControllerConfig;
use smart_traffic_system::control_system::{
    DetectionWindow, PhaseScheduler, ProximityDetector, VehicleCounter,
};
use smart_traffic_system::hardware::{
    LoggingLightActuator, LoggingNumericDisplay, SimulatedDistanceSensor,
};

fn main() {
    env_logger::init();

    // Optional JSON config path as the first argument; defaults otherwise.
    let config = match env::args().nth(1) {
        Some(path) => match ControllerConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => ControllerConfig::default(),
    };

    let sensor = SimulatedDistanceSensor::new(config.num_roads, 0.05);
    let detector = ProximityDetector::new(
        sensor,
        DetectionWindow::new(config.detection_min_cm, config.detection_max_cm),
    );
    let counter = VehicleCounter::new(detector, Duration::from_millis(config.debounce_ms));

    let mut scheduler = PhaseScheduler::new(
        config,
        counter,
        LoggingLightActuator,
        LoggingNumericDisplay,
        SystemClock::new(),
    );
    scheduler.run();
}
