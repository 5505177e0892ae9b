// control_system/mod.rs
pub mod allocation;
pub mod display;
pub mod phase_scheduler;
pub mod proximity;
pub mod roads;
pub mod vehicle_counter;

// Re-export the pieces callers wire together.
pub use allocation::allocate;
pub use display::{DisplayCoordinator, DISPLAY_MAX};
pub use phase_scheduler::{compute_wait_times, PhaseScheduler};
pub use proximity::{DetectionWindow, ProximityDetector};
pub use roads::{LightState, Road, RoadId};
pub use vehicle_counter::VehicleCounter;
