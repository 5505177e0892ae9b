pub mod clock;
pub mod config;
pub mod control_system;
pub mod hardware;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ControllerConfig, TallyResetPolicy};
