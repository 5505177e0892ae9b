// hardware/mod.rs
pub mod distance_sensor;
pub mod light_actuator;
pub mod numeric_display;

pub use distance_sensor::{
    ConstantDistanceSensor, DistanceSensor, ScriptedDistanceSensor, SimulatedDistanceSensor,
};
pub use light_actuator::{LightActuator, LoggingLightActuator, RecordingLightActuator};
pub use numeric_display::{LoggingNumericDisplay, NumericDisplay, RecordingNumericDisplay};
