//! Services the binder consumes from the host build
//!
//! Each service appends to host-wide state and never rewrites what an earlier
//! bind added. Services that emit code write it into the `out` program they
//! are handed, which the binder only forwards to the [`CodeSink`] once the
//! whole bind has succeeded.

mod memory;
mod sensors;

use cppgen::{Program, Statement};
use thiserror::Error;

use crate::config::{I2cDeviceConfig, SensorConfig, TimePeriod};
use crate::driver::SensorHandle;

pub use memory::{I2cDevice, MemoryHost, RegisteredComponent};
pub use sensors::sensor_setup;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("ID '{0}' redefined")]
    IdInUse(String),
    #[error("couldn't find I2C bus with ID '{0}'")]
    UnknownBus(String),
    #[error("no I2C bus is declared")]
    NoBus,
    #[error("several I2C buses are declared ({}), set i2c_id to pick one", .0.join(", "))]
    AmbiguousBus(Vec<String>),
    #[error("component '{id}' is already registered")]
    AlreadyRegistered { id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
    #[error("sensor ID '{0}' redefined")]
    IdInUse(String),
}

/// Allocation of C++ variable names, unique across the whole build
pub trait IdRegistry {
    fn contains(&self, id: &str) -> bool;

    fn declare(&mut self, id: &str, type_name: &str) -> Result<(), ConstructionError>;
}

/// Host scheduler; registered components are polled at their interval
pub trait ComponentRegistry {
    fn register_component(
        &mut self,
        id: &str,
        update_interval: TimePeriod,
        setup_priority: Option<f64>,
        out: &mut Program,
    ) -> Result<(), ConstructionError>;
}

pub trait BusRegistry {
    /// Bus that `device` would be attached to, without registering anything
    fn resolve_bus(&self, device: &I2cDeviceConfig) -> Result<String, ConstructionError>;

    /// Attach `id` to its bus and return the bus ID
    fn register_i2c_device(
        &mut self,
        id: &str,
        device: &I2cDeviceConfig,
        out: &mut Program,
    ) -> Result<String, ConstructionError>;
}

pub trait SensorFactory {
    fn new_sensor(&mut self, config: &SensorConfig, out: &mut Program) -> Result<SensorHandle, FactoryError>;
}

/// Destination of the generated code
pub trait CodeSink {
    fn add(&mut self, statement: Statement);

    fn add_program(&mut self, program: Program) {
        for statement in program.into_statements() {
            self.add(statement);
        }
    }
}

/// Everything a bind needs from the host
pub trait Host: IdRegistry + ComponentRegistry + BusRegistry + SensorFactory + CodeSink {}

impl<T> Host for T where T: IdRegistry + ComponentRegistry + BusRegistry + SensorFactory + CodeSink {}
