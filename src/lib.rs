//! Configuration schema and code generation for the SOMOSE soil moisture and
//! temperature sensor.
//!
//! A user's YAML record is validated by [`config`], then [`binder::bind`] turns
//! it into a [`driver::SomoseDriver`] while registering it with the services of
//! an [`interfaces::Host`] and emitting the C++ that wires it up on the device.

pub mod binder;
pub mod config;
pub mod constants;
pub mod driver;
pub mod helpers;
pub mod interfaces;

pub use binder::{bind, bind_validated, BindError};
