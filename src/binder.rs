//! Binding a validated config to a driver instance
//!
//! A bind walks a fixed sequence: declare the driver, register it as a polling
//! component, attach it to its I2C bus, create and attach the optional
//! sensors, then apply the two mode selectors. The generated code of all
//! steps is held back and only reaches the host's code sink when every step
//! has succeeded.

use cppgen::{Expression, Program, Statement};
use serde_yml::Value;
use thiserror::Error;

use crate::config::{self, SchemaError, SomoseConfig};
use crate::driver::{SomoseDriver, CPP_CLASS, CPP_NAMESPACE};
use crate::interfaces::{ConstructionError, FactoryError, Host};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("invalid config: {0}")]
    Schema(#[from] SchemaError),
    #[error("cannot construct component: {0}")]
    Construction(#[from] ConstructionError),
    #[error("cannot create sensor: {0}")]
    Factory(#[from] FactoryError),
}

/// Validate `raw` and bind it against `host`. A record without `id` is given
/// the first free `somose_id`, `somose_id_2`, ...
pub fn bind<H: Host + ?Sized>(raw: &Value, host: &mut H) -> Result<SomoseDriver, BindError> {
    let config = config::validate_with(raw, |id| host.contains(id))?;
    bind_validated(&config, host)
}

/// Reject the bind up front if any ID it would declare is taken, or the bus
/// cannot be resolved, so that failures leave the registries untouched
fn preflight<H: Host + ?Sized>(config: &SomoseConfig, host: &H) -> Result<(), BindError> {
    let ids = config.declared_ids();
    for (n, id) in ids.iter().enumerate() {
        if host.contains(id) || ids[..n].contains(id) {
            // The first ID is the component's own, the rest belong to sensors
            return Err(if n == 0 {
                BindError::Construction(ConstructionError::IdInUse(id.to_string()))
            } else {
                BindError::Factory(FactoryError::IdInUse(id.to_string()))
            });
        }
    }
    host.resolve_bus(&config.i2c)?;
    Ok(())
}

pub fn bind_validated<H: Host + ?Sized>(
    config: &SomoseConfig,
    host: &mut H,
) -> Result<SomoseDriver, BindError> {
    preflight(config, host)?;

    let id = config.id.as_str();
    let mut code = Program::new();

    log::debug!("{}: declaring driver", id);
    host.declare(id, CPP_CLASS)?;
    code.add(Statement::new_pvariable(CPP_CLASS, id));
    let mut driver = SomoseDriver::new(id, config.update_interval, config.i2c.address);
    if let Some(priority) = config.setup_priority {
        driver.set_setup_priority(priority);
    }

    log::debug!("{}: registering component, update interval {}", id, config.update_interval);
    host.register_component(id, config.update_interval, config.setup_priority, &mut code)?;

    log::debug!("{}: registering I2C device at 0x{:02X}", id, config.i2c.address);
    let bus = host.register_i2c_device(id, &config.i2c, &mut code)?;
    driver.set_bus(bus);

    if let Some(temperature) = &config.temperature {
        log::debug!("{}: creating temperature sensor '{}'", id, temperature.id);
        let handle = host.new_sensor(temperature, &mut code)?;
        code.add(Expression::method(
            id,
            "set_temperature_sensor",
            vec![Expression::id(handle.id())],
        ));
        driver.attach_temperature_sensor(handle);
    }

    if let Some(moisture) = &config.moisture {
        log::debug!("{}: creating moisture sensor '{}'", id, moisture.id);
        let handle = host.new_sensor(moisture, &mut code)?;
        code.add(Expression::method(
            id,
            "set_moisture_sensor",
            vec![Expression::id(handle.id())],
        ));
        driver.attach_moisture_sensor(handle);
    }

    driver.set_energy_mode(config.energy_mode);
    code.add(Expression::method(
        id,
        "set_Energy_Mode",
        vec![Expression::enum_value(CPP_NAMESPACE, config.energy_mode.cpp_constant())],
    ));

    driver.set_moisture_data_mode(config.moisture_data);
    code.add(Expression::method(
        id,
        "set_Moisture_Data",
        vec![Expression::enum_value(CPP_NAMESPACE, config.moisture_data.cpp_constant())],
    ));

    log::info!(
        "Bound SOMOSE '{}' ({} statements generated)",
        id,
        code.len()
    );
    host.add_program(code);
    Ok(driver)
}
