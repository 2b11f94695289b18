use std::collections::HashMap;

use cppgen::{Expression, Program, Statement};
use serde::Serialize;

use super::sensors::{sensor_setup, SENSOR_CLASS};
use super::{
    BusRegistry, CodeSink, ComponentRegistry, ConstructionError, FactoryError, IdRegistry,
    SensorFactory,
};
use crate::config::{I2cDeviceConfig, SensorConfig, TimePeriod};
use crate::constants::defaults;
use crate::driver::SensorHandle;

const I2C_BUS_CLASS: &str = "i2c::I2CBus";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisteredComponent {
    pub id: String,
    pub update_interval: TimePeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_priority: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct I2cDevice {
    pub id: String,
    pub bus: String,
    pub address: u8,
}

/// Host that keeps every registry in memory.
///
/// Entries are only ever appended. The generated program collects whatever
/// binders flush into it.
#[derive(Debug, Default)]
pub struct MemoryHost {
    ids: HashMap<String, String>,
    id_order: Vec<String>,
    buses: Vec<String>,
    components: Vec<RegisteredComponent>,
    i2c_devices: Vec<I2cDevice>,
    sensors: Vec<SensorConfig>,
    program: Program,
}

impl MemoryHost {
    /// Host with the single default I2C bus
    pub fn new() -> Self {
        Self::with_buses([defaults::I2C_BUS_ID])
    }

    /// Host with the given I2C buses already declared
    pub fn with_buses<I, S>(buses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = MemoryHost::default();
        for bus in buses {
            let bus = bus.into();
            host.ids.insert(bus.clone(), I2C_BUS_CLASS.to_string());
            host.id_order.push(bus.clone());
            host.buses.push(bus);
        }
        host
    }

    /// C++ type of a declared ID
    pub fn type_of(&self, id: &str) -> Option<&str> {
        self.ids.get(id).map(String::as_str)
    }

    /// Declared IDs in declaration order
    pub fn declared_ids(&self) -> &[String] {
        &self.id_order
    }

    pub fn buses(&self) -> &[String] {
        &self.buses
    }

    pub fn components(&self) -> &[RegisteredComponent] {
        &self.components
    }

    pub fn i2c_devices(&self) -> &[I2cDevice] {
        &self.i2c_devices
    }

    pub fn sensors(&self) -> &[SensorConfig] {
        &self.sensors
    }

    /// Sensor a handle from this host refers to
    pub fn sensor(&self, handle: &SensorHandle) -> Option<&SensorConfig> {
        self.sensors
            .get(handle.slot())
            .filter(|s| s.id == handle.id())
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl IdRegistry for MemoryHost {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    fn declare(&mut self, id: &str, type_name: &str) -> Result<(), ConstructionError> {
        if self.contains(id) {
            return Err(ConstructionError::IdInUse(id.to_string()));
        }
        log::trace!("Declaring {} as {}", id, type_name);
        self.ids.insert(id.to_string(), type_name.to_string());
        self.id_order.push(id.to_string());
        Ok(())
    }
}

impl ComponentRegistry for MemoryHost {
    fn register_component(
        &mut self,
        id: &str,
        update_interval: TimePeriod,
        setup_priority: Option<f64>,
        out: &mut Program,
    ) -> Result<(), ConstructionError> {
        if self.components.iter().any(|c| c.id == id) {
            return Err(ConstructionError::AlreadyRegistered { id: id.to_string() });
        }
        out.add(Expression::method(
            id,
            "set_update_interval",
            vec![Expression::Int(i64::from(update_interval.scheduler_millis()))],
        ));
        if let Some(priority) = setup_priority {
            out.add(Expression::method(
                id,
                "set_setup_priority",
                vec![Expression::Float(priority)],
            ));
        }
        out.add(Expression::app("register_component", vec![Expression::id(id)]));
        self.components.push(RegisteredComponent {
            id: id.to_string(),
            update_interval,
            setup_priority,
        });
        Ok(())
    }
}

impl BusRegistry for MemoryHost {
    fn resolve_bus(&self, device: &I2cDeviceConfig) -> Result<String, ConstructionError> {
        match &device.bus {
            Some(bus) if self.buses.contains(bus) => Ok(bus.clone()),
            Some(bus) => Err(ConstructionError::UnknownBus(bus.clone())),
            None => match self.buses.as_slice() {
                [] => Err(ConstructionError::NoBus),
                [only] => Ok(only.clone()),
                several => Err(ConstructionError::AmbiguousBus(several.to_vec())),
            },
        }
    }

    fn register_i2c_device(
        &mut self,
        id: &str,
        device: &I2cDeviceConfig,
        out: &mut Program,
    ) -> Result<String, ConstructionError> {
        let bus = self.resolve_bus(device)?;
        out.add(Expression::method(id, "set_i2c_bus", vec![Expression::id(bus.as_str())]));
        out.add(Expression::method(
            id,
            "set_i2c_address",
            vec![Expression::Hex(u64::from(device.address))],
        ));
        self.i2c_devices.push(I2cDevice {
            id: id.to_string(),
            bus: bus.clone(),
            address: device.address,
        });
        Ok(bus)
    }
}

impl SensorFactory for MemoryHost {
    fn new_sensor(&mut self, config: &SensorConfig, out: &mut Program) -> Result<SensorHandle, FactoryError> {
        self.declare(&config.id, SENSOR_CLASS)
            .map_err(|_| FactoryError::IdInUse(config.id.clone()))?;
        sensor_setup(config, out);
        let handle = SensorHandle::new(config.id.as_str(), self.sensors.len());
        self.sensors.push(config.clone());
        Ok(handle)
    }
}

impl CodeSink for MemoryHost {
    fn add(&mut self, statement: Statement) {
        self.program.add(statement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate, Channel};

    fn sensor_config(id: &str) -> SensorConfig {
        let raw = serde_yml::from_str(&format!("{{id: parent, moisture: {{id: {id}}}}}")).unwrap();
        validate(&raw).unwrap().sensor(Channel::Moisture).unwrap().clone()
    }

    #[test]
    fn default_host_has_one_bus() {
        let host = MemoryHost::new();
        assert_eq!(host.buses(), ["bus_i2c"]);
        assert!(host.contains("bus_i2c"));
        assert_eq!(host.type_of("bus_i2c"), Some("i2c::I2CBus"));
    }

    #[test]
    fn ids_are_unique() {
        let mut host = MemoryHost::new();
        host.declare("a", "somose::SOMOSE").unwrap();
        assert_eq!(
            host.declare("a", "sensor::Sensor"),
            Err(ConstructionError::IdInUse("a".into()))
        );
        assert_eq!(host.declared_ids(), ["bus_i2c", "a"]);
    }

    #[test]
    fn bus_resolution() {
        let one = MemoryHost::new();
        let several = MemoryHost::with_buses(["bus_a", "bus_b"]);
        let none = MemoryHost::with_buses(Vec::<String>::new());
        let implicit = I2cDeviceConfig { address: 0x55, bus: None };
        let explicit = I2cDeviceConfig {
            address: 0x55,
            bus: Some("bus_b".into()),
        };

        assert_eq!(one.resolve_bus(&implicit), Ok("bus_i2c".into()));
        assert_eq!(
            one.resolve_bus(&explicit),
            Err(ConstructionError::UnknownBus("bus_b".into()))
        );
        assert_eq!(several.resolve_bus(&explicit), Ok("bus_b".into()));
        assert!(matches!(
            several.resolve_bus(&implicit),
            Err(ConstructionError::AmbiguousBus(_))
        ));
        assert_eq!(none.resolve_bus(&implicit), Err(ConstructionError::NoBus));
    }

    #[test]
    fn component_and_bus_registration_emit_code() {
        let mut host = MemoryHost::new();
        let mut out = Program::new();
        host.register_component("soil", TimePeriod::Never, Some(600.0), &mut out)
            .unwrap();
        let bus = host
            .register_i2c_device("soil", &I2cDeviceConfig { address: 0x55, bus: None }, &mut out)
            .unwrap();
        assert_eq!(bus, "bus_i2c");
        assert_eq!(
            out.lines(),
            vec![
                "soil->set_update_interval(4294967295);",
                "soil->set_setup_priority(600.0f);",
                "App.register_component(soil);",
                "soil->set_i2c_bus(bus_i2c);",
                "soil->set_i2c_address(0x55);",
            ]
        );
        assert_eq!(host.components().len(), 1);
        assert_eq!(host.i2c_devices()[0].address, 0x55);
        // Nothing reaches the program until a binder flushes it
        assert!(host.program().is_empty());

        let err = host
            .register_component("soil", TimePeriod::Never, None, &mut out)
            .unwrap_err();
        assert_eq!(err, ConstructionError::AlreadyRegistered { id: "soil".into() });
    }

    #[test]
    fn factory_creates_handles() {
        let mut host = MemoryHost::new();
        let mut out = Program::new();
        let handle = host.new_sensor(&sensor_config("wet"), &mut out).unwrap();
        assert_eq!(handle.id(), "wet");
        assert_eq!(host.sensor(&handle).map(|s| s.unit_of_measurement.as_str()), Some("%"));
        assert_eq!(host.type_of("wet"), Some("sensor::Sensor"));
        assert_eq!(out.lines()[0], "sensor::Sensor *wet = new sensor::Sensor();");
        assert!(out.lines().contains(&"wet->set_icon(\"mdi:water-percent\");".to_string()));

        let err = host.new_sensor(&sensor_config("wet"), &mut out).unwrap_err();
        assert_eq!(err, FactoryError::IdInUse("wet".into()));
    }
}
