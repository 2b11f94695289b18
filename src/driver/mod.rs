//! The SOMOSE driver instance produced by binding a config
//!
//! The driver itself runs on the firmware; this is the build-time view of
//! one instance: what it was constructed with and which sensors it owns.

use serde::Serialize;

use crate::config::{EnergyMode, MoistureData, TimePeriod};

/// Name under which the component is selected in a `sensor:` list
pub const PLATFORM: &str = "somose";
pub const CPP_NAMESPACE: &str = "somose";
pub const CPP_CLASS: &str = "somose::SOMOSE";
/// Setup priority of data-producing components
pub const SETUP_PRIORITY_DATA: f64 = 600.0;

/// Opaque reference to a sensor created by a sensor factory
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SensorHandle {
    id: String,
    #[serde(skip)]
    slot: usize,
}

impl SensorHandle {
    pub fn new(id: impl Into<String>, slot: usize) -> Self {
        SensorHandle {
            id: id.into(),
            slot,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of the sensor in the factory that created it
    pub fn slot(&self) -> usize {
        self.slot
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SomoseDriver {
    id: String,
    update_interval: TimePeriod,
    address: u8,
    setup_priority: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    bus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature_sensor: Option<SensorHandle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moisture_sensor: Option<SensorHandle>,
    energy_mode: EnergyMode,
    moisture_data: MoistureData,
}

impl SomoseDriver {
    pub fn new(id: impl Into<String>, update_interval: TimePeriod, address: u8) -> Self {
        SomoseDriver {
            id: id.into(),
            update_interval,
            address,
            setup_priority: SETUP_PRIORITY_DATA,
            bus: None,
            temperature_sensor: None,
            moisture_sensor: None,
            energy_mode: EnergyMode::Continous,
            moisture_data: MoistureData::Average,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn update_interval(&self) -> TimePeriod {
        self.update_interval
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn setup_priority(&self) -> f64 {
        self.setup_priority
    }

    pub fn bus(&self) -> Option<&str> {
        self.bus.as_deref()
    }

    pub fn temperature_sensor(&self) -> Option<&SensorHandle> {
        self.temperature_sensor.as_ref()
    }

    pub fn moisture_sensor(&self) -> Option<&SensorHandle> {
        self.moisture_sensor.as_ref()
    }

    pub fn energy_mode(&self) -> EnergyMode {
        self.energy_mode
    }

    pub fn moisture_data(&self) -> MoistureData {
        self.moisture_data
    }

    pub fn set_setup_priority(&mut self, priority: f64) {
        self.setup_priority = priority;
    }

    pub fn set_bus(&mut self, bus: impl Into<String>) {
        self.bus = Some(bus.into());
    }

    pub fn attach_temperature_sensor(&mut self, handle: SensorHandle) {
        self.temperature_sensor = Some(handle);
    }

    pub fn attach_moisture_sensor(&mut self, handle: SensorHandle) {
        self.moisture_sensor = Some(handle);
    }

    pub fn set_energy_mode(&mut self, mode: EnergyMode) {
        self.energy_mode = mode;
    }

    pub fn set_moisture_data_mode(&mut self, mode: MoistureData) {
        self.moisture_data = mode;
    }

    /// Log the bound configuration the way the component reports itself at boot
    pub fn dump_config(&self) {
        log::info!("SOMOSE '{}':", self.id);
        log::info!(
            "  Address: 0x{:02X}{}",
            self.address,
            self.bus
                .as_deref()
                .map(|b| format!(" on {b}"))
                .unwrap_or_default()
        );
        log::info!("  Update Interval: {}", self.update_interval);
        log::info!("  Setup Priority: {:.1}", self.setup_priority);
        log::info!("  Energy Mode: {}", self.energy_mode);
        log::info!("  Moisture Data: {}", self.moisture_data);
        for (label, sensor) in [
            ("Temperature", &self.temperature_sensor),
            ("Moisture", &self.moisture_sensor),
        ] {
            match sensor {
                Some(handle) => log::info!("  {} '{}'", label, handle.id()),
                None => log::info!("  {}: not configured", label),
            }
        }
    }
}
