//! Configuration schema of the SOMOSE component
//!
//! A raw YAML record is checked key by key and turned into a [`SomoseConfig`]
//! with every default filled in. Failures carry the path of the offending
//! key so the user can find it in their file.

mod enums;
mod error;
mod file;
mod i2c;
mod sensor;
mod time_period;
mod validators;

use serde::Serialize;
use serde_yml::Value;

use crate::constants::{defaults, keys};
use crate::driver::PLATFORM;

pub use enums::{normalize_lower, normalize_upper, EnergyMode, EntityCategory, MoistureData, StateClass};
pub use error::{SchemaError, SchemaErrorKind};
pub use file::{load_file, parse_document, Document, FileError};
pub use i2c::{I2cDeviceConfig, MAX_ADDRESS};
pub use sensor::{Channel, SensorConfig, SensorDefaults, ICON_WATER_PERCENT, UNIT_CELSIUS, UNIT_PERCENT};
pub use time_period::{TimePeriod, SCHEDULER_NEVER};

const ALLOWED_KEYS: &[&str] = &[
    keys::ID,
    keys::TEMPERATURE,
    keys::MOISTURE,
    keys::ENERGY_MODE,
    keys::MOISTURE_DATA,
    keys::UPDATE_INTERVAL,
    keys::SETUP_PRIORITY,
    keys::ADDRESS,
    keys::I2C_ID,
];

/// Validated configuration of one SOMOSE instance
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SomoseConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<SensorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moisture: Option<SensorConfig>,
    pub energy_mode: EnergyMode,
    pub moisture_data: MoistureData,
    pub update_interval: TimePeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_priority: Option<f64>,
    pub i2c: I2cDeviceConfig,
}

impl SomoseConfig {
    /// Sub-config of `channel`, if the user enabled it
    pub fn sensor(&self, channel: Channel) -> Option<&SensorConfig> {
        match channel {
            Channel::Temperature => self.temperature.as_ref(),
            Channel::Moisture => self.moisture.as_ref(),
        }
    }

    /// Every ID a bind of this config declares, the component first
    pub fn declared_ids(&self) -> Vec<&str> {
        std::iter::once(self.id.as_str())
            .chain(self.temperature.iter().map(|s| s.id.as_str()))
            .chain(self.moisture.iter().map(|s| s.id.as_str()))
            .collect()
    }
}

fn sensor_sub_config(
    record: &validators::Record,
    channel: Channel,
    parent_id: &str,
) -> Result<Option<SensorConfig>, SchemaError> {
    // `temperature:` with no body still enables the channel
    if !record.contains(channel.key()) {
        return Ok(None);
    }
    let body = record.optional(channel.key()).filter(|v| !v.is_null());
    sensor::validate_sensor(channel, parent_id, body)
        .map(Some)
        .map_err(|e| e.within(channel.key()))
}

/// First of `somose_id`, `somose_id_2`, ... that `taken` does not claim
fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{}_{}", PLATFORM, keys::ID);
    let mut id = base.clone();
    let mut n = 1;
    while taken(&id) {
        n += 1;
        id = format!("{base}_{n}");
    }
    id
}

/// Validate a raw record, filling in defaults
pub fn validate(raw: &Value) -> Result<SomoseConfig, SchemaError> {
    validate_with(raw, |_| false)
}

/// Validate a raw record; a record without `id` gets a generated one that
/// `taken` does not claim
pub fn validate_with(raw: &Value, taken: impl Fn(&str) -> bool) -> Result<SomoseConfig, SchemaError> {
    let record = validators::Record::new(raw)?;
    record.deny_unknown(ALLOWED_KEYS)?;

    let id = match record.optional(keys::ID) {
        Some(v) => validators::identifier(keys::ID, v)?,
        None => {
            let id = generate_id(taken);
            log::debug!("Record has no {}, using '{}'", keys::ID, id);
            id
        }
    };

    let temperature = sensor_sub_config(&record, Channel::Temperature, &id)?;
    let moisture = sensor_sub_config(&record, Channel::Moisture, &id)?;

    let default_energy_mode = Value::String(defaults::ENERGY_MODE.to_string());
    let energy_mode = enums::resolve::<EnergyMode>(
        keys::ENERGY_MODE,
        record
            .optional(keys::ENERGY_MODE)
            .unwrap_or(&default_energy_mode),
    )?;
    let default_moisture_data = Value::String(defaults::MOISTURE_DATA.to_string());
    let moisture_data = enums::resolve::<MoistureData>(
        keys::MOISTURE_DATA,
        record
            .optional(keys::MOISTURE_DATA)
            .unwrap_or(&default_moisture_data),
    )?;

    let update_interval = match record.optional(keys::UPDATE_INTERVAL) {
        Some(v) => time_period::time_period(keys::UPDATE_INTERVAL, v)?,
        None => TimePeriod::from_duration(defaults::UPDATE_INTERVAL),
    };
    let setup_priority = record
        .optional(keys::SETUP_PRIORITY)
        .map(|v| validators::float(keys::SETUP_PRIORITY, v))
        .transpose()?;

    let address = match record.optional(keys::ADDRESS) {
        Some(v) => i2c::address(keys::ADDRESS, v)?,
        None => defaults::I2C_ADDRESS,
    };
    let bus = record
        .optional(keys::I2C_ID)
        .map(|v| i2c::bus_id(keys::I2C_ID, v))
        .transpose()?;

    Ok(SomoseConfig {
        id,
        temperature,
        moisture,
        energy_mode,
        moisture_data,
        update_interval,
        setup_priority,
        i2c: I2cDeviceConfig { address, bus },
    })
}

pub fn from_str(config_raw: &str) -> Result<SomoseConfig, FileError> {
    let raw: Value = serde_yml::from_str(config_raw)?;
    validate(&raw).map_err(Into::into)
}
