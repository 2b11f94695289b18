//! Sub-schema shared by the temperature and moisture channels

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_yml::Value;

use super::enums::{self, EntityCategory, StateClass};
use super::error::SchemaError;
use super::time_period::{time_period, TimePeriod};
use super::validators::{self, Record};
use crate::constants::keys;

pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_PERCENT: &str = "%";
pub const ICON_WATER_PERCENT: &str = "mdi:water-percent";

static DEVICE_CLASSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "",
        "apparent_power",
        "aqi",
        "atmospheric_pressure",
        "battery",
        "carbon_dioxide",
        "carbon_monoxide",
        "current",
        "data_rate",
        "data_size",
        "distance",
        "duration",
        "energy",
        "energy_storage",
        "frequency",
        "gas",
        "humidity",
        "illuminance",
        "irradiance",
        "moisture",
        "monetary",
        "nitrogen_dioxide",
        "nitrogen_monoxide",
        "nitrous_oxide",
        "ozone",
        "ph",
        "pm1",
        "pm10",
        "pm25",
        "power",
        "power_factor",
        "precipitation",
        "precipitation_intensity",
        "pressure",
        "reactive_power",
        "signal_strength",
        "sound_pressure",
        "speed",
        "sulphur_dioxide",
        "temperature",
        "volatile_organic_compounds",
        "voltage",
        "volume",
        "volume_storage",
        "water",
        "weight",
        "wind_speed",
    ])
});

const ALLOWED_KEYS: &[&str] = &[
    keys::ID,
    keys::NAME,
    keys::INTERNAL,
    keys::DISABLED_BY_DEFAULT,
    keys::FORCE_UPDATE,
    keys::UNIT_OF_MEASUREMENT,
    keys::ICON,
    keys::ACCURACY_DECIMALS,
    keys::DEVICE_CLASS,
    keys::STATE_CLASS,
    keys::ENTITY_CATEGORY,
    keys::EXPIRE_AFTER,
];

/// Measurement channel of the SOMOSE that can be exposed as a sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Temperature,
    Moisture,
}

impl Channel {
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Temperature => keys::TEMPERATURE,
            Channel::Moisture => keys::MOISTURE,
        }
    }

    pub fn defaults(&self) -> SensorDefaults {
        match self {
            Channel::Temperature => SensorDefaults {
                unit_of_measurement: UNIT_CELSIUS,
                accuracy_decimals: 0,
                icon: None,
                device_class: "temperature",
                state_class: StateClass::Measurement,
            },
            Channel::Moisture => SensorDefaults {
                unit_of_measurement: UNIT_PERCENT,
                accuracy_decimals: 0,
                icon: Some(ICON_WATER_PERCENT),
                device_class: "moisture",
                state_class: StateClass::Measurement,
            },
        }
    }
}

/// Metadata a channel fills in when the user leaves it out
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorDefaults {
    pub unit_of_measurement: &'static str,
    pub accuracy_decimals: i8,
    pub icon: Option<&'static str>,
    pub device_class: &'static str,
    pub state_class: StateClass,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensorConfig {
    pub id: String,
    pub channel: Channel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    pub disabled_by_default: bool,
    pub force_update: bool,
    pub unit_of_measurement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub accuracy_decimals: i8,
    pub device_class: String,
    pub state_class: StateClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<TimePeriod>,
}

fn icon(key: &str, value: &Value) -> Result<String, SchemaError> {
    let s = validators::string(key, value)?;
    let valid_part = |p: &str| {
        !p.is_empty()
            && p
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    };
    match s.split_once(':') {
        Some((prefix, name)) if valid_part(prefix) && valid_part(name) => Ok(s),
        _ => Err(SchemaError::invalid(
            key,
            format!("icons should be in the form 'prefix:name', e.g. '{ICON_WATER_PERCENT}'"),
        )),
    }
}

fn device_class(key: &str, value: &Value) -> Result<String, SchemaError> {
    let s = enums::normalize_lower(&validators::string(key, value)?);
    if DEVICE_CLASSES.contains(s.as_str()) {
        Ok(s)
    } else {
        Err(SchemaError::invalid(key, format!("unknown device class '{s}'")))
    }
}

/// Validate the sub-config of one channel.
///
/// `value` may be `None` (written as `temperature:` with no body), which is
/// the same as an empty mapping. Without an explicit `id` the sensor is
/// named after its parent, e.g. `soil_temperature`.
pub(crate) fn validate_sensor(
    channel: Channel,
    parent_id: &str,
    value: Option<&Value>,
) -> Result<SensorConfig, SchemaError> {
    let empty = Value::Mapping(Default::default());
    let value = value.unwrap_or(&empty);
    let record = Record::new(value)?;
    record.deny_unknown(ALLOWED_KEYS)?;

    let defaults = channel.defaults();
    let id = match record.optional(keys::ID) {
        Some(v) => validators::identifier(keys::ID, v)?,
        None => format!("{parent_id}_{}", channel.key()),
    };

    let name = record
        .optional(keys::NAME)
        .map(|v| validators::string(keys::NAME, v))
        .transpose()?;
    let internal = record
        .optional(keys::INTERNAL)
        .map(|v| validators::boolean(keys::INTERNAL, v))
        .transpose()?;
    let disabled_by_default = record
        .optional(keys::DISABLED_BY_DEFAULT)
        .map(|v| validators::boolean(keys::DISABLED_BY_DEFAULT, v))
        .transpose()?
        .unwrap_or(false);
    let force_update = record
        .optional(keys::FORCE_UPDATE)
        .map(|v| validators::boolean(keys::FORCE_UPDATE, v))
        .transpose()?
        .unwrap_or(false);
    let unit_of_measurement = record
        .optional(keys::UNIT_OF_MEASUREMENT)
        .map(|v| validators::string(keys::UNIT_OF_MEASUREMENT, v))
        .transpose()?
        .unwrap_or_else(|| defaults.unit_of_measurement.to_string());
    let icon = match record.optional(keys::ICON) {
        Some(v) => Some(icon(keys::ICON, v)?),
        None => defaults.icon.map(str::to_string),
    };
    let accuracy_decimals = match record.optional(keys::ACCURACY_DECIMALS) {
        Some(v) => validators::integer(
            keys::ACCURACY_DECIMALS,
            v,
            i64::from(i8::MIN),
            i64::from(i8::MAX),
        )? as i8,
        None => defaults.accuracy_decimals,
    };
    let device_class = match record.optional(keys::DEVICE_CLASS) {
        Some(v) => device_class(keys::DEVICE_CLASS, v)?,
        None => defaults.device_class.to_string(),
    };
    let state_class = match record.optional(keys::STATE_CLASS) {
        Some(v) => enums::resolve::<StateClass>(keys::STATE_CLASS, v)?,
        None => defaults.state_class,
    };
    let entity_category = record
        .optional(keys::ENTITY_CATEGORY)
        .map(|v| enums::resolve::<EntityCategory>(keys::ENTITY_CATEGORY, v))
        .transpose()?;
    let expire_after = record
        .optional(keys::EXPIRE_AFTER)
        .map(|v| time_period(keys::EXPIRE_AFTER, v))
        .transpose()?;

    Ok(SensorConfig {
        id,
        channel,
        name,
        internal,
        disabled_by_default,
        force_update,
        unit_of_measurement,
        icon,
        accuracy_decimals,
        device_class,
        state_class,
        entity_category,
        expire_after,
    })
}
