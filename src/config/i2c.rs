use serde::Serialize;
use serde_yml::Value;

use super::error::{SchemaError, SchemaErrorKind};
use super::validators;

/// Highest 7-bit I2C address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Placement of the device on an I2C bus
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct I2cDeviceConfig {
    pub address: u8,
    /// Bus to attach to; `None` lets the bus registry pick its only bus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
}

fn parse_address(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

pub(crate) fn address(key: &str, value: &Value) -> Result<u8, SchemaError> {
    let raw = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_address(s),
        _ => None,
    }
    .ok_or_else(|| SchemaError::new(key, SchemaErrorKind::WrongType("an I2C address")))?;
    if raw > u64::from(MAX_ADDRESS) {
        return Err(SchemaError::invalid(
            key,
            format!("I2C address 0x{raw:X} must be in range 0x00..=0x{MAX_ADDRESS:02X}"),
        ));
    }
    Ok(raw as u8)
}

pub(crate) fn bus_id(key: &str, value: &Value) -> Result<String, SchemaError> {
    validators::identifier(key, value)
}
