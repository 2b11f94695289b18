//! Closed option sets selected by string in the config
//!
//! Strings are matched once here; everything downstream works with the enums.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::Serialize;
use serde_yml::Value;

use super::error::{SchemaError, SchemaErrorKind};

/// Uppercase and turn spaces into underscores, so `"Energy Saving"`
/// matches `ENERGY_SAVING`
pub fn normalize_upper(s: &str) -> String {
    s.to_uppercase().replace(' ', "_")
}

pub fn normalize_lower(s: &str) -> String {
    s.to_lowercase().replace(' ', "_")
}

fn unknown_option(value: &str, options: &[&str]) -> SchemaErrorKind {
    SchemaErrorKind::UnknownOption {
        value: value.to_string(),
        options: options.iter().map(|o| format!("'{o}'")).join(", "),
    }
}

/// Resolve the option string found under `key`
pub(crate) fn resolve<T>(key: &str, value: &Value) -> Result<T, SchemaError>
where
    T: FromStr<Err = SchemaErrorKind>,
{
    let s = value
        .as_str()
        .ok_or_else(|| SchemaError::new(key, SchemaErrorKind::WrongType("a string")))?;
    s.parse::<T>().map_err(|kind| SchemaError::new(key, kind))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EnergyMode {
    /// Spelling matches the constant in the firmware's `EnergyMode_t`
    #[serde(rename = "CONTINOUS")]
    Continous,
    #[serde(rename = "ENERGY_SAVING")]
    EnergySaving,
}

impl EnergyMode {
    pub const OPTIONS: [&'static str; 2] = ["CONTINOUS", "ENERGY_SAVING"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyMode::Continous => "CONTINOUS",
            EnergyMode::EnergySaving => "ENERGY_SAVING",
        }
    }

    /// Enumerator name on the firmware side
    pub fn cpp_constant(&self) -> &'static str {
        match self {
            EnergyMode::Continous => "continous",
            EnergyMode::EnergySaving => "energy_saving",
        }
    }
}

impl FromStr for EnergyMode {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_upper(s).as_str() {
            "CONTINOUS" => Ok(EnergyMode::Continous),
            "ENERGY_SAVING" => Ok(EnergyMode::EnergySaving),
            _ => Err(unknown_option(s, &Self::OPTIONS)),
        }
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which moisture value the driver publishes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MoistureData {
    #[serde(rename = "LAST")]
    Last,
    #[serde(rename = "AVERAGE")]
    Average,
    #[serde(rename = "RAW")]
    Raw,
}

impl MoistureData {
    pub const OPTIONS: [&'static str; 3] = ["LAST", "AVERAGE", "RAW"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureData::Last => "LAST",
            MoistureData::Average => "AVERAGE",
            MoistureData::Raw => "RAW",
        }
    }

    pub fn cpp_constant(&self) -> &'static str {
        match self {
            MoistureData::Last => "last",
            MoistureData::Average => "average",
            MoistureData::Raw => "raw",
        }
    }
}

impl FromStr for MoistureData {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_upper(s).as_str() {
            "LAST" => Ok(MoistureData::Last),
            "AVERAGE" => Ok(MoistureData::Average),
            "RAW" => Ok(MoistureData::Raw),
            _ => Err(unknown_option(s, &Self::OPTIONS)),
        }
    }
}

impl fmt::Display for MoistureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the host aggregates a sensor's values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

impl StateClass {
    pub const OPTIONS: [&'static str; 3] = ["measurement", "total", "total_increasing"];

    pub fn cpp_constant(&self) -> &'static str {
        match self {
            StateClass::Measurement => "sensor::STATE_CLASS_MEASUREMENT",
            StateClass::Total => "sensor::STATE_CLASS_TOTAL",
            StateClass::TotalIncreasing => "sensor::STATE_CLASS_TOTAL_INCREASING",
        }
    }
}

impl FromStr for StateClass {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_lower(s).as_str() {
            "measurement" => Ok(StateClass::Measurement),
            "total" => Ok(StateClass::Total),
            "total_increasing" => Ok(StateClass::TotalIncreasing),
            _ => Err(unknown_option(s, &Self::OPTIONS)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

impl EntityCategory {
    pub const OPTIONS: [&'static str; 2] = ["config", "diagnostic"];

    pub fn cpp_constant(&self) -> &'static str {
        match self {
            EntityCategory::Config => "ENTITY_CATEGORY_CONFIG",
            EntityCategory::Diagnostic => "ENTITY_CATEGORY_DIAGNOSTIC",
        }
    }
}

impl FromStr for EntityCategory {
    type Err = SchemaErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_lower(s).as_str() {
            "config" => Ok(EntityCategory::Config),
            "diagnostic" => Ok(EntityCategory::Diagnostic),
            _ => Err(unknown_option(s, &Self::OPTIONS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_mode_is_case_and_separator_insensitive() {
        for s in ["energy_saving", "ENERGY_SAVING", "Energy Saving", "energy saving"] {
            assert_eq!(s.parse::<EnergyMode>(), Ok(EnergyMode::EnergySaving), "{s}");
        }
        assert_eq!("continous".parse::<EnergyMode>(), Ok(EnergyMode::Continous));
    }

    #[test]
    fn corrected_spelling_is_not_accepted() {
        assert!("continuous".parse::<EnergyMode>().is_err());
    }

    #[test]
    fn other_separators_are_not_accepted() {
        assert!("energy-saving".parse::<EnergyMode>().is_err());
        assert!(" raw".parse::<MoistureData>().is_err());
    }

    #[test]
    fn moisture_data_variants() {
        assert_eq!("last".parse::<MoistureData>(), Ok(MoistureData::Last));
        assert_eq!("Average".parse::<MoistureData>(), Ok(MoistureData::Average));
        assert_eq!("RAW".parse::<MoistureData>(), Ok(MoistureData::Raw));
    }

    #[test]
    fn unknown_option_lists_choices() {
        let err = "turbo".parse::<EnergyMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown value 'turbo', valid options are 'CONTINOUS', 'ENERGY_SAVING'"
        );
    }

    #[test]
    fn resolve_names_the_key() {
        let value: Value = serde_yml::from_str("turbo").unwrap();
        let err = resolve::<EnergyMode>("energy_mode", &value).unwrap_err();
        assert_eq!(err.key(), Some("energy_mode"));

        let value: Value = serde_yml::from_str("3").unwrap();
        let err = resolve::<MoistureData>("moisture_data", &value).unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::WrongType("a string"));
    }

    #[test]
    fn state_class_and_entity_category() {
        assert_eq!(
            "Total Increasing".parse::<StateClass>(),
            Ok(StateClass::TotalIncreasing)
        );
        assert_eq!(
            "DIAGNOSTIC".parse::<EntityCategory>(),
            Ok(EntityCategory::Diagnostic)
        );
        assert_eq!(
            StateClass::Measurement.cpp_constant(),
            "sensor::STATE_CLASS_MEASUREMENT"
        );
    }

    #[test]
    fn serializes_as_option_name() {
        assert_eq!(
            serde_json::to_string(&EnergyMode::Continous).unwrap(),
            "\"CONTINOUS\""
        );
        assert_eq!(
            serde_json::to_string(&StateClass::TotalIncreasing).unwrap(),
            "\"total_increasing\""
        );
    }
}
