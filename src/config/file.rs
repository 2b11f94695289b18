use std::fs;
use std::path::{Path, PathBuf};

use serde_yml::Value;
use thiserror::Error;

use super::error::{SchemaError, SchemaErrorKind};
use super::validators::{self, Record};
use crate::constants::{defaults, keys};
use crate::driver::PLATFORM;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// SOMOSE records found in a YAML document, in file order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// IDs of the declared I2C buses
    pub buses: Vec<String>,
    pub records: Vec<Value>,
}

fn bus_ids(value: &Value) -> Result<Vec<String>, SchemaError> {
    let entries: Vec<&Value> = match value {
        Value::Sequence(seq) => seq.iter().collect(),
        Value::Mapping(_) => vec![value],
        // `i2c:` alone declares one bus with default options
        Value::Null => return Ok(vec![defaults::I2C_BUS_ID.to_string()]),
        _ => return Err(SchemaError::new(keys::I2C, SchemaErrorKind::WrongType("a list of buses"))),
    };
    let mut ids = Vec::with_capacity(entries.len());
    for (n, entry) in entries.into_iter().enumerate() {
        let record = Record::new(entry).map_err(|e| e.within(n.to_string()).within(keys::I2C))?;
        // Bus options other than the ID (pins, frequency) are not ours to check
        let id = match record.optional(keys::ID) {
            Some(v) => validators::identifier(keys::ID, v)
                .map_err(|e| e.within(n.to_string()).within(keys::I2C))?,
            None if n == 0 => defaults::I2C_BUS_ID.to_string(),
            None => format!("{}_{}", defaults::I2C_BUS_ID, n + 1),
        };
        ids.push(id);
    }
    Ok(ids)
}

fn platform_records(value: &Value) -> Result<Vec<Value>, SchemaError> {
    let Value::Sequence(entries) = value else {
        return Err(SchemaError::new(keys::SENSOR, SchemaErrorKind::WrongType("a list of sensor platforms")));
    };
    let mut records = Vec::new();
    for (n, entry) in entries.iter().enumerate() {
        let Value::Mapping(mapping) = entry else {
            return Err(SchemaError::root(SchemaErrorKind::WrongType("a mapping"))
                .within(n.to_string())
                .within(keys::SENSOR));
        };
        match mapping.get(keys::PLATFORM).and_then(Value::as_str) {
            Some(PLATFORM) => {
                let mut record = mapping.clone();
                record.remove(keys::PLATFORM);
                records.push(Value::Mapping(record));
            }
            Some(other) => log::debug!("Skipping sensor #{} of platform '{}'", n, other),
            None => {
                return Err(SchemaError::new(keys::PLATFORM, SchemaErrorKind::MissingKey)
                    .within(n.to_string())
                    .within(keys::SENSOR))
            }
        }
    }
    Ok(records)
}

/// Split a parsed document into bus declarations and SOMOSE records.
///
/// A document with a `sensor:` list contributes each `platform: somose`
/// entry; any other document is taken as a single record.
pub fn parse_document(text: &str) -> Result<Document, FileError> {
    let root: Value = serde_yml::from_str(text)?;
    let Some(mapping) = root.as_mapping() else {
        return Ok(Document {
            buses: Vec::new(),
            records: vec![root],
        });
    };
    if !mapping.contains_key(keys::SENSOR) {
        return Ok(Document {
            buses: Vec::new(),
            records: vec![root],
        });
    }

    let buses = match mapping.get(keys::I2C) {
        Some(v) => bus_ids(v)?,
        None => Vec::new(),
    };
    let records = match mapping.get(keys::SENSOR) {
        Some(v) => platform_records(v)?,
        None => Vec::new(),
    };
    log::debug!(
        "Document declares {} I2C bus(es) and {} {} record(s)",
        buses.len(),
        records.len(),
        PLATFORM
    );
    Ok(Document { buses, records })
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Document, FileError> {
    let path = path.as_ref();
    log::debug!("Loading config from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}
