use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_yml::Value;

use super::error::{SchemaError, SchemaErrorKind};
use super::validators::Record;

/// Value the scheduler treats as "never run"
pub const SCHEDULER_NEVER: u32 = u32::MAX;

const UNITS: &[(&str, f64)] = &[
    ("us", 0.001),
    ("microseconds", 0.001),
    ("ms", 1.0),
    ("milliseconds", 1.0),
    ("s", 1_000.0),
    ("sec", 1_000.0),
    ("seconds", 1_000.0),
    ("min", 60_000.0),
    ("minutes", 60_000.0),
    ("h", 3_600_000.0),
    ("hours", 3_600_000.0),
    ("d", 86_400_000.0),
    ("days", 86_400_000.0),
];

const MAPPING_UNITS: &[(&str, f64)] = &[
    ("days", 86_400_000.0),
    ("hours", 3_600_000.0),
    ("minutes", 60_000.0),
    ("seconds", 1_000.0),
    ("milliseconds", 1.0),
    ("microseconds", 0.001),
];

/// Time period with millisecond precision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePeriod {
    Millis(u32),
    Never,
}

impl TimePeriod {
    pub fn from_duration(duration: Duration) -> Self {
        TimePeriod::Millis(u32::try_from(duration.as_millis()).unwrap_or(SCHEDULER_NEVER - 1))
    }

    /// Milliseconds as handed to the firmware scheduler
    pub fn scheduler_millis(&self) -> u32 {
        match self {
            TimePeriod::Millis(ms) => *ms,
            TimePeriod::Never => SCHEDULER_NEVER,
        }
    }
}

fn from_millis(ms: f64) -> Result<TimePeriod, String> {
    if ms.fract() != 0.0 {
        return Err("maximum precision is milliseconds".into());
    }
    if ms < 0.0 {
        return Err("time period must not be negative".into());
    }
    if ms >= f64::from(SCHEDULER_NEVER) {
        return Err("time period is too long".into());
    }
    Ok(TimePeriod::Millis(ms as u32))
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("never") {
            return Ok(TimePeriod::Never);
        }
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let unit = unit.trim();
        if number.is_empty() {
            return Err(format!("expected a time period like '20s', got '{s}'"));
        }
        if unit.is_empty() {
            return Err(format!(
                "don't know what '{s}' means as it has no time unit, did you mean '{s}s'?"
            ));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid number '{number}'"))?;
        let factor = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| format!("unknown time unit '{unit}'"))?;
        // Round away float noise such as 1.1s * 1000 = 1100.0000000000002
        let ms = value * factor;
        let rounded = (ms * 1000.0).round() / 1000.0;
        from_millis(rounded)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePeriod::Never => f.write_str("never"),
            TimePeriod::Millis(ms) if *ms % 1000 == 0 => write!(f, "{}s", ms / 1000),
            TimePeriod::Millis(ms) => write!(f, "{ms}ms"),
        }
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn from_mapping(key: &str, value: &Value) -> Result<TimePeriod, SchemaError> {
    let record = Record::new(value).map_err(|e| e.within(key))?;
    let allowed: Vec<&str> = MAPPING_UNITS.iter().map(|(name, _)| *name).collect();
    record.deny_unknown(&allowed).map_err(|e| e.within(key))?;
    let mut ms = 0.0_f64;
    for (unit, factor) in MAPPING_UNITS {
        if let Some(v) = record.optional(unit) {
            let amount = v.as_f64().ok_or_else(|| {
                SchemaError::new(*unit, SchemaErrorKind::WrongType("a number")).within(key)
            })?;
            ms += amount * factor;
        }
    }
    from_millis((ms * 1000.0).round() / 1000.0).map_err(|msg| SchemaError::invalid(key, msg))
}

pub(crate) fn time_period(key: &str, value: &Value) -> Result<TimePeriod, SchemaError> {
    match value {
        Value::String(s) => s.parse().map_err(|msg| SchemaError::invalid(key, msg)),
        Value::Mapping(_) => from_mapping(key, value),
        Value::Number(n) => Err(SchemaError::invalid(
            key,
            format!("don't know what '{n}' means as it has no time unit, did you mean '{n}s'?"),
        )),
        _ => Err(SchemaError::new(key, SchemaErrorKind::WrongType("a time period"))),
    }
}
