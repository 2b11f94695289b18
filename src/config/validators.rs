//! Primitive validators over raw YAML values
//!
//! Every validator takes the key it is checking so a failure can name it.

use std::collections::BTreeMap;

use serde_yml::Value;

use super::error::{SchemaError, SchemaErrorKind};

const CPP_RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "default", "delete", "do", "double", "else",
    "enum", "explicit", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr", "operator",
    "or", "private", "protected", "public", "register", "return", "short", "signed", "sizeof",
    "static", "struct", "switch", "template", "this", "throw", "true", "try", "typedef",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while", "xor",
];

/// Keys of one YAML mapping, sorted so error reporting is deterministic
pub(crate) struct Record<'a> {
    fields: BTreeMap<&'a str, &'a Value>,
}

impl<'a> Record<'a> {
    pub(crate) fn new(value: &'a Value) -> Result<Self, SchemaError> {
        let mapping = value
            .as_mapping()
            .ok_or_else(|| SchemaError::root(SchemaErrorKind::WrongType("a mapping")))?;
        let mut fields = BTreeMap::new();
        for (k, v) in mapping {
            let key = k
                .as_str()
                .ok_or_else(|| SchemaError::root(SchemaErrorKind::Invalid(format!("key {k:?} is not a string"))))?;
            fields.insert(key, v);
        }
        Ok(Record { fields })
    }

    pub(crate) fn deny_unknown(&self, allowed: &[&str]) -> Result<(), SchemaError> {
        match self.fields.keys().find(|k| !allowed.contains(k)) {
            Some(key) => Err(SchemaError::new(*key, SchemaErrorKind::UnknownKey)),
            None => Ok(()),
        }
    }

    /// Value for `key`, `null` included; validators reject a `null` where they
    /// expect a value
    pub(crate) fn optional(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).copied()
    }

    pub(crate) fn required(&self, key: &str) -> Result<&'a Value, SchemaError> {
        self.optional(key)
            .ok_or_else(|| SchemaError::new(key, SchemaErrorKind::MissingKey))
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

pub(crate) fn string(key: &str, value: &Value) -> Result<String, SchemaError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(SchemaError::new(key, SchemaErrorKind::WrongType("a string"))),
    }
}

pub(crate) fn boolean(key: &str, value: &Value) -> Result<bool, SchemaError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(SchemaError::new(key, SchemaErrorKind::WrongType("a boolean"))),
        },
        _ => Err(SchemaError::new(key, SchemaErrorKind::WrongType("a boolean"))),
    }
}

pub(crate) fn integer(key: &str, value: &Value, min: i64, max: i64) -> Result<i64, SchemaError> {
    let n = value
        .as_i64()
        .ok_or_else(|| SchemaError::new(key, SchemaErrorKind::WrongType("an integer")))?;
    if n < min || n > max {
        return Err(SchemaError::invalid(
            key,
            format!("value {n} must be in range {min}..={max}"),
        ));
    }
    Ok(n)
}

pub(crate) fn float(key: &str, value: &Value) -> Result<f64, SchemaError> {
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| SchemaError::new(key, SchemaErrorKind::WrongType("a number")))
}

/// Check that `name` can be used as a C++ variable name
pub(crate) fn check_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("ID must not be empty".into()),
        Some(c) if c.is_ascii_digit() => return Err("first character of ID cannot be a digit".into()),
        Some(_) => {}
    }
    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!(
            "invalid character '{c}' in ID '{name}', only a-z, A-Z, 0-9 and _ are allowed"
        ));
    }
    if CPP_RESERVED.contains(&name) {
        return Err(format!("ID '{name}' is a reserved word"));
    }
    Ok(())
}

pub(crate) fn identifier(key: &str, value: &Value) -> Result<String, SchemaError> {
    let Value::String(name) = value else {
        return Err(SchemaError::new(key, SchemaErrorKind::WrongType("an ID string")));
    };
    check_identifier(name).map_err(|msg| SchemaError::invalid(key, msg))?;
    Ok(name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yml::from_str(s).unwrap()
    }

    #[test]
    fn record_rejects_non_mapping() {
        let err = Record::new(&yaml("[1, 2]")).err().unwrap();
        assert_eq!(err.kind, SchemaErrorKind::WrongType("a mapping"));
    }

    #[test]
    fn record_reports_first_unknown_key() {
        let value = yaml("{b: 1, zz: 2, a: 3}");
        let record = Record::new(&value).unwrap();
        let err = record.deny_unknown(&["b"]).unwrap_err();
        assert_eq!(err.key(), Some("a"));
        assert_eq!(err.kind, SchemaErrorKind::UnknownKey);
    }

    #[test]
    fn null_is_passed_to_validators() {
        let value = yaml("{a: ~}");
        let record = Record::new(&value).unwrap();
        assert!(record.contains("a"));
        assert_eq!(record.optional("a"), Some(&Value::Null));
        assert_eq!(
            string("a", record.required("a").unwrap()).unwrap_err().kind,
            SchemaErrorKind::WrongType("a string")
        );
        assert_eq!(
            record.required("b").unwrap_err().kind,
            SchemaErrorKind::MissingKey
        );
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert!(boolean("x", &yaml("'yes'")).unwrap());
        assert!(!boolean("x", &yaml("'OFF'")).unwrap());
        assert!(boolean("x", &yaml("true")).unwrap());
        assert!(boolean("x", &yaml("1")).is_err());
    }

    #[test]
    fn integer_range_is_checked() {
        assert_eq!(integer("x", &yaml("5"), 0, 10).unwrap(), 5);
        assert!(matches!(
            integer("x", &yaml("11"), 0, 10).unwrap_err().kind,
            SchemaErrorKind::Invalid(_)
        ));
        assert_eq!(
            integer("x", &yaml("'5'"), 0, 10).unwrap_err().kind,
            SchemaErrorKind::WrongType("an integer")
        );
    }

    #[test]
    fn identifiers() {
        assert!(check_identifier("soil_probe_1").is_ok());
        assert!(check_identifier("").is_err());
        assert!(check_identifier("1probe").is_err());
        assert!(check_identifier("soil-probe").is_err());
        assert!(check_identifier("class").is_err());
        assert!(identifier("id", &yaml("42")).is_err());
    }
}
