//! Typed script values
//!
//! Script variables are authored as strings and parsed exactly once, at bind
//! time, into a [`ScriptValue`] of their declared [`ScriptValueType`].

use super::ScriptError;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a script variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptValueType {
    /// 64-bit float
    Double,
    /// 32-bit signed integer
    Int,
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
}

impl ScriptValueType {
    /// Parse an authored string as a value of this type
    ///
    /// - `Double`: locale-independent float syntax (`"1.5"`, `"-2e3"`)
    /// - `Int`: decimal integer, surrounding whitespace ignored
    /// - `Bool`: `true` only for the literal `"true"`, every other string is `false`
    /// - `String`: passed through unchanged
    pub fn parse_value(self, raw: &str) -> Result<ScriptValue, ScriptError> {
        let invalid = || ScriptError::InvalidValue {
            expected: self,
            value: raw.to_string(),
        };
        match self {
            Self::Double => raw.trim().parse::<f64>().map(ScriptValue::Double).map_err(|_| invalid()),
            Self::Int => raw.trim().parse::<i32>().map(ScriptValue::Int).map_err(|_| invalid()),
            Self::Bool => Ok(ScriptValue::Bool(raw == "true")),
            Self::String => Ok(ScriptValue::String(raw.to_string())),
        }
    }

    /// Name used in authored data
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Int => "int",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ScriptValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptValueType {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "double" => Ok(Self::Double),
            "int" => Ok(Self::Int),
            "string" => Ok(Self::String),
            "bool" => Ok(Self::Bool),
            other => Err(ScriptError::UnknownType(other.to_string())),
        }
    }
}

/// A value crossing the script boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptValue {
    /// 64-bit float
    Double(f64),
    /// 32-bit signed integer
    Int(i32),
    /// UTF-8 string
    String(String),
    /// Boolean
    Bool(bool),
}

impl ScriptValue {
    /// Type tag of this value
    pub const fn value_type(&self) -> ScriptValueType {
        match self {
            Self::Double(_) => ScriptValueType::Double,
            Self::Int(_) => ScriptValueType::Int,
            Self::String(_) => ScriptValueType::String,
            Self::Bool(_) => ScriptValueType::Bool,
        }
    }

    /// Integer payload, if this is an `Int`
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a `Double`
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a `Bool`
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_type() {
        assert_eq!(ScriptValueType::Double.parse_value("2.5").unwrap(), ScriptValue::Double(2.5));
        assert_eq!(ScriptValueType::Double.parse_value("-1e2").unwrap(), ScriptValue::Double(-100.0));
        assert_eq!(ScriptValueType::Int.parse_value(" 100 ").unwrap(), ScriptValue::Int(100));
        assert_eq!(ScriptValueType::Bool.parse_value("true").unwrap(), ScriptValue::Bool(true));
        assert_eq!(ScriptValueType::Bool.parse_value("True").unwrap(), ScriptValue::Bool(false));
        assert_eq!(
            ScriptValueType::String.parse_value("hello world").unwrap(),
            ScriptValue::String("hello world".to_string())
        );
    }

    #[test]
    fn test_double_ignores_locale_commas() {
        assert!(matches!(
            ScriptValueType::Double.parse_value("1,5"),
            Err(ScriptError::InvalidValue { expected: ScriptValueType::Double, .. })
        ));
    }

    #[test]
    fn test_int_rejects_garbage() {
        assert!(ScriptValueType::Int.parse_value("100hp").is_err());
        assert!(ScriptValueType::Int.parse_value("1.0").is_err());
        assert!(ScriptValueType::Int.parse_value("").is_err());
    }

    #[test]
    fn test_type_names() {
        for ty in [
            ScriptValueType::Double,
            ScriptValueType::Int,
            ScriptValueType::String,
            ScriptValueType::Bool,
        ] {
            assert_eq!(ty.as_str().parse::<ScriptValueType>().unwrap(), ty);
        }
        assert_eq!(
            "float".parse::<ScriptValueType>(),
            Err(ScriptError::UnknownType("float".to_string()))
        );
    }
}
