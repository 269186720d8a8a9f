//! The fixed set of value types a data point can declare.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared value type of a data point.
///
/// The set is closed: range bounds are only meaningful for the numeric
/// variants and string options only for [`DataType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Float,
    Int,
    Boolean,
    String,
}

impl DataType {
    /// All data types in display order.
    pub const ALL: [DataType; 4] = [
        DataType::Float,
        DataType::Int,
        DataType::Boolean,
        DataType::String,
    ];

    /// Wire name of the data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Float => "float",
            DataType::Int => "int",
            DataType::Boolean => "boolean",
            DataType::String => "string",
        }
    }

    /// Whether range bounds apply to this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Float | DataType::Int)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidDataType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!("float".parse::<DataType>().unwrap(), DataType::Float);
        assert_eq!("int".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("boolean".parse::<DataType>().unwrap(), DataType::Boolean);
        assert_eq!("string".parse::<DataType>().unwrap(), DataType::String);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(
            "Float".parse::<DataType>(),
            Err(ValidationError::InvalidDataType("Float".to_string()))
        );
        assert!("double".parse::<DataType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DataType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
        let parsed: DataType = serde_json::from_str("\"int\"").unwrap();
        assert_eq!(parsed, DataType::Int);
    }
}
