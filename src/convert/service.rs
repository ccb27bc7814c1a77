//! Conversion service trait and default implementation.

use serde_json::Value;
use thiserror::Error;

use crate::types::TypeTag;

/// Failure to convert a value to a target type.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Cannot convert [{value}] to {target}: {reason}")]
pub struct ConversionError {
    pub value: Value,
    pub target: TypeTag,
    pub reason: String,
}

impl ConversionError {
    fn new(value: &Value, target: TypeTag, reason: impl Into<String>) -> Self {
        Self {
            value: value.clone(),
            target,
            reason: reason.into(),
        }
    }
}

/// Converts values to declared argument types.
pub trait ConversionService: Send + Sync + std::fmt::Debug {
    /// Convert `value` so that `target.is_instance(..)` holds for the result.
    fn convert(&self, value: &Value, target: TypeTag) -> Result<Value, ConversionError>;

    /// Returns true if `convert` would succeed.
    fn can_convert(&self, value: &Value, target: TypeTag) -> bool {
        self.convert(value, target).is_ok()
    }
}

/// Built-in conversions between scalar values, arrays and objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConversionService;

impl DefaultConversionService {
    pub fn new() -> Self {
        Self
    }

    fn from_str(raw: &str, original: &Value, target: TypeTag) -> Result<Value, ConversionError> {
        let trimmed = raw.trim();
        match target {
            TypeTag::Int => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| ConversionError::new(original, target, e.to_string())),
            TypeTag::Float => {
                let parsed = trimmed
                    .parse::<f64>()
                    .map_err(|e| ConversionError::new(original, target, e.to_string()))?;
                serde_json::Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| ConversionError::new(original, target, "not a finite number"))
            }
            TypeTag::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(ConversionError::new(original, target, "not a boolean")),
            },
            TypeTag::Array => Ok(Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            )),
            TypeTag::Object => match serde_json::from_str::<Value>(raw) {
                Ok(v @ Value::Object(_)) => Ok(v),
                Ok(_) => Err(ConversionError::new(original, target, "not a JSON object")),
                Err(e) => Err(ConversionError::new(original, target, e.to_string())),
            },
            TypeTag::String | TypeTag::Any => Ok(original.clone()),
        }
    }
}

impl ConversionService for DefaultConversionService {
    fn convert(&self, value: &Value, target: TypeTag) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Err(ConversionError::new(value, target, "null value"));
        }
        if target.is_instance(value) {
            return Ok(value.clone());
        }

        match (value, target) {
            (Value::String(raw), _) => Self::from_str(raw, value, target),
            (Value::Number(n), TypeTag::Float) => n
                .as_f64()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| ConversionError::new(value, target, "not representable")),
            (Value::Number(_) | Value::Bool(_), TypeTag::String) => {
                Ok(Value::String(value.to_string()))
            }
            (_, TypeTag::Array) => Ok(Value::Array(vec![value.clone()])),
            _ => Err(ConversionError::new(value, target, "no conversion available")),
        }
    }
}
