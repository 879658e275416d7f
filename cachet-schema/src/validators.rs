//! Built-in schema combinators.

use crate::{Issue, Schema};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Schema accepting any string, optionally with a minimum length.
#[derive(Debug, Default)]
pub struct StringSchema {
    min_length: Option<usize>,
}

/// Builds a string schema.
pub fn string() -> StringSchema {
    StringSchema::default()
}

impl StringSchema {
    /// Requires at least `len` characters.
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }
}

#[async_trait]
impl Schema for StringSchema {
    async fn validate(&self, value: Value) -> Result<Value, Vec<Issue>> {
        match value {
            Value::String(s) => {
                if let Some(min) = self.min_length {
                    let len = s.chars().count();
                    if len < min {
                        return Err(vec![Issue::new(format!(
                            "expected a string of at least {min} characters, got {len}"
                        ))]);
                    }
                }
                Ok(Value::String(s))
            }
            other => Err(vec![Issue::new(format!(
                "expected a string, got {}",
                type_name(&other)
            ))]),
        }
    }
}

/// Schema accepting any JSON number.
#[derive(Debug, Default)]
pub struct NumberSchema;

/// Builds a number schema.
pub fn number() -> NumberSchema {
    NumberSchema
}

#[async_trait]
impl Schema for NumberSchema {
    async fn validate(&self, value: Value) -> Result<Value, Vec<Issue>> {
        match value {
            Value::Number(n) => Ok(Value::Number(n)),
            other => Err(vec![Issue::new(format!(
                "expected a number, got {}",
                type_name(&other)
            ))]),
        }
    }
}

/// Schema accepting a boolean.
#[derive(Debug, Default)]
pub struct BooleanSchema;

/// Builds a boolean schema.
pub fn boolean() -> BooleanSchema {
    BooleanSchema
}

#[async_trait]
impl Schema for BooleanSchema {
    async fn validate(&self, value: Value) -> Result<Value, Vec<Issue>> {
        match value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            other => Err(vec![Issue::new(format!(
                "expected a boolean, got {}",
                type_name(&other)
            ))]),
        }
    }
}

/// Schema for an object with a declared field set.
///
/// Undeclared fields pass through untouched unless [`ObjectSchema::strict`]
/// is set, in which case they are rejected.
pub struct ObjectSchema {
    fields: Vec<(String, Arc<dyn Schema>)>,
    strict: bool,
}

/// Builds an empty object schema; add fields with [`ObjectSchema::field`].
pub fn object() -> ObjectSchema {
    ObjectSchema {
        fields: Vec::new(),
        strict: false,
    }
}

impl ObjectSchema {
    /// Declares a field and the schema its value must satisfy.
    pub fn field(mut self, name: impl Into<String>, schema: Arc<dyn Schema>) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Rejects fields not declared on the schema.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

#[async_trait]
impl Schema for ObjectSchema {
    async fn validate(&self, value: Value) -> Result<Value, Vec<Issue>> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(vec![Issue::new(format!(
                    "expected an object, got {}",
                    type_name(&other)
                ))]);
            }
        };

        let mut issues = Vec::new();
        let mut out = serde_json::Map::with_capacity(map.len());

        for (name, schema) in &self.fields {
            match map.remove(name) {
                Some(field_value) => match schema.validate(field_value).await {
                    Ok(validated) => {
                        out.insert(name.clone(), validated);
                    }
                    Err(nested) => {
                        issues.extend(nested.into_iter().map(|issue| issue.nested(name)));
                    }
                },
                None => issues.push(Issue::at(name.clone(), "missing required field")),
            }
        }

        if self.strict {
            for name in map.keys() {
                issues.push(Issue::at(name.clone(), "unknown field"));
            }
        } else {
            for (name, remaining) in map {
                out.insert(name, remaining);
            }
        }

        if issues.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(issues)
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
