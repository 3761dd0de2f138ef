//! Task records as exchanged with the host over the hook protocol.
//!
//! The host owns the task schema, so a [`TaskRecord`] keeps every field it was
//! given, in the order it was given, and only interprets `project`.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ProjsyncError;

/// Name of the task attribute that carries the project
pub const PROJECT_FIELD: &str = "project";

/// One task as sent by the host on a single stdin line
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    fields: Map<String, Value>,
    project: Option<String>,
}

impl TaskRecord {
    /// Parse one input line. `line` is the 1-based position used in errors.
    pub fn parse(input: &str, line: usize) -> Result<Self, ProjsyncError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|source| ProjsyncError::InvalidTaskJson { line, source })?;
        Self::from_value(value, line)
    }

    /// Validate an already-decoded JSON value as a task
    pub fn from_value(value: Value, line: usize) -> Result<Self, ProjsyncError> {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(ProjsyncError::NotAnObject {
                    line,
                    found: json_kind(&other),
                })
            }
        };

        let project = match fields.get(PROJECT_FIELD) {
            None => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(ProjsyncError::InvalidProject {
                    line,
                    found: json_kind(other),
                })
            }
        };

        Ok(Self { fields, project })
    }

    /// The project to register, if the task names a non-empty one
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref().filter(|name| !name.is_empty())
    }

    /// Look up any field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields in input order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Task UUID, when the host supplied one
    pub fn uuid(&self) -> Option<&str> {
        self.fields.get("uuid").and_then(Value::as_str)
    }

    /// Serialize back to a single JSON line (without the trailing newline)
    pub fn to_line(&self) -> Result<String, ProjsyncError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for TaskRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
