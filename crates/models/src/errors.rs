use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// A single failed field check on a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
    /// Offending value; `None` when the field was absent.
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str, value: Option<Value>) -> Self {
        Self { field, message, value }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// Wire shape: {"type":"field","value":..,"msg":..,"path":..,"param":..,"location":"body"}
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 6 } else { 5 };
        let mut s = serializer.serialize_struct("FieldError", len)?;
        s.serialize_field("type", "field")?;
        if let Some(value) = &self.value {
            s.serialize_field("value", value)?;
        }
        s.serialize_field("msg", self.message)?;
        s.serialize_field("path", self.field)?;
        s.serialize_field("param", self.field)?;
        s.serialize_field("location", "body")?;
        s.end()
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::Db(e.to_string())
    }
}
