//! Typed model of the property object handed to a migration
//!
//! The installer passes every migration an object with a `properties`
//! mapping keyed by opaque property paths such as
//! `.forms.{advanced}.properties.{add_app_info}`. Each entry is a descriptor
//! holding at least a `value`. Anything a migration does not touch is kept
//! verbatim and in its original order.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field of a property descriptor that holds the configured value
pub const VALUE_FIELD: &str = "value";

/// Build the canonical key of a form property
///
/// # Example
/// ```rust
/// use tile_migrations::properties::property_path;
///
/// assert_eq!(
///     property_path("advanced", "add_app_info"),
///     ".forms.{advanced}.properties.{add_app_info}"
/// );
/// ```
pub fn property_path(form: &str, property: &str) -> String {
    format!(".forms.{{{}}}.properties.{{{}}}", form, property)
}

/// Name of a JSON value's type, used in type errors
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The migration input: property descriptors plus pass-through fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationObject {
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDescriptor>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ConfigurationObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, replacing any descriptor already stored under `path`
    pub fn with_property(mut self, path: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
        self.properties.insert(path.into(), descriptor);
        self
    }

    /// Look up a descriptor by its exact path
    pub fn property(&self, path: &str) -> Result<&PropertyDescriptor> {
        self.properties.get(path).ok_or_else(|| Error::lookup(path))
    }

    pub fn property_mut(&mut self, path: &str) -> Result<&mut PropertyDescriptor> {
        self.properties.get_mut(path).ok_or_else(|| Error::lookup(path))
    }

    /// Read the `value` of a property that must hold a string
    pub fn string_value(&self, path: &str) -> Result<&str> {
        let value = self
            .property(path)?
            .value()
            .ok_or_else(|| Error::lookup(format!("{}.{}", path, VALUE_FIELD)))?;

        value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(path, "string", value_type_name(value)))
    }

    /// Overwrite the `value` of an existing property
    ///
    /// The property must already exist; this never creates a path.
    pub fn set_string_value(&mut self, path: &str, value: impl Into<String>) -> Result<()> {
        self.property_mut(path)?.set_value(Value::String(value.into()));
        Ok(())
    }
}

/// One property entry: `value` plus whatever else the installer stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyDescriptor(IndexMap<String, Value>);

impl PropertyDescriptor {
    /// Descriptor holding only a `value`
    pub fn new(value: impl Into<Value>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(VALUE_FIELD.to_string(), value.into());
        Self(fields)
    }

    /// Add another descriptor field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.get(VALUE_FIELD)
    }

    pub fn set_value(&mut self, value: Value) {
        self.0.insert(VALUE_FIELD.to_string(), value);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.0
    }
}
