//! Output and tool schemas.
//!
//! A [`Schema`] has two independent jobs: rendering itself as a portable JSON
//! Schema document (sent to backends and embedded in prompt instructions), and
//! validating a JSON value against the original schema description. The two
//! never feed into each other, so validation is not limited by what the JSON
//! Schema rendering can express.

use crate::error::AiError;
use crate::Result;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// A structured-type schema.
pub trait Schema: Send + Sync + Debug {
    /// Render as a portable JSON Schema document
    fn to_json_schema(&self) -> Value;

    /// Check that `value` conforms to this schema
    fn validate(&self, value: &Value) -> Result<()>;
}

/// Convert a schema into its portable JSON Schema document.
pub fn to_portable_schema(schema: &dyn Schema) -> Value {
    schema.to_json_schema()
}

/// Validate `value` against `schema`.
pub fn validate(schema: &dyn Schema, value: &Value) -> Result<()> {
    schema.validate(value)
}

/// Schema derived from a Rust type.
///
/// The JSON Schema comes from `schemars`; validation deserializes the value
/// into `T`, so it is exactly as strict as `T`'s serde implementation.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T>
where
    T: JsonSchema + DeserializeOwned + 'static,
{
    /// Create a schema for `T`
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T>
where
    T: JsonSchema + DeserializeOwned + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedSchema")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: JsonSchema + DeserializeOwned + 'static,
{
    fn to_json_schema(&self) -> Value {
        schemars::schema_for!(T).to_value()
    }

    fn validate(&self, value: &Value) -> Result<()> {
        T::deserialize(value)
            .map(|_| ())
            .map_err(|e| AiError::validation(format!("data did not match expected schema: {}", e)))
    }
}

/// Schema matching any value. Renders as `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn to_json_schema(&self) -> Value {
        Value::Object(Default::default())
    }

    fn validate(&self, _value: &Value) -> Result<()> {
        Ok(())
    }
}

/// Schema given as a JSON Schema document.
///
/// Used when the schema exists only as data, e.g. a tool's published input
/// schema. A document that is not itself a valid JSON Schema fails every
/// validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    document: Value,
}

impl SchemaDocument {
    /// Wrap a JSON Schema document
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// The wrapped document
    pub fn document(&self) -> &Value {
        &self.document
    }
}

impl Schema for SchemaDocument {
    fn to_json_schema(&self) -> Value {
        self.document.clone()
    }

    fn validate(&self, value: &Value) -> Result<()> {
        let validator = jsonschema::validator_for(&self.document).map_err(|e| {
            AiError::validation(format!(
                "failed to validate data against expected schema: {}",
                e
            ))
        })?;

        let errors: Vec<String> = validator
            .iter_errors(value)
            .map(|e| e.to_string())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AiError::validation(format!(
                "data did not match expected schema: {}",
                errors.join("; ")
            )))
        }
    }
}

/// Shared schema for `T`
pub fn typed<T>() -> Arc<dyn Schema>
where
    T: JsonSchema + DeserializeOwned + 'static,
{
    Arc::new(TypedSchema::<T>::new())
}
