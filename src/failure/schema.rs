//! Schema violations reported for decoded values.

use std::fmt::{self, Display};
use std::iter;

use serde_json::Value;

use crate::pointer::JsonPointer;

/// A decoded value violated its schema.
///
/// `origin` links to the more specific violation that caused this one, if
/// any. `json_pointer_path` lists the location segments root first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaError {
    /// The schema keyword that failed (e.g. `enum`, `required`, `type`).
    pub schema_field: String,
    pub reason: String,
    pub origin: Option<Box<SchemaError>>,
    /// The offending value.
    pub value: Value,
    pub json_pointer_path: Vec<String>,
    /// The allowed literals of the failing schema, when it declares an enum.
    pub enum_values: Vec<Value>,
}

impl SchemaError {
    /// Creates a schema error for the given keyword and reason.
    pub fn new(schema_field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            schema_field: schema_field.into(),
            reason: reason.into(),
            ..Self::default()
        }
    }

    /// Sets the offending value and returns self for chaining.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the location path (root first) and returns self for chaining.
    pub fn with_path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_pointer_path = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the allowed enum literals and returns self for chaining.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.enum_values = values.into_iter().collect();
        self
    }

    /// Sets the originating violation and returns self for chaining.
    pub fn with_origin(mut self, origin: SchemaError) -> Self {
        self.origin = Some(Box::new(origin));
        self
    }

    /// Returns the location of the violation as a pointer.
    pub fn pointer(&self) -> JsonPointer {
        JsonPointer::from_segments(self.json_pointer_path.iter().map(String::as_str))
    }

    /// Returns an iterator over this error followed by each of its origins.
    pub fn chain(&self) -> impl Iterator<Item = &SchemaError> {
        iter::successors(Some(self), |e| e.origin.as_deref())
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The innermost origin carries the explanatory message.
        let innermost = self.chain().last().unwrap_or(self);

        if !innermost.json_pointer_path.is_empty() {
            write!(f, "Error at \"{}\": ", innermost.pointer())?;
        }
        if innermost.reason.is_empty() {
            write!(f, "Doesn't match schema \"{}\"", innermost.schema_field)
        } else {
            f.write_str(&innermost.reason)
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.origin
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
