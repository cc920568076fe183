//! Declarative request/response validation.

mod issues;
mod schema;

pub use issues::{Issue, IssueCode, PathSegment, ValidationErrors};
pub use schema::{
    boolean, number, object, string, NumberSchema, ObjectSchema, Schema, SchemaExt, StringFormat,
    StringSchema,
};

/// A typed value with an associated schema. Extractors validate the raw JSON
/// against `schema()` before deserializing into `Self`.
pub trait Validated: serde::de::DeserializeOwned {
    fn schema() -> Schema;
}
