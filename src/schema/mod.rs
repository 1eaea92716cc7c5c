//! Shapes: declared structure of flow inputs and outputs.
//!
//! A [`Shape`] is an ordered list of named fields. Each field has a type,
//! a required flag, and optionally a default and a description. Shapes do
//! two jobs:
//!
//! - **Validation**: check a JSON value, apply defaults, drop unknown fields
//! - **Schema directive**: render a JSON-schema-like description that the
//!   backend uses to constrain its structured output

mod shape;
mod validate;


pub use shape::{FieldSpec, FieldType, Shape};
pub use validate::{Violation, ViolationKind, format_violations};
