//! Validation of JSON values against a [`Shape`].

use super::shape::{FieldType, Shape};
use serde_json::{Map, Value};
use std::fmt;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is absent or null.
    Missing,
    /// The value has the wrong JSON type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A non-empty string field is empty or whitespace-only.
    Empty,
}

/// A single validation failure, located by path (e.g. `variations[1].headline`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: required field is missing", path),
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "{}: expected {}, found {}", path, expected, found)
            }
            ViolationKind::Empty => write!(f, "{}: must not be empty", path),
        }
    }
}

/// Join violations into one message, `; `-separated.
pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

impl Shape {
    /// Validate `value` against this shape.
    ///
    /// On success returns a normalized copy: defaults applied to omitted
    /// fields, unknown fields dropped. On failure returns every violation
    /// found, not just the first.
    pub fn validate(&self, value: &Value) -> Result<Value, Vec<Violation>> {
        let mut violations = Vec::new();
        let normalized = self.validate_at(value, "", &mut violations);
        match normalized {
            Some(v) if violations.is_empty() => Ok(v),
            _ => Err(violations),
        }
    }

    fn validate_at(
        &self,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        let Some(object) = value.as_object() else {
            violations.push(Violation {
                path: path.to_string(),
                kind: ViolationKind::TypeMismatch {
                    expected: "object",
                    found: json_type_name(value),
                },
            });
            return None;
        };

        let mut out = Map::new();
        for field in self.fields() {
            let field_path = join_path(path, &field.name);
            let present = object.get(&field.name).filter(|v| !v.is_null());

            let candidate = match (present, &field.default) {
                (Some(v), _) => v,
                (None, Some(default)) => default,
                (None, None) => {
                    if field.required {
                        violations.push(Violation {
                            path: field_path,
                            kind: ViolationKind::Missing,
                        });
                    }
                    continue;
                }
            };

            if field.non_empty
                && let Some(s) = candidate.as_str()
                && s.trim().is_empty()
            {
                violations.push(Violation {
                    path: field_path,
                    kind: ViolationKind::Empty,
                });
                continue;
            }

            if let Some(v) = validate_value(&field.field_type, candidate, &field_path, violations) {
                out.insert(field.name.clone(), v);
            }
        }

        Some(Value::Object(out))
    }
}

fn validate_value(
    field_type: &FieldType,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    let matches = match field_type {
        FieldType::String => value.is_string(),
        FieldType::Integer => value.is_i64() || value.is_u64(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Array(item) => {
            let Some(items) = value.as_array() else {
                violations.push(mismatch(path, field_type, value));
                return None;
            };
            let mut out = Vec::with_capacity(items.len());
            for (i, element) in items.iter().enumerate() {
                let element_path = format!("{}[{}]", path, i);
                if element.is_null() {
                    violations.push(Violation {
                        path: element_path,
                        kind: ViolationKind::Missing,
                    });
                    continue;
                }
                if let Some(v) = validate_value(item, element, &element_path, violations) {
                    out.push(v);
                }
            }
            return Some(Value::Array(out));
        }
        FieldType::Object(shape) => return shape.validate_at(value, path, violations),
    };

    if matches {
        Some(value.clone())
    } else {
        violations.push(mismatch(path, field_type, value));
        None
    }
}

fn mismatch(path: &str, expected: &FieldType, found: &Value) -> Violation {
    Violation {
        path: path.to_string(),
        kind: ViolationKind::TypeMismatch {
            expected: expected.type_name(),
            found: json_type_name(found),
        },
    }
}
