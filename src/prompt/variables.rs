//! Template variables from a validated input record.
//!
//! Only scalar fields become variables. Strings pass through unchanged,
//! numbers and booleans use their JSON text form. Nulls, arrays and
//! objects are skipped; flow construction rejects templates that reference
//! such fields, so a skipped field can never be silently blank in a prompt.

use serde_json::Value;
use std::collections::HashMap;

/// Convert the top-level scalar fields of `record` into template variables.
///
/// A non-object record yields no variables.
pub fn template_vars(record: &Value) -> HashMap<String, String> {
    let Some(fields) = record.as_object() else {
        return HashMap::new();
    };

    fields
        .iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((name.clone(), text))
        })
        .collect()
}
