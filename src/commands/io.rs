//! Reading command input and writing command output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use stratlify::error::{Result, StratlifyError};

/// Read a JSON input record from a file.
pub fn read_json_input(path: &Path) -> Result<Value> {
    let content = read_text_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        StratlifyError::UserError(format!(
            "failed to parse input file '{}' as JSON: {}",
            path.display(),
            e
        ))
    })
}

/// Read a whole text file.
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        StratlifyError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Convert a typed flow output to JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| StratlifyError::UserError(format!("failed to serialize output: {}", e)))
}

/// What every generation command prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<'a> {
    pub flow: &'a str,
    pub generated_at: DateTime<Utc>,
    pub output: Value,
}

impl<'a> Envelope<'a> {
    pub fn new(flow: &'a str, output: Value) -> Self {
        Self {
            flow,
            generated_at: Utc::now(),
            output,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StratlifyError::UserError(format!("failed to serialize output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_json_input() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"productDescription": "A serum"}}"#).unwrap();

        let value = read_json_input(file.path()).unwrap();
        assert_eq!(value["productDescription"], "A serum");
    }

    #[test]
    fn invalid_json_is_user_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "productDescription: A serum").unwrap();

        let err = read_json_input(file.path()).unwrap_err();
        assert!(matches!(err, StratlifyError::UserError(_)));
        assert!(err.to_string().contains("as JSON"));
    }

    #[test]
    fn missing_file_is_user_error() {
        let err = read_text_file(Path::new("/nonexistent/results.csv")).unwrap_err();
        assert!(matches!(err, StratlifyError::UserError(_)));
        assert!(err.to_string().contains("/nonexistent/results.csv"));
    }

    #[test]
    fn envelope_uses_camel_case() {
        let envelope = Envelope::new("summarizeAdResults", json!({"summary": "ok"}));
        let printed: Value = serde_json::from_str(&envelope.to_pretty_json().unwrap()).unwrap();

        assert_eq!(printed["flow"], "summarizeAdResults");
        assert_eq!(printed["output"]["summary"], "ok");
        let generated_at = printed["generatedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(generated_at).is_ok());
    }
}
