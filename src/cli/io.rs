//! JSON I/O handling for CLI
//!
//! - Input: JSON files and JSON-valued arguments
//! - Output: one pretty-printed JSON document on stdout
//! - UTF-8 only

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a file holding a JSON array of documents
pub fn read_documents(path: &Path) -> CliResult<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content)? {
        Value::Array(documents) => Ok(documents),
        other => Err(CliError::invalid_input(format!(
            "{} must hold a JSON array, found {}",
            path.display(),
            kind(&other)
        ))),
    }
}

/// Parse a JSON-object argument such as `--filter`
pub fn parse_object_arg(name: &str, text: &str) -> CliResult<Value> {
    match serde_json::from_str(text)? {
        value @ Value::Object(_) => Ok(value),
        other => Err(CliError::invalid_input(format!(
            "--{} must be a JSON object, found {}",
            name,
            kind(&other)
        ))),
    }
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_read_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, r#"[{"title": "a"}, {"title": "b"}]"#).unwrap();

        let docs = read_documents(&path).unwrap();
        assert_eq!(docs, vec![json!({"title": "a"}), json!({"title": "b"})]);
    }

    #[test]
    fn test_read_documents_rejects_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, r#"{"title": "a"}"#).unwrap();

        let err = read_documents(&path).unwrap_err();
        assert_eq!(err.code(), "DOCPAGE_CLI_INPUT");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_documents(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code(), "DOCPAGE_CLI_IO");
    }

    #[test]
    fn test_parse_object_arg() {
        assert_eq!(
            parse_object_arg("filter", r#"{"price": {"$gt": 5}}"#).unwrap(),
            json!({"price": {"$gt": 5}})
        );
        assert_eq!(parse_object_arg("filter", "[1]").unwrap_err().code(), "DOCPAGE_CLI_INPUT");
        assert_eq!(parse_object_arg("filter", "{").unwrap_err().code(), "DOCPAGE_CLI_JSON");
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &json!({"page": 1})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"page\": 1"));
    }
}
