//! CLI argument validation functions
//!
//! Custom value parsers for arguments that clap cannot check on its own.

use crate::models::PersonalisationValue;
use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file("Configuration", path_str)
}

/// Validate the PDF given to `send-precompiled-letter`
pub fn validate_pdf_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file("Letter", path_str)
}

fn validate_readable_file(kind: &str, path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("{} file does not exist: '{}'", kind, path_str));
    }

    if !path.is_file() {
        return Err(format!("{} path is not a file: '{}'", kind, path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read {} file '{}': {}", kind.to_lowercase(), path_str, e)),
    }
}

/// Parse one `-p` personalisation argument.
///
/// `key=value` always yields text; `key:=value` parses the value as JSON and
/// accepts only numbers and booleans, so `count:=3` and `urgent:=true` reach
/// the service unquoted.
pub fn parse_placeholder(arg: &str) -> Result<(String, PersonalisationValue), String> {
    let Some(eq) = arg.find('=') else {
        return Err(format!(
            "Personalisation must be KEY=VALUE or KEY:=JSON, got: '{}'",
            arg
        ));
    };

    let (key, raw, typed) = match arg[..eq].strip_suffix(':') {
        Some(key) => (key, &arg[eq + 1..], true),
        None => (&arg[..eq], &arg[eq + 1..], false),
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Personalisation key cannot be empty: '{}'", arg));
    }

    if !typed {
        return Ok((key.to_string(), PersonalisationValue::Text(raw.to_string())));
    }

    let value = match serde_json::from_str::<serde_json::Value>(raw.trim()) {
        Ok(serde_json::Value::Number(n)) => PersonalisationValue::Number(n),
        Ok(serde_json::Value::Bool(b)) => PersonalisationValue::Bool(b),
        _ => {
            return Err(format!(
                "Value for '{}' must be a number or boolean when using ':=', got: '{}'",
                key, raw
            ));
        }
    };

    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_path_validation() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("notify.toml");
        fs::write(&file, "[client]\n").unwrap();

        assert!(validate_config_file_path(file.to_str().unwrap()).is_ok());
        assert!(validate_config_file_path(temp_dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_pdf_path_validation() {
        let err = validate_pdf_path("/definitely/not/here.pdf").unwrap_err();
        assert!(err.starts_with("Letter file does not exist"));
    }

    #[test]
    fn test_placeholder_text() {
        let (key, value) = parse_placeholder("name=someone").unwrap();
        assert_eq!(key, "name");
        assert_eq!(value, PersonalisationValue::Text("someone".to_string()));
    }

    #[test]
    fn test_placeholder_text_keeps_later_equals() {
        let (key, value) = parse_placeholder("query=a=b").unwrap();
        assert_eq!(key, "query");
        assert_eq!(value, PersonalisationValue::Text("a=b".to_string()));

        let (_, value) = parse_placeholder("empty=").unwrap();
        assert_eq!(value, PersonalisationValue::Text(String::new()));
    }

    #[test]
    fn test_placeholder_typed_values() {
        let (key, value) = parse_placeholder("count:=3").unwrap();
        assert_eq!(key, "count");
        assert_eq!(value, PersonalisationValue::from(3));

        let (_, value) = parse_placeholder("urgent:=true").unwrap();
        assert_eq!(value, PersonalisationValue::Bool(true));
    }

    #[test]
    fn test_placeholder_invalid() {
        let invalid = ["novalue", "=value", ":=3", "name:=someone", "list:=[1,2]"];

        for arg in invalid {
            assert!(parse_placeholder(arg).is_err(), "'{}' should be invalid", arg);
        }
    }
}
