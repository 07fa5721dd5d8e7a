//! Reading a JSON configuration file into a [`RawConfig`].

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use nasch_engine::{ConfigValue, RawConfig};
use serde_json::Value;

/// Errors from reading a configuration file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    Json(serde_json::Error),
    /// The top-level value is not an object.
    NotAnObject,
    /// A key holds an array, object, or null.
    Unsupported { key: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
            Self::NotAnObject => write!(f, "configuration must be a JSON object"),
            Self::Unsupported { key } => {
                write!(f, "key '{key}' must be a number, boolean, or string")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Read and convert the file at `path`.
pub fn load_file(path: &Path) -> Result<RawConfig, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Convert JSON text into a [`RawConfig`].
pub fn parse(text: &str) -> Result<RawConfig, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(LoadError::Json)?;
    let Value::Object(map) = value else {
        return Err(LoadError::NotAnObject);
    };
    let mut raw = RawConfig::with_capacity(map.len());
    for (key, value) in map {
        let converted = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ConfigValue::UInt(u)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::String(s) => ConfigValue::Text(s),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(LoadError::Unsupported { key });
            }
        };
        raw.insert(key, converted);
    }
    Ok(raw)
}
