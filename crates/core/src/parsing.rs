//! Path-aware loading of YAML and JSON inputs.
//!
//! Deserialization goes through `serde_path_to_error` so a schema mismatch names the failing
//! field (for example `sections[0].questions[2].type`) instead of only a line and column.

use crate::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use std::path::Path;

fn schema_error(what: &'static str, path: String, message: String) -> CoreError {
    let path = if path.is_empty() || path == "." {
        "<root>".to_owned()
    } else {
        path
    };
    CoreError::Parse {
        what,
        path,
        message,
    }
}

pub(crate) fn from_yaml_str<T: DeserializeOwned>(what: &'static str, text: &str) -> CoreResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        schema_error(what, path, err.into_inner().to_string())
    })
}

pub(crate) fn from_json_str<T: DeserializeOwned>(what: &'static str, text: &str) -> CoreResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        schema_error(what, path, err.into_inner().to_string())
    })?;
    deserializer
        .end()
        .map_err(|err| schema_error(what, String::new(), err.to_string()))?;
    Ok(value)
}

/// Load a YAML or JSON file, choosing the format from the extension.
pub(crate) fn from_path<T: DeserializeOwned>(what: &'static str, path: &Path) -> CoreResult<T> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let is_json = match extension.as_deref() {
        Some("json") => true,
        Some("yaml") | Some("yml") => false,
        _ => {
            return Err(CoreError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    tracing::debug!("loading {what} from {}", path.display());

    if is_json {
        from_json_str(what, &text)
    } else {
        from_yaml_str(what, &text)
    }
}
