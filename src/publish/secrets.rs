use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::consts::TOKEN_KEY;

/// Read the push token from the secrets file.
///
/// Every failure mode (missing file, unreadable, not a JSON object, key
/// absent or empty) is logged as a warning and yields `None`.
pub(crate) fn read_token(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "Secrets file {} not found, skipping publish",
                path.display()
            );
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read secrets file {}: {e}", path.display());
            return None;
        }
    };

    let secrets: HashMap<String, Value> = match serde_json::from_str(&content) {
        Ok(secrets) => secrets,
        Err(e) => {
            log::warn!("Secrets file {} is not a JSON object: {e}", path.display());
            return None;
        }
    };

    match secrets.get(TOKEN_KEY).and_then(Value::as_str) {
        Some(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
        _ => {
            log::warn!("{TOKEN_KEY} missing from {}, skipping publish", path.display());
            None
        }
    }
}
