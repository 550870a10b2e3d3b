use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid month \"{input}\" (expected 1-12)")]
    InvalidMonth { input: String },

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Failures while talking to the booking site. All of them abort the run.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        source: Box<ureq::Error>,
    },

    #[error("Landing page did not set the {name} cookie")]
    MissingCookie { name: &'static str },

    #[error("Could not decode {name} cookie: {source}")]
    BadToken {
        name: &'static str,
        source: std::string::FromUtf8Error,
    },

    #[error("Occupancy response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Failed to read history {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("History {path} is not a valid record array: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write history {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures on the publish path. These are logged and swallowed by the caller.
#[derive(Debug, Error)]
pub(crate) enum PublishError {
    #[error("git not found. Please install git to publish stats.")]
    GitNotFound,

    #[error("Failed to run git {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_month() {
        let e = AppError::InvalidMonth {
            input: "13".to_string(),
        };
        assert_eq!(e.to_string(), r#"Invalid month "13" (expected 1-12)"#);
    }

    #[test]
    fn fetch_error_missing_cookie() {
        let e = FetchError::MissingCookie { name: "XSRF-TOKEN" };
        assert_eq!(
            e.to_string(),
            "Landing page did not set the XSRF-TOKEN cookie"
        );
    }

    #[test]
    fn publish_error_command() {
        let e = PublishError::Command {
            command: "push".to_string(),
            stderr: "rejected".to_string(),
        };
        assert_eq!(e.to_string(), "git push failed: rejected");
    }

    #[test]
    fn app_error_from_store_error() {
        let store = StoreError::Write {
            path: PathBuf::from("data/stats.json"),
            source: std::io::Error::other("disk full"),
        };
        let app: AppError = store.into();
        assert_eq!(
            app.to_string(),
            "Failed to write history data/stats.json: disk full"
        );
    }
}
