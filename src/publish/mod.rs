//! Best-effort publishing of the history file
//!
//! Publishing is a side channel: it stages, commits and pushes the history
//! file when credentials allow. Collection never depends on it succeeding.

mod git;
mod remote;
mod secrets;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::consts::COMMIT_TIME_FORMAT;
use crate::error::PublishError;

pub(crate) use git::{GitCli, Vcs};

/// How a publish attempt ended when nothing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PublishOutcome {
    /// Publishing turned off by configuration
    Disabled,
    /// No usable token; nothing was run
    NoCredentials,
    /// File staged but identical to HEAD; no commit
    NoChanges,
    /// Committed locally, push refused because the remote is not HTTPS
    InsecureRemote,
    /// Committed and pushed
    Pushed,
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PublishOutcome::Disabled => "publishing disabled",
            PublishOutcome::NoCredentials => "skipped (no credentials)",
            PublishOutcome::NoChanges => "no changes to commit",
            PublishOutcome::InsecureRemote => "committed, push skipped (remote is not HTTPS)",
            PublishOutcome::Pushed => "pushed",
        };
        f.write_str(text)
    }
}

/// Capability to publish a file somewhere
pub(crate) trait Publisher {
    fn publish(&self, path: &Path) -> Result<PublishOutcome, PublishError>;
}

/// Publisher used when publishing is disabled
pub(crate) struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn publish(&self, _path: &Path) -> Result<PublishOutcome, PublishError> {
        Ok(PublishOutcome::Disabled)
    }
}

pub(crate) fn commit_message(now: chrono::NaiveDateTime) -> String {
    format!("Update stats: {}", now.format(COMMIT_TIME_FORMAT))
}

/// Commit-and-push publisher over any [`Vcs`]
pub(crate) struct VcsPublisher<V> {
    vcs: V,
    secrets_file: PathBuf,
    remote: String,
}

impl<V: Vcs> VcsPublisher<V> {
    pub(crate) fn new(
        vcs: V,
        secrets_file: impl Into<PathBuf>,
        remote: impl Into<String>,
    ) -> Self {
        VcsPublisher {
            vcs,
            secrets_file: secrets_file.into(),
            remote: remote.into(),
        }
    }
}

impl<V: Vcs> Publisher for VcsPublisher<V> {
    fn publish(&self, path: &Path) -> Result<PublishOutcome, PublishError> {
        let Some(token) = secrets::read_token(&self.secrets_file) else {
            return Ok(PublishOutcome::NoCredentials);
        };

        self.vcs.add(path)?;
        if !self.vcs.has_changes(path)? {
            log::info!("No changes in {}, nothing to commit", path.display());
            return Ok(PublishOutcome::NoChanges);
        }

        let message = commit_message(Local::now().naive_local());
        self.vcs.commit(path, &message)?;
        log::info!("Committed \"{message}\"");

        let url = self.vcs.remote_url(&self.remote)?;
        let Some(push_url) = remote::authenticated_url(&url, &token) else {
            log::warn!(
                "Remote {} is not HTTPS ({}), refusing to send the token; push skipped",
                self.remote,
                remote::redact(&url, &token)
            );
            return Ok(PublishOutcome::InsecureRemote);
        };

        let encoded = push_url.password().unwrap_or_default().to_string();
        self.vcs.push(push_url.as_str()).map_err(|e| match e {
            PublishError::Command { command, stderr } => PublishError::Command {
                command,
                stderr: remote::redact(&remote::redact(&stderr, &token), &encoded),
            },
            other => other,
        })?;
        Ok(PublishOutcome::Pushed)
    }
}
