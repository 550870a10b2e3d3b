use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::PublishError;

/// The handful of version-control operations publishing needs
pub(crate) trait Vcs {
    fn add(&self, path: &Path) -> Result<(), PublishError>;

    /// Whether `path` differs from HEAD (staged or not)
    fn has_changes(&self, path: &Path) -> Result<bool, PublishError>;

    /// Commit only `path` with `message`
    fn commit(&self, path: &Path, message: &str) -> Result<(), PublishError>;

    fn remote_url(&self, remote: &str) -> Result<String, PublishError>;

    /// Push HEAD to `url` (which may carry credentials)
    fn push(&self, url: &str) -> Result<(), PublishError>;
}

/// `git` binary run from the repository root
pub(crate) struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub(crate) fn new(repo_root: impl Into<PathBuf>) -> Self {
        GitCli {
            repo_root: repo_root.into(),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.repo_root);
        cmd
    }

    /// Paths are given relative to the process, git runs in the repo root
    fn pathspec(path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn run(label: &str, mut cmd: Command) -> Result<String, PublishError> {
        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PublishError::GitNotFound
            } else {
                PublishError::Spawn {
                    command: label.to_string(),
                    source: e,
                }
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(PublishError::Command {
                command: label.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

impl Vcs for GitCli {
    fn add(&self, path: &Path) -> Result<(), PublishError> {
        let mut cmd = self.git();
        cmd.arg("add").arg("--").arg(Self::pathspec(path));
        Self::run("add", cmd).map(drop)
    }

    fn has_changes(&self, path: &Path) -> Result<bool, PublishError> {
        let mut cmd = self.git();
        cmd.args(["status", "--porcelain", "--"])
            .arg(Self::pathspec(path));
        let stdout = Self::run("status", cmd)?;
        Ok(!stdout.trim().is_empty())
    }

    fn commit(&self, path: &Path, message: &str) -> Result<(), PublishError> {
        let mut cmd = self.git();
        cmd.args(["commit", "-m", message, "--"])
            .arg(Self::pathspec(path));
        Self::run("commit", cmd).map(drop)
    }

    fn remote_url(&self, remote: &str) -> Result<String, PublishError> {
        let mut cmd = self.git();
        cmd.args(["remote", "get-url", remote]);
        Ok(Self::run("remote get-url", cmd)?.trim().to_string())
    }

    fn push(&self, url: &str) -> Result<(), PublishError> {
        let mut cmd = self.git();
        cmd.args(["push", url, "HEAD"]);
        Self::run("push", cmd).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    fn git_in(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("run git");
        assert!(
            status.status.success(),
            "git {args:?}: {}",
            String::from_utf8_lossy(&status.stderr)
        );
    }

    fn init_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        git_in(dir.path(), &["init", "-q"]);
        git_in(dir.path(), &["config", "user.email", "bot@example.com"]);
        git_in(dir.path(), &["config", "user.name", "Stats Bot"]);
        git_in(dir.path(), &["config", "commit.gpgsign", "false"]);
        dir
    }

    #[test]
    fn add_status_commit_cycle() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let file = repo.path().join("data").join("stats.json");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "[]").unwrap();

        let git = GitCli::new(repo.path());
        git.add(&file).unwrap();
        assert!(git.has_changes(&file).unwrap());
        git.commit(&file, "Update stats: 2024-01-01T10:00:00").unwrap();
        assert!(!git.has_changes(&file).unwrap());

        let log = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(repo.path())
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&log.stdout).trim(),
            "Update stats: 2024-01-01T10:00:00"
        );
    }

    #[test]
    fn commit_leaves_other_staged_files_alone() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let stats = repo.path().join("stats.json");
        let other = repo.path().join("notes.txt");
        fs::write(&stats, "[]").unwrap();
        fs::write(&other, "wip").unwrap();
        git_in(repo.path(), &["add", "notes.txt"]);

        let git = GitCli::new(repo.path());
        git.add(&stats).unwrap();
        git.commit(&stats, "Update stats: now").unwrap();
        assert!(git.has_changes(&other).unwrap());
    }

    #[test]
    fn remote_url_reads_configured_remote() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        git_in(
            repo.path(),
            &["remote", "add", "origin", "https://github.com/someone/aforo.git"],
        );
        let git = GitCli::new(repo.path());
        assert_eq!(
            git.remote_url("origin").unwrap(),
            "https://github.com/someone/aforo.git"
        );
        assert!(matches!(
            git.remote_url("upstream"),
            Err(PublishError::Command { .. })
        ));
    }

    #[test]
    fn status_outside_repository_fails() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());
        assert!(git.has_changes(&dir.path().join("stats.json")).is_err());
    }
}
