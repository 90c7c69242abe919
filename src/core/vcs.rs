//! Git snapshots of the notebook directory
//!
//! Shells out to `git`. Nothing in the store calls this; callers decide
//! when a snapshot is taken.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::config::CommitAuthor;
use super::file_system::NOTEBOOK_FILE;

/// Errors from interacting with a git repository.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git executable is not available in PATH")]
    NotInstalled,

    #[error("git command failed: git {args} ({message})")]
    CommandFailed { args: String, message: String },

    #[error("unable to parse git output: {0}")]
    Parse(String),

    #[error("cannot prepare repository directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Thin client around the `git` CLI, rooted at one directory
#[derive(Debug, Clone)]
pub struct GitClient {
    repo_root: PathBuf,
}

impl GitClient {
    /// Returns true if `git` is available in PATH.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Open the repository at `dir`, initializing one if it has none.
    ///
    /// A fresh repository gets HEAD pointed at `default_branch`.
    pub fn ensure_repo(dir: impl AsRef<Path>, default_branch: &str) -> Result<Self, GitError> {
        let repo_root = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&repo_root)?;
        if !repo_root.join(".git").exists() {
            run_git(&repo_root, &["init", "--quiet"])?;
            let head_ref = format!("refs/heads/{default_branch}");
            run_git(&repo_root, &["symbolic-ref", "HEAD", &head_ref])?;
            tracing::info!("Initialized git repository: {}", repo_root.display());
        }
        Ok(Self { repo_root })
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Stage one path relative to the repository root
    pub fn add(&self, path: &str) -> Result<(), GitError> {
        run_git(&self.repo_root, &["add", "--", path]).map(|_| ())
    }

    /// Commit staged changes as `author`
    pub fn commit(&self, message: &str, author: &CommitAuthor) -> Result<(), GitError> {
        let name = format!("user.name={}", author.name);
        let email = format!("user.email={}", author.email);
        run_git(
            &self.repo_root,
            &[
                "-c",
                &name,
                "-c",
                &email,
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "-m",
                message,
            ],
        )
        .map(|_| ())
    }

    /// Commit id HEAD resolves to
    pub fn head(&self) -> Result<String, GitError> {
        let stdout = run_git(&self.repo_root, &["rev-parse", "HEAD"])?;
        first_nonempty_line(&stdout)
            .map(ToOwned::to_owned)
            .ok_or_else(|| GitError::Parse("git rev-parse returned empty output".to_string()))
    }
}

/// Snapshot the notebook in `dir` into git and return the new commit id.
pub fn commit_notebook(
    dir: impl AsRef<Path>,
    message: &str,
    author: &CommitAuthor,
    default_branch: &str,
) -> Result<String, GitError> {
    let client = GitClient::ensure_repo(dir, default_branch)?;
    client.add(NOTEBOOK_FILE)?;
    client.commit(message, author)?;
    let head = client.head()?;
    tracing::info!("Committed notebook snapshot {}: {}", head, message);
    Ok(head)
}

fn run_git(cwd: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                GitError::NotInstalled
            } else {
                GitError::CommandFailed {
                    args: args.join(" "),
                    message: err.to_string(),
                }
            }
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let message = if !stderr.is_empty() {
            stderr
        } else if !stdout.is_empty() {
            stdout
        } else {
            "unknown error".to_string()
        };
        Err(GitError::CommandFailed {
            args: args.join(" "),
            message,
        })
    }
}

fn first_nonempty_line(input: &str) -> Option<&str> {
    input.lines().map(str::trim).find(|line| !line.is_empty())
}
