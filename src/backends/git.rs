//! git integration
//!
//! Shallow-clones a repository into a scratch directory that is removed when
//! the owning [`Scratch`] goes out of scope.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use thiserror::Error;

use crate::core::util::command_exists;

/// Interval between exit checks while waiting on git
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Prefix of scratch directory names
const SCRATCH_PREFIX: &str = "supermd-";

/// Failures of the clone step
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to launch git: {0}")]
    Launch(#[source] io::Error),

    #[error("git clone exited with {status}")]
    Failed { status: ExitStatus },

    #[error("git clone timed out after {seconds} seconds")]
    TimedOut { seconds: u64 },

    #[error("failed to wait for git: {0}")]
    Wait(#[source] io::Error),
}

impl FetchError {
    /// Whether this failure is reported to the user as a clone error.
    ///
    /// Launch and wait failures are environmental and propagate instead.
    pub fn is_reported(&self) -> bool {
        matches!(self, FetchError::Failed { .. } | FetchError::TimedOut { .. })
    }
}

/// Owned scratch directory for one run.
///
/// The directory is deleted exactly once: by [`Scratch::close`] or, on any
/// other exit path, when the value is dropped.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    /// Create a fresh directory in `parent`, or in the system temp dir
    pub fn create(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        tracing::debug!(path = %dir.path().display(), "Created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting failure instead of ignoring it
    pub fn close(self) -> io::Result<()> {
        let path: PathBuf = self.dir.path().to_path_buf();
        let result = self.dir.close();
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed scratch directory"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove scratch directory"
            ),
        }
        result
    }
}

/// Check if git is available
pub fn is_git_available() -> bool {
    command_exists("git")
}

/// Clone only the latest revision of `location` into `dest`
pub fn clone_shallow(location: &str, dest: &Path, timeout: Duration) -> Result<(), FetchError> {
    tracing::info!(
        repository = location,
        dest = %dest.display(),
        timeout_secs = timeout.as_secs(),
        "Cloning repository"
    );

    let mut cmd = Command::new("git");
    cmd.arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--quiet")
        .arg(location)
        .arg(dest)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    isolate_process_group(&mut cmd);

    let child = cmd.spawn().map_err(FetchError::Launch)?;
    let status = wait_with_timeout(child, timeout)?;

    if status.success() {
        tracing::info!(repository = location, "Clone finished");
        Ok(())
    } else {
        tracing::debug!(repository = location, %status, "git clone failed");
        Err(FetchError::Failed { status })
    }
}

/// Start the command as leader of its own process group, so helpers such as
/// `git-remote-https` can be killed along with it
#[cfg(unix)]
fn isolate_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn isolate_process_group(_cmd: &mut Command) {}

/// Kill the child and, on unix, every process in the group it leads
fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        // Harmless ESRCH when the child does not lead a group
        let pgid = child.id() as libc::pid_t;
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

/// Wait for a child process, killing it (and its group) once `timeout` has elapsed
pub fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<ExitStatus, FetchError> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    kill_process_tree(&mut child);
                    // Reap so no zombie is left behind
                    let _ = child.wait();
                    return Err(FetchError::TimedOut {
                        seconds: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(FetchError::Wait(e)),
        }
    }
}
