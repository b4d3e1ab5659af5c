//! Invocation helpers for the external mongodump/mongorestore binaries.
//!
//! The binaries are treated as opaque: we only build their command lines,
//! wire up the pipes, and enforce the exit-code contract. Streaming the
//! actual bytes is done by the HTTP layer.

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;

/// Error type for dump/restore subprocess handling.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to start tool: {0}")]
    Spawn(std::io::Error),

    #[error("tool exited with code {exit_code:?}: {stderr}")]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the `mongodump` command for a profile's connection URL.
///
/// Output is a gzip-compressed single archive on stdout.
pub fn dump_command(mongodump: &str, connection_url: &str) -> Command {
    let mut cmd = Command::new(mongodump);
    cmd.arg(format!("--uri={connection_url}"))
        .arg("--gzip")
        .arg("--archive")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Build the `mongorestore` command targeting the service's own store.
///
/// Reads a gzip-compressed single archive from stdin and drops existing
/// data first.
pub fn restore_command(mongorestore: &str, connection_url: &str) -> Command {
    let mut cmd = Command::new(mongorestore);
    cmd.arg(format!("--uri={connection_url}"))
        .arg("--drop")
        .arg("--gzip")
        .arg("--archive")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// A running dump/restore child.
///
/// Both tools report progress on stderr; it is drained on a separate task
/// from the moment of spawn, otherwise the pipe fills up and stalls the
/// transfer. The child is spawned with `kill_on_drop`, so dropping this
/// struct (e.g. when the client disconnects mid-stream) tears the process
/// down rather than leaving it attached to the target database.
pub struct ToolProcess {
    child: Child,
    stderr: JoinHandle<String>,
}

impl ToolProcess {
    pub fn spawn(mut cmd: Command) -> Result<Self, ToolError> {
        let mut child = cmd.spawn().map_err(ToolError::Spawn)?;
        let stderr_pipe = child.stderr.take();
        let stderr = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_end(&mut buf).await;
            }
            String::from_utf8_lossy(&buf).into_owned()
        });
        Ok(Self { child, stderr })
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Force-terminate the child. Used when the stream copy fails mid-way;
    /// the exit status is irrelevant at that point.
    pub async fn kill(&mut self) {
        let _ = self.child.kill().await;
    }

    /// Wait for the child to exit and enforce the exit-code contract:
    /// non-zero exit becomes [`ToolError::Failed`] carrying the captured
    /// stderr text as the error message.
    pub async fn wait_checked(mut self) -> Result<(), ToolError> {
        let status = self.child.wait().await?;
        let stderr = self.stderr.await.unwrap_or_default();
        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                exit_code: status.code(),
                stderr,
            })
        }
    }
}
