//! Bounded capture of external command output.

use crate::types::DiscoveryError;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

#[derive(Debug)]
pub(crate) struct Captured {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
}

/// Run `program` and collect at most `limit` bytes of its stdout.
///
/// A child that writes more than `limit` bytes is killed and the call fails
/// with [`DiscoveryError::OutputTooLarge`]. The child is also killed if the
/// returned future is dropped early.
pub(crate) async fn run_capped(
    program: &Path,
    args: &[String],
    limit: usize,
) -> Result<Captured, DiscoveryError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| DiscoveryError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| DiscoveryError::ListFailed("stdout was not captured".to_string()))?;

    let mut buf = Vec::new();
    stdout.take(limit as u64 + 1).read_to_end(&mut buf).await?;

    if buf.len() > limit {
        // Already exited is fine; we only care that it stops writing.
        let _ = child.start_kill();
        let _ = child.wait().await;
        return Err(DiscoveryError::OutputTooLarge { limit });
    }

    let status = child.wait().await?;
    Ok(Captured {
        status,
        stdout: buf,
    })
}
