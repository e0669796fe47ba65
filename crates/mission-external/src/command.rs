use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Run `program args...` and return its stdout, or `None` on spawn failure,
/// non-zero exit, or timeout. The child is killed when the timeout fires.
pub async fn run_with_timeout(program: &str, args: &[String], timeout: Duration) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, output).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(Ok(output)) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                program,
                code = output.status.code().unwrap_or(-1),
                stderr = %stderr.trim(),
                "external command failed"
            );
            None
        }
        Ok(Err(e)) => {
            tracing::warn!(program, error = %e, "external command could not be spawned");
            None
        }
        Err(_) => {
            tracing::warn!(program, timeout_secs = timeout.as_secs(), "external command timed out");
            None
        }
    }
}
