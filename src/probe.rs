//! Bounded subprocess execution
//!
//! Several features need a "try these commands until one answers" pattern:
//! session-idle lookup and assistant availability checks. Commands run with
//! piped output and a hard timeout; the candidate list is explicit and the
//! first usable signal wins.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a bounded subprocess run.
#[derive(Debug, Clone)]
pub struct ProbeOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, when the process exited on its own.
    pub status: Option<i32>,
    pub timed_out: bool,
}

impl ProbeOutput {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.status == Some(0)
    }
}

/// Run a command, killing it once `timeout` elapses.
///
/// Spawn failures (typically a missing binary) surface as `Err`; everything
/// after a successful spawn, including the timeout, is a `ProbeOutput`.
pub fn run_command(command: &mut Command, timeout: Duration) -> std::io::Result<ProbeOutput> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = read_pipe(child.stdout.take());
                let stderr = read_pipe(child.stderr.take());
                return Ok(ProbeOutput {
                    stdout,
                    stderr,
                    status: status.code(),
                    timed_out: false,
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(ProbeOutput {
                        stdout: String::new(),
                        stderr: String::new(),
                        status: None,
                        timed_out: true,
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return Err(err),
        }
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Run candidates in order under a shared timeout; the first one that exits
/// zero with non-empty stdout wins.
pub fn first_success(
    candidates: &[(&str, &[&str])],
    timeout: Duration,
) -> Option<ProbeOutput> {
    for (program, args) in candidates {
        match run_command(Command::new(program).args(*args), timeout) {
            Ok(output) if output.succeeded() && !output.stdout.trim().is_empty() => {
                debug!("probe `{}` answered", program);
                return Some(output);
            }
            Ok(_) => debug!("probe `{}` had no usable signal", program),
            Err(err) => debug!("probe `{}` failed to spawn: {}", program, err),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let output =
            run_command(Command::new("echo").arg("hello"), Duration::from_secs(5)).unwrap();
        assert!(output.succeeded());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_process() {
        let output =
            run_command(Command::new("sleep").arg("5"), Duration::from_millis(100)).unwrap();
        assert!(output.timed_out);
        assert!(!output.succeeded());
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let result = run_command(
            &mut Command::new("definitely-not-a-real-binary-xyz"),
            Duration::from_secs(1),
        );
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_first_success_stops_at_first_usable() {
        let candidates: &[(&str, &[&str])] = &[
            ("false", &[]),
            ("echo", &["signal"]),
            ("echo", &["never reached"]),
        ];
        let output = first_success(candidates, Duration::from_secs(5)).unwrap();
        assert_eq!(output.stdout.trim(), "signal");
    }
}
