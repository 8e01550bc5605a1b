//! Subprocess client for the assistant CLI
//!
//! Wraps the `copilot` binary behind the [`Advisor`] trait. Every call is
//! bounded by a timeout; a missing binary, a timeout, or a bad exit all
//! surface as `AdvisorError` for the caller to degrade on.

use super::{Advisor, AdvisorError, AdvisorResult};
use crate::probe::{self, ProbeOutput};
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// Timeout for cheap availability probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for content generation.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Prompt length used for the single shortened retry.
const RETRY_PROMPT_CHARS: usize = 200;

pub struct CopilotAdvisor {
    binary: String,
    timeout: Duration,
    retry_shortened: bool,
}

impl CopilotAdvisor {
    pub fn new() -> Self {
        Self::with_binary("copilot")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: GENERATE_TIMEOUT,
            retry_shortened: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Permit one bounded retry with a shortened prompt when the first call
    /// degrades. Used by the complexity-analysis path only.
    pub fn with_shortened_retry(mut self) -> Self {
        self.retry_shortened = true;
        self
    }

    /// Whether the assistant looks usable: one of the status invocations
    /// answers inside the probe timeout. Invocations vary across assistant
    /// releases, so this is an ordered candidate list.
    pub fn available(&self) -> bool {
        let binary = self.binary.as_str();
        let candidates: [(&str, &[&str]); 3] = [
            (binary, &["--version"]),
            (binary, &["auth", "status"]),
            (binary, &["status"]),
        ];
        probe::first_success(&candidates, PROBE_TIMEOUT).is_some()
    }

    fn invoke(&self, prompt: &str) -> AdvisorResult<ProbeOutput> {
        let output = self.run(Command::new(&self.binary).arg("explain").arg(prompt))?;

        // Older releases take a bare `-p` flag instead of `explain`.
        if !output.timed_out && output.status != Some(0) {
            let hint = output.stderr.to_lowercase();
            if hint.contains("unknown") || hint.contains("invalid") {
                debug!("assistant rejected `explain`, retrying with `-p`");
                return self.run(Command::new(&self.binary).arg("-p").arg(prompt));
            }
        }
        Ok(output)
    }

    fn run(&self, command: &mut Command) -> AdvisorResult<ProbeOutput> {
        probe::run_command(command, self.timeout).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                AdvisorError::BinaryMissing
            } else {
                AdvisorError::Io(err)
            }
        })
    }

    fn timeout_error(&self) -> AdvisorError {
        AdvisorError::TimedOut(self.timeout)
    }
}

impl Default for CopilotAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Advisor for CopilotAdvisor {
    fn advise(&self, prompt: &str) -> AdvisorResult<String> {
        match self.invoke(prompt).and_then(|out| self.classify(out)) {
            Ok(text) => Ok(text),
            Err(err) if self.retry_shortened && prompt.chars().count() > RETRY_PROMPT_CHARS => {
                debug!("assistant call degraded ({err}); one retry with a shorter prompt");
                let short: String = prompt.chars().take(RETRY_PROMPT_CHARS).collect();
                self.invoke(&short).and_then(|out| self.classify(out))
            }
            Err(err) => Err(err),
        }
    }
}

impl CopilotAdvisor {
    fn classify(&self, output: ProbeOutput) -> AdvisorResult<String> {
        if output.timed_out {
            return Err(self.timeout_error());
        }
        match output.status {
            Some(0) => {
                let text = output.stdout.trim();
                if text.is_empty() {
                    Err(AdvisorError::EmptyOutput)
                } else {
                    Ok(text.to_string())
                }
            }
            status => Err(AdvisorError::Failed {
                status: status.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_maps_to_error() {
        let advisor = CopilotAdvisor::with_binary("definitely-not-a-real-assistant-xyz")
            .with_timeout(Duration::from_secs(1));
        match advisor.advise("hello") {
            Err(AdvisorError::BinaryMissing) => {}
            other => panic!("expected BinaryMissing, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_echo_stands_in_for_the_assistant() {
        // `echo explain <prompt>` exits zero with the prompt on stdout.
        let advisor = CopilotAdvisor::with_binary("echo").with_timeout(Duration::from_secs(5));
        let text = advisor.advise("stand-in prompt").unwrap();
        assert!(text.contains("stand-in prompt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let advisor = CopilotAdvisor::with_binary("false").with_timeout(Duration::from_secs(5));
        match advisor.advise("prompt") {
            Err(AdvisorError::Failed { .. }) => {}
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_binary_is_unavailable() {
        let advisor = CopilotAdvisor::with_binary("definitely-not-a-real-assistant-xyz");
        assert!(!advisor.available());
    }
}
