//! Expectation-based mock runner for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner};

type ArgsMatcher = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct MockProcessRunner {
    expectations: Arc<Mutex<Vec<MockExpectation>>>,
    call_history: Arc<Mutex<Vec<ProcessCommand>>>,
}

/// What a matched expectation hands back to the caller.
#[derive(Clone)]
enum MockResponse {
    Output(ProcessOutput),
    NotFound,
    Timeout(Duration),
}

struct MockExpectation {
    program: String,
    args_matcher: Option<ArgsMatcher>,
    response: MockResponse,
    times_called: usize,
    expected_times: Option<usize>,
}

pub struct MockCommandConfig {
    runner: MockProcessRunner,
    expectation: MockExpectation,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(Vec::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect_command(&self, program: &str) -> MockCommandConfig {
        MockCommandConfig {
            runner: self.clone(),
            expectation: MockExpectation {
                program: program.to_string(),
                args_matcher: None,
                response: MockResponse::Output(ProcessOutput {
                    status: ExitStatus::Success,
                    stdout: String::new(),
                    stderr: String::new(),
                    duration: Duration::from_millis(10),
                }),
                times_called: 0,
                expected_times: None,
            },
        }
    }

    /// Number of recorded invocations of `program`.
    pub fn calls_to(&self, program: &str) -> usize {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .filter(|cmd| cmd.program == program)
            .count()
    }

    pub fn call_history(&self) -> Vec<ProcessCommand> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    pub fn reset(&self) {
        self.expectations.lock().unwrap().clear();
        self.call_history.lock().unwrap().clear();
    }
}

impl Default for MockProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        self.call_history.lock().unwrap().push(command.clone());

        let mut expectations = self.expectations.lock().unwrap();

        for expectation in expectations.iter_mut() {
            if expectation.program != command.program {
                continue;
            }

            if let Some(ref matcher) = expectation.args_matcher {
                if !matcher(&command.args) {
                    continue;
                }
            }

            expectation.times_called += 1;

            if let Some(expected) = expectation.expected_times {
                if expectation.times_called > expected {
                    return Err(ProcessError::MockExpectationNotMet(format!(
                        "command '{}' called {} times, expected {}",
                        command.program, expectation.times_called, expected
                    )));
                }
            }

            return match &expectation.response {
                MockResponse::Output(output) => Ok(output.clone()),
                MockResponse::NotFound => {
                    Err(ProcessError::CommandNotFound(command.program.clone()))
                }
                MockResponse::Timeout(duration) => Err(ProcessError::Timeout(*duration)),
            };
        }

        Err(ProcessError::MockExpectationNotMet(format!(
            "no expectation for command: {} {:?}",
            command.program, command.args
        )))
    }
}

impl MockCommandConfig {
    pub fn with_args<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.expectation.args_matcher = Some(Box::new(matcher));
        self
    }

    pub fn returns_stdout(mut self, stdout: &str) -> Self {
        if let MockResponse::Output(ref mut output) = self.expectation.response {
            output.stdout = stdout.to_string();
        }
        self
    }

    pub fn returns_stderr(mut self, stderr: &str) -> Self {
        if let MockResponse::Output(ref mut output) = self.expectation.response {
            output.stderr = stderr.to_string();
        }
        self
    }

    pub fn returns_exit_code(mut self, code: i32) -> Self {
        if let MockResponse::Output(ref mut output) = self.expectation.response {
            output.status = if code == 0 {
                ExitStatus::Success
            } else {
                ExitStatus::Error(code)
            };
        }
        self
    }

    /// The invocation fails as if the program were not installed.
    pub fn returns_not_found(mut self) -> Self {
        self.expectation.response = MockResponse::NotFound;
        self
    }

    /// The invocation fails as if the timeout elapsed.
    pub fn returns_timeout(mut self, duration: Duration) -> Self {
        self.expectation.response = MockResponse::Timeout(duration);
        self
    }

    pub fn times(mut self, n: usize) -> Self {
        self.expectation.expected_times = Some(n);
        self
    }

    pub fn finish(self) {
        self.runner
            .expectations
            .lock()
            .unwrap()
            .push(self.expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matched_expectation_returns_configured_output() {
        let mock = MockProcessRunner::new();
        mock.expect_command("gh")
            .with_args(|args| args == ["auth", "status"])
            .returns_exit_code(1)
            .returns_stderr("not logged in")
            .finish();

        let command = ProcessCommand {
            program: "gh".to_string(),
            args: vec!["auth".to_string(), "status".to_string()],
            env: Default::default(),
            working_dir: None,
            timeout: None,
            stdin: None,
        };

        let output = mock.run(command).await.unwrap();
        assert_eq!(output.status, ExitStatus::Error(1));
        assert_eq!(output.stderr, "not logged in");
        assert_eq!(mock.calls_to("gh"), 1);
    }

    #[tokio::test]
    async fn unmatched_command_is_an_error() {
        let mock = MockProcessRunner::new();

        let command = ProcessCommand {
            program: "gh".to_string(),
            args: vec![],
            env: Default::default(),
            working_dir: None,
            timeout: None,
            stdin: None,
        };

        let err = mock.run(command).await.unwrap_err();
        assert!(matches!(err, ProcessError::MockExpectationNotMet(_)));
    }

    #[tokio::test]
    async fn timeout_response_surfaces_as_timeout_error() {
        let mock = MockProcessRunner::new();
        mock.expect_command("forge")
            .returns_timeout(Duration::from_secs(30))
            .finish();

        let command = ProcessCommand {
            program: "forge".to_string(),
            args: vec![],
            env: Default::default(),
            working_dir: None,
            timeout: None,
            stdin: None,
        };

        let err = mock.run(command).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
