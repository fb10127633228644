//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a deadline-bounded child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Builder for subprocess execution.
///
/// Commands are always launched with a direct argument vector; no shell
/// is involved, so paths with spaces or metacharacters need no quoting.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

/// Outcome of a subprocess run under an optional deadline.
#[derive(Debug)]
pub enum ExecOutcome {
    /// The process ran to completion.
    Completed(Output),
    /// The deadline expired and the process was killed. Whatever the
    /// child wrote before being killed is preserved.
    TimedOut { stdout: Vec<u8>, stderr: Vec<u8> },
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Execute the command, capturing both output streams.
    ///
    /// With a `limit`, the child is polled until the deadline and killed
    /// if it is still running. A spawn failure (program missing or not
    /// executable) is the only error path; a non-zero exit is reported
    /// through the captured `Output`.
    pub fn exec_with_timeout(&self, limit: Option<Duration>) -> io::Result<ExecOutcome> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        // Drain both pipes on threads so a chatty child cannot deadlock
        // against a full pipe buffer while we wait on it.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match limit {
            None => child.wait()?,
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if Instant::now() >= deadline {
                        child.kill().ok();
                        child.wait().ok();
                        return Ok(ExecOutcome::TimedOut {
                            stdout: stdout_reader.join().unwrap_or_default(),
                            stderr: stderr_reader.join().unwrap_or_default(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        };

        Ok(ExecOutcome::Completed(Output {
            status,
            stdout: stdout_reader.join().unwrap_or_default(),
            stderr: stderr_reader.join().unwrap_or_default(),
        }))
    }

    /// Display the command for log and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).ok();
        }
        buf
    })
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
