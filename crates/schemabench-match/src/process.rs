//! Running an external process to completion under a time budget.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{MatchError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a finished process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

fn drain<R>(reader: Option<R>, stream: &'static str) -> JoinHandle<io::Result<String>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut reader) = reader
            && let Err(error) = reader.read_to_end(&mut buffer)
        {
            warn!(stream, %error, "failed to read process output");
            return Err(error);
        }
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    })
}

/// Joins a drain thread; a failed read fails the run rather than reading as empty.
fn collect(handle: JoinHandle<io::Result<String>>, program: &OsStr) -> Result<String> {
    let io_error = |source| MatchError::Io {
        path: PathBuf::from(program),
        source,
    };
    match handle.join() {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(source)) => Err(io_error(source)),
        Err(_) => Err(io_error(io::Error::other("output reader panicked"))),
    }
}

/// Spawns `command` and waits for it to exit, killing it after `timeout`.
///
/// stdout and stderr are drained on background threads while waiting.
/// On timeout the drain threads are detached rather than joined, since
/// descendants of the killed process may still hold the pipes open.
pub fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<ProcessOutput> {
    let program = command.get_program().to_owned();
    let started = Instant::now();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| MatchError::Spawn {
            program: program.clone().into(),
            source,
        })?;
    debug!(pid = child.id(), "process started");

    let stdout = drain(child.stdout.take(), "stdout");
    let stderr = drain(child.stderr.take(), "stderr");

    let status = loop {
        let polled = child.try_wait().map_err(|source| MatchError::Io {
            path: program.clone().into(),
            source,
        })?;
        if let Some(status) = polled {
            break status;
        }
        let elapsed = started.elapsed();
        if elapsed >= timeout {
            warn!(pid = child.id(), timeout_ms = timeout.as_millis(), "process timed out, killing");
            let _ = child.kill();
            let _ = child.wait();
            return Err(MatchError::Timeout { timeout });
        }
        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    };

    Ok(ProcessOutput {
        status,
        stdout: collect(stdout, &program)?,
        stderr: collect(stderr, &program)?,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn read_failure_is_an_error_not_empty_output() {
        let handle = drain(Some(BrokenPipe), "stderr");
        let err = collect(handle, OsStr::new("java")).unwrap_err();
        assert!(matches!(
            err,
            MatchError::Io { ref source, .. } if source.kind() == io::ErrorKind::BrokenPipe
        ));
    }

    #[test]
    fn missing_stream_reads_as_empty() {
        let handle = drain(None::<BrokenPipe>, "stdout");
        assert_eq!(collect(handle, OsStr::new("java")).expect("collect"), "");
    }

    #[cfg(unix)]
    #[test]
    fn captures_output_of_finished_process() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo out; echo err >&2"]);
        let output = run_with_timeout(&mut command, Duration::from_secs(10)).expect("run");
        assert!(output.status.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn kills_process_after_timeout() {
        let mut command = Command::new("sh");
        command.args(["-c", "exec sleep 5"]);
        let started = Instant::now();
        let err = run_with_timeout(&mut command, Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, MatchError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut command = Command::new("/nonexistent/schemabench-java");
        let err = run_with_timeout(&mut command, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, MatchError::Spawn { .. }));
    }
}
