//! Shell invocation with timeouts.
//!
//! Command lines are run through the platform shell (`sh -c` or `cmd /C`)
//! so that quoting and `&&` chaining behave the way users expect when they
//! copy the command into a terminal.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};
use wait_timeout::ChildExt;

/// Why a command did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("could not start: {0}")]
    Spawn(#[source] io::Error),

    #[error("timed out after {} seconds", .0.as_secs())]
    TimedOut(Duration),

    #[error("{status}{}", detail(.stderr))]
    Failed { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn detail(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Quote one argument for the platform shell: single quotes on Unix,
/// double quotes on Windows.
pub fn quote(arg: impl AsRef<std::ffi::OsStr>) -> String {
    let arg = arg.as_ref().to_string_lossy();
    if cfg!(windows) {
        format!("\"{}\"", arg.replace('"', "\"\""))
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// A [`Command`] that runs `line` through the platform shell in `dir`.
pub fn shell(line: &str, dir: &Path) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(line);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    };
    cmd.current_dir(dir);
    cmd
}

/// Run to completion, capturing stdout and stderr.
///
/// Both pipes are drained on helper threads while this thread waits, so a
/// child that writes more than a pipe buffer is never blocked. Fails on
/// spawn errors, on timeout (after killing the child), and on a non-zero
/// exit.
pub fn run_captured(cmd: &mut Command, timeout: Option<Duration>) -> Result<Output, ShellError> {
    debug!(command = ?cmd, "Running");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ShellError::Spawn)?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    // On timeout the readers are left behind, as in `run_forwarding`.
    let status = wait(&mut child, timeout)?;

    let stdout = collect(stdout)?;
    let stderr = String::from_utf8_lossy(&collect(stderr)?).into_owned();

    if !status.success() {
        return Err(ShellError::Failed { status, stderr });
    }

    Ok(Output {
        status,
        stdout,
        stderr: stderr.into_bytes(),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, ShellError> {
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };
    match reader.join() {
        Ok(bytes) => Ok(bytes?),
        Err(_) => Err(io::Error::other("output reader panicked").into()),
    }
}

/// Run with stdout piped, forwarding it to `sink` line by line as it
/// arrives.
///
/// Bytes are passed through unchanged. One helper thread pumps the pipe
/// while this thread waits on the timeout; if the sink stops accepting
/// writes the pump keeps draining so the child never sees a closed pipe.
/// Stderr is expected to be merged into stdout by the caller.
pub fn run_forwarding<W>(
    cmd: &mut Command,
    timeout: Option<Duration>,
    sink: W,
) -> Result<(), ShellError>
where
    W: Write + Send + 'static,
{
    debug!(command = ?cmd, "Running with forwarded output");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(ShellError::Spawn)?;

    let pump = child.stdout.take().map(|stdout| {
        thread::spawn(move || {
            let mut sink = sink;
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            let mut forwarding = true;
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) => {
                        debug!(error = %e, "Child output unreadable");
                        break;
                    }
                }
                trace!(line = %String::from_utf8_lossy(&line).trim_end(), "child output");
                if forwarding && sink.write_all(&line).and_then(|()| sink.flush()).is_err() {
                    debug!("Output sink closed, discarding the rest");
                    forwarding = false;
                }
            }
        })
    });

    // On timeout the pump is left behind: a grandchild may still hold the pipe.
    let status = wait(&mut child, timeout)?;

    if let Some(pump) = pump {
        if pump.join().is_err() {
            debug!("Output forwarding thread panicked");
        }
    }

    if !status.success() {
        return Err(ShellError::Failed {
            status,
            stderr: String::new(),
        });
    }
    Ok(())
}

/// Run with inherited stdio, typically attached to the terminal.
pub fn run_attached(cmd: &mut Command, timeout: Option<Duration>) -> Result<(), ShellError> {
    debug!(command = ?cmd, "Running attached");
    let mut child = cmd.spawn().map_err(ShellError::Spawn)?;
    let status = wait(&mut child, timeout)?;
    if !status.success() {
        return Err(ShellError::Failed {
            status,
            stderr: String::new(),
        });
    }
    Ok(())
}

fn wait(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, ShellError> {
    let Some(limit) = timeout else {
        return Ok(child.wait()?);
    };

    match child.wait_timeout(limit)? {
        Some(status) => Ok(status),
        None => {
            // Timeout - kill the process
            let _ = child.kill();
            let _ = child.wait();
            Err(ShellError::TimedOut(limit))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote("/opt/my php/php"), "'/opt/my php/php'");
    }

    #[test]
    fn captured_output() {
        let out = run_captured(&mut shell("printf 'user.name=Jane'", Path::new(".")), None).unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "user.name=Jane");
    }

    #[test]
    fn non_zero_exit_is_failure_with_stderr() {
        let err = run_captured(
            &mut shell("echo boom >&2; exit 3", Path::new(".")),
            Some(Duration::from_secs(10)),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::Failed { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn timeout_kills_the_child() {
        let err = run_captured(
            &mut shell("sleep 5", Path::new(".")),
            Some(Duration::from_millis(100)),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::TimedOut(_)));
    }

    #[test]
    fn forwarding_preserves_lines() {
        let sink = Shared::default();
        run_forwarding(
            &mut shell("echo one; echo two 2>&1", Path::new(".")),
            Some(Duration::from_secs(10)),
            sink.clone(),
        )
        .unwrap();
        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "one\ntwo\n");
    }

    #[test]
    fn captured_output_larger_than_a_pipe_buffer() {
        let out = run_captured(
            &mut shell(r"head -c 200000 /dev/zero | tr '\0' 'a'", Path::new(".")),
            Some(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(out.stdout.len(), 200_000);
        assert!(out.stdout.iter().all(|&b| b == b'a'));
    }

    #[test]
    fn forwarding_passes_non_utf8_bytes_through() {
        let sink = Shared::default();
        run_forwarding(
            &mut shell(
                r"printf 'first\n\377\n'; sleep 0.2; for i in 1 2 3; do echo line$i; done",
                Path::new("."),
            ),
            Some(Duration::from_secs(10)),
            sink.clone(),
        )
        .unwrap();
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            b"first\n\xff\nline1\nline2\nline3\n"
        );
    }

    #[test]
    fn closed_sink_does_not_fail_the_child() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        run_forwarding(
            &mut shell("for i in $(seq 1 20000); do echo line$i; done", Path::new(".")),
            Some(Duration::from_secs(30)),
            Closed,
        )
        .unwrap();
    }

    #[test]
    fn runs_in_the_given_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = run_captured(&mut shell("pwd", tmp.path()), None).unwrap();
        let reported = String::from_utf8_lossy(&out.stdout).trim().to_string();
        assert_eq!(
            std::fs::canonicalize(reported).unwrap(),
            std::fs::canonicalize(tmp.path()).unwrap()
        );
    }
}
