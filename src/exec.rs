use std::io::{self, Read};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run a command to completion under a hard deadline. The child is killed
/// once the deadline passes, so no external tool can hang the collection.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> io::Result<Output> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let start = Instant::now();
    loop {
        match child.try_wait()? {
            Some(status) => {
                let stdout = drain(child.stdout.take());
                let stderr = drain(child.stderr.take());
                return Ok(Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            None => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{program} did not finish within {}ms", timeout.as_millis()),
                    ));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

fn drain<R: Read>(stream: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_end(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_a_fast_command() {
        let out = run_with_timeout("echo", &["ready"], Duration::from_secs(5))
            .expect("echo should run");
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "ready");
    }

    #[test]
    fn kills_a_command_at_the_deadline() {
        let err = run_with_timeout("sleep", &["5"], Duration::from_millis(50))
            .expect_err("sleep should be killed");
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn missing_binary_is_an_error() {
        let result = run_with_timeout("no-such-binary-here", &[], Duration::from_secs(1));
        assert!(result.is_err());
    }
}
