//! Driver endpoint launchers.
//!
//! A launcher hands the session a base URL and is stopped when the session
//! closes. Sessions never manage the driver process themselves.
//!
//! | Launcher | Endpoint | `stop()` |
//! |----------|----------|----------|
//! | [`ProcessLauncher`] | spawned `geckodriver` | kills the process |
//! | [`AttachedLauncher`] | already running driver | no-op |

// ============================================================================
// Imports
// ============================================================================

use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Fresh ports tried before giving up on a launch.
const MAX_LAUNCH_ATTEMPTS: usize = 3;

/// Line geckodriver prints once it accepts connections.
const LISTENING_PATTERN: &str = r"Listening on (\S+):(\d+)";

// ============================================================================
// Launcher
// ============================================================================

/// A running driver endpoint.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Base URL of the driver's HTTP API.
    fn base_url(&self) -> &Url;

    /// Releases the endpoint. Called once, when the session closes.
    async fn stop(&self) -> Result<()>;
}

// ============================================================================
// AttachedLauncher
// ============================================================================

/// A driver started outside this process.
#[derive(Debug, Clone)]
pub struct AttachedLauncher {
    url: Url,
}

impl AttachedLauncher {
    /// Links to the driver at `url`.
    #[inline]
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

#[async_trait]
impl Launcher for AttachedLauncher {
    fn base_url(&self) -> &Url {
        &self.url
    }

    async fn stop(&self) -> Result<()> {
        debug!(url = %self.url, "Detaching from external driver");
        Ok(())
    }
}

// ============================================================================
// ProcessGuard
// ============================================================================

/// Guards a child process and ensures it is killed when dropped.
struct ProcessGuard {
    child: Option<Child>,
    pid: u32,
}

impl ProcessGuard {
    fn new(child: Child) -> Self {
        let pid = child.id().unwrap_or(0);
        debug!(pid, "Process guard created");
        Self {
            child: Some(child),
            pid,
        }
    }

    /// Kills the process and waits for it to exit.
    async fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(pid = self.pid, "Killing driver process");
            if let Err(e) = child.kill().await {
                debug!(pid = self.pid, error = %e, "Failed to kill process");
            }
            if let Err(e) = child.wait().await {
                debug!(pid = self.pid, error = %e, "Failed to wait for process");
            }
            info!(pid = self.pid, "Driver process terminated");
        }
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(pid = self.pid, error = %e, "Failed to send kill signal in Drop");
        }
    }
}

// ============================================================================
// ProcessLauncher
// ============================================================================

/// Spawns a `geckodriver` process and waits for it to announce its address.
pub struct ProcessLauncher {
    url: Url,
    process: Mutex<ProcessGuard>,
}

impl std::fmt::Debug for ProcessLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessLauncher")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProcessLauncher {
    /// Starts `binary` listening on `host`, on `port` or a free one.
    ///
    /// With no fixed port, a launch that never announces itself is retried
    /// on a fresh port.
    ///
    /// # Errors
    ///
    /// - [`Error::ProcessLaunchFailed`] if the binary cannot be spawned
    /// - [`Error::ConnectionTimeout`] if no address is announced in time
    /// - [`Error::Connection`] if the process exits before announcing
    pub async fn launch(
        binary: &Path,
        host: &str,
        port: Option<u16>,
        args: &[String],
        startup_timeout: Duration,
    ) -> Result<Self> {
        let attempts = if port.is_some() { 1 } else { MAX_LAUNCH_ATTEMPTS };
        let mut last_error = Error::connection("driver was never started");

        for attempt in 1..=attempts {
            let port = match port {
                Some(port) => port,
                None => free_port(host)?,
            };

            match Self::launch_once(binary, host, port, args, startup_timeout).await {
                Ok(launcher) => return Ok(launcher),
                Err(e @ Error::ProcessLaunchFailed { .. }) => return Err(e),
                Err(e) => {
                    warn!(attempt, port, error = %e, "Driver did not come up");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn launch_once(
        binary: &Path,
        host: &str,
        port: u16,
        args: &[String],
        startup_timeout: Duration,
    ) -> Result<Self> {
        let mut cmd = Command::new(binary);
        cmd.arg("--host")
            .arg(host)
            .arg("--port")
            .arg(port.to_string())
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(Error::process_launch_failed)?;
        debug!(pid = child.id(), binary = %binary.display(), port, "Driver process spawned");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut guard = ProcessGuard::new(child);

        let (Some(stdout), Some(stderr)) = (stdout, stderr) else {
            guard.kill().await;
            return Err(Error::connection("driver output is not captured"));
        };

        let deadline = Instant::now() + startup_timeout;
        let announced = timeout_at(deadline, wait_for_address(stdout, stderr)).await;

        let url = match announced {
            Ok(Ok(url)) => url,
            Ok(Err(e)) => {
                guard.kill().await;
                return Err(e);
            }
            Err(_) => {
                guard.kill().await;
                return Err(Error::connection_timeout(startup_timeout.as_millis() as u64));
            }
        };

        info!(pid = guard.pid, url = %url, "Driver listening");
        Ok(Self {
            url,
            process: Mutex::new(guard),
        })
    }
}

#[async_trait]
impl Launcher for ProcessLauncher {
    fn base_url(&self) -> &Url {
        &self.url
    }

    async fn stop(&self) -> Result<()> {
        self.process.lock().await.kill().await;
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Asks the OS for a currently unused port.
fn free_port(host: &str) -> Result<u16> {
    let listener = TcpListener::bind((host, 0))?;
    Ok(listener.local_addr()?.port())
}

/// Reads driver output until the listening line shows up.
async fn wait_for_address(stdout: ChildStdout, stderr: ChildStderr) -> Result<Url> {
    let mut out: Option<Lines<BufReader<ChildStdout>>> = Some(BufReader::new(stdout).lines());
    let mut err: Option<Lines<BufReader<ChildStderr>>> = Some(BufReader::new(stderr).lines());

    loop {
        let line = tokio::select! {
            line = next_line(&mut out), if out.is_some() => line,
            line = next_line(&mut err), if err.is_some() => line,
            else => return Err(Error::connection("driver exited before listening")),
        };

        let Some(line) = line else { continue };
        debug!(line = %line, "Driver output");
        if let Some(url) = parse_listening(&line) {
            return Ok(url);
        }
    }
}

/// Next line of a stream; closes the slot at end of stream.
async fn next_line<R>(slot: &mut Option<Lines<R>>) -> Option<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let lines = slot.as_mut()?;
    match lines.next_line().await {
        Ok(Some(line)) => Some(line),
        Ok(None) | Err(_) => {
            *slot = None;
            None
        }
    }
}

/// Extracts the base URL from a `Listening on HOST:PORT` line.
fn parse_listening(line: &str) -> Option<Url> {
    let pattern = Regex::new(LISTENING_PATTERN).ok()?;
    let captures = pattern.captures(line)?;
    let host = captures.get(1)?.as_str();
    let port: u16 = captures.get(2)?.as_str().parse().ok()?;
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    Url::parse(&format!("http://{host}:{port}")).ok()
}

// ============================================================================
// Tests
// ============================================================================
