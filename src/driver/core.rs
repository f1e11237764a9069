//! Driver configuration and session factory.
//!
//! A [`Driver`] holds everything needed to start a session: where the
//! WebDriver endpoint comes from and which capabilities to ask for. Each call
//! to [`Driver::launch`] starts its own endpoint and session.
//!
//! # Example
//!
//! ```no_run
//! use remote_webdriver::Driver;
//!
//! # async fn example() -> remote_webdriver::Result<()> {
//! let driver = Driver::builder()
//!     .binary("/usr/bin/geckodriver")
//!     .build()?;
//!
//! let session = driver.launch().await?;
//! session.navigate("https://example.com").await?;
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::browser::Session;
use crate::error::{Origin, Result};
use crate::identifiers::{Provenance, SessionId};
use crate::protocol::{self, Call, DriverCommand, NewSession};
use crate::transport::{HttpTransport, Transport};

use super::builder::DriverBuilder;
use super::capabilities::Capabilities;
use super::launcher::{AttachedLauncher, Launcher, ProcessLauncher};

// ============================================================================
// Types
// ============================================================================

/// Where the WebDriver endpoint comes from.
#[derive(Debug, Clone)]
pub(crate) enum Endpoint {
    /// Spawn geckodriver per session.
    Spawn {
        binary: PathBuf,
        host: String,
        port: Option<u16>,
        args: Vec<String>,
    },
    /// Use a driver that is already running.
    Attach(Url),
}

/// Validated driver configuration.
#[derive(Debug, Clone)]
pub(crate) struct DriverConfig {
    pub endpoint: Endpoint,
    pub capabilities: Capabilities,
    pub startup_timeout: Duration,
    pub request_timeout: Duration,
}

// ============================================================================
// Driver
// ============================================================================

/// WebDriver session factory.
///
/// Cheap to clone. Sessions launched from the same driver are independent.
#[derive(Clone)]
pub struct Driver {
    /// Shared configuration.
    pub(crate) inner: Arc<DriverConfig>,
}

// ============================================================================
// Driver - Display
// ============================================================================

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Driver");
        match &self.inner.endpoint {
            Endpoint::Spawn { binary, .. } => s.field("binary", binary),
            Endpoint::Attach(url) => s.field("attach", &url.as_str()),
        };
        s.finish_non_exhaustive()
    }
}

// ============================================================================
// Driver - Public API
// ============================================================================

impl Driver {
    /// Creates a configuration builder for the driver.
    #[inline]
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the capabilities requested for new sessions.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.inner.capabilities
    }

    /// Starts the endpoint and creates a session on it.
    ///
    /// A spawned driver is stopped again when session creation fails.
    ///
    /// # Errors
    ///
    /// - [`Error::ProcessLaunchFailed`](crate::Error::ProcessLaunchFailed) if geckodriver cannot be spawned
    /// - [`Error::ConnectionTimeout`](crate::Error::ConnectionTimeout) if it never announces its address
    /// - [`Error::Protocol`](crate::Error::Protocol) if the remote end rejects the capabilities
    #[track_caller]
    pub fn launch(&self) -> impl Future<Output = Result<Session>> + Send {
        let context = Provenance::here();
        async move {
            let launcher = self.start_endpoint().await?;
            let transport = Arc::new(HttpTransport::with_timeout(
                launcher.base_url().clone(),
                self.inner.request_timeout,
            )?);

            open_session(transport, launcher, &self.inner.capabilities, context).await
        }
    }
}

// ============================================================================
// Driver - Internal
// ============================================================================

impl Driver {
    pub(crate) fn new(config: DriverConfig) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    async fn start_endpoint(&self) -> Result<Arc<dyn Launcher>> {
        match &self.inner.endpoint {
            Endpoint::Spawn {
                binary,
                host,
                port,
                args,
            } => {
                debug!(binary = %binary.display(), "Spawning driver");
                let launcher = ProcessLauncher::launch(
                    binary,
                    host,
                    *port,
                    args,
                    self.inner.startup_timeout,
                )
                .await?;
                Ok(Arc::new(launcher))
            }
            Endpoint::Attach(url) => {
                debug!(url = %url, "Attaching to driver");
                Ok(Arc::new(AttachedLauncher::new(url.clone())))
            }
        }
    }
}

/// Sends the new session command and wraps the reply.
pub(crate) async fn open_session(
    transport: Arc<dyn Transport>,
    launcher: Arc<dyn Launcher>,
    capabilities: &Capabilities,
    context: Provenance,
) -> Result<Session> {
    let request = DriverCommand::NewSession {
        capabilities: capabilities.to_json(),
    }
    .request();
    let call = Call::new(Origin::Driver, context);

    let created = match transport.send(&request).await {
        Ok(raw) => protocol::interpret(&raw, &request, &call)
            .and_then(|value| Ok(serde_json::from_value::<NewSession>(value)?)),
        Err(e) => Err(e),
    };

    let created = match created {
        Ok(created) => created,
        Err(e) => {
            warn!(error = %e, "Session creation failed, stopping driver");
            if let Err(stop) = launcher.stop().await {
                debug!(error = %stop, "Failed to stop driver");
            }
            return Err(e);
        }
    };

    info!(session_id = %created.session_id, url = %launcher.base_url(), "Session created");
    Ok(Session::new(
        SessionId::new(created.session_id),
        context,
        transport,
        launcher,
    ))
}

// ============================================================================
// Tests
// ============================================================================
