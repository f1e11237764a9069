//! WebDriver session, the root addressable entity.
//!
//! A [`Session`] owns the transport to the driver and the launcher that
//! started it. Windows and elements keep a clone of their session and send
//! every request through it.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::driver::Launcher;
use crate::error::{Origin, Result};
use crate::identifiers::{Identity, Provenance, SessionId, WindowHandle};
use crate::protocol::{
    self, Call, Command, DriverCommand, NewWindow, Request, Status, Timeouts, WindowKind,
};
use crate::transport::Transport;

use super::Window;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// Server-assigned id and where the session was started.
    identity: Identity<SessionId>,
    /// Shared, read-only transport to the driver.
    transport: Arc<dyn Transport>,
    /// Stopped when the session closes.
    launcher: Arc<dyn Launcher>,
}

// ============================================================================
// Session
// ============================================================================

/// A live WebDriver session.
///
/// Cheap to clone; all clones address the same remote session. Two sessions
/// are equal when their ids are.
///
/// # Example
///
/// ```no_run
/// # use remote_webdriver::{Driver, Result};
/// # async fn example() -> Result<()> {
/// let session = Driver::builder().binary("/usr/bin/geckodriver").build()?.launch().await?;
///
/// session.navigate("https://example.com").await?;
/// println!("{}", session.title().await?);
///
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    pub(crate) inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", self.id())
            .field("base_url", &self.inner.launcher.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.inner.identity == other.inner.identity
    }
}

impl Eq for Session {}

impl Session {
    /// Creates a session handle.
    pub(crate) fn new(
        id: SessionId,
        creation: Provenance,
        transport: Arc<dyn Transport>,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                identity: Identity::new(id, creation),
                transport,
                launcher,
            }),
        }
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Returns the session id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &SessionId {
        self.inner.identity.id()
    }

    /// Returns the session identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity<SessionId> {
        &self.inner.identity
    }
}

// ============================================================================
// Session - Internal
// ============================================================================

impl Session {
    /// Sends a session-scoped command.
    pub(crate) async fn send(&self, command: Command, call: &Call) -> Result<Value> {
        let request = command.request(self.id());
        self.dispatch(&request, call).await
    }

    /// Sends a request and classifies the reply.
    pub(crate) async fn dispatch(&self, request: &Request, call: &Call) -> Result<Value> {
        let raw = self.inner.transport.send(request).await?;
        protocol::interpret(&raw, request, call)
    }

    fn call(&self, context: Provenance) -> Call {
        Call::new(Origin::Session(self.id().clone()), context)
    }

    fn window_ref(
        &self,
        handle: WindowHandle,
        kind: Option<WindowKind>,
        creation: Provenance,
    ) -> Window {
        Window::new(handle, kind, self.clone(), creation)
    }

    async fn send_unit(&self, command: Command, context: Provenance) -> Result<()> {
        self.send(command, &self.call(context)).await?;
        Ok(())
    }

    async fn send_string(&self, command: Command, context: Provenance) -> Result<String> {
        let value = self.send(command, &self.call(context)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

// ============================================================================
// Session - Driver State
// ============================================================================

impl Session {
    /// Queries whether the driver can create new sessions.
    pub async fn status(&self) -> Result<Status> {
        let request = DriverCommand::Status.request();
        let value = self
            .dispatch(&request, &self.call(Provenance::unavailable()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the session timeouts.
    pub async fn timeouts(&self) -> Result<Timeouts> {
        let value = self
            .send(Command::GetTimeouts, &self.call(Provenance::unavailable()))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Updates the session timeouts. Fields left `None` keep their value.
    #[track_caller]
    pub fn set_timeouts(&self, timeouts: Timeouts) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(session_id = %self.id(), ?timeouts, "Setting timeouts");
            self.send_unit(Command::SetTimeouts(timeouts), context).await
        }
    }
}

// ============================================================================
// Session - Navigation
// ============================================================================

impl Session {
    /// Navigates the current window to `url`.
    #[track_caller]
    pub fn navigate(&self, url: impl Into<String>) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        let url = url.into();
        async move {
            debug!(session_id = %self.id(), %url, "Navigating");
            self.send_unit(Command::NavigateTo { url }, context).await
        }
    }

    /// Returns the URL of the current window.
    pub async fn url(&self) -> Result<String> {
        self.send_string(Command::GetCurrentUrl, Provenance::unavailable())
            .await
    }

    /// Returns the title of the current window.
    pub async fn title(&self) -> Result<String> {
        self.send_string(Command::GetTitle, Provenance::unavailable())
            .await
    }

    /// Goes back in the history of the current window.
    #[track_caller]
    pub fn back(&self) -> impl Future<Output = Result<()>> + Send {
        self.send_unit(Command::Back, Provenance::here())
    }

    /// Goes forward in the history of the current window.
    #[track_caller]
    pub fn forward(&self) -> impl Future<Output = Result<()>> + Send {
        self.send_unit(Command::Forward, Provenance::here())
    }

    /// Reloads the current window.
    #[track_caller]
    pub fn refresh(&self) -> impl Future<Output = Result<()>> + Send {
        self.send_unit(Command::Refresh, Provenance::here())
    }
}

// ============================================================================
// Session - Windows
// ============================================================================

impl Session {
    /// Returns the window the driver currently considers current.
    #[track_caller]
    pub fn window(&self) -> impl Future<Output = Result<Window>> + Send {
        let context = Provenance::here();
        async move {
            let handle = self.send_string(Command::GetWindowHandle, context).await?;
            Ok(self.window_ref(WindowHandle::new(handle), None, context))
        }
    }

    /// Returns every open top-level window.
    #[track_caller]
    pub fn windows(&self) -> impl Future<Output = Result<Vec<Window>>> + Send {
        let context = Provenance::here();
        async move {
            let value = self
                .send(Command::GetWindowHandles, &self.call(context))
                .await?;
            let handles: Vec<WindowHandle> = serde_json::from_value(value)?;
            Ok(handles
                .into_iter()
                .map(|handle| self.window_ref(handle, None, context))
                .collect())
        }
    }

    /// Opens a new tab or window. The current window does not change.
    #[track_caller]
    pub fn new_window(&self, kind: WindowKind) -> impl Future<Output = Result<Window>> + Send {
        let context = Provenance::here();
        async move {
            let value = self
                .send(Command::NewWindow { kind }, &self.call(context))
                .await?;
            let created: NewWindow = serde_json::from_value(value)?;
            debug!(session_id = %self.id(), window = %created.handle, ?kind, "Opened window");
            Ok(self.window_ref(created.handle, created.kind.or(Some(kind)), context))
        }
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Deletes the remote session and stops the driver.
    ///
    /// The driver is stopped even when the delete request fails; the delete
    /// error is returned in that case.
    #[track_caller]
    pub fn close(self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            info!(session_id = %self.id(), "Closing session");
            let deleted = self.send_unit(Command::DeleteSession, context).await;
            if let Err(e) = &deleted {
                warn!(session_id = %self.id(), error = %e, "Delete session failed");
            }
            self.inner.launcher.stop().await?;
            deleted
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::{Error, ErrorCode};
    use crate::identifiers::WindowHandle;
    use crate::protocol::{Method, Timeouts, WindowKind};
    use crate::transport::mock::{self, MockTransport};

    #[test]
    fn test_sessions_compare_by_id() {
        let a = mock::session(MockTransport::new());
        let b = mock::session(MockTransport::new());
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_navigate() {
        let transport = MockTransport::new();
        let session = mock::session(transport.clone());

        session.navigate("https://example.com").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/session/s1/url");
        assert_eq!(requests[0].body, Some(json!({"url": "https://example.com"})));
    }

    #[tokio::test]
    async fn test_title() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/title", json!("Example Domain"));
        let session = mock::session(transport);

        assert_eq!(session.title().await.unwrap(), "Example Domain");
    }

    #[tokio::test]
    async fn test_status_is_not_session_scoped() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/status", json!({"ready": true, "message": "ok"}));
        let session = mock::session(transport.clone());

        let status = session.status().await.unwrap();
        assert!(status.ready);
        assert_eq!(transport.calls(), vec!["GET /status"]);
    }

    #[tokio::test]
    async fn test_timeouts_round_trip() {
        let transport = MockTransport::new();
        transport.ok(
            Method::Get,
            "/session/s1/timeouts",
            json!({"script": null, "pageLoad": 300000, "implicit": 0}),
        );
        let session = mock::session(transport.clone());

        let timeouts = session.timeouts().await.unwrap();
        assert_eq!(timeouts.script, None);
        assert_eq!(timeouts.page_load, Some(300_000));

        session
            .set_timeouts(Timeouts {
                implicit: Some(500),
                ..Timeouts::default()
            })
            .await
            .unwrap();
        let set = transport.requests().pop().unwrap();
        assert_eq!(set.method, Method::Post);
        assert_eq!(set.body, Some(json!({"implicit": 500})));
    }

    #[tokio::test]
    async fn test_windows() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window/handles", json!(["w1", "w2"]));
        let session = mock::session(transport);

        let windows = session.windows().await.unwrap();
        let handles: Vec<_> = windows.iter().map(|w| w.handle().clone()).collect();
        assert_eq!(handles, vec![WindowHandle::new("w1"), WindowHandle::new("w2")]);
    }

    #[tokio::test]
    async fn test_new_window() {
        let transport = MockTransport::new();
        transport.ok(
            Method::Post,
            "/session/s1/window/new",
            json!({"handle": "w9", "type": "tab"}),
        );
        let session = mock::session(transport.clone());

        let window = session.new_window(WindowKind::Tab).await.unwrap();
        assert_eq!(window.handle(), &WindowHandle::new("w9"));
        assert_eq!(window.kind(), Some(WindowKind::Tab));
        assert_eq!(transport.requests()[0].body, Some(json!({"type": "tab"})));
    }

    #[tokio::test]
    async fn test_close_deletes_session() {
        let transport = MockTransport::new();
        let session = mock::session(transport.clone());

        session.close().await.unwrap();
        assert_eq!(transport.calls(), vec!["DELETE /session/s1"]);
    }

    #[tokio::test]
    async fn test_close_reports_delete_failure() {
        let transport = MockTransport::new();
        transport.fail(Method::Delete, "/session/s1", 404, "invalid session id");
        let session = mock::session(transport);

        let err = session.close().await.unwrap_err();
        assert_eq!(err.code(), Some(&ErrorCode::InvalidSessionId));
        assert!(matches!(err, Error::Protocol(_)));
    }
}
