//! Core Window struct and the first-responder switch.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::browser::Session;
use crate::error::{Origin, Result};
use crate::identifiers::{Identity, Provenance, WindowHandle};
use crate::protocol::{Call, Command, WindowKind};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a window.
pub(crate) struct WindowInner {
    /// Window handle and where the reference was obtained.
    identity: Identity<WindowHandle>,
    /// Tab or window, when the remote end said so.
    kind: Option<WindowKind>,
    /// Owning session.
    session: Session,
}

// ============================================================================
// Window
// ============================================================================

/// A handle to a top-level browsing context.
///
/// Cheap to clone. Two windows are equal when their handles are.
///
/// # Concurrency
///
/// Each operation sends the switch to this window and then its own request.
/// The pair is not atomic: when several tasks drive windows of the same
/// session at once, another task's switch can land between the two, and the
/// request then runs against that other window. Drive one session from one
/// task at a time when windows differ.
///
/// A closed window stays a valid value; every further operation fails with
/// `no such window`.
#[derive(Clone)]
pub struct Window {
    pub(crate) inner: Arc<WindowInner>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("handle", self.handle())
            .field("kind", &self.inner.kind)
            .field("session_id", self.inner.session.id())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        self.inner.identity == other.inner.identity
    }
}

impl Eq for Window {}

impl Window {
    /// Creates a window handle.
    pub(crate) fn new(
        handle: WindowHandle,
        kind: Option<WindowKind>,
        session: Session,
        creation: Provenance,
    ) -> Self {
        Self {
            inner: Arc::new(WindowInner {
                identity: Identity::new(handle, creation),
                kind,
                session,
            }),
        }
    }
}

// ============================================================================
// Window - Accessors
// ============================================================================

impl Window {
    /// Returns the window handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &WindowHandle {
        self.inner.identity.id()
    }

    /// Returns the window identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity<WindowHandle> {
        &self.inner.identity
    }

    /// Returns whether this is a tab or a window, when known.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<WindowKind> {
        self.inner.kind
    }

    /// Returns the owning session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }
}

// ============================================================================
// Window - Internal
// ============================================================================

impl Window {
    pub(crate) fn call(&self, context: Provenance) -> Call {
        Call::new(
            Origin::Window {
                session: self.inner.session.id().clone(),
                window: self.handle().clone(),
            },
            context,
        )
    }

    /// Makes this window current on the remote end.
    async fn switch(&self, call: &Call) -> Result<()> {
        debug!(window = %self.handle(), "Switching to window");
        self.inner
            .session
            .send(
                Command::SwitchToWindow {
                    handle: self.handle().clone(),
                },
                call,
            )
            .await?;
        Ok(())
    }

    /// Switches to this window, then sends `command`.
    pub(crate) async fn act(&self, command: Command, call: &Call) -> Result<Value> {
        self.switch(call).await?;
        self.inner.session.send(command, call).await
    }

    pub(crate) async fn act_unit(&self, command: Command, context: Provenance) -> Result<()> {
        self.act(command, &self.call(context)).await?;
        Ok(())
    }

    pub(crate) async fn act_as<T: DeserializeOwned>(
        &self,
        command: Command,
        context: Provenance,
    ) -> Result<T> {
        let value = self.act(command, &self.call(context)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

// ============================================================================
// Window - First Responder
// ============================================================================

impl Window {
    /// Makes this window the session's current window.
    ///
    /// Always sends the switch; no local notion of the current window is
    /// kept, since the user or another client may change it at any time.
    #[track_caller]
    pub fn become_first_responder(&self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move { self.switch(&self.call(context)).await }
    }

    /// Closes this window.
    ///
    /// Closing the last window ends the session on the remote end.
    #[track_caller]
    pub fn close(&self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), "Closing window");
            let remaining: Vec<WindowHandle> =
                self.act_as(Command::CloseWindow, context).await?;
            debug!(window = %self.handle(), remaining = remaining.len(), "Window closed");
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
