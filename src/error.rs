//! Error types for the WebDriver client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use remote_webdriver::{By, Result};
//!
//! async fn example(window: &Window) -> Result<()> {
//!     let element = window.find_element(By::id().equals("submit")).await?;
//!     element.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::DriverNotFound`] |
//! | Driver process | [`Error::ProcessLaunchFailed`], [`Error::Connection`], [`Error::ConnectionTimeout`] |
//! | Locator algebra | [`Error::Locator`] |
//! | Remote end | [`Error::Protocol`] |
//! | Waiting | [`Error::WaitTimeout`] |
//! | Wire shape | [`Error::BadResponse`] |
//! | External | [`Error::Http`], [`Error::Json`], [`Error::Io`], [`Error::Url`], [`Error::Base64`] |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::io::Error as IoError;
use std::path::PathBuf;
use std::result::Result as StdResult;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::identifiers::{ElementId, Provenance, SessionId, WindowHandle};
use crate::locator::Query;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when driver configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Driver binary not found at path.
    #[error("Driver binary not found at: {path}")]
    DriverNotFound {
        /// Path where the driver was expected.
        path: PathBuf,
    },

    // ========================================================================
    // Driver Process Errors
    // ========================================================================
    /// Failed to launch the driver process.
    #[error("Failed to launch driver: {message}")]
    ProcessLaunchFailed {
        /// Description of the launch failure.
        message: String,
    },

    /// The driver endpoint could not be reached or never announced itself.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// The driver did not report its listening address in time.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Locator Errors
    // ========================================================================
    /// A locator expression cannot be compiled.
    ///
    /// Raised synchronously, before anything is sent over the wire.
    #[error("Invalid locator: {0}")]
    Locator(#[from] LocatorError),

    // ========================================================================
    // Remote End Errors
    // ========================================================================
    /// The remote end answered with a WebDriver error.
    #[error("{0}")]
    Protocol(Box<ProtocolError>),

    /// A wait condition did not hold before its deadline.
    #[error("{0}")]
    WaitTimeout(Box<WaitTimeout>),

    /// The remote end answered with a shape that is neither success nor a
    /// documented error body.
    #[error("Bad response (HTTP {status}): {body}")]
    BadResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body, lossily decoded.
        body: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Base64 decode error.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

// ============================================================================
// LocatorError
// ============================================================================

/// Reasons a locator expression has no single CSS or XPath rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// Two different tag names are required of the same element.
    #[error("an element cannot be both <{first}> and <{second}>")]
    TagContradiction {
        /// First tag encountered.
        first: String,
        /// Conflicting tag.
        second: String,
    },

    /// A negation ranges over an expression that fixes a tag name.
    #[error("cannot negate an expression that fixes the tag <{tag}>")]
    NegatedTag {
        /// The tag under negation.
        tag: String,
    },

    /// An attribute, function or tag name that is not a plain identifier
    /// and would not survive being spliced into a selector.
    #[error("invalid {kind} name \"{name}\"")]
    InvalidName {
        /// `attribute`, `function` or `tag`.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Link text locators only work on their own.
    #[error("link text \"{text}\" cannot be combined with other locators")]
    LinkTextNotComposable {
        /// The link text.
        text: String,
    },
}

// ============================================================================
// ErrorCode
// ============================================================================

/// Error codes defined by the W3C WebDriver protocol.
///
/// Codes the client does not know are preserved in [`ErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ElementClickIntercepted,
    ElementNotInteractable,
    InsecureCertificate,
    InvalidArgument,
    InvalidCookieDomain,
    InvalidElementState,
    InvalidSelector,
    InvalidSessionId,
    JavascriptError,
    MoveTargetOutOfBounds,
    NoSuchAlert,
    NoSuchCookie,
    NoSuchElement,
    NoSuchFrame,
    NoSuchWindow,
    NoSuchShadowRoot,
    ScriptTimeout,
    SessionNotCreated,
    StaleElementReference,
    DetachedShadowRoot,
    Timeout,
    UnableToSetCookie,
    UnableToCaptureScreen,
    UnexpectedAlertOpen,
    UnknownCommand,
    UnknownError,
    UnknownMethod,
    UnsupportedOperation,
    /// A code outside the protocol's table, kept verbatim.
    Unknown(String),
}

const KNOWN_CODES: &[(&str, ErrorCode)] = &[
    ("element click intercepted", ErrorCode::ElementClickIntercepted),
    ("element not interactable", ErrorCode::ElementNotInteractable),
    ("insecure certificate", ErrorCode::InsecureCertificate),
    ("invalid argument", ErrorCode::InvalidArgument),
    ("invalid cookie domain", ErrorCode::InvalidCookieDomain),
    ("invalid element state", ErrorCode::InvalidElementState),
    ("invalid selector", ErrorCode::InvalidSelector),
    ("invalid session id", ErrorCode::InvalidSessionId),
    ("javascript error", ErrorCode::JavascriptError),
    ("move target out of bounds", ErrorCode::MoveTargetOutOfBounds),
    ("no such alert", ErrorCode::NoSuchAlert),
    ("no such cookie", ErrorCode::NoSuchCookie),
    ("no such element", ErrorCode::NoSuchElement),
    ("no such frame", ErrorCode::NoSuchFrame),
    ("no such window", ErrorCode::NoSuchWindow),
    ("no such shadow root", ErrorCode::NoSuchShadowRoot),
    ("script timeout", ErrorCode::ScriptTimeout),
    ("session not created", ErrorCode::SessionNotCreated),
    ("stale element reference", ErrorCode::StaleElementReference),
    ("detached shadow root", ErrorCode::DetachedShadowRoot),
    ("timeout", ErrorCode::Timeout),
    ("unable to set cookie", ErrorCode::UnableToSetCookie),
    ("unable to capture screen", ErrorCode::UnableToCaptureScreen),
    ("unexpected alert open", ErrorCode::UnexpectedAlertOpen),
    ("unknown command", ErrorCode::UnknownCommand),
    ("unknown error", ErrorCode::UnknownError),
    ("unknown method", ErrorCode::UnknownMethod),
    ("unsupported operation", ErrorCode::UnsupportedOperation),
];

impl ErrorCode {
    /// Decodes the `error` field of a WebDriver error body.
    #[must_use]
    pub fn from_wire(code: &str) -> Self {
        KNOWN_CODES
            .iter()
            .find(|(wire, _)| *wire == code)
            .map(|(_, known)| known.clone())
            .unwrap_or_else(|| Self::Unknown(code.to_string()))
    }

    /// Returns the wire string of this code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        if let Self::Unknown(code) = self {
            return code;
        }
        KNOWN_CODES
            .iter()
            .find(|(_, known)| known == self)
            .map_or("unknown error", |(wire, _)| wire)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Origin
// ============================================================================

/// The addressable entity a failed request was issued on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Issued before any session existed.
    Driver,
    /// Issued by a session.
    Session(SessionId),
    /// Issued by a window.
    Window {
        session: SessionId,
        window: WindowHandle,
    },
    /// Issued by an element.
    Element {
        session: SessionId,
        window: WindowHandle,
        element: ElementId,
    },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver => f.write_str("driver"),
            Self::Session(session) => write!(f, "session {session}"),
            Self::Window { session, window } => write!(f, "window {window} (session {session})"),
            Self::Element {
                session,
                window,
                element,
            } => write!(
                f,
                "element {element} in window {window} (session {session})"
            ),
        }
    }
}

// ============================================================================
// ProtocolError
// ============================================================================

/// A WebDriver error reported by the remote end.
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// Decoded error code.
    pub code: ErrorCode,
    /// HTTP status the error arrived with.
    pub status: u16,
    /// Server-supplied message.
    pub message: String,
    /// Server-supplied stack trace, if any.
    pub stack_trace: Option<String>,
    /// Extra data attached by the server.
    pub data: Option<Value>,
    /// Where in the caller's code the failing operation was started.
    pub context: Provenance,
    /// Entity the request was issued for.
    pub origin: Origin,
    /// Name of the command that failed.
    pub invoker: &'static str,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WebDriver error: {} (HTTP {})", self.code, self.status)?;
        writeln!(f, "  message: {}", self.message)?;
        writeln!(f, "  command: {}", self.invoker)?;
        writeln!(f, "  origin:  {}", self.origin)?;
        write!(f, "  called from: {}", self.context)?;
        if let Some(data) = &self.data {
            write!(f, "\n  data: {data}")?;
        }
        if let Some(trace) = self.stack_trace.as_deref().filter(|t| !t.is_empty()) {
            write!(f, "\n  stack trace:")?;
            for line in trace.lines() {
                write!(f, "\n    {line}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

// ============================================================================
// WaitTimeout
// ============================================================================

/// A wait whose condition never held before the deadline.
#[derive(Debug, Clone)]
pub struct WaitTimeout {
    /// What was being waited for.
    pub condition: String,
    /// Total time budget.
    pub duration: Duration,
    /// Compiled query of element waits.
    pub query: Option<Query>,
    /// Page source captured after the deadline, when it could be fetched.
    pub snapshot: Option<String>,
    /// Where the wait was started.
    pub context: Provenance,
}

impl fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(
                f,
                "Waiting for {} ({query}) timed out ({:?})",
                self.condition, self.duration
            )?,
            None => write!(
                f,
                "Waiting for {} timed out ({:?})",
                self.condition, self.duration
            )?,
        }
        write!(f, "\n  called from: {}", self.context)
    }
}

impl std::error::Error for WaitTimeout {}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a driver not found error.
    #[inline]
    pub fn driver_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DriverNotFound { path: path.into() }
    }

    /// Creates a process launch failed error.
    #[inline]
    pub fn process_launch_failed(err: IoError) -> Self {
        Self::ProcessLaunchFailed {
            message: err.to_string(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a bad response error.
    #[inline]
    pub fn bad_response(status: u16, body: &[u8]) -> Self {
        Self::BadResponse {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Wraps a protocol error.
    #[inline]
    pub fn protocol(err: ProtocolError) -> Self {
        Self::Protocol(Box::new(err))
    }

    /// Wraps a wait timeout.
    #[inline]
    pub fn wait_timeout(err: WaitTimeout) -> Self {
        Self::WaitTimeout(Box::new(err))
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns the protocol error code, if the remote end reported one.
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Protocol(err) => Some(&err.code),
            _ => None,
        }
    }

    /// Returns `true` if this is a timeout of any kind.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectionTimeout { .. } | Self::WaitTimeout(_))
            || matches!(
                self.code(),
                Some(ErrorCode::Timeout | ErrorCode::ScriptTimeout)
            )
    }

    /// Returns `true` if the remote end found no matching element.
    #[inline]
    #[must_use]
    pub fn is_no_such_element(&self) -> bool {
        matches!(self.code(), Some(ErrorCode::NoSuchElement))
    }

    /// Returns `true` if an element or window reference is no longer valid.
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(
            self.code(),
            Some(ErrorCode::StaleElementReference | ErrorCode::NoSuchWindow)
        )
    }

    /// Returns `true` if a wait loop may poll again after this error.
    #[inline]
    #[must_use]
    pub fn is_retryable_during_wait(&self) -> bool {
        self.is_no_such_element()
    }
}

// ============================================================================
// Tests
// ============================================================================
