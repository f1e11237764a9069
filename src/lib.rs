//! Remote WebDriver - typed client for the W3C WebDriver protocol.
//!
//! This library drives a WebDriver endpoint (geckodriver) over JSON and
//! HTTP. It exposes a composable locator algebra, addressable entities
//! for sessions, windows and elements, and a polling wait engine.
//!
//! # Architecture
//!
//! - **Locators**: predicates combine with `&`, `|` and `!` and compile to a
//!   single CSS selector or XPath expression before anything is sent
//! - **Entities**: [`Session`] → [`Window`] → [`Element`]; each operation
//!   makes its window current on the remote end, then sends its request
//! - **Waits**: bounded polling that retries only `no such element`
//! - **Errors**: remote failures decode into [`ErrorCode`] with the HTTP
//!   status, message, stack trace, originating entity and call site
//!
//! # Quick Start
//!
//! ```no_run
//! use remote_webdriver::{By, Driver, FirefoxOptions, HtmlTag, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = Driver::builder()
//!         .binary("/usr/bin/geckodriver")
//!         .firefox(FirefoxOptions::headless())
//!         .build()?
//!         .launch()
//!         .await?;
//!
//!     let window = session.window().await?;
//!     window.navigate("https://example.com").await?;
//!
//!     let link = window
//!         .find_element(By::tag(HtmlTag::A) & By::href().contains("iana"))
//!         .await?;
//!     println!("Link: {}", link.text().await?);
//!
//!     session.close().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Entities: [`Session`], [`Window`], [`Element`]; waits |
//! | [`driver`] | Driver factory, launchers and capabilities |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers and call-site provenance |
//! | [`locator`] | Locator algebra and compiler |
//! | [`protocol`] | WebDriver endpoint table and wire types |
//! | [`transport`] | HTTP transport |

// ============================================================================
// Modules
// ============================================================================

/// Browser entities: Session, Window, Element.
///
/// - [`Session`] - Remote session, owns transport and launcher
/// - [`Window`] - Top-level browsing context
/// - [`Element`] - DOM element reference
pub mod browser;

/// Driver factory and configuration.
///
/// Use [`Driver::builder()`] to create a configured driver instance.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for browser entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Locator algebra.
///
/// Build expressions with [`By`]; they compile to a wire [`Query`].
pub mod locator;

/// WebDriver protocol types.
///
/// Endpoint table and JSON structures shared by commands.
pub mod protocol;

/// HTTP transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{
    DocumentCondition, Element, ElementCondition, Key, Script, Session, WaitOptions, Window,
};

// Driver types
pub use driver::{
    AttachedLauncher, Capabilities, Driver, DriverBuilder, FirefoxOptions, Launcher,
    PageLoadStrategy, ProcessLauncher,
};

// Error types
pub use error::{Error, ErrorCode, LocatorError, Origin, ProtocolError, Result, WaitTimeout};

// Identifier types
pub use identifiers::{ElementId, Identity, Provenance, SessionId, WindowHandle};

// Locator types
pub use locator::{By, HtmlTag, IntoQuery, LocatorExpression, Query, Strategy};

// Protocol types
pub use protocol::{
    Cookie, Margins, PageOrientation, PageSize, PrintOptions, ReadyState, Rect, SameSite, Status,
    Timeouts, WindowKind,
};
