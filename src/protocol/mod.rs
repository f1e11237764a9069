//! W3C WebDriver wire protocol.
//!
//! Requests are JSON over HTTP against paths rooted at the driver's base
//! URL. Success is HTTP 200 with `{"value": ...}`; failure is 4xx/5xx with
//! `{"value": {"error", "message", "stacktrace", "data"}}`.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Endpoint table: method, path and body per command |
//! | `request` | Request type and response classification |
//! | `types` | Wire structs shared by several commands |

// ============================================================================
// Submodules
// ============================================================================

/// Endpoint table.
pub mod command;

/// Request and response handling.
pub mod request;

/// Shared wire structs.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Command, DriverCommand, Method, element_argument};
pub use request::{Call, RawResponse, Request, interpret};
pub use types::{
    Cookie, ELEMENT_KEY, ElementRef, Margins, NewSession, NewWindow, PageOrientation, PageSize,
    PrintOptions, ReadyState, Rect, SameSite, Status, Timeouts, WindowKind,
};
