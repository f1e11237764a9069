//! HTTP transport layer.
//!
//! The core only needs one operation from the network: send a
//! `(method, path, body)` triple to the driver and get back the raw status
//! and body. Classifying that answer happens in
//! [`protocol::interpret`](crate::protocol::interpret), never here.
//!
//! ```text
//! ┌──────────────┐   Request    ┌───────────────┐   HTTP/JSON   ┌─────────────┐
//! │ Session      │─────────────►│ Transport     │──────────────►│ geckodriver │
//! │ Window       │◄─────────────│ (reqwest)     │◄──────────────│             │
//! │ Element      │ RawResponse  └───────────────┘               └─────────────┘
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `http` | [`HttpTransport`] backed by a pooled `reqwest::Client` |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{RawResponse, Request};

// ============================================================================
// Submodules
// ============================================================================

/// reqwest-backed transport.
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpTransport;

// ============================================================================
// Transport
// ============================================================================

/// Sends requests to a driver endpoint.
///
/// Implementations return every HTTP answer as a [`RawResponse`], error
/// statuses included. Only failures to exchange bytes at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the status and body.
    async fn send(&self, request: &Request) -> Result<RawResponse>;
}
