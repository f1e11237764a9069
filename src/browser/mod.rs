//! Browser entities module.
//!
//! This module provides the addressable entities of a WebDriver session:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | Remote session (owns transport + driver launcher) |
//! | [`Window`] | Top-level browsing context (tab or window) |
//! | [`Element`] | DOM element reference |
//!
//! Every entity carries its server-assigned id, the call site it was
//! obtained at, and a handle to its parent.
//!
//! # Example
//!
//! ```no_run
//! use remote_webdriver::{By, Driver, HtmlTag, Result};
//!
//! # async fn example() -> Result<()> {
//! let session = Driver::builder()
//!     .binary("/usr/bin/geckodriver")
//!     .build()?
//!     .launch()
//!     .await?;
//!
//! let window = session.window().await?;
//! window.navigate("https://example.com").await?;
//!
//! let heading = window.find_element(By::tag(HtmlTag::H1)).await?;
//! let text = heading.text().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// DOM element interaction.
pub mod element;

/// Keyboard key definitions.
pub mod keyboard;

/// Script arguments.
pub mod script;

/// Session lifecycle and driver state.
pub mod session;

/// Polling wait engine.
pub mod wait;

/// Top-level browsing contexts.
pub mod window;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::Element;
pub use keyboard::Key;
pub use script::Script;
pub use session::Session;
pub use wait::{DocumentCondition, ElementCondition, WaitOptions};
pub use window::Window;
