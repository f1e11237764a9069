//! Driver endpoint and session creation.
//!
//! This module provides the main entry point for browser automation.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Factory for creating sessions |
//! | [`DriverBuilder`] | Fluent configuration builder |
//! | [`Capabilities`] | Requested session capabilities |
//! | [`FirefoxOptions`] | Browser launch options |
//! | [`Launcher`] | Running driver endpoint |
//!
//! # Example
//!
//! ```no_run
//! use remote_webdriver::{Driver, Result};
//!
//! # async fn example() -> Result<()> {
//! let session = Driver::builder()
//!     .attach("http://127.0.0.1:4444")
//!     .build()?
//!     .launch()
//!     .await?;
//!
//! session.navigate("https://example.com").await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for driver configuration.
pub mod builder;

/// Session capabilities.
pub mod capabilities;

/// Core driver implementation.
pub mod core;

/// Driver process and endpoint management.
pub mod launcher;

/// Firefox browser options and preferences.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::DriverBuilder;
pub use capabilities::{Capabilities, PageLoadStrategy};
pub use core::Driver;
pub use launcher::{AttachedLauncher, Launcher, ProcessLauncher};
pub use options::{FirefoxOptions, Profile};
