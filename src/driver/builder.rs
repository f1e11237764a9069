//! Builder pattern for driver configuration.
//!
//! Provides a fluent API for configuring and creating [`Driver`] instances.
//!
//! # Example
//!
//! ```no_run
//! use remote_webdriver::{Driver, FirefoxOptions};
//!
//! # fn example() -> remote_webdriver::Result<()> {
//! let driver = Driver::builder()
//!     .binary("/usr/bin/geckodriver")
//!     .firefox(FirefoxOptions::headless())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

use super::capabilities::Capabilities;
use super::core::{Driver, DriverConfig, Endpoint};
use super::options::FirefoxOptions;

// ============================================================================
// Constants
// ============================================================================

/// Default host the spawned driver listens on.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Where geckodriver listens when started by hand without flags.
pub const DEFAULT_ATTACH_URL: &str = "http://127.0.0.1:4444";

/// Default time a spawned driver gets to announce its address.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a single HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ============================================================================
// DriverBuilder
// ============================================================================

/// Builder for configuring a [`Driver`] instance.
///
/// Use [`Driver::builder()`] to create a new builder. Exactly one of
/// [`binary`](Self::binary) and [`attach`](Self::attach) must be set.
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    /// Path to the geckodriver binary.
    binary: Option<PathBuf>,
    /// URL of an already running driver.
    attach: Option<String>,
    host: String,
    port: Option<u16>,
    driver_args: Vec<String>,
    capabilities: Capabilities,
    startup_timeout: Duration,
    request_timeout: Duration,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self {
            binary: None,
            attach: None,
            host: DEFAULT_HOST.to_string(),
            port: None,
            driver_args: Vec::new(),
            capabilities: Capabilities::firefox(),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// ============================================================================
// DriverBuilder Implementation
// ============================================================================

impl DriverBuilder {
    /// Creates a new driver builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to the geckodriver executable to spawn.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to geckodriver (e.g., "/usr/bin/geckodriver")
    #[inline]
    #[must_use]
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Uses a driver that is already running at `url`.
    ///
    /// Closing the session leaves that driver running.
    #[inline]
    #[must_use]
    pub fn attach(mut self, url: impl Into<String>) -> Self {
        self.attach = Some(url.into());
        self
    }

    /// Uses a driver running with its default settings on this machine.
    #[inline]
    #[must_use]
    pub fn attach_local(self) -> Self {
        self.attach(DEFAULT_ATTACH_URL)
    }

    /// Sets the host a spawned driver listens on.
    #[inline]
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Pins the port of a spawned driver. Without it a free port is picked
    /// and failed launches are retried on another one.
    #[inline]
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Adds an argument for the driver process (e.g., "--log=trace").
    #[inline]
    #[must_use]
    pub fn driver_arg(mut self, arg: impl Into<String>) -> Self {
        self.driver_args.push(arg.into());
        self
    }

    /// Replaces the requested capabilities.
    #[inline]
    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replaces the Firefox options of the requested capabilities.
    #[inline]
    #[must_use]
    pub fn firefox(mut self, options: FirefoxOptions) -> Self {
        self.capabilities.firefox = options;
        self
    }

    #[inline]
    #[must_use]
    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the driver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if neither or both of binary and attach are set
    /// - [`Error::DriverNotFound`] if the binary path doesn't exist
    /// - [`Error::Url`] if the attach URL doesn't parse
    /// - [`Error::Config`] if the Firefox options are invalid
    pub fn build(self) -> Result<Driver> {
        let endpoint = self.validate_endpoint()?;
        self.validate_timeouts()?;
        self.capabilities.firefox.validate()?;

        Ok(Driver::new(DriverConfig {
            endpoint,
            capabilities: self.capabilities,
            startup_timeout: self.startup_timeout,
            request_timeout: self.request_timeout,
        }))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl DriverBuilder {
    /// Validates the endpoint configuration.
    fn validate_endpoint(&self) -> Result<Endpoint> {
        match (&self.binary, &self.attach) {
            (Some(_), Some(_)) => Err(Error::config(
                "Use either .binary() or .attach(), not both.",
            )),
            (None, None) => Err(Error::config(
                "A driver is required. Use .binary() to spawn geckodriver or .attach() to use a running one.\n\
                 Example: Driver::builder().binary(\"/usr/bin/geckodriver\")",
            )),
            (Some(binary), None) => {
                if !binary.exists() {
                    return Err(Error::driver_not_found(binary));
                }
                Ok(Endpoint::Spawn {
                    binary: binary.clone(),
                    host: self.host.clone(),
                    port: self.port,
                    args: self.driver_args.clone(),
                })
            }
            (None, Some(url)) => Ok(Endpoint::Attach(Url::parse(url)?)),
        }
    }

    /// Validates the timeout configuration.
    fn validate_timeouts(&self) -> Result<()> {
        if self.startup_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(Error::config("Timeouts must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default_builder() {
        let builder = DriverBuilder::new();
        assert!(builder.binary.is_none());
        assert!(builder.attach.is_none());
        assert_eq!(builder.host, DEFAULT_HOST);
        assert_eq!(builder.startup_timeout, DEFAULT_STARTUP_TIMEOUT);
    }

    #[test]
    fn test_binary_sets_path() {
        let builder = DriverBuilder::new().binary("/usr/bin/geckodriver");
        assert_eq!(builder.binary, Some(PathBuf::from("/usr/bin/geckodriver")));
    }

    #[test]
    fn test_build_fails_without_endpoint() {
        let err = DriverBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains(".binary()"));
    }

    #[test]
    fn test_build_fails_with_both_endpoints() {
        let err = DriverBuilder::new()
            .binary("/bin/sh")
            .attach("http://127.0.0.1:4444")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_fails_with_nonexistent_binary() {
        let err = DriverBuilder::new()
            .binary("/nonexistent/geckodriver")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DriverNotFound { .. }));
    }

    #[test]
    fn test_build_fails_with_bad_attach_url() {
        let err = DriverBuilder::new().attach("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_build_fails_with_zero_timeout() {
        let err = DriverBuilder::new()
            .attach("http://127.0.0.1:4444")
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_attach() {
        let driver = DriverBuilder::new()
            .attach("http://127.0.0.1:4444")
            .build()
            .unwrap();
        assert!(format!("{driver:?}").contains("127.0.0.1:4444"));
    }

    #[test]
    fn test_attach_local() {
        let builder = DriverBuilder::new().attach_local();
        assert_eq!(builder.attach.as_deref(), Some(DEFAULT_ATTACH_URL));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_firefox_options_land_in_capabilities() {
        let builder = DriverBuilder::new().firefox(FirefoxOptions::headless());
        assert!(builder.capabilities.firefox.headless);
        assert_eq!(builder.capabilities.browser_name.as_deref(), Some("firefox"));
    }
}
