//! Capabilities requested when a session is created.
//!
//! Sent as `{"capabilities": {"alwaysMatch": {...}}}`; only fields that were
//! set appear on the wire.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Map, Value, json};

use crate::protocol::Timeouts;

use super::options::FirefoxOptions;

// ============================================================================
// PageLoadStrategy
// ============================================================================

/// When navigation commands return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLoadStrategy {
    /// After the `load` event.
    Normal,
    /// After `DOMContentLoaded`.
    Eager,
    /// Immediately.
    None,
}

impl PageLoadStrategy {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Eager => "eager",
            Self::None => "none",
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Requested session capabilities.
///
/// # Example
///
/// ```
/// use remote_webdriver::{Capabilities, FirefoxOptions, PageLoadStrategy};
///
/// let caps = Capabilities::firefox()
///     .with_page_load_strategy(PageLoadStrategy::Eager)
///     .with_firefox(FirefoxOptions::headless());
///
/// let body = caps.to_json();
/// assert_eq!(body["capabilities"]["alwaysMatch"]["pageLoadStrategy"], "eager");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capabilities {
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
    pub platform_name: Option<String>,
    pub page_load_strategy: Option<PageLoadStrategy>,
    pub accept_insecure_certs: Option<bool>,
    /// Session timeouts applied at creation.
    pub timeouts: Option<Timeouts>,
    /// Firefox-specific options.
    pub firefox: FirefoxOptions,
}

impl Capabilities {
    /// Empty capabilities; the driver decides everything.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities asking for Firefox.
    #[inline]
    #[must_use]
    pub fn firefox() -> Self {
        Self {
            browser_name: Some("firefox".to_string()),
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_browser_version(mut self, version: impl Into<String>) -> Self {
        self.browser_version = Some(version.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_platform_name(mut self, platform: impl Into<String>) -> Self {
        self.platform_name = Some(platform.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_page_load_strategy(mut self, strategy: PageLoadStrategy) -> Self {
        self.page_load_strategy = Some(strategy);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_accept_insecure_certs(mut self, accept: bool) -> Self {
        self.accept_insecure_certs = Some(accept);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    /// Replaces the Firefox options.
    #[inline]
    #[must_use]
    pub fn with_firefox(mut self, options: FirefoxOptions) -> Self {
        self.firefox = options;
        self
    }

    /// Builds the new session request body.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut always = Map::new();

        if let Some(name) = &self.browser_name {
            always.insert("browserName".into(), json!(name));
        }
        if let Some(version) = &self.browser_version {
            always.insert("browserVersion".into(), json!(version));
        }
        if let Some(platform) = &self.platform_name {
            always.insert("platformName".into(), json!(platform));
        }
        if let Some(strategy) = self.page_load_strategy {
            always.insert("pageLoadStrategy".into(), json!(strategy.as_str()));
        }
        if let Some(accept) = self.accept_insecure_certs {
            always.insert("acceptInsecureCerts".into(), json!(accept));
        }
        if let Some(timeouts) = &self.timeouts {
            always.insert("timeouts".into(), json!(timeouts));
        }

        let firefox = self.firefox.to_json();
        if firefox.as_object().is_some_and(|o| !o.is_empty()) {
            always.insert("moz:firefoxOptions".into(), firefox);
        }

        json!({ "capabilities": { "alwaysMatch": always } })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capabilities() {
        assert_eq!(
            Capabilities::new().to_json(),
            json!({"capabilities": {"alwaysMatch": {}}})
        );
    }

    #[test]
    fn test_full_capabilities() {
        let caps = Capabilities::firefox()
            .with_browser_version("128")
            .with_platform_name("linux")
            .with_page_load_strategy(PageLoadStrategy::None)
            .with_accept_insecure_certs(true)
            .with_timeouts(Timeouts {
                implicit: Some(0),
                ..Default::default()
            })
            .with_firefox(FirefoxOptions::headless());

        assert_eq!(
            caps.to_json(),
            json!({"capabilities": {"alwaysMatch": {
                "browserName": "firefox",
                "browserVersion": "128",
                "platformName": "linux",
                "pageLoadStrategy": "none",
                "acceptInsecureCerts": true,
                "timeouts": {"implicit": 0},
                "moz:firefoxOptions": {"args": ["-headless"]}
            }}})
        );
    }
}
