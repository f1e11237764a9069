//! Firefox launch options sent under `moz:firefoxOptions`.
//!
//! geckodriver starts the browser itself; these options tell it which binary
//! to run, with what arguments and preferences.
//!
//! # Example
//!
//! ```ignore
//! use remote_webdriver::FirefoxOptions;
//!
//! let options = FirefoxOptions::new()
//!     .with_headless()
//!     .with_window_size(1920, 1080)
//!     .with_private();
//!
//! let args = options.to_args();
//! // ["-headless", "--window-size", "1920,1080", "-private"]
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// Profile
// ============================================================================

/// Profile the browser starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// Profile directory on disk (`-profile <path>`).
    Directory(PathBuf),
    /// Named profile from the profile manager (`-P <name>`).
    Named(String),
}

// ============================================================================
// FirefoxOptions
// ============================================================================

/// Firefox process configuration options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirefoxOptions {
    /// Firefox binary; geckodriver picks the system one when unset.
    pub binary: Option<PathBuf>,

    /// Run Firefox without a GUI (headless mode).
    pub headless: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Start a new instance instead of reusing a running one.
    pub new_instance: bool,

    /// Bring the browser window to the foreground.
    pub foreground: bool,

    /// Permanent private browsing mode.
    pub private: bool,

    /// Open a private window next to the normal one.
    pub private_window: bool,

    /// Profile to start with.
    pub profile: Option<Profile>,

    /// URL opened in a new tab on startup.
    pub new_tab: Option<String>,

    /// URL opened in a new window on startup.
    pub new_window: Option<String>,

    /// Preferences written into the profile.
    pub prefs: BTreeMap<String, Value>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl FirefoxOptions {
    /// Creates a new options instance with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options configured for headless mode.
    #[inline]
    #[must_use]
    pub fn headless() -> Self {
        Self {
            headless: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl FirefoxOptions {
    /// Sets the Firefox binary.
    #[inline]
    #[must_use]
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_new_instance(mut self) -> Self {
        self.new_instance = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_foreground(mut self) -> Self {
        self.foreground = true;
        self
    }

    /// Enables permanent private browsing mode.
    #[inline]
    #[must_use]
    pub fn with_private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Opens an extra private window on startup.
    #[inline]
    #[must_use]
    pub fn with_private_window(mut self) -> Self {
        self.private_window = true;
        self
    }

    /// Starts from the profile directory at `path`.
    #[inline]
    #[must_use]
    pub fn with_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile = Some(Profile::Directory(path.into()));
        self
    }

    /// Starts from a named profile.
    #[inline]
    #[must_use]
    pub fn with_named_profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(Profile::Named(name.into()));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_new_tab(mut self, url: impl Into<String>) -> Self {
        self.new_tab = Some(url.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_new_window(mut self, url: impl Into<String>) -> Self {
        self.new_window = Some(url.into());
        self
    }

    /// Sets a profile preference.
    #[inline]
    #[must_use]
    pub fn with_pref(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.prefs.insert(name.into(), value.into());
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl FirefoxOptions {
    /// Converts options to Firefox command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(8 + self.extra_args.len());

        if self.new_instance {
            args.push("-new-instance".to_string());
        }

        match &self.profile {
            Some(Profile::Directory(path)) => {
                args.push("-profile".to_string());
                args.push(path.display().to_string());
            }
            Some(Profile::Named(name)) => {
                args.push("-P".to_string());
                args.push(name.clone());
            }
            None => {}
        }

        if self.foreground {
            args.push("-foreground".to_string());
        }

        if self.headless {
            args.push("-headless".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push("--window-size".to_string());
            args.push(format!("{width},{height}"));
        }

        if let Some(url) = &self.new_tab {
            args.push("-new-tab".to_string());
            args.push(url.clone());
        }

        if let Some(url) = &self.new_window {
            args.push("-new-window".to_string());
            args.push(url.clone());
        }

        if self.private {
            args.push("-private".to_string());
        }

        if self.private_window {
            args.push("-private-window".to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Builds the `moz:firefoxOptions` capability object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();

        if let Some(binary) = &self.binary {
            object.insert("binary".into(), Value::String(binary.display().to_string()));
        }

        let args = self.to_args();
        if !args.is_empty() {
            object.insert(
                "args".into(),
                Value::Array(args.into_iter().map(Value::String).collect()),
            );
        }

        if !self.prefs.is_empty() {
            let prefs = self
                .prefs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            object.insert("prefs".into(), Value::Object(prefs));
        }

        Value::Object(object)
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn validate(&self) -> Result<()> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err(Error::config("Window dimensions must be greater than zero"));
        }
        if let Some(binary) = &self.binary
            && !binary.exists()
        {
            return Err(Error::config(format!(
                "Firefox binary not found at {}",
                binary.display()
            )));
        }
        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================
