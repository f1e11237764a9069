//! Wire value types shared by several commands.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::identifiers::{ElementId, WindowHandle};

/// JSON key identifying a web element reference.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

// ============================================================================
// Element References
// ============================================================================

/// `{"element-6066-...": "<id>"}` as returned by discovery endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub id: ElementId,
}

// ============================================================================
// Geometry
// ============================================================================

/// Position and size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// Timeouts
// ============================================================================

/// Session timeouts in milliseconds. Absent fields are left unchanged when
/// setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timeouts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<u64>,
    #[serde(rename = "pageLoad", default, skip_serializing_if = "Option::is_none")]
    pub page_load: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<u64>,
}

// ============================================================================
// Status
// ============================================================================

/// Readiness of the remote end to create sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Status {
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Windows
// ============================================================================

/// Kind of top-level browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Tab,
    Window,
}

/// Reply of the new window command.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWindow {
    pub handle: WindowHandle,
    #[serde(rename = "type")]
    pub kind: Option<WindowKind>,
}

// ============================================================================
// Document
// ============================================================================

/// `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

// ============================================================================
// Cookies
// ============================================================================

/// Cross-site policy of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

/// A cookie of the current document.
///
/// Optional fields left as `None` are omitted when adding a cookie, so the
/// browser fills in its defaults (the current domain and `/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    /// Expiry in seconds since the Unix epoch. Session cookies have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

impl Cookie {
    /// Creates a cookie with only a name and a value.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            secure: None,
            http_only: None,
            expiry: None,
            same_site: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    /// Sets the expiry in seconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub fn with_expiry(mut self, expiry: u64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}

// ============================================================================
// Printing
// ============================================================================

/// Page orientation of a printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Paper size in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    /// US Letter.
    fn default() -> Self {
        Self {
            width: 21.59,
            height: 27.94,
        }
    }
}

/// Page margins in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1.0,
            bottom: 1.0,
            left: 1.0,
            right: 1.0,
        }
    }
}

/// Parameters of the print command.
///
/// The remote end rejects a `scale` outside `0.1..=2.0` with
/// `invalid argument`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    pub orientation: PageOrientation,
    pub scale: f64,
    pub background: bool,
    pub page: PageSize,
    pub margin: Margins,
    pub shrink_to_fit: bool,
    /// Pages or ranges such as `"1"` or `"2-4"`. Empty prints everything.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_ranges: Vec<String>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            orientation: PageOrientation::Portrait,
            scale: 1.0,
            background: false,
            page: PageSize::default(),
            margin: Margins::default(),
            shrink_to_fit: true,
            page_ranges: Vec::new(),
        }
    }
}

impl PrintOptions {
    #[inline]
    #[must_use]
    pub fn with_orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Includes background colours and images.
    #[inline]
    #[must_use]
    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_page(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_shrink_to_fit(mut self, shrink_to_fit: bool) -> Self {
        self.shrink_to_fit = shrink_to_fit;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_page_range(mut self, range: impl Into<String>) -> Self {
        self.page_ranges.push(range.into());
        self
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Reply of the new session command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub session_id: String,
    #[serde(default)]
    pub capabilities: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_timeouts_skip_absent_fields() {
        let timeouts = Timeouts {
            page_load: Some(5000),
            ..Timeouts::default()
        };
        assert_eq!(serde_json::to_value(timeouts).unwrap(), json!({"pageLoad": 5000}));
    }

    #[test]
    fn test_cookie_wire_format() {
        let cookie = Cookie::new("sid", "abc")
            .with_http_only(true)
            .with_same_site(SameSite::Strict);
        assert_eq!(
            serde_json::to_value(&cookie).unwrap(),
            json!({"name": "sid", "value": "abc", "httpOnly": true, "sameSite": "Strict"})
        );

        let read: Cookie = serde_json::from_value(json!({
            "name": "sid", "value": "abc", "path": "/", "domain": "example.com",
            "secure": false, "httpOnly": true, "expiry": 1_900_000_000u64, "sameSite": "Lax"
        }))
        .unwrap();
        assert_eq!(read.expiry, Some(1_900_000_000));
        assert_eq!(read.same_site, Some(SameSite::Lax));
    }

    #[test]
    fn test_print_options_wire_format() {
        let options = PrintOptions::default()
            .with_orientation(PageOrientation::Landscape)
            .with_page_range("1-2");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "orientation": "landscape",
                "scale": 1.0,
                "background": false,
                "page": {"width": 21.59, "height": 27.94},
                "margin": {"top": 1.0, "bottom": 1.0, "left": 1.0, "right": 1.0},
                "shrinkToFit": true,
                "pageRanges": ["1-2"],
            })
        );
    }

    #[test]
    fn test_element_ref() {
        let element: ElementRef =
            serde_json::from_value(json!({ELEMENT_KEY: "e-1"})).unwrap();
        assert_eq!(element.id, ElementId::new("e-1"));
    }

    #[test]
    fn test_new_session_reply() {
        let reply: NewSession = serde_json::from_value(json!({
            "sessionId": "s-1",
            "capabilities": {"browserName": "firefox"}
        }))
        .unwrap();
        assert_eq!(reply.session_id, "s-1");
        assert_eq!(reply.capabilities["browserName"], "firefox");
    }
}
