//! WebDriver endpoint table.
//!
//! Each command knows its HTTP method, its path relative to the driver
//! base URL, and its JSON body.
//!
//! | Command | Endpoint |
//! |---------|----------|
//! | [`DriverCommand`] | `/session`, `/status` |
//! | [`Command`] | `/session/{session id}/...` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::{Value, json};

use crate::identifiers::{ElementId, SessionId, WindowHandle};
use crate::locator::Query;

use super::request::Request;
use super::types::{Cookie, ELEMENT_KEY, PrintOptions, Rect, Timeouts, WindowKind};

// ============================================================================
// Method
// ============================================================================

/// HTTP verbs used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

// ============================================================================
// DriverCommand
// ============================================================================

/// Commands that do not address a session.
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// `POST /session`
    NewSession { capabilities: Value },
    /// `GET /status`
    Status,
}

impl DriverCommand {
    /// Builds the HTTP request for this command.
    #[must_use]
    pub fn request(&self) -> Request {
        match self {
            Self::NewSession { capabilities } => Request::new(
                Method::Post,
                "/session".to_string(),
                Some(capabilities.clone()),
                "new session",
            ),
            Self::Status => Request::new(Method::Get, "/status".to_string(), None, "status"),
        }
    }
}

// ============================================================================
// Command
// ============================================================================

/// Commands scoped to a session.
#[derive(Debug, Clone)]
pub enum Command {
    // ========================================================================
    // Session
    // ========================================================================
    /// `DELETE /session/{id}`
    DeleteSession,
    /// `GET /session/{id}/timeouts`
    GetTimeouts,
    /// `POST /session/{id}/timeouts`
    SetTimeouts(Timeouts),

    // ========================================================================
    // Navigation
    // ========================================================================
    /// `POST /session/{id}/url`
    NavigateTo { url: String },
    /// `GET /session/{id}/url`
    GetCurrentUrl,
    /// `POST /session/{id}/back`
    Back,
    /// `POST /session/{id}/forward`
    Forward,
    /// `POST /session/{id}/refresh`
    Refresh,
    /// `GET /session/{id}/title`
    GetTitle,

    // ========================================================================
    // Windows
    // ========================================================================
    /// `GET /session/{id}/window`
    GetWindowHandle,
    /// `POST /session/{id}/window`
    SwitchToWindow { handle: WindowHandle },
    /// `DELETE /session/{id}/window`
    CloseWindow,
    /// `GET /session/{id}/window/handles`
    GetWindowHandles,
    /// `POST /session/{id}/window/new`
    NewWindow { kind: WindowKind },
    /// `GET /session/{id}/window/rect`
    GetWindowRect,
    /// `POST /session/{id}/window/rect`
    SetWindowRect(Rect),
    /// `POST /session/{id}/window/maximize`
    MaximizeWindow,
    /// `POST /session/{id}/window/minimize`
    MinimizeWindow,
    /// `POST /session/{id}/window/fullscreen`
    FullscreenWindow,

    // ========================================================================
    // Document
    // ========================================================================
    /// `GET /session/{id}/source`
    GetPageSource,
    /// `POST /session/{id}/execute/sync`
    ExecuteScript { script: String, args: Vec<Value> },
    /// `POST /session/{id}/execute/async`
    ExecuteAsyncScript { script: String, args: Vec<Value> },
    /// `GET /session/{id}/screenshot`
    TakeScreenshot,
    /// `POST /session/{id}/print`
    PrintPage(PrintOptions),

    // ========================================================================
    // Cookies
    // ========================================================================
    /// `GET /session/{id}/cookie`
    GetAllCookies,
    /// `GET /session/{id}/cookie/{name}`
    GetNamedCookie { name: String },
    /// `POST /session/{id}/cookie`
    AddCookie(Cookie),
    /// `DELETE /session/{id}/cookie/{name}`
    DeleteCookie { name: String },
    /// `DELETE /session/{id}/cookie`
    DeleteAllCookies,

    // ========================================================================
    // Element Discovery
    // ========================================================================
    /// `POST /session/{id}/element`
    FindElement(Query),
    /// `POST /session/{id}/elements`
    FindElements(Query),
    /// `POST /session/{id}/element/{element}/element`
    FindElementFromElement { element: ElementId, query: Query },
    /// `POST /session/{id}/element/{element}/elements`
    FindElementsFromElement { element: ElementId, query: Query },
    /// `GET /session/{id}/element/active`
    GetActiveElement,

    // ========================================================================
    // Element State
    // ========================================================================
    /// `GET /session/{id}/element/{element}/selected`
    IsElementSelected(ElementId),
    /// `GET /session/{id}/element/{element}/enabled`
    IsElementEnabled(ElementId),
    /// `GET /session/{id}/element/{element}/attribute/{name}`
    GetElementAttribute { element: ElementId, name: String },
    /// `GET /session/{id}/element/{element}/property/{name}`
    GetElementProperty { element: ElementId, name: String },
    /// `GET /session/{id}/element/{element}/css/{name}`
    GetElementCssValue { element: ElementId, name: String },
    /// `GET /session/{id}/element/{element}/text`
    GetElementText(ElementId),
    /// `GET /session/{id}/element/{element}/name`
    GetElementTagName(ElementId),
    /// `GET /session/{id}/element/{element}/rect`
    GetElementRect(ElementId),
    /// `GET /session/{id}/element/{element}/computedlabel`
    GetComputedLabel(ElementId),
    /// `GET /session/{id}/element/{element}/screenshot`
    TakeElementScreenshot(ElementId),

    // ========================================================================
    // Element Interaction
    // ========================================================================
    /// `POST /session/{id}/element/{element}/click`
    ElementClick(ElementId),
    /// `POST /session/{id}/element/{element}/clear`
    ElementClear(ElementId),
    /// `POST /session/{id}/element/{element}/value`
    ElementSendKeys { element: ElementId, text: String },
}

impl Command {
    /// Returns the command name used in logs and error reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeleteSession => "delete session",
            Self::GetTimeouts => "get timeouts",
            Self::SetTimeouts(_) => "set timeouts",
            Self::NavigateTo { .. } => "navigate to",
            Self::GetCurrentUrl => "get current url",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Refresh => "refresh",
            Self::GetTitle => "get title",
            Self::GetWindowHandle => "get window handle",
            Self::SwitchToWindow { .. } => "switch to window",
            Self::CloseWindow => "close window",
            Self::GetWindowHandles => "get window handles",
            Self::NewWindow { .. } => "new window",
            Self::GetWindowRect => "get window rect",
            Self::SetWindowRect(_) => "set window rect",
            Self::MaximizeWindow => "maximize window",
            Self::MinimizeWindow => "minimize window",
            Self::FullscreenWindow => "fullscreen window",
            Self::GetPageSource => "get page source",
            Self::ExecuteScript { .. } => "execute script",
            Self::ExecuteAsyncScript { .. } => "execute async script",
            Self::TakeScreenshot => "take screenshot",
            Self::PrintPage(_) => "print page",
            Self::GetAllCookies => "get all cookies",
            Self::GetNamedCookie { .. } => "get named cookie",
            Self::AddCookie(_) => "add cookie",
            Self::DeleteCookie { .. } => "delete cookie",
            Self::DeleteAllCookies => "delete all cookies",
            Self::FindElement(_) => "find element",
            Self::FindElements(_) => "find elements",
            Self::FindElementFromElement { .. } => "find element from element",
            Self::FindElementsFromElement { .. } => "find elements from element",
            Self::GetActiveElement => "get active element",
            Self::IsElementSelected(_) => "is element selected",
            Self::IsElementEnabled(_) => "is element enabled",
            Self::GetElementAttribute { .. } => "get element attribute",
            Self::GetElementProperty { .. } => "get element property",
            Self::GetElementCssValue { .. } => "get element css value",
            Self::GetElementText(_) => "get element text",
            Self::GetElementTagName(_) => "get element tag name",
            Self::GetElementRect(_) => "get element rect",
            Self::GetComputedLabel(_) => "get computed label",
            Self::TakeElementScreenshot(_) => "take element screenshot",
            Self::ElementClick(_) => "element click",
            Self::ElementClear(_) => "element clear",
            Self::ElementSendKeys { .. } => "element send keys",
        }
    }

    /// Returns the HTTP method of this command.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::DeleteSession
            | Self::CloseWindow
            | Self::DeleteCookie { .. }
            | Self::DeleteAllCookies => Method::Delete,
            Self::GetTimeouts
            | Self::GetCurrentUrl
            | Self::GetTitle
            | Self::GetWindowHandle
            | Self::GetWindowHandles
            | Self::GetWindowRect
            | Self::GetPageSource
            | Self::TakeScreenshot
            | Self::GetAllCookies
            | Self::GetNamedCookie { .. }
            | Self::GetActiveElement
            | Self::IsElementSelected(_)
            | Self::IsElementEnabled(_)
            | Self::GetElementAttribute { .. }
            | Self::GetElementProperty { .. }
            | Self::GetElementCssValue { .. }
            | Self::GetElementText(_)
            | Self::GetElementTagName(_)
            | Self::GetElementRect(_)
            | Self::GetComputedLabel(_)
            | Self::TakeElementScreenshot(_) => Method::Get,
            _ => Method::Post,
        }
    }

    /// Returns the path below `/session/{session}`.
    fn suffix(&self) -> String {
        let element = |id: &ElementId, rest: &str| {
            format!("/element/{}{rest}", urlencoding::encode(id.as_str()))
        };
        let named = |id: &ElementId, kind: &str, name: &str| {
            element(id, &format!("/{kind}/{}", urlencoding::encode(name)))
        };

        match self {
            Self::DeleteSession => String::new(),
            Self::GetTimeouts | Self::SetTimeouts(_) => "/timeouts".into(),
            Self::NavigateTo { .. } | Self::GetCurrentUrl => "/url".into(),
            Self::Back => "/back".into(),
            Self::Forward => "/forward".into(),
            Self::Refresh => "/refresh".into(),
            Self::GetTitle => "/title".into(),
            Self::GetWindowHandle | Self::SwitchToWindow { .. } | Self::CloseWindow => {
                "/window".into()
            }
            Self::GetWindowHandles => "/window/handles".into(),
            Self::NewWindow { .. } => "/window/new".into(),
            Self::GetWindowRect | Self::SetWindowRect(_) => "/window/rect".into(),
            Self::MaximizeWindow => "/window/maximize".into(),
            Self::MinimizeWindow => "/window/minimize".into(),
            Self::FullscreenWindow => "/window/fullscreen".into(),
            Self::GetPageSource => "/source".into(),
            Self::ExecuteScript { .. } => "/execute/sync".into(),
            Self::ExecuteAsyncScript { .. } => "/execute/async".into(),
            Self::TakeScreenshot => "/screenshot".into(),
            Self::PrintPage(_) => "/print".into(),
            Self::GetAllCookies | Self::AddCookie(_) | Self::DeleteAllCookies => "/cookie".into(),
            Self::GetNamedCookie { name } | Self::DeleteCookie { name } => {
                format!("/cookie/{}", urlencoding::encode(name))
            }
            Self::FindElement(_) => "/element".into(),
            Self::FindElements(_) => "/elements".into(),
            Self::FindElementFromElement { element: id, .. } => element(id, "/element"),
            Self::FindElementsFromElement { element: id, .. } => element(id, "/elements"),
            Self::GetActiveElement => "/element/active".into(),
            Self::IsElementSelected(id) => element(id, "/selected"),
            Self::IsElementEnabled(id) => element(id, "/enabled"),
            Self::GetElementAttribute { element: id, name } => named(id, "attribute", name),
            Self::GetElementProperty { element: id, name } => named(id, "property", name),
            Self::GetElementCssValue { element: id, name } => named(id, "css", name),
            Self::GetElementText(id) => element(id, "/text"),
            Self::GetElementTagName(id) => element(id, "/name"),
            Self::GetElementRect(id) => element(id, "/rect"),
            Self::GetComputedLabel(id) => element(id, "/computedlabel"),
            Self::TakeElementScreenshot(id) => element(id, "/screenshot"),
            Self::ElementClick(id) => element(id, "/click"),
            Self::ElementClear(id) => element(id, "/clear"),
            Self::ElementSendKeys { element: id, .. } => element(id, "/value"),
        }
    }

    /// Returns the JSON body. `None` for GET and DELETE.
    fn body(&self) -> Option<Value> {
        match self.method() {
            Method::Get | Method::Delete => return None,
            Method::Post => {}
        }
        Some(match self {
            Self::SetTimeouts(timeouts) => json!(timeouts),
            Self::NavigateTo { url } => json!({ "url": url }),
            Self::SwitchToWindow { handle } => json!({ "handle": handle }),
            Self::NewWindow { kind } => json!({ "type": kind }),
            Self::SetWindowRect(rect) => json!(rect),
            Self::ExecuteScript { script, args } | Self::ExecuteAsyncScript { script, args } => {
                json!({ "script": script, "args": args })
            }
            Self::FindElement(query)
            | Self::FindElements(query)
            | Self::FindElementFromElement { query, .. }
            | Self::FindElementsFromElement { query, .. } => json!(query),
            Self::ElementSendKeys { text, .. } => json!({ "text": text }),
            Self::PrintPage(options) => json!(options),
            Self::AddCookie(cookie) => json!({ "cookie": cookie }),
            _ => json!({}),
        })
    }

    /// Builds the HTTP request for this command within `session`.
    #[must_use]
    pub fn request(&self, session: &SessionId) -> Request {
        let path = format!(
            "/session/{}{}",
            urlencoding::encode(session.as_str()),
            self.suffix()
        );
        Request::new(self.method(), path, self.body(), self.name())
    }
}

/// Encodes an element reference as a script argument.
#[must_use]
pub fn element_argument(id: &ElementId) -> Value {
    json!({ ELEMENT_KEY: id })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionId {
        SessionId::new("abc")
    }

    #[test]
    fn test_switch_to_window() {
        let request = Command::SwitchToWindow {
            handle: WindowHandle::new("w-7"),
        }
        .request(&session());
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/session/abc/window");
        assert_eq!(request.body, Some(json!({"handle": "w-7"})));
    }

    #[test]
    fn test_close_window_has_no_body() {
        let request = Command::CloseWindow.request(&session());
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/session/abc/window");
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_fullscreen_and_minimize_are_distinct() {
        assert_eq!(
            Command::FullscreenWindow.request(&session()).path,
            "/session/abc/window/fullscreen"
        );
        assert_eq!(
            Command::MinimizeWindow.request(&session()).path,
            "/session/abc/window/minimize"
        );
    }

    #[test]
    fn test_sync_and_async_execute_paths() {
        let sync = Command::ExecuteScript {
            script: "return 1".into(),
            args: vec![],
        }
        .request(&session());
        let async_ = Command::ExecuteAsyncScript {
            script: "arguments[0](1)".into(),
            args: vec![],
        }
        .request(&session());
        assert_eq!(sync.path, "/session/abc/execute/sync");
        assert_eq!(async_.path, "/session/abc/execute/async");
        assert_eq!(sync.body, Some(json!({"script": "return 1", "args": []})));
    }

    #[test]
    fn test_find_from_element() {
        let request = Command::FindElementsFromElement {
            element: ElementId::new("e/1"),
            query: Query::xpath("./*"),
        }
        .request(&session());
        assert_eq!(request.path, "/session/abc/element/e%2F1/elements");
        assert_eq!(
            request.body,
            Some(json!({"using": "xpath", "value": "./*"}))
        );
    }

    #[test]
    fn test_element_attribute_path_is_encoded() {
        let request = Command::GetElementAttribute {
            element: ElementId::new("e1"),
            name: "data x".into(),
        }
        .request(&session());
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/session/abc/element/e1/attribute/data%20x");
    }

    #[test]
    fn test_post_without_payload_sends_empty_object() {
        let request = Command::ElementClick(ElementId::new("e1")).request(&session());
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn test_cookie_routes() {
        let add = Command::AddCookie(Cookie::new("a", "1")).request(&session());
        assert_eq!(add.method, Method::Post);
        assert_eq!(add.path, "/session/abc/cookie");
        assert_eq!(add.body, Some(json!({"cookie": {"name": "a", "value": "1"}})));

        let named = Command::GetNamedCookie {
            name: "a b".into(),
        }
        .request(&session());
        assert_eq!(named.method, Method::Get);
        assert_eq!(named.path, "/session/abc/cookie/a%20b");

        let delete = Command::DeleteCookie { name: "a".into() }.request(&session());
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.body, None);

        let clear = Command::DeleteAllCookies.request(&session());
        assert_eq!((clear.method, clear.path.as_str()), (Method::Delete, "/session/abc/cookie"));
    }

    #[test]
    fn test_print_page() {
        let request = Command::PrintPage(PrintOptions::default()).request(&session());
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/session/abc/print");
        assert_eq!(request.body.unwrap()["shrinkToFit"], json!(true));
    }

    #[test]
    fn test_delete_session_path() {
        let request = Command::DeleteSession.request(&session());
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/session/abc");
    }

    #[test]
    fn test_element_argument_uses_reference_key() {
        assert_eq!(
            element_argument(&ElementId::new("e1")),
            json!({"element-6066-11e4-a52e-4f735466cecf": "e1"})
        );
    }
}
