//! DOM element interaction.
//!
//! Elements are web element references handed out by the remote end. Each
//! one remembers the window it was found in; every operation makes that
//! window the first responder before touching the element.
//!
//! # Example
//!
//! ```ignore
//! use remote_webdriver::{By, Key};
//!
//! let field = window.find_element(By::name().equals("q")).await?;
//!
//! // Types the text and presses Enter
//! field.write("rust webdriver").await?;
//!
//! // No terminator
//! field.write_with("more", None).await?;
//! field.press(Key::Tab).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Origin, Result};
use crate::identifiers::{ElementId, Identity, Provenance};
use crate::locator::{IntoQuery, Query};
use crate::protocol::{Call, Command, ElementRef, Rect};

use super::keyboard::{Key, encode_keys};
use super::window::decode_base64;
use super::{Session, Window};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for an element.
pub(crate) struct ElementInner {
    /// Element reference and where it was found.
    identity: Identity<ElementId>,
    /// Window the element lives in.
    window: Window,
}

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element.
///
/// Cheap to clone. Once the remote end reports the element stale, the
/// handle stays usable as a value but every operation keeps failing with
/// `stale element reference`; find the element again instead.
#[derive(Clone)]
pub struct Element {
    /// Shared inner state.
    pub(crate) inner: Arc<ElementInner>,
}

// ============================================================================
// Element - Display
// ============================================================================

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", self.id())
            .field("window", self.inner.window.handle())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.inner.identity == other.inner.identity
    }
}

impl Eq for Element {}

// ============================================================================
// Element - Constructor
// ============================================================================

impl Element {
    /// Creates a new element handle.
    pub(crate) fn new(id: ElementId, window: Window, creation: Provenance) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                identity: Identity::new(id, creation),
                window,
            }),
        }
    }
}

// ============================================================================
// Element - Accessors
// ============================================================================

impl Element {
    /// Returns this element's reference.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        self.inner.identity.id()
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity<ElementId> {
        &self.inner.identity
    }

    /// Returns the window this element lives in.
    #[inline]
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.inner.window
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        self.inner.window.session()
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    fn call(&self, context: Provenance) -> Call {
        Call::new(
            Origin::Element {
                session: self.session().id().clone(),
                window: self.inner.window.handle().clone(),
                element: self.id().clone(),
            },
            context,
        )
    }

    async fn act(&self, command: Command, context: Provenance) -> Result<Value> {
        self.inner.window.act(command, &self.call(context)).await
    }

    async fn act_unit(&self, command: Command, context: Provenance) -> Result<()> {
        self.act(command, context).await?;
        Ok(())
    }

    async fn act_as<T: DeserializeOwned>(&self, command: Command, context: Provenance) -> Result<T> {
        Ok(serde_json::from_value(self.act(command, context).await?)?)
    }

    fn adopt(&self, found: ElementRef, context: Provenance) -> Element {
        Element::new(found.id, self.inner.window.clone(), context)
    }

    async fn descendants(&self, query: Query, context: Provenance) -> Result<Vec<Element>> {
        debug!(element_id = %self.id(), %query, "Finding elements from element");
        let found: Vec<ElementRef> = self
            .act_as(
                Command::FindElementsFromElement {
                    element: self.id().clone(),
                    query,
                },
                context,
            )
            .await?;
        Ok(found.into_iter().map(|r| self.adopt(r, context)).collect())
    }

    pub(crate) async fn enabled_at(&self, context: Provenance) -> Result<bool> {
        self.act_as(Command::IsElementEnabled(self.id().clone()), context)
            .await
    }
}

// ============================================================================
// Element - Search
// ============================================================================

impl Element {
    /// Finds the first descendant matching `query`.
    ///
    /// XPath queries are anchored at this element, so `//p` finds
    /// paragraphs below it rather than anywhere in the document.
    #[track_caller]
    pub fn find_element(
        &self,
        query: impl IntoQuery,
    ) -> impl Future<Output = Result<Element>> + Send {
        let context = Provenance::here();
        let query = query.into_query();
        async move {
            let query = query?.relative();
            debug!(element_id = %self.id(), %query, "Finding element from element");
            let found: ElementRef = self
                .act_as(
                    Command::FindElementFromElement {
                        element: self.id().clone(),
                        query,
                    },
                    context,
                )
                .await?;
            Ok(self.adopt(found, context))
        }
    }

    /// Finds every descendant matching `query`.
    #[track_caller]
    pub fn find_elements(
        &self,
        query: impl IntoQuery,
    ) -> impl Future<Output = Result<Vec<Element>>> + Send {
        let context = Provenance::here();
        let query = query.into_query();
        async move { self.descendants(query?.relative(), context).await }
    }

    /// Returns the direct children of this element.
    #[track_caller]
    pub fn children(&self) -> impl Future<Output = Result<Vec<Element>>> + Send {
        self.descendants(Query::xpath("./*"), Provenance::here())
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element at its center.
    #[track_caller]
    pub fn click(&self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(element_id = %self.id(), "Clicking element");
            self.act_unit(Command::ElementClick(self.id().clone()), context)
                .await
        }
    }

    /// Clears an editable element.
    #[track_caller]
    pub fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(element_id = %self.id(), "Clearing element");
            self.act_unit(Command::ElementClear(self.id().clone()), context)
                .await
        }
    }

    /// Types `text` followed by Enter.
    #[track_caller]
    pub fn write(&self, text: impl Into<String>) -> impl Future<Output = Result<()>> + Send {
        self.write_with(text, Some(Key::Enter))
    }

    /// Types `text` followed by `terminator`, if any.
    #[track_caller]
    pub fn write_with(
        &self,
        text: impl Into<String>,
        terminator: Option<Key>,
    ) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        let mut text = text.into();
        if let Some(key) = terminator {
            text.push(key.code_point());
        }
        self.send_keys(text, context)
    }

    /// Presses a single key.
    #[track_caller]
    pub fn press(&self, key: Key) -> impl Future<Output = Result<()>> + Send {
        self.send_keys(key.code_point().to_string(), Provenance::here())
    }

    /// Sends a key sequence. Modifiers stay down until [`Key::Null`].
    #[track_caller]
    pub fn write_keys(&self, keys: &[Key]) -> impl Future<Output = Result<()>> + Send {
        self.send_keys(encode_keys(keys), Provenance::here())
    }

    async fn send_keys(&self, text: String, context: Provenance) -> Result<()> {
        debug!(element_id = %self.id(), chars = text.chars().count(), "Sending keys");
        self.act_unit(
            Command::ElementSendKeys {
                element: self.id().clone(),
                text,
            },
            context,
        )
        .await
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Returns the rendered text.
    pub async fn text(&self) -> Result<String> {
        self.act_as(
            Command::GetElementText(self.id().clone()),
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns the lowercase tag name.
    pub async fn tag_name(&self) -> Result<String> {
        self.act_as(
            Command::GetElementTagName(self.id().clone()),
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns position and size relative to the document.
    pub async fn rect(&self) -> Result<Rect> {
        self.act_as(
            Command::GetElementRect(self.id().clone()),
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns the accessible name.
    pub async fn computed_label(&self) -> Result<String> {
        self.act_as(
            Command::GetComputedLabel(self.id().clone()),
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns an HTML attribute, `None` when absent.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.act_as(
            Command::GetElementAttribute {
                element: self.id().clone(),
                name: name.to_string(),
            },
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns a DOM property, `Value::Null` when undefined.
    pub async fn property(&self, name: &str) -> Result<Value> {
        self.act(
            Command::GetElementProperty {
                element: self.id().clone(),
                name: name.to_string(),
            },
            Provenance::unavailable(),
        )
        .await
    }

    /// Returns the computed value of a CSS property.
    pub async fn css_value(&self, name: &str) -> Result<String> {
        self.act_as(
            Command::GetElementCssValue {
                element: self.id().clone(),
                name: name.to_string(),
            },
            Provenance::unavailable(),
        )
        .await
    }

    pub async fn is_selected(&self) -> Result<bool> {
        self.act_as(
            Command::IsElementSelected(self.id().clone()),
            Provenance::unavailable(),
        )
        .await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.enabled_at(Provenance::unavailable()).await
    }

    /// Captures the element's bounding box as PNG bytes.
    #[track_caller]
    pub fn screenshot(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let context = Provenance::here();
        async move {
            let encoded: String = self
                .act_as(Command::TakeElementScreenshot(self.id().clone()), context)
                .await?;
            decode_base64(&encoded)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
