//! Element discovery at the document root.

use std::future::Future;

use tracing::debug;

use crate::browser::Element;
use crate::error::Result;
use crate::identifiers::Provenance;
use crate::locator::{IntoQuery, Query};
use crate::protocol::{Command, ElementRef};

use super::Window;

// ============================================================================
// Window - Element Search
// ============================================================================

impl Window {
    /// Finds the first element matching `query`.
    ///
    /// Fails with `no such element` right away when nothing matches; use
    /// [`wait_for_element`](Self::wait_for_element) to wait for it.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use remote_webdriver::{By, HtmlTag};
    ///
    /// let search = window
    ///     .find_element(By::tag(HtmlTag::INPUT) & By::name().equals("q"))
    ///     .await?;
    /// ```
    #[track_caller]
    pub fn find_element(
        &self,
        query: impl IntoQuery,
    ) -> impl Future<Output = Result<Element>> + Send {
        let context = Provenance::here();
        let query = query.into_query();
        async move { self.locate(query?, context).await }
    }

    /// Finds every element matching `query`. An empty result is not an
    /// error.
    #[track_caller]
    pub fn find_elements(
        &self,
        query: impl IntoQuery,
    ) -> impl Future<Output = Result<Vec<Element>>> + Send {
        let context = Provenance::here();
        let query = query.into_query();
        async move {
            let query = query?;
            debug!(window = %self.handle(), %query, "Finding elements");
            let found: Vec<ElementRef> =
                self.act_as(Command::FindElements(query), context).await?;
            Ok(found
                .into_iter()
                .map(|r| Element::new(r.id, self.clone(), context))
                .collect())
        }
    }

    /// Returns the element that has focus.
    #[track_caller]
    pub fn active_element(&self) -> impl Future<Output = Result<Element>> + Send {
        let context = Provenance::here();
        async move {
            let found: ElementRef = self.act_as(Command::GetActiveElement, context).await?;
            Ok(Element::new(found.id, self.clone(), context))
        }
    }

    /// Single find round-trip, shared with waits.
    pub(crate) async fn locate(&self, query: Query, context: Provenance) -> Result<Element> {
        debug!(window = %self.handle(), %query, "Finding element");
        let found: ElementRef = self.act_as(Command::FindElement(query), context).await?;
        Ok(Element::new(found.id, self.clone(), context))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::{Error, LocatorError};
    use crate::identifiers::ElementId;
    use crate::locator::{By, HtmlTag};
    use crate::protocol::{ELEMENT_KEY, Method};
    use crate::transport::mock::{self, MockTransport};

    #[tokio::test]
    async fn test_find_element_sends_compiled_query() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Post, "/session/s1/element", json!({ELEMENT_KEY: "e1"}));
        let window = mock::session(transport.clone()).window().await.unwrap();

        let element = window
            .find_element(By::tag(HtmlTag::INPUT) & By::name().equals("q"))
            .await
            .unwrap();

        assert_eq!(element.id(), &ElementId::new("e1"));
        assert_eq!(element.window(), &window);
        let request = transport.requests().pop().unwrap();
        assert_eq!(
            request.body,
            Some(json!({"using": "css selector", "value": "input[name=\"q\"]"}))
        );
        assert_eq!(
            transport.calls()[1..],
            ["POST /session/s1/window", "POST /session/s1/element"]
        );
    }

    #[tokio::test]
    async fn test_find_element_does_not_retry() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.fail(Method::Post, "/session/s1/element", 404, "no such element");
        let window = mock::session(transport.clone()).window().await.unwrap();

        let err = window.find_element(By::id().equals("missing")).await.unwrap_err();

        assert!(err.is_no_such_element());
        assert_eq!(transport.count(Method::Post, "/session/s1/element"), 1);
    }

    #[tokio::test]
    async fn test_contradiction_never_reaches_the_wire() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        let window = mock::session(transport.clone()).window().await.unwrap();

        let err = window
            .find_element(By::tag(HtmlTag::DIV) & By::tag(HtmlTag::SPAN))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Locator(LocatorError::TagContradiction { .. })
        ));
        assert_eq!(transport.calls(), vec!["GET /session/s1/window"]);
    }

    #[tokio::test]
    async fn test_find_elements_empty() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Post, "/session/s1/elements", json!([]));
        let window = mock::session(transport).window().await.unwrap();

        let found = window.find_elements(By::class().contains("row")).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_active_element() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(
            Method::Get,
            "/session/s1/element/active",
            json!({ELEMENT_KEY: "focused"}),
        );
        let window = mock::session(transport).window().await.unwrap();

        let element = window.active_element().await.unwrap();
        assert_eq!(element.id().as_str(), "focused");
    }
}
