//! URL navigation and title.

use std::future::Future;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::Command;

use super::Window;

// ============================================================================
// Window - Navigation
// ============================================================================

impl Window {
    /// Navigates this window to `url` and waits for the page load strategy
    /// to be satisfied.
    #[track_caller]
    pub fn navigate(&self, url: impl Into<String>) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        let url = url.into();
        async move {
            debug!(window = %self.handle(), %url, "Navigating");
            self.act_unit(Command::NavigateTo { url }, context).await
        }
    }

    /// Returns the URL of this window.
    pub async fn url(&self) -> Result<String> {
        self.act_as(Command::GetCurrentUrl, Provenance::unavailable())
            .await
    }

    /// Returns the document title of this window.
    pub async fn title(&self) -> Result<String> {
        self.act_as(Command::GetTitle, Provenance::unavailable())
            .await
    }

    /// Goes back in this window's history.
    #[track_caller]
    pub fn back(&self) -> impl Future<Output = Result<()>> + Send {
        self.act_unit(Command::Back, Provenance::here())
    }

    /// Goes forward in this window's history.
    #[track_caller]
    pub fn forward(&self) -> impl Future<Output = Result<()>> + Send {
        self.act_unit(Command::Forward, Provenance::here())
    }

    /// Reloads this window.
    #[track_caller]
    pub fn refresh(&self) -> impl Future<Output = Result<()>> + Send {
        self.act_unit(Command::Refresh, Provenance::here())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::protocol::Method;
    use crate::transport::mock::{self, MockTransport};

    #[tokio::test]
    async fn test_navigate_switches_first() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        let window = mock::session(transport.clone()).window().await.unwrap();

        window.navigate("https://example.com").await.unwrap();

        assert_eq!(
            transport.calls()[1..],
            ["POST /session/s1/window", "POST /session/s1/url"]
        );
    }

    #[tokio::test]
    async fn test_title() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Get, "/session/s1/title", json!("Example"));
        let window = mock::session(transport.clone()).window().await.unwrap();

        assert_eq!(window.title().await.unwrap(), "Example");
        assert_eq!(transport.count(Method::Post, "/session/s1/window"), 1);
    }
}
