//! Printing to PDF.

use std::future::Future;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::{Command, PrintOptions};

use super::Window;
use super::screenshot::decode_base64;

impl Window {
    /// Renders the document of this window as PDF bytes.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pdf = window
    ///     .print(PrintOptions::default().with_orientation(PageOrientation::Landscape))
    ///     .await?;
    /// std::fs::write("page.pdf", pdf)?;
    /// ```
    #[track_caller]
    pub fn print(&self, options: PrintOptions) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), orientation = ?options.orientation, "Printing page");
            let encoded: String = self.act_as(Command::PrintPage(options), context).await?;
            decode_base64(&encoded)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::protocol::{Method, PageOrientation, PrintOptions};
    use crate::transport::mock::{self, MockTransport};

    #[tokio::test]
    async fn test_print_switches_first_and_decodes() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Post, "/session/s1/print", json!("JVBERi0="));
        let window = mock::session(transport.clone()).window().await.unwrap();

        let pdf = window
            .print(PrintOptions::default().with_orientation(PageOrientation::Landscape))
            .await
            .unwrap();
        assert_eq!(&pdf[..5], b"%PDF-");

        let calls = transport.calls();
        assert_eq!(
            calls[calls.len() - 2..],
            ["POST /session/s1/window", "POST /session/s1/print"]
        );
        let body = transport.requests().pop().unwrap().body.unwrap();
        assert_eq!(body["orientation"], json!("landscape"));
    }
}
