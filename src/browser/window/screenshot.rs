//! Window screenshots.

use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;

use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::Command;

use super::Window;

impl Window {
    /// Captures the viewport of this window as PNG bytes.
    #[track_caller]
    pub fn screenshot(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let context = Provenance::here();
        async move {
            let encoded: String = self.act_as(Command::TakeScreenshot, context).await?;
            decode_base64(&encoded)
        }
    }
}

/// Decodes the base64 payload the screenshot and print endpoints return.
pub(crate) fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    Ok(Base64Standard.decode(encoded)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Error;
    use crate::protocol::Method;
    use crate::transport::mock::{self, MockTransport};

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_base64("***"), Err(Error::Base64(_))));
    }

    #[tokio::test]
    async fn test_screenshot_bytes() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Get, "/session/s1/screenshot", json!("iVBORw0KGgo="));
        let window = mock::session(transport).window().await.unwrap();

        let png = window.screenshot().await.unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
