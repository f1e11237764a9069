//! Page source, script execution and ready state.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::browser::Script;
use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::{Command, ReadyState};

use super::Window;

// ============================================================================
// Window - Document
// ============================================================================

impl Window {
    /// Returns the serialized DOM of this window.
    pub async fn page_source(&self) -> Result<String> {
        self.act_as(Command::GetPageSource, Provenance::unavailable())
            .await
    }

    /// Runs a synchronous script and returns its JSON result.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = window.execute("return document.title;").await?;
    /// ```
    #[track_caller]
    pub fn execute(&self, script: impl Into<Script>) -> impl Future<Output = Result<Value>> + Send {
        let context = Provenance::here();
        let (script, args) = script.into().into_parts();
        async move {
            debug!(window = %self.handle(), args = args.len(), "Executing script");
            self.act_as(Command::ExecuteScript { script, args }, context)
                .await
        }
    }

    /// Runs an asynchronous script. The script finishes by calling the
    /// callback passed as its last argument.
    #[track_caller]
    pub fn execute_async(
        &self,
        script: impl Into<Script>,
    ) -> impl Future<Output = Result<Value>> + Send {
        let context = Provenance::here();
        let (script, args) = script.into().into_parts();
        async move {
            debug!(window = %self.handle(), args = args.len(), "Executing async script");
            self.act_as(Command::ExecuteAsyncScript { script, args }, context)
                .await
        }
    }

    /// Returns `document.readyState`.
    pub async fn ready_state(&self) -> Result<ReadyState> {
        self.ready_state_at(Provenance::unavailable()).await
    }

    pub(crate) async fn ready_state_at(&self, context: Provenance) -> Result<ReadyState> {
        let command = Command::ExecuteScript {
            script: "return document.readyState;".to_string(),
            args: Vec::new(),
        };
        self.act_as(command, context).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::browser::Script;
    use crate::protocol::{Method, ReadyState};
    use crate::transport::mock::{self, MockTransport};

    #[tokio::test]
    async fn test_execute_with_args() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Post, "/session/s1/execute/sync", json!(3));
        let window = mock::session(transport.clone()).window().await.unwrap();

        let script = Script::new("return arguments[0] + arguments[1];")
            .arg(1)
            .arg(2);
        assert_eq!(window.execute(script).await.unwrap(), json!(3));

        let request = transport.requests().pop().unwrap();
        assert_eq!(
            request.body,
            Some(json!({"script": "return arguments[0] + arguments[1];", "args": [1, 2]}))
        );
    }

    #[tokio::test]
    async fn test_ready_state() {
        let transport = MockTransport::new();
        transport.ok(Method::Get, "/session/s1/window", json!("w1"));
        transport.ok(Method::Post, "/session/s1/execute/sync", json!("interactive"));
        let window = mock::session(transport).window().await.unwrap();

        assert_eq!(window.ready_state().await.unwrap(), ReadyState::Interactive);
    }
}
