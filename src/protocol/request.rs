//! Requests and response interpretation.
//!
//! Responses arrive as raw status + bytes from the transport and are
//! classified here:
//!
//! | Status | Body | Result |
//! |--------|------|--------|
//! | 200 | `{"value": ...}` | `Ok(value)` |
//! | 4xx/5xx | `{"value": {"error": ..., "message": ...}}` | [`Error::Protocol`] |
//! | anything else | anything | [`Error::BadResponse`] |

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, ErrorCode, Origin, ProtocolError, Result};
use crate::identifiers::Provenance;

use super::command::Method;

// ============================================================================
// Request
// ============================================================================

/// An HTTP request to the driver, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// Command name for logs and error reports.
    pub name: &'static str,
}

impl Request {
    #[inline]
    #[must_use]
    pub fn new(method: Method, path: String, body: Option<Value>, name: &'static str) -> Self {
        Self {
            method,
            path,
            body,
            name,
        }
    }
}

// ============================================================================
// RawResponse
// ============================================================================

/// Status and body exactly as the transport received them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[inline]
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ============================================================================
// Call
// ============================================================================

/// Who issued a request, attached to any error it produces.
#[derive(Debug, Clone)]
pub struct Call {
    pub origin: Origin,
    pub context: Provenance,
}

impl Call {
    #[inline]
    #[must_use]
    pub fn new(origin: Origin, context: Provenance) -> Self {
        Self { origin, context }
    }
}

// ============================================================================
// Interpretation
// ============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    stacktrace: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Classifies a raw response into a value or an error.
///
/// # Errors
///
/// [`Error::Protocol`] for documented error bodies, [`Error::BadResponse`]
/// for everything that is neither success nor a documented error.
pub fn interpret(raw: &RawResponse, request: &Request, call: &Call) -> Result<Value> {
    match raw.status {
        200 => serde_json::from_slice::<Envelope<Value>>(&raw.body)
            .map(|envelope| envelope.value)
            .map_err(|_| Error::bad_response(raw.status, &raw.body)),
        400..=599 => match serde_json::from_slice::<Envelope<ErrorBody>>(&raw.body) {
            Ok(Envelope { value: body }) => Err(Error::protocol(ProtocolError {
                code: ErrorCode::from_wire(&body.error),
                status: raw.status,
                message: body.message.unwrap_or_default(),
                stack_trace: body.stacktrace,
                data: body.data,
                context: call.context,
                origin: call.origin.clone(),
                invoker: request.name,
            })),
            Err(_) => Err(Error::bad_response(raw.status, &raw.body)),
        },
        status => Err(Error::bad_response(status, &raw.body)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::identifiers::SessionId;

    fn request() -> Request {
        Request::new(Method::Post, "/session/s/element".into(), None, "find element")
    }

    fn call() -> Call {
        Call::new(Origin::Session(SessionId::new("s")), Provenance::here())
    }

    #[test]
    fn test_success_unwraps_value() {
        let raw = RawResponse::new(200, r#"{"value":{"ready":true}}"#);
        let value = interpret(&raw, &request(), &call()).unwrap();
        assert_eq!(value, json!({"ready": true}));
    }

    #[test]
    fn test_null_value_is_success() {
        let raw = RawResponse::new(200, r#"{"value":null}"#);
        assert_eq!(interpret(&raw, &request(), &call()).unwrap(), Value::Null);
    }

    #[test]
    fn test_error_body_becomes_protocol_error() {
        let raw = RawResponse::new(
            404,
            r##"{"value":{"error":"no such element","message":"Unable to locate element: #x","stacktrace":"at find"}}"##,
        );
        let err = interpret(&raw, &request(), &call()).unwrap_err();
        let Error::Protocol(err) = err else {
            panic!("expected protocol error");
        };
        assert_eq!(err.code, ErrorCode::NoSuchElement);
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Unable to locate element: #x");
        assert_eq!(err.stack_trace.as_deref(), Some("at find"));
        assert_eq!(err.invoker, "find element");
        assert_eq!(err.origin, Origin::Session(SessionId::new("s")));
        assert!(matches!(err.context, Provenance::CallSite(_)));
    }

    #[test]
    fn test_null_message_is_still_a_protocol_error() {
        let raw = RawResponse::new(
            404,
            r#"{"value":{"error":"no such window","message":null,"stacktrace":null}}"#,
        );
        let Err(Error::Protocol(err)) = interpret(&raw, &request(), &call()) else {
            panic!("expected protocol error");
        };
        assert_eq!(err.code, ErrorCode::NoSuchWindow);
        assert!(err.message.is_empty());
        assert!(err.stack_trace.is_none());
    }

    #[test]
    fn test_unknown_code_is_kept() {
        let raw = RawResponse::new(500, r#"{"value":{"error":"brand new error","message":"?"}}"#);
        let err = interpret(&raw, &request(), &call()).unwrap_err();
        assert_eq!(err.code(), Some(&ErrorCode::Unknown("brand new error".into())));
    }

    #[test]
    fn test_undocumented_shapes_are_bad_responses() {
        let cases = [
            RawResponse::new(200, "<html>proxy</html>"),
            RawResponse::new(200, r#"{"status":0}"#),
            RawResponse::new(502, "Bad Gateway"),
            RawResponse::new(302, ""),
        ];
        for raw in cases {
            let err = interpret(&raw, &request(), &call()).unwrap_err();
            match err {
                Error::BadResponse { status, .. } => assert_eq!(status, raw.status),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
