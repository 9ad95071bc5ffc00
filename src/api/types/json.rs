//! JSON extractor that does not insist on a Content-Type header

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::ApiError;

/// JSON body extractor whose rejections use the API error format
///
/// Unlike `axum::Json` the body is decoded whatever the request's
/// `Content-Type` says, so `curl -d '{...}'` works without `-H`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consume the extractor and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                let message = format!("Failed to read request body: {}", rejection.body_text());
                warn!(error = %message, "Rejected request body");
                ApiError::bad_request(message)
            })?;

        decode(&bytes).map(Json)
    }
}

/// Decode a request body, describing syntax and data errors separately
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(rejected("Request body is empty. Expected a JSON object.".to_string()));
    }

    serde_json::from_slice(bytes).map_err(|err| {
        let message = if err.is_data() {
            format!("Invalid JSON data: {}", err)
        } else {
            format!("Invalid JSON syntax: {}", err)
        };
        rejected(message)
    })
}

fn rejected(message: String) -> ApiError {
    warn!(error = %message, "Rejected request body");
    ApiError::bad_request(message)
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Deserialize)]
    struct Body {
        data: Vec<u8>,
    }

    #[test]
    fn test_decode_valid() {
        let body: Body = decode(br#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(body.data, vec![1, 2]);
    }

    #[test]
    fn test_decode_syntax_error() {
        let err = decode::<Body>(b"{not json").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Invalid JSON syntax"));
    }

    #[test]
    fn test_decode_missing_field() {
        let err = decode::<Body>(br#"{"rows": []}"#).unwrap_err();
        assert!(err.message().starts_with("Invalid JSON data"));
        assert!(err.message().contains("data"));
    }

    #[test]
    fn test_decode_empty_body() {
        let err = decode::<Body>(b"  ").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_while<F: FnOnce()>(f: F) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_syntax_error_is_logged() {
        let output = logs_while(|| {
            decode::<Body>(br#"{"data": ["#).unwrap_err();
        });
        assert!(output.contains("Rejected request body"));
        assert!(output.contains("Invalid JSON syntax"));
    }

    #[test]
    fn test_missing_field_is_logged() {
        let output = logs_while(|| {
            decode::<Body>(br#"{"rows": []}"#).unwrap_err();
        });
        assert!(output.contains("Invalid JSON data"));
        assert!(output.contains("missing field `data`"));
    }

    #[test]
    fn test_json_into_inner() {
        let json = Json(42);
        assert_eq!(json.into_inner(), 42);
    }
}
