//! JSON decoding for NeoWs feed responses.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::FetchError;
use crate::model::Feed;

/// Parses an already-downloaded feed document (the offline path).
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for a feed body.
pub fn parse_feed(bytes: &[u8]) -> Result<Feed> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes a completed HTTP exchange into a [`Feed`].
///
/// An upstream rejection (an error message carried in the body) wins over
/// the status code, so the user sees the API's own explanation; otherwise a
/// non-2xx status or an unreadable body is a transport failure.
pub fn decode_feed_response(status: StatusCode, body: &[u8]) -> Result<Feed, FetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::Transport(format!("unreadable feed body: {e}")))?;

    if let Some(message) = upstream_error_message(&value) {
        return Err(FetchError::Upstream(message));
    }

    if !status.is_success() {
        return Err(FetchError::Transport(format!(
            "feed API returned status {status}"
        )));
    }

    Ok(serde_json::from_value(value)?)
}

/// Extracts a non-empty error message from a response body, if the API
/// rejected the request.
///
/// NeoWs uses a few shapes depending on the failure:
/// `{"error_message": ...}` for a bad date range,
/// `{"error": {"message": ...}}` for a bad API key, and a bare
/// `{"message": ...}` from some gateway responses.
fn upstream_error_message(body: &Value) -> Option<String> {
    let candidates = [
        body.get("error_message"),
        body.get("error").and_then(|e| e.get("message")),
        body.get("message"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_body() {
        let body = br#"{
            "element_count": 1,
            "near_earth_objects": {
                "2024-01-01": [{ "id": "1", "name": "(2010 PK9)" }]
            }
        }"#;
        let feed = decode_feed_response(StatusCode::OK, body).unwrap();
        assert_eq!(feed.element_count, 1);
        assert_eq!(feed.objects_by_date.len(), 1);
    }

    #[test]
    fn test_decode_bad_range_body_is_upstream_error() {
        let body = br#"{
            "code": 400,
            "http_error": "BAD_REQUEST",
            "error_message": "Date Format Exception - Expected format (yyyy-mm-dd)"
        }"#;
        let err = decode_feed_response(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            FetchError::Upstream(message) => assert!(message.contains("Date Format")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_bad_key_body_is_upstream_error() {
        let body = br#"{
            "error": { "code": "API_KEY_INVALID", "message": "An invalid api_key was supplied." }
        }"#;
        let err = decode_feed_response(StatusCode::FORBIDDEN, body).unwrap_err();
        assert!(matches!(err, FetchError::Upstream(m) if m.contains("invalid api_key")));
    }

    #[test]
    fn test_decode_non_2xx_without_message_is_transport_error() {
        let err = decode_feed_response(StatusCode::BAD_GATEWAY, b"{}").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_decode_garbage_body_is_transport_error() {
        let err = decode_feed_response(StatusCode::OK, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_empty_message_field_is_not_a_rejection() {
        // Some successful bodies carry "message": "".
        let body = br#"{ "message": "", "element_count": 0, "near_earth_objects": {} }"#;
        let feed = decode_feed_response(StatusCode::OK, body).unwrap();
        assert_eq!(feed.element_count, 0);
    }

    #[test]
    fn test_parse_feed_rejects_invalid_json() {
        assert!(parse_feed(b"not json").is_err());
    }
}
