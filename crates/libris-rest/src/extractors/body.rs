//! Request body decoding.
//!
//! Handlers receive the raw body as `Bytes` and decode it only after their
//! role check, so an unauthorized caller never learns whether a payload was
//! well formed.

use axum::body::Bytes;
use libris_core::{LibrisError, LibrisResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Deserializes a JSON request body.
///
/// The `Content-Type` header is not inspected. Malformed input yields
/// [`LibrisError::Deserialization`].
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> LibrisResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        LibrisError::Deserialization(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
    }

    #[test]
    fn test_decode_valid_body() {
        let body = Bytes::from_static(br#"{"name":"Ada"}"#);
        assert_eq!(
            decode_body::<Payload>(&body).unwrap(),
            Payload { name: "Ada".into() }
        );
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_body::<Payload>(&Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err, LibrisError::Deserialization(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_empty_body() {
        assert!(decode_body::<Payload>(&Bytes::new()).is_err());
    }
}
