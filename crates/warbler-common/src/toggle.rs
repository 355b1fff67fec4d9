//! # The `toggle_like` endpoint
//!
//! Request and response mapping for `POST /api/messages/{msgId}/toggle_like`.
//!
//! Mapping overview:
//! - A body whose `message` is `"Bad like"` is a business rejection, whatever
//!   the status.
//! - 401 is an auth rejection, whatever the body.
//! - Any other non-2xx status is an [`HttpError`].
//! - 2xx: the body is decoded as `{"message": ...}`. An empty body decodes to
//!   no message; anything that is not JSON is a [`DecodeError`].

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, StatusCode};
use serde::Deserialize;
use smol_str::SmolStr;
use url::Url;

use crate::error::{ClientResult, DecodeError, HttpError, TransportError};
use crate::types::like::LikeState;
use crate::types::message_id::MessageId;

/// Sentinel message the server sends when a like is not permitted.
pub const BAD_LIKE: &str = "Bad like";
/// Server message after a message was liked.
pub const LIKED: &str = "Successfully liked!";
/// Server message after a like was removed.
pub const UNLIKED: &str = "Successfully unliked!";

/// Path of the toggle endpoint for a message. The id is inserted verbatim.
pub fn toggle_like_path(id: &MessageId) -> String {
    format!("/api/messages/{}/toggle_like", id)
}

/// Build the `POST` request for toggling a like on `id`.
///
/// Any query or fragment on `base` is dropped; the endpoint path goes after
/// the base path. The path is appended textually so the id reaches the wire
/// exactly as it was read. Ids containing characters that are not legal in a
/// URI fail here with [`TransportError::InvalidRequest`].
pub fn build_toggle_request(
    base: &Url,
    id: &MessageId,
    extra_headers: &[(HeaderName, HeaderValue)],
) -> Result<http::Request<Vec<u8>>, TransportError> {
    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);

    let mut uri = base.as_str().trim_end_matches('/').to_string();
    uri.push_str(&toggle_like_path(id));

    let mut builder = http::Request::builder().method(Method::POST).uri(uri);
    for (name, value) in extra_headers {
        builder = builder.header(name, value);
    }
    Ok(builder.body(Vec::new())?)
}

/// Decoded reply of the toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// The `message` field of the body, if any
    pub message: Option<SmolStr>,
}

#[derive(Debug, Deserialize)]
struct ToggleBody {
    #[serde(default)]
    message: Option<SmolStr>,
}

impl ToggleResponse {
    /// Decode a response body. Empty bodies carry no message.
    pub fn decode(status: StatusCode, body: &[u8]) -> Result<Self, DecodeError> {
        let message = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            serde_json::from_slice::<ToggleBody>(body)?.message
        };
        Ok(Self { status, message })
    }

    /// True when the server refused the like with the `"Bad like"` sentinel.
    pub fn is_bad_like(&self) -> bool {
        self.message.as_deref() == Some(BAD_LIKE)
    }

    /// The like state the server says it recorded, when it says so.
    pub fn reported_state(&self) -> Option<LikeState> {
        match self.message.as_deref() {
            Some(LIKED) => Some(LikeState::Filled),
            Some(UNLIKED) => Some(LikeState::Outline),
            _ => None,
        }
    }
}

/// Why a toggle was absorbed without touching the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The server answered with the `"Bad like"` sentinel.
    BadLike,
    /// The server answered 401.
    Unauthorized,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::BadLike => f.write_str("bad like"),
            Rejection::Unauthorized => f.write_str("unauthorized"),
        }
    }
}

/// Classification of a toggle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleVerdict {
    /// The server accepted the toggle; the UI may be updated.
    Accepted(ToggleResponse),
    /// A recognized failure the caller should silently absorb.
    Rejected(Rejection),
}

impl ToggleVerdict {
    /// True for [`ToggleVerdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, ToggleVerdict::Accepted(_))
    }
}

/// Classify the raw HTTP response of a toggle call.
pub fn process_response(http_response: http::Response<Vec<u8>>) -> ClientResult<ToggleVerdict> {
    let status = http_response.status();
    let buffer = Bytes::from(http_response.into_body());
    let decoded = ToggleResponse::decode(status, &buffer);
    #[cfg(feature = "tracing")]
    tracing::trace!(%status, decoded = decoded.is_ok(), "toggle_like response");

    if matches!(&decoded, Ok(resp) if resp.is_bad_like()) {
        return Ok(ToggleVerdict::Rejected(Rejection::BadLike));
    }
    if status == StatusCode::UNAUTHORIZED {
        return Ok(ToggleVerdict::Rejected(Rejection::Unauthorized));
    }
    if !status.is_success() {
        return Err(HttpError {
            status,
            body: Some(buffer),
        }
        .into());
    }

    Ok(ToggleVerdict::Accepted(decoded?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> http::Response<Vec<u8>> {
        http::Response::builder()
            .status(status)
            .body(body.as_bytes().to_vec())
            .unwrap()
    }

    #[test]
    fn path_interpolates_id_verbatim() {
        assert_eq!(
            toggle_like_path(&MessageId::new("123")),
            "/api/messages/123/toggle_like"
        );
        assert_eq!(
            toggle_like_path(&MessageId::missing()),
            "/api/messages//toggle_like"
        );
    }

    #[test]
    fn request_is_bodyless_post_under_base() {
        let base = Url::parse("http://localhost:5000/").unwrap();
        let req = build_toggle_request(&base, &MessageId::new("9"), &[]).unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(
            req.uri().to_string(),
            "http://localhost:5000/api/messages/9/toggle_like"
        );
        assert!(req.body().is_empty());
    }

    #[test]
    fn request_keeps_base_path_prefix_and_headers() {
        let base = Url::parse("https://example.com/warbler/").unwrap();
        let cookie = (
            http::header::COOKIE,
            HeaderValue::from_static("session=abc"),
        );
        let req = build_toggle_request(&base, &MessageId::new("1"), &[cookie]).unwrap();
        assert_eq!(
            req.uri().to_string(),
            "https://example.com/warbler/api/messages/1/toggle_like"
        );
        assert_eq!(req.headers()[http::header::COOKIE], "session=abc");
    }

    #[test]
    fn base_query_and_fragment_do_not_swallow_the_path() {
        for raw in [
            "http://localhost:5000/?lang=en",
            "http://localhost:5000/#feed",
            "http://localhost:5000/warbler/?lang=en#feed",
        ] {
            let base = Url::parse(raw).unwrap();
            let req = build_toggle_request(&base, &MessageId::new("9"), &[]).unwrap();
            assert!(
                req.uri().path().ends_with("/api/messages/9/toggle_like"),
                "{raw} -> {}",
                req.uri()
            );
            assert_eq!(req.uri().query(), None);
        }

        let base = Url::parse("http://localhost:5000/warbler?lang=en").unwrap();
        let req = build_toggle_request(&base, &MessageId::new("9"), &[]).unwrap();
        assert_eq!(
            req.uri().to_string(),
            "http://localhost:5000/warbler/api/messages/9/toggle_like"
        );
    }

    #[test]
    fn unencodable_id_fails_request_construction() {
        let base = Url::parse("http://localhost/").unwrap();
        let err = build_toggle_request(&base, &MessageId::new("a b"), &[]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn bad_like_is_rejected_for_any_status() {
        for status in [200, 400, 401, 500] {
            let verdict = process_response(response(status, r#"{"message":"Bad like"}"#)).unwrap();
            assert_eq!(verdict, ToggleVerdict::Rejected(Rejection::BadLike));
        }
    }

    #[test]
    fn unauthorized_is_rejected_for_any_body() {
        for body in ["", "not json", r#"{"message":"Access Unauthorized."}"#] {
            let verdict = process_response(response(401, body)).unwrap();
            assert_eq!(verdict, ToggleVerdict::Rejected(Rejection::Unauthorized));
        }
    }

    #[test]
    fn success_is_accepted_with_message() {
        let verdict = process_response(response(200, r#"{"message":"Successfully liked!"}"#)).unwrap();
        match verdict {
            ToggleVerdict::Accepted(resp) => {
                assert_eq!(resp.status, StatusCode::OK);
                assert_eq!(resp.reported_state(), Some(LikeState::Filled));
            }
            other => panic!("expected accepted, got {other:?}"),
        }
    }

    #[test]
    fn empty_success_body_has_no_message() {
        let verdict = process_response(response(200, "")).unwrap();
        let ToggleVerdict::Accepted(resp) = verdict else {
            panic!("expected accepted");
        };
        assert_eq!(resp.message, None);
        assert_eq!(resp.reported_state(), None);
    }

    #[test]
    fn server_errors_surface() {
        let err = process_response(response(500, "oops")).unwrap_err();
        match err {
            crate::ClientError::Http(e) => assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = process_response(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, crate::ClientError::Decode(_)));
    }

    #[test]
    fn reported_state_follows_server_message() {
        let unliked = ToggleResponse::decode(StatusCode::OK, br#"{"message":"Successfully unliked!"}"#)
            .unwrap();
        assert_eq!(unliked.reported_state(), Some(LikeState::Outline));
        let missing = ToggleResponse::decode(StatusCode::OK, br#"{"message":"There is no message"}"#)
            .unwrap();
        assert_eq!(missing.reported_state(), None);
    }
}
