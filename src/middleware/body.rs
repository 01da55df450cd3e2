//! Request body decoding middleware
//!
//! Decodes JSON and URL-encoded form bodies ahead of route dispatch, so
//! every handler behind the gateway can assume a pre-parsed payload. The
//! decoded value is stored in the request extensions as [`DecodedBody`];
//! the raw bytes are re-installed on the request so ordinary extractors
//! keep working downstream.
//!
//! URL-encoded forms support nested bracket keys (`user[name]=amy`,
//! `tags[]=a&tags[]=b`), decoded into a JSON object.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::server::state::AppState;

/// A request body decoded by the gateway before dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedBody {
    /// `application/json` payload
    Json(Value),
    /// `application/x-www-form-urlencoded` payload, nested keys expanded
    Form(Value),
    /// A decodable content type with an empty body
    Empty,
}

impl DecodedBody {
    /// The decoded payload, if the body was non-empty.
    pub fn value(&self) -> Option<&Value> {
        match self {
            DecodedBody::Json(value) | DecodedBody::Form(value) => Some(value),
            DecodedBody::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DecodedBody::Empty)
    }
}

/// Content types the gateway decodes.
#[derive(Clone, Copy, Debug, PartialEq)]
enum BodyKind {
    Json,
    Form,
}

/// Middleware that decodes JSON and form bodies before route dispatch.
///
/// Requests without a decodable `Content-Type` pass through untouched and
/// unbuffered. Decode failures are answered here with a client error; the
/// mounted route groups never observe a malformed payload.
pub async fn decode_body(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let kind = match body_kind(request.headers()) {
        Some(kind) => kind,
        None => return next.run(request).await,
    };

    let (parts, body) = request.into_parts();

    // `to_bytes` fails when the body exceeds the cap; a transport error
    // mid-body means the client is gone and the response is moot either way.
    let bytes = match to_bytes(body, state.settings.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(_) => return ApiError::PayloadTooLarge.into_response(),
    };

    let decoded = if bytes.is_empty() {
        DecodedBody::Empty
    } else {
        match kind {
            BodyKind::Json => match serde_json::from_slice(&bytes) {
                Ok(value) => DecodedBody::Json(value),
                Err(err) => {
                    return ApiError::MalformedBody(format!("invalid JSON: {err}"))
                        .into_response()
                }
            },
            BodyKind::Form => DecodedBody::Form(parse_form(&bytes)),
        }
    };

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(decoded);
    next.run(request).await
}

/// Classify the request body from its `Content-Type` header.
fn body_kind(headers: &HeaderMap) -> Option<BodyKind> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime.eq_ignore_ascii_case("application/json") {
        Some(BodyKind::Json)
    } else if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        Some(BodyKind::Form)
    } else {
        None
    }
}

/// Parse a URL-encoded form into a JSON object, expanding bracket keys.
///
/// Percent-decoding itself cannot fail (invalid sequences decode lossily),
/// so form bodies never produce a client error here.
fn parse_form(bytes: &[u8]) -> Value {
    let mut root = Value::Object(Map::new());
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let segments = key_segments(&key);
        insert_segments(&mut root, &segments, Value::String(value.into_owned()));
    }
    root
}

/// Split a form key into its bracket path: `user[tags][]` -> `["user",
/// "tags", ""]`. Keys with unbalanced or trailing-text brackets are kept
/// literal, as a single segment.
fn key_segments(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    // A key that opens with a bracket has no name to nest under
    if open == 0 || !key.ends_with(']') {
        return vec![key];
    }

    let mut segments = vec![&key[..open]];
    let mut rest = &key[open..];
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return vec![key];
        }
        let Some(close) = rest.find(']') else {
            return vec![key];
        };
        segments.push(&rest[1..close]);
        rest = &rest[close + 1..];
    }
    segments
}

/// Insert `value` at the bracket path `segments`, creating intermediate
/// objects and arrays as needed. An empty segment appends to an array.
/// Repeated terminal keys collect into an array; a structural conflict
/// (scalar where a container is needed) is overwritten.
fn insert_segments(node: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        match node {
            Value::Null => *node = value,
            Value::Array(items) => items.push(value),
            _ => {
                let prior = node.take();
                *node = Value::Array(vec![prior, value]);
            }
        }
        return;
    };

    if head.is_empty() {
        if !node.is_array() {
            *node = Value::Array(Vec::new());
        }
        let items = node.as_array_mut().unwrap();
        if rest.is_empty() {
            items.push(value);
            return;
        }
        // `key[][field]` fills the newest object until a field repeats
        let needs_new = match items.last() {
            Some(Value::Object(map)) => map.contains_key(rest[0]),
            _ => true,
        };
        if needs_new {
            items.push(Value::Object(Map::new()));
        }
        insert_segments(items.last_mut().unwrap(), rest, value);
        return;
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let child = node
        .as_object_mut()
        .unwrap()
        .entry(head.to_string())
        .or_insert(Value::Null);
    insert_segments(child, rest, value);
}
