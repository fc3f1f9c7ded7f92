//! Approve/reject calls for employee requests. Which HTTP verb the backend
//! accepts for these actions varies across deployments, so each call probes a
//! fixed list of methods in order until one is accepted.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use super::client::ApiClient;
use super::types::ApiError;

static APPROVE_PROBE_ORDER: [Method; 4] =
    [Method::POST, Method::PUT, Method::PATCH, Method::GET];

// GET as last resort mirrors the deployed backends, even though it is an
// unusual verb for a mutating action.
static REJECT_PROBE_ORDER: [Method; 5] = [
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::GET,
];

/// Characters kept verbatim when a request id is embedded in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How a response status steers the probe loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// 2xx; take this response as the result.
    Accepted,
    /// 4xx; no other method will fare better, stop probing.
    Terminal,
    /// 5xx or anything else; the next method may still succeed.
    Retryable,
}

pub(crate) fn classify_status(status: StatusCode) -> Disposition {
    if status.is_success() {
        Disposition::Accepted
    } else if status.is_client_error() {
        Disposition::Terminal
    } else {
        Disposition::Retryable
    }
}

/// Response body decoded as far as it goes. Read and parse failures degrade
/// to an empty body instead of aborting the probe loop.
pub(crate) struct DecodedBody {
    pub json: Option<Value>,
    pub raw: String,
}

impl DecodedBody {
    pub(crate) fn from_raw(raw: String) -> Self {
        let json = serde_json::from_str(&raw).ok();
        Self { json, raw }
    }

    /// Best-available human message: parsed `message` field, else the raw
    /// body, else the status reason.
    pub(crate) fn message(&self, status: StatusCode) -> String {
        if let Some(message) = self
            .json
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
        if !self.raw.trim().is_empty() {
            return self.raw.clone();
        }
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    }
}

pub(crate) fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

impl ApiClient {
    /// Approves a pending request, probing POST, PUT, PATCH and finally GET.
    /// Returns the backend's JSON body, or a synthesized success marker when
    /// the winning response has no parseable body.
    pub async fn approve_request(&self, request_id: &str, paid: bool) -> Result<Value, ApiError> {
        let path = format!(
            "requests/approve/{}?paid={}",
            encode_segment(request_id),
            paid
        );
        self.probe_request_action(request_id, &path, &APPROVE_PROBE_ORDER)
            .await
    }

    /// Rejects a pending request, probing POST, PUT, PATCH, DELETE, GET.
    pub async fn reject_request(&self, request_id: &str) -> Result<Value, ApiError> {
        let path = format!("requests/reject/{}", encode_segment(request_id));
        self.probe_request_action(request_id, &path, &REJECT_PROBE_ORDER)
            .await
    }

    /// Tries each method in order against `path`. The first 2xx or 4xx ends
    /// the sequence; 5xx and transport failures fall through to the next
    /// method. Every losing attempt still reaches the backend, which must
    /// treat unsupported verbs as no-ops.
    async fn probe_request_action(
        &self,
        request_id: &str,
        path: &str,
        methods: &[Method],
    ) -> Result<Value, ApiError> {
        // Token is read once and held for the whole sequence.
        let token = self.bearer_token()?;
        let url = format!("{}/{}", self.resolved_base_url(), path);
        let mut last_error = String::from("no method attempted");

        for method in methods {
            let mut attempt = self
                .http_client()
                .request(method.clone(), &url)
                .header(ACCEPT, "application/json")
                .bearer_auth(&token);
            if let Some(timeout) = self.attempt_timeout() {
                attempt = attempt.timeout(timeout);
            }

            let response = match attempt.send().await {
                Ok(response) => response,
                Err(err) => {
                    log::warn!("{} {} failed at transport level: {}", method, url, err);
                    last_error = format!("{}: {}", method, err);
                    continue;
                }
            };

            let status = response.status();
            let raw = response.text().await.unwrap_or_default();
            let body = DecodedBody::from_raw(raw);

            match classify_status(status) {
                Disposition::Accepted => {
                    log::debug!("{} {} accepted with {}", method, url, status);
                    return Ok(body.json.unwrap_or_else(|| {
                        json!({ "success": true, "methodUsed": method.as_str() })
                    }));
                }
                Disposition::Terminal => {
                    log::warn!("{} {} rejected with {}", method, url, status);
                    return Err(ApiError::ClientRejected {
                        method: method.clone(),
                        status,
                        message: body.message(status),
                    });
                }
                Disposition::Retryable => {
                    log::warn!("{} {} answered {}, trying next method", method, url, status);
                    last_error = format!("{} returned {}: {}", method, status, body.message(status));
                }
            }
        }

        Err(ApiError::AllMethodsExhausted {
            request_id: request_id.to_string(),
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_status_accepts_any_2xx() {
        assert_eq!(classify_status(StatusCode::OK), Disposition::Accepted);
        assert_eq!(classify_status(StatusCode::CREATED), Disposition::Accepted);
        assert_eq!(
            classify_status(StatusCode::NO_CONTENT),
            Disposition::Accepted
        );
    }

    #[test]
    fn classify_status_treats_4xx_as_terminal() {
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            Disposition::Terminal
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            Disposition::Terminal
        );
        assert_eq!(
            classify_status(StatusCode::METHOD_NOT_ALLOWED),
            Disposition::Terminal
        );
    }

    #[test]
    fn classify_status_retries_5xx_and_redirects() {
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Disposition::Retryable
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            Disposition::Retryable
        );
        assert_eq!(
            classify_status(StatusCode::TEMPORARY_REDIRECT),
            Disposition::Retryable
        );
    }

    #[test]
    fn decoded_body_prefers_message_field() {
        let body = DecodedBody::from_raw(r#"{"message":"not yours"}"#.to_string());
        assert_eq!(body.message(StatusCode::FORBIDDEN), "not yours");
    }

    #[test]
    fn decoded_body_falls_back_to_raw_text() {
        let body = DecodedBody::from_raw("plain failure".to_string());
        assert!(body.json.is_none());
        assert_eq!(body.message(StatusCode::BAD_GATEWAY), "plain failure");
    }

    #[test]
    fn decoded_body_falls_back_to_status_reason() {
        let body = DecodedBody::from_raw(String::new());
        assert_eq!(body.message(StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn decoded_body_tolerates_invalid_json() {
        let body = DecodedBody::from_raw("{not json".to_string());
        assert!(body.json.is_none());
        assert_eq!(body.raw, "{not json");
    }

    #[test]
    fn encode_segment_escapes_reserved_characters_once() {
        assert_eq!(encode_segment("R 42/7"), "R%2042%2F7");
        assert_eq!(encode_segment("a%b"), "a%25b");
        assert_eq!(encode_segment("plain-id_1.2~x"), "plain-id_1.2~x");
    }

    #[test]
    fn probe_orders_start_with_post_and_end_with_get() {
        assert_eq!(APPROVE_PROBE_ORDER.first(), Some(&Method::POST));
        assert_eq!(APPROVE_PROBE_ORDER.last(), Some(&Method::GET));
        assert_eq!(REJECT_PROBE_ORDER.first(), Some(&Method::POST));
        assert_eq!(REJECT_PROBE_ORDER[3], Method::DELETE);
        assert_eq!(REJECT_PROBE_ORDER.last(), Some(&Method::GET));
    }
}
