use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

/// Error surfaced by every `ApiClient` call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No bearer token in the credential store; raised before any network
    /// activity.
    #[error("authentication required: no access token available")]
    AuthenticationRequired,

    /// The backend gave a definitive 4xx answer. Not retryable.
    #[error("{method} rejected with status {status}: {message}")]
    ClientRejected {
        method: Method,
        status: StatusCode,
        message: String,
    },

    /// Every method in the probe order failed with a server or transport
    /// error.
    #[error("request {request_id} could not be completed: {last_error}")]
    AllMethodsExhausted {
        request_id: String,
        last_error: String,
    },

    /// The backend accepted the call but the payload did not decode.
    #[error("failed to parse response: {0}")]
    InvalidResponse(String),

    /// Transport-level failure outside the fallback loop, or a 5xx on a
    /// single-verb endpoint.
    #[error("request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Vacation,
    Advance,
    Overtime,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Vacation => "vacation",
            RequestKind::Advance => "advance",
            RequestKind::Overtime => "overtime",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    pub id: String,
    pub employee_id: String,
    pub kind: RequestKind,
    pub status: RequestStatus,
    pub reason: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub hours: Option<f64>,
    #[serde(default)]
    pub paid: Option<bool>,
    pub decided_by: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestListResponse {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub items: Vec<EmployeeRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub paid: bool,
}
