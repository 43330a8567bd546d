use chrono::{SecondsFormat, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Label reported in `source` for every successful search.
pub const SOURCE_LINKEDIN: &str = "linkedin";

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[garde(required, length(min = 1))]
    pub job_title: Option<String>,

    #[garde(required, length(min = 1))]
    pub location: Option<String>,
}

/// A search request whose fields have passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub job_title: String,
    pub location: String,
}

impl SearchRequest {
    /// Parse and validate a raw request body.
    ///
    /// Bodies that are not JSON objects, or whose fields are not strings,
    /// count as missing fields.
    pub fn parse(body: &[u8]) -> Option<SearchCriteria> {
        let fields = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(fields)) => fields,
            Ok(other) => {
                tracing::debug!(body = %other, "Search request body is not an object");
                return None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Search request body is not valid JSON");
                return None;
            }
        };
        let request: SearchRequest =
            match serde_json::from_value(serde_json::Value::Object(fields)) {
                Ok(request) => request,
                Err(e) => {
                    tracing::debug!(error = %e, "Search request fields are not strings");
                    return None;
                }
            };
        request.validate().ok()?;

        Some(SearchCriteria {
            job_title: request.job_title?,
            location: request.location?,
        })
    }
}

/// One job posting in the shape the automation goal asks for.
///
/// Listings returned by the automation service are forwarded untouched;
/// this type documents the requested shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Salary range, or "Not listed"
    pub salary: String,
    pub url: String,
    pub posted_date: String,
}

/// Successful search response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub jobs: Vec<serde_json::Value>,
    pub count: usize,
    pub source: String,
    pub timestamp: String,
}

impl SearchResponse {
    pub fn new(jobs: Vec<serde_json::Value>) -> Self {
        Self {
            success: true,
            count: jobs.len(),
            jobs,
            source: SOURCE_LINKEDIN.to_string(),
            timestamp: iso_timestamp(),
        }
    }
}

/// Failure response; `timestamp` is only present for unexpected errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Current UTC time as ISO-8601 with millisecond precision.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
