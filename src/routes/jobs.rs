use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::models::automation::StreamEvent;
use crate::models::search::{iso_timestamp, ErrorResponse, SearchRequest, SearchResponse};
use crate::routes::metrics::{AUTOMATION_EVENTS_TOTAL, DURATION_SECONDS, REQUESTS_TOTAL};
use crate::services::automation::AutomationError;
use crate::services::prompt;
use crate::services::sse::EventStream;

const UPSTREAM_ERROR_FALLBACK: &str = "Automation API encountered an error";

/// Failure outcomes of a job search, each mapped to one JSON response.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Missing required fields: jobTitle and location")]
    MissingFields,

    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    #[error(transparent)]
    Automation(#[from] AutomationError),

    /// Message carried by an `ERROR` event.
    #[error("{0}")]
    Upstream(String),

    #[error("No jobs found in automation response")]
    NoResult,

    #[error("No data received from automation API")]
    NoData,
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::MissingFields => StatusCode::BAD_REQUEST,
            SearchError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            SearchError::MissingFields => "invalid_request",
            SearchError::MethodNotAllowed => "method_not_allowed",
            SearchError::Automation(_) => "automation_failure",
            SearchError::Upstream(_) => "upstream_error",
            SearchError::NoResult => "no_result",
            SearchError::NoData => "no_data",
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        // Only transport-level failures carry a timestamp.
        let timestamp = match &self {
            SearchError::Automation(e) => {
                error!("Automation call failed: {e}");
                Some(iso_timestamp())
            }
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            timestamp,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// POST /api/jobs — search LinkedIn through the automation service.
pub async fn search_jobs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SearchResponse>, SearchError> {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let result = run_search(&state, &body)
        .instrument(tracing::info_span!("job_search", %request_id))
        .await;

    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => e.outcome(),
    };
    metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    metrics::histogram!(DURATION_SECONDS).record(start.elapsed().as_secs_f64());

    result.map(Json)
}

/// Any method other than POST on the search route.
pub async fn method_not_allowed() -> SearchError {
    let err = SearchError::MethodNotAllowed;
    metrics::counter!(REQUESTS_TOTAL, "outcome" => err.outcome()).increment(1);
    err
}

async fn run_search(state: &AppState, body: &[u8]) -> Result<SearchResponse, SearchError> {
    let criteria = SearchRequest::parse(body).ok_or(SearchError::MissingFields)?;

    info!(
        job_title = %criteria.job_title,
        location = %criteria.location,
        "Searching for jobs"
    );

    let task = prompt::build_task(&criteria, &state.config);
    let events = state.automation.run(&task).await?;
    let jobs = collect_jobs(events).await?;

    Ok(SearchResponse::new(jobs))
}

/// Read events until the run completes or fails.
///
/// Returns as soon as a terminal event arrives; the stream is dropped with
/// any unread data.
pub async fn collect_jobs(
    mut events: EventStream<reqwest::Error>,
) -> Result<Vec<Value>, SearchError> {
    loop {
        let Some(event) = events
            .next_event()
            .await
            .map_err(AutomationError::Stream)?
        else {
            error!("Stream ended without COMPLETE or ERROR event");
            return Err(SearchError::NoData);
        };

        let kind: &'static str = (&event).into();
        metrics::counter!(AUTOMATION_EVENTS_TOTAL, "type" => kind).increment(1);
        debug!(event = kind, "Automation event");

        match event {
            StreamEvent::Progress { message } => {
                info!(message = ?message, "Automation progress");
            }
            StreamEvent::Complete {
                result_json: Some(result),
            } => {
                let jobs = match result {
                    Value::Array(items) => items,
                    other => {
                        warn!(kind = json_kind(&other), "resultJson is not an array");
                        Vec::new()
                    }
                };
                info!(count = jobs.len(), "Successfully extracted jobs");
                return Ok(jobs);
            }
            StreamEvent::Complete { result_json: None } => {
                error!("No resultJson in COMPLETE event");
                return Err(SearchError::NoResult);
            }
            StreamEvent::Error { message } => {
                let message = upstream_message(message);
                error!(%message, "Automation API reported an error");
                return Err(SearchError::Upstream(message));
            }
            StreamEvent::Unknown => {}
        }
    }
}

/// Text of an `ERROR` event's message; non-string values are rendered as JSON.
fn upstream_message(message: Option<Value>) -> String {
    match message {
        None | Some(Value::Null) => UPSTREAM_ERROR_FALLBACK.to_string(),
        Some(Value::String(text)) if text.is_empty() => UPSTREAM_ERROR_FALLBACK.to_string(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
