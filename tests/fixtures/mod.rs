//! Canned automation-service event streams

use serde_json::{json, Value};

/// Two listings in the shape the search goal requests.
pub fn sample_listings() -> Value {
    json!([
        {
            "title": "Associate Product Manager",
            "company": "Acme Corp",
            "location": "Austin, TX",
            "salary": "$85,000 - $105,000/year",
            "url": "https://www.linkedin.com/jobs/view/4000000001",
            "postedDate": "2 days ago"
        },
        {
            "title": "Product Analyst",
            "company": "Globex",
            "location": "Austin, TX",
            "salary": "Not listed",
            "url": "https://www.linkedin.com/jobs/view/4000000002",
            "postedDate": "1 week ago"
        }
    ])
}

/// Render events as an SSE body, one `data:` line per event.
pub fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {event}\n\n"))
        .collect()
}

pub fn progress(message: &str) -> Value {
    json!({"type": "PROGRESS", "message": message})
}

pub fn complete(result: Value) -> Value {
    json!({"type": "COMPLETE", "resultJson": result})
}

pub fn failure(message: &str) -> Value {
    json!({"type": "ERROR", "message": message})
}
