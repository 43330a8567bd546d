use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Request body for a single automation run.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationTask {
    pub url: String,
    pub goal: String,
    pub browser_profile: String,
    pub proxy_config: ProxyConfig,
    /// Seconds the automation service may spend on the run
    pub timeout: u64,
}

/// Egress proxy requested for the automation browser.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfig {
    pub enabled: bool,
    pub country_code: String,
}

/// One event from the automation service's SSE stream.
#[derive(Debug, Clone, PartialEq, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamEvent {
    Progress {
        #[serde(default)]
        message: Option<serde_json::Value>,
    },
    Complete {
        #[serde(rename = "resultJson", default)]
        result_json: Option<serde_json::Value>,
    },
    Error {
        #[serde(default)]
        message: Option<serde_json::Value>,
    },
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_serialization() {
        let task = AutomationTask {
            url: "https://www.linkedin.com/jobs/search/".to_string(),
            goal: "Find jobs".to_string(),
            browser_profile: "stealth".to_string(),
            proxy_config: ProxyConfig {
                enabled: true,
                country_code: "US".to_string(),
            },
            timeout: 120,
        };

        let body = serde_json::to_value(&task).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://www.linkedin.com/jobs/search/",
                "goal": "Find jobs",
                "browser_profile": "stealth",
                "proxy_config": {"enabled": true, "country_code": "US"},
                "timeout": 120
            })
        );
    }

    #[test]
    fn test_event_variants() {
        let progress: StreamEvent =
            serde_json::from_str(r#"{"type":"PROGRESS","message":"Opening page"}"#).unwrap();
        assert_eq!(
            progress,
            StreamEvent::Progress {
                message: Some(json!("Opening page"))
            }
        );

        let complete: StreamEvent =
            serde_json::from_str(r#"{"type":"COMPLETE","resultJson":[{"title":"PM"}]}"#).unwrap();
        assert_eq!(
            complete,
            StreamEvent::Complete {
                result_json: Some(json!([{"title": "PM"}]))
            }
        );

        let error: StreamEvent =
            serde_json::from_str(r#"{"type":"ERROR","message":"boom"}"#).unwrap();
        assert_eq!(
            error,
            StreamEvent::Error {
                message: Some(json!("boom"))
            }
        );
    }

    #[test]
    fn test_error_message_of_any_type() {
        let error: StreamEvent =
            serde_json::from_str(r#"{"type":"ERROR","message":{"code":"TIMEOUT"}}"#).unwrap();
        assert_eq!(
            error,
            StreamEvent::Error {
                message: Some(json!({"code": "TIMEOUT"}))
            }
        );
    }

    #[test]
    fn test_complete_without_result() {
        let absent: StreamEvent = serde_json::from_str(r#"{"type":"COMPLETE"}"#).unwrap();
        assert_eq!(absent, StreamEvent::Complete { result_json: None });

        let null: StreamEvent =
            serde_json::from_str(r#"{"type":"COMPLETE","resultJson":null}"#).unwrap();
        assert_eq!(null, StreamEvent::Complete { result_json: None });
    }

    #[test]
    fn test_unknown_type_tolerated() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"STREAMING_URL","streamingUrl":"https://x"}"#)
                .unwrap();
        assert_eq!(event, StreamEvent::Unknown);
    }

    #[test]
    fn test_metric_label() {
        let label: &'static str = StreamEvent::Error { message: None }.into();
        assert_eq!(label, "ERROR");
    }
}
