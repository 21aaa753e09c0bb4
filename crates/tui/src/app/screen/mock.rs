use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use ui_facade::service::{DataService, Method, RequestParams};
use ui_facade::service_error::RawServiceError;

const SERVICE_LATENCY: Duration = Duration::from_millis(800);

pub fn mock_products() -> Vec<Value> {
    vec![
        json!({"ProductID": 1, "Name": "Laptop", "Price": 1200}),
        json!({"ProductID": 2, "Name": "Mouse", "Price": 25}),
        json!({"ProductID": 3, "Name": "Monitor", "Price": 350}),
        json!({"ProductID": 4, "Name": "Keyboard", "Price": 75}),
        json!({"ProductID": 5, "Name": "Webcam", "Price": 50}),
    ]
}

pub fn mock_service_error() -> RawServiceError {
    let body = json!({
        "error": {
            "code": "SY/530",
            "message": {
                "lang": "en",
                "value": "An unexpected critical error occurred during the process."
            },
            "innererror": {
                "errordetails": [
                    {
                        "severity": "error",
                        "message": "User authorization is missing for this action. Access denied.",
                        "code": "AUTH/001"
                    },
                    {
                        "severity": "warning",
                        "message": "The price field was left empty; a default value of 1.00 was assigned.",
                        "code": "FIELD/002"
                    },
                    {
                        "severity": "info",
                        "message": "The request completed with a 200ms delay. Consider optimization.",
                        "code": "PERF/003"
                    }
                ]
            }
        }
    });
    RawServiceError::with_status(500, "Internal Server Error").with_body(body.to_string())
}

/// In-process stand-in for a remote service: `/Products` answers like an
/// OData collection, a keyed path like `/Products(3)` answers with one entry.
#[derive(Debug, Default)]
pub struct MockProductService;

impl MockProductService {
    fn find(id: i64) -> Option<Value> {
        mock_products()
            .into_iter()
            .find(|product| product["ProductID"].as_i64() == Some(id))
    }
}

#[async_trait(?Send)]
impl DataService for MockProductService {
    async fn perform(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        _params: &RequestParams,
    ) -> Result<Value, RawServiceError> {
        tokio::time::sleep(SERVICE_LATENCY).await;
        let not_found = || {
            RawServiceError::with_status(404, "Not Found")
                .with_body(format!("<?xml version=\"1.0\"?><error><code>404</code><message>Resource {path} does not exist</message></error>"))
        };
        match method {
            Method::Read if path == "/Products" => Ok(json!({ "results": mock_products() })),
            Method::Read => path
                .strip_prefix("/Products(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|id| id.parse::<i64>().ok())
                .and_then(Self::find)
                .ok_or_else(not_found),
            Method::Create | Method::Update => Ok(payload.unwrap_or(Value::Null)),
            Method::Remove => Err(RawServiceError::with_status(403, "Forbidden")),
        }
    }
}
