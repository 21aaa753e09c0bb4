use crate::error::FacadeError;
use crate::service_error::RawServiceError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Read,
    Create,
    Update,
    Remove,
}

impl Method {
    pub fn is_read(self) -> bool {
        self == Method::Read
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Read => "read",
            Method::Create => "create",
            Method::Update => "update",
            Method::Remove => "remove",
        })
    }
}

pub type RequestParams = Map<String, Value>;

#[async_trait(?Send)]
pub trait DataService {
    async fn perform(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        params: &RequestParams,
    ) -> Result<Value, RawServiceError>;
}

/// Non-read calls always carry a payload (`{}` when none is given); reads
/// come back with a collection's `results` array unwrapped.
pub async fn call_service(
    service: &dyn DataService,
    method: Method,
    path: &str,
    payload: Option<Value>,
    params: &RequestParams,
) -> Result<Value, FacadeError> {
    let payload = if method.is_read() {
        None
    } else {
        Some(payload.unwrap_or_else(|| Value::Object(Map::new())))
    };
    tracing::debug!(%method, path, "calling data service");
    let data = service.perform(method, path, payload, params).await?;
    if !method.is_read() {
        return Ok(data);
    }
    Ok(match data {
        Value::Object(mut object) if object.contains_key("results") => {
            object.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    })
}

pub fn entity_key(entity_set: &str, keys: &[(&str, Value)]) -> String {
    let set = entity_set.trim_start_matches('/');
    let rendered = match keys {
        [(_, value)] => key_literal(value),
        _ => keys
            .iter()
            .map(|(name, value)| format!("{name}={}", key_literal(value)))
            .collect::<Vec<_>>()
            .join(","),
    };
    format!("/{set}({rendered})")
}

fn key_literal(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{}'", text.replace('\'', "''")),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{call_service, entity_key, DataService, Method, RequestParams};
    use crate::error::FacadeError;
    use crate::service_error::RawServiceError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    #[derive(Default)]
    struct EchoService {
        seen: RefCell<Vec<(Method, String, Option<Value>)>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl DataService for EchoService {
        async fn perform(
            &self,
            method: Method,
            path: &str,
            payload: Option<Value>,
            _params: &RequestParams,
        ) -> Result<Value, RawServiceError> {
            self.seen
                .borrow_mut()
                .push((method, path.to_string(), payload.clone()));
            if self.fail {
                return Err(RawServiceError::with_status(503, "Service Unavailable"));
            }
            Ok(match method {
                Method::Read if path == "/Products" => json!({"results": [{"id": 1}]}),
                Method::Read => json!({"id": 1}),
                _ => payload.unwrap_or(Value::Null),
            })
        }
    }

    #[tokio::test]
    async fn reads_unwrap_results_and_send_no_payload() {
        let service = EchoService::default();
        let params = RequestParams::new();
        let list = call_service(&service, Method::Read, "/Products", Some(json!({"x": 1})), &params)
            .await
            .expect("read");
        assert_eq!(list, json!([{"id": 1}]));
        let single = call_service(&service, Method::Read, "/Products(1)", None, &params)
            .await
            .expect("read");
        assert_eq!(single, json!({"id": 1}));
        assert!(service.seen.borrow().iter().all(|(_, _, payload)| payload.is_none()));
    }

    #[tokio::test]
    async fn writes_default_the_payload_to_an_empty_object() {
        let service = EchoService::default();
        let created = call_service(&service, Method::Create, "/Products", None, &RequestParams::new())
            .await
            .expect("create");
        assert_eq!(created, json!({}));
    }

    #[tokio::test]
    async fn failures_surface_as_service_errors() {
        let service = EchoService {
            fail: true,
            ..EchoService::default()
        };
        let error = call_service(&service, Method::Remove, "/Products(1)", None, &RequestParams::new())
            .await
            .expect_err("should fail");
        match error {
            FacadeError::Service(raw) => assert_eq!(raw.status_code, Some(503)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn entity_keys_follow_odata_literals() {
        assert_eq!(entity_key("Products", &[("ProductID", json!("v"))]), "/Products('v')");
        assert_eq!(entity_key("/Products", &[("ProductID", json!(1))]), "/Products(1)");
        assert_eq!(
            entity_key("OrderItems", &[("A", json!("x")), ("B", json!(2))]),
            "/OrderItems(A='x',B=2)"
        );
        assert_eq!(entity_key("Notes", &[("Text", json!("it's"))]), "/Notes('it''s')");
    }
}
