//! HTTP implementation of the order backend.

use serde::Deserialize;
use serde_json::json;

use async_trait::async_trait;

use bazaar_core::{OrderId, VendorId};
use bazaar_orders::{Order, OrderStatus, TransitionError, VendorOrderRequest};

use crate::backend::OrderBackend;
use crate::error::BackendError;

/// Order backend reached over HTTP with an opaque bearer token.
///
/// Authentication mechanics live with an external collaborator; this client
/// only forwards whatever token it was handed.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrderBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Some(token.into()),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorized(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorized(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn read<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

/// Conflict body returned by the backend on an optimistic-concurrency miss.
#[derive(Debug, Deserialize)]
struct ConflictBody {
    expected: OrderStatus,
    actual: OrderStatus,
}

/// Map a non-success response to the closest typed category.
fn classify_failure(status: u16, body: String) -> BackendError {
    match status {
        401 | 403 => BackendError::Auth(if body.is_empty() {
            "credential missing or expired".to_string()
        } else {
            body
        }),
        404 => BackendError::NotFound,
        400 | 422 => BackendError::Rejected(body),
        409 => match serde_json::from_str::<ConflictBody>(&body) {
            Ok(conflict) => BackendError::Transition(TransitionError::Stale {
                expected: conflict.expected,
                actual: conflict.actual,
            }),
            Err(_) => BackendError::Api {
                status,
                message: body,
            },
        },
        _ => BackendError::Api {
            status,
            message: body,
        },
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    async fn create(&self, request: &VendorOrderRequest) -> Result<Order, BackendError> {
        tracing::debug!(vendor_id = %request.vendor_id, "creating order");

        let resp = self
            .post("/orders")
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, BackendError> {
        let resp = self
            .get(&format!("/orders/{id}"))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }

    async fn list_for_customer(&self) -> Result<Vec<Order>, BackendError> {
        let resp = self
            .get("/orders")
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }

    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Order>, BackendError> {
        let resp = self
            .get(&format!("/vendors/{vendor_id}/orders"))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Order, BackendError> {
        tracing::debug!(order_id = %id, %expected, %target, "updating order status");

        let resp = self
            .post(&format!("/orders/{id}/status"))
            .json(&json!({
                "expected": expected,
                "target": target,
            }))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }

    async fn cancel(&self, id: OrderId, reason: &str) -> Result<Order, BackendError> {
        let resp = self
            .post(&format!("/orders/{id}/cancel"))
            .json(&json!({ "reason": reason }))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::read(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_auth() {
        assert!(matches!(
            classify_failure(401, String::new()),
            BackendError::Auth(_)
        ));
        assert!(matches!(
            classify_failure(403, "forbidden".to_string()),
            BackendError::Auth(_)
        ));
    }

    #[test]
    fn conflict_with_readable_body_maps_to_stale() {
        let body = r#"{"expected":"pending","actual":"accepted"}"#.to_string();

        match classify_failure(409, body) {
            BackendError::Transition(TransitionError::Stale { expected, actual }) => {
                assert_eq!(expected, OrderStatus::Pending);
                assert_eq!(actual, OrderStatus::Accepted);
            }
            other => panic!("expected Stale, got {other:?}"),
        }
    }

    #[test]
    fn conflict_with_unreadable_body_stays_unclassified() {
        assert!(matches!(
            classify_failure(409, "<html>".to_string()),
            BackendError::Api { status: 409, .. }
        ));
    }

    #[test]
    fn client_errors_map_to_rejected_and_not_found() {
        assert!(matches!(
            classify_failure(422, "bad items".to_string()),
            BackendError::Rejected(_)
        ));
        assert!(matches!(classify_failure(404, String::new()), BackendError::NotFound));
    }

    #[test]
    fn server_errors_stay_unclassified() {
        assert!(matches!(
            classify_failure(503, String::new()),
            BackendError::Api { status: 503, .. }
        ));
    }
}
