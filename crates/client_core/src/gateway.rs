use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId},
    error::GatewayError,
    protocol::{employee_path, ErrorBody, EMPLOYEES_PATH},
};
use tracing::{debug, warn};

/// The four calls the directory makes against the employee resource.
///
/// A failed call is returned as-is; nothing here retries.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, GatewayError>;
    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError>;
    async fn update(&self, id: EmployeeId, draft: &EmployeeDraft)
        -> Result<Employee, GatewayError>;
    async fn delete(&self, id: EmployeeId) -> Result<(), GatewayError>;
}

/// `ApiGateway` over HTTP+JSON. Uses the transport's default timeouts.
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Employee>, GatewayError> {
        debug!(method = "GET", path = EMPLOYEES_PATH, "directory request");
        let response = self
            .http
            .get(self.url(EMPLOYEES_PATH))
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status("GET", EMPLOYEES_PATH, response).await?).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError> {
        debug!(method = "POST", path = EMPLOYEES_PATH, "directory request");
        let response = self
            .http
            .post(self.url(EMPLOYEES_PATH))
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status("POST", EMPLOYEES_PATH, response).await?).await
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, GatewayError> {
        let path = employee_path(id);
        debug!(method = "PUT", path = %path, "directory request");
        let response = self
            .http
            .put(self.url(&path))
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status("PUT", &path, response).await?).await
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), GatewayError> {
        let path = employee_path(id);
        debug!(method = "DELETE", path = %path, "directory request");
        let response = self
            .http
            .delete(self.url(&path))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_error)?;
        // Body is arbitrary on success; only the status matters.
        check_status("DELETE", &path, response).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::transport(err.to_string())
}

async fn check_status(
    method: &str,
    path: &str,
    response: Response,
) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message());
    warn!(
        method,
        path,
        status = status.as_u16(),
        has_detail = detail.is_some(),
        "directory request failed"
    );

    Err(match detail {
        Some(detail) => GatewayError::Validation {
            status: status.as_u16(),
            detail,
        },
        None => GatewayError::Http {
            status: status.as_u16(),
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body)
        .map_err(|err| GatewayError::transport(format!("invalid response body: {err}")))
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
