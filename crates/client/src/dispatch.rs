//! Request dispatch
//!
//! Every remote call goes through [`Dispatcher::execute`], which is the only
//! place failures are translated. A transport failure, an error status and
//! an undecodable body all come out as [`Error::Api`] with the uniform
//! [`ApiError`] shape.

use std::sync::Arc;

use b2_core::{ApiError, Error, HttpRequest, HttpResponse, Result, Transport};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    api_version: String,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, api_version: impl Into<String>) -> Self {
        Self {
            transport,
            api_version: api_version.into(),
        }
    }

    /// Full URL of an operation: base + version segment + operation name
    pub fn endpoint(&self, base: &str, operation: &str) -> String {
        format!(
            "{}{}/{}",
            base.trim_end_matches('/'),
            self.api_version,
            operation
        )
    }

    /// Issue one request, translating every failure
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        tracing::debug!(method = %method, url = %url, bytes = request.body.len(), "Dispatching request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::debug!(method = %method, url = %url, error = %e, "Transport failure");
            Error::Api(ApiError::from_transport(&e))
        })?;

        if response.is_error() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::debug!(
                method = %method,
                url = %url,
                status = response.status,
                code = err.code.as_deref().unwrap_or("-"),
                "Request failed"
            );
            return Err(err.into());
        }

        Ok(response)
    }

    /// Issue a JSON call authenticated with `token` and decode the reply
    pub async fn call<B, R>(
        &self,
        method: Method,
        url: String,
        token: &str,
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = HttpRequest::new(method, url).header("Authorization", token);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = self.execute(request).await?;
        decode(&response)
    }
}

/// Decode a successful response body
pub(crate) fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R> {
    serde_json::from_slice(&response.body)
        .map_err(|e| Error::Api(ApiError::malformed(response.status, &e)))
}
