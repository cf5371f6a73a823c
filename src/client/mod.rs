pub mod transport;

use crate::auth::session::SessionManager;
use crate::client::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::error::Error;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Authenticated API surface. Every call carries the current access token;
/// a 401 triggers one refresh and one sequenced retry of the original
/// request, then the error stands. A permanently dead refresh token must
/// not loop.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionManager>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let body = self.call(Method::GET, path, None).await?;
        decode(path, body)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, Error> {
        let body = self.call(Method::POST, path, Some(encode(payload)?)).await?;
        decode(path, body)
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, Error> {
        let body = self.call(Method::PUT, path, Some(encode(payload)?)).await?;
        decode(path, body)
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, Error> {
        let body = self.call(Method::PATCH, path, Some(encode(payload)?)).await?;
        decode(path, body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.call(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, Error> {
        let mut response = self.send(method.clone(), path, body.clone()).await?;

        if response.status == 401 {
            tracing::debug!("{method} {path} came back unauthorized, refreshing once");
            // The refresh completes before the retry goes out; its failure
            // (SessionExpired) has already logged the session out.
            self.session.refresh().await?;
            response = self.send(method, path, body).await?;
        }

        if response.is_success() {
            Ok(response.body)
        } else {
            Err(Error::Api {
                status: response.status,
                detail: response.detail(),
            })
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, Error> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        if let Some(token) = self.session.access_token() {
            request = request.with_bearer(token);
        }
        Ok(self.transport.execute(request).await?)
    }
}

fn encode(payload: &impl Serialize) -> Result<Value, Error> {
    serde_json::to_value(payload)
        .map_err(|_| TransportError::new("request body could not be serialized").into())
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, Error> {
    serde_json::from_value(body)
        .map_err(|e| TransportError::new(format!("unexpected response shape from {path}: {e}")).into())
}
