use objects_shared::object::ObjectBody;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Request {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} ({status}) is not valid JSON: {source}\nRaw response: {body}")]
    Decode {
        url: String,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Status and raw body of one API call. The body is only parsed on demand,
/// so a case can check the status of a non-JSON reply.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn new(url: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json(&self) -> Result<Value, ApiError> {
        serde_json::from_str(&self.body).map_err(|source| ApiError::Decode {
            url: self.url.clone(),
            status: self.status(),
            body: self.body.clone(),
            source,
        })
    }
}

fn get_client(trust_invalid_server_cert: bool) -> Result<Client, ApiError> {
    if trust_invalid_server_cert {
        Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(ApiError::Client)
    } else {
        Ok(Client::new())
    }
}

/// Client for the `/objects` collection.
#[derive(Debug, Clone)]
pub struct ObjectsApi {
    client: Client,
    api_url: String,
}

impl ObjectsApi {
    pub fn new(api_url: impl Into<String>, trust_invalid_server_cert: bool) -> Result<Self, ApiError> {
        Ok(Self {
            client: get_client(trust_invalid_server_cert)?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.trust_invalid_server_cert)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn object_url(&self, id: &str) -> String {
        format!("{}/{}", self.api_url, id)
    }

    /// `POST /objects`
    pub async fn create(&self, body: &ObjectBody) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, self.api_url.clone(), Some(body)).await
    }

    /// `GET /objects/{id}`
    pub async fn get(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, self.object_url(id), None).await
    }

    /// `PUT /objects/{id}`
    pub async fn update(&self, id: &str, body: &ObjectBody) -> Result<ApiResponse, ApiError> {
        self.send(Method::PUT, self.object_url(id), Some(body)).await
    }

    /// `DELETE /objects/{id}`
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::DELETE, self.object_url(id), None).await
    }

    /// `GET` an arbitrary URL with the same client, e.g. a malformed route.
    pub async fn get_url(&self, url: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, url.to_string(), None).await
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&ObjectBody>,
    ) -> Result<ApiResponse, ApiError> {
        debug!("{} {}", method, url);
        let mut req = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let wrap = |source| ApiError::Request {
            method: method.clone(),
            url: url.clone(),
            source,
        };
        let res = req.send().await.map_err(wrap)?;
        let status = res.status();
        let text = res.text().await.map_err(wrap)?;
        debug!("{} {} -> {}", method, url, status);

        Ok(ApiResponse::new(url, status, text))
    }
}
