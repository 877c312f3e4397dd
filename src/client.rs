//! HTTP client for the spam detection service
//!
//! Every call resolves to a [`RequestResult`]; transport failures are folded
//! into the result instead of being returned as errors so the runner can
//! report them and carry on.

use reqwest::{header, Client as HttpClient, Method};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::TesterConfig;
use crate::models::RequestResult;
use crate::{Error, Result};

/// Client bound to one service base URL
#[derive(Debug, Clone)]
pub struct ServiceClient {
    config: TesterConfig,
    http_client: HttpClient,
}

impl ServiceClient {
    pub fn new(config: TesterConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|e| Error::Configuration {
                    message: format!("Invalid user agent: {}", e),
                })?,
        );

        let http_client = HttpClient::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub async fn get(&self, path: &str) -> RequestResult {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestResult {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> RequestResult {
        let url = self.config.endpoint(path);
        debug!("{} {}", method, url);

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = self.describe(e);
                warn!("{} {} failed: {}", method, url, error);
                return RequestResult::unreachable(error.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(text) => {
                debug!("{} {} -> {} ({} bytes)", method, url, status, text.len());
                RequestResult::from_body(status, &text)
            }
            Err(e) => {
                let error = self.describe(e);
                warn!("{} {} body read failed: {}", method, url, error);
                RequestResult {
                    status,
                    data: None,
                    error: Some(error.to_string()),
                }
            }
        }
    }

    fn describe(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            Error::from(error)
        }
    }
}
