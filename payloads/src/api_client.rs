use crate::{HEATMAP_PATH, HeatmapSnapshot, RequestOptions, responses};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Message used when a failed heatmap response carries no usable detail.
pub const HEATMAP_FALLBACK_ERROR: &str = "Failed to fetch heatmap";

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    /// Absolute URLs are used as given, anything else is joined to the
    /// client's address.
    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!(
                "{}/{}",
                self.address.trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        }
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        if !response.status().is_success() {
            return Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            ));
        }
        Ok(())
    }

    /// Run one heatmap fetch cycle: request the snapshot and put its
    /// timeframes into canonical order.
    pub async fn get_heatmap(&self) -> Result<HeatmapSnapshot, ClientError> {
        let response = self.empty_get(HEATMAP_PATH).await?;
        let snapshot: HeatmapSnapshot =
            ok_detail_body(response, HEATMAP_FALLBACK_ERROR).await?;
        Ok(snapshot.normalized())
    }

    /// Send a request with JSON content type and, when a token is given, a
    /// bearer authorization header. Headers in `options` take precedence.
    ///
    /// The response is returned whatever its status; only transport
    /// failures become errors. A 401 is logged but the session is left
    /// alone.
    pub async fn authenticated_request(
        &self,
        url: &str,
        options: RequestOptions,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.resolve_url(url);
        let headers = merge_headers(token, options.headers)?;

        let mut request = self
            .inner_client
            .request(options.method, &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request to {} failed: {}", url, e);
                return Err(e.into());
            }
        };

        if response.status() == StatusCode::UNAUTHORIZED {
            // Session expiry is reported only; logging out is left to the
            // caller.
            tracing::warn!("Unauthorized response from {}", url);
        }

        Ok(response)
    }
}

/// Build the headers for an authenticated request: defaults first, then the
/// caller's overrides.
pub fn merge_headers(
    token: Option<&SecretString>,
    overrides: HeaderMap,
) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| {
                    ClientError::InvalidHeader(AUTHORIZATION.to_string())
                })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for name in overrides.keys() {
        headers.remove(name);
    }
    headers.extend(overrides);

    Ok(headers)
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the message extracted
    /// from the response.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid value for header {0}")]
    InvalidHeader(String),
}

/// Deserialize a successful request into the desired type. On a failed
/// status, the `detail` field of the error body becomes the error message,
/// or `fallback` if there is none.
pub async fn ok_detail_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<responses::ErrorDetail>(&body)
            .ok()
            .and_then(|e| e.detail)
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::APIError(status, message));
    }

    Ok(serde_json::from_slice(&body)?)
}
