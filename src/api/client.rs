use crate::models::file::Download;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_DISPOSITION};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "Not authenticated: {0}\n\n\
         Log in again with `opendrive auth login`, or set OPENDRIVE_TOKEN"
    )]
    Unauthorized(String),

    #[error("API request failed ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse API response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token contains characters not allowed in an HTTP header")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub struct DriveClient {
    client: reqwest::Client,
    base_url: String,
    authenticated: bool,
}

impl DriveClient {
    /// Build a client for `base_url`, e.g. `http://localhost:8000/api`.
    ///
    /// With a token every request carries `Authorization: Bearer <token>`.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: token.is_some(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);

        if !query.is_empty() {
            let query_str = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            debug!(target: "opendrive::api", query = %query_str, "query");
        }

        let builder = self.client.get(&url).query(query);
        let response = self.send(Method::GET, &url, builder).await?;
        Self::parse(endpoint, response).await
    }

    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        let builder = self.client.post(&url).json(body);
        let response = self.send(Method::POST, &url, builder).await?;
        Self::parse(endpoint, response).await
    }

    /// POST without a request body, as used by the trash/restore actions
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let builder = self.client.post(&url);
        let response = self.send(Method::POST, &url, builder).await?;
        Self::parse(endpoint, response).await
    }

    pub async fn put_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        let builder = self.client.put(&url).json(body);
        let response = self.send(Method::PUT, &url, builder).await?;
        Self::parse(endpoint, response).await
    }

    /// DELETE; the server answers 204 with no body so nothing is parsed
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.url(endpoint);
        let builder = self.client.delete(&url);
        self.send(Method::DELETE, &url, builder).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let builder = self.client.post(&url).multipart(form);
        let response = self.send(Method::POST, &url, builder).await?;
        Self::parse(endpoint, response).await
    }

    /// GET a raw body, keeping the file name from `Content-Disposition`
    pub async fn get_bytes(&self, endpoint: &str) -> Result<Download, ApiError> {
        let url = self.url(endpoint);
        let builder = self.client.get(&url);
        let response = self.send(Method::GET, &url, builder).await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .and_then(|v| parse_content_disposition(&v));

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { url, source })?;

        Ok(Download {
            file_name,
            bytes: bytes.to_vec(),
        })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!(target: "opendrive::api", "→ {} {}", method, url);

        let start = Instant::now();
        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let duration = start.elapsed();
        let status = response.status();

        if status.is_success() {
            debug!(
                target: "opendrive::api",
                "← {} ({}ms)",
                status.as_u16(),
                duration.as_millis()
            );
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(
            target: "opendrive::api",
            "← {} ({}ms) - Failed: {}",
            status.as_u16(),
            duration.as_millis(),
            body
        );

        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        // Without a token a 401 is a rejected login, not an expired session
        if self.authenticated
            && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
        {
            return Err(ApiError::Unauthorized(message));
        }

        Err(ApiError::Status { status, message })
    }

    async fn parse<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { url, source })?;

        debug!(target: "opendrive::api", bytes = body.len(), "response body");

        serde_json::from_str::<T>(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// Pull a readable message out of an error body.
///
/// The backend answers with `{"error": ..}` from its own views, `{"detail": ..}`
/// from authentication failures and `{"field": ["..."]}` from validation.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail"] {
        if let Some(message) = object.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }

    let fields: Vec<String> = object
        .iter()
        .map(|(field, messages)| {
            let text = match messages {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(" "),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}: {}", field, text)
        })
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(fields.join("; "))
    }
}

/// File name from a `Content-Disposition` value.
///
/// `filename*=UTF-8''<percent-encoded>` wins over a plain `filename=`.
fn parse_content_disposition(value: &str) -> Option<String> {
    let params: Vec<&str> = value.split(';').map(str::trim).collect();

    let extended = params
        .iter()
        .find_map(|part| part.strip_prefix("filename*="))
        .and_then(|encoded| {
            let (charset, rest) = encoded.split_once('\'')?;
            let (_language, name) = rest.split_once('\'')?;
            if !charset.eq_ignore_ascii_case("utf-8") {
                return None;
            }
            urlencoding::decode(name.trim_matches('"')).ok().map(|n| n.into_owned())
        });

    extended
        .or_else(|| {
            params
                .iter()
                .find_map(|part| part.strip_prefix("filename="))
                .map(|name| name.trim_matches('"').to_string())
        })
        .filter(|name| !name.is_empty())
}
