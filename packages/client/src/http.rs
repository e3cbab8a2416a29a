//! reqwest-backed page API
//!
//! Endpoints, relative to the configured base URL:
//!
//! | operation | request                          |
//! |-----------|----------------------------------|
//! | fetch     | `GET    pages/{slug}`            |
//! | create    | `POST   pages`                   |
//! | update    | `PUT    pages/{slug}`            |
//! | list      | `GET    pages?status=&search=..` |
//! | delete    | `DELETE pages/{slug}`            |
//!
//! Responses may come bare or wrapped in `{ "data": ... }`.

use async_trait::async_trait;
use pagecraft_editor::{
    ApiError, PageApi, PageDraft, PageList, PageQuery, PageRecord, PageUpdate,
};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Longest error body echoed back in an [`ApiError::Status`]
const MAX_ERROR_BODY: usize = 500;

pub struct HttpPageApi {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpPageApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.api_base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/pages[/{slug}]` with the slug percent-encoded as one segment
    fn pages_url(&self, slug: Option<&str>) -> Url {
        pages_url(&self.base_url, slug)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: RequestBuilder, url: &Url, resource: &str) -> Result<String, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response body from {}: {}", url, e)))?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "page api response");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body, resource));
        }
        Ok(body)
    }
}

#[async_trait]
impl PageApi for HttpPageApi {
    async fn fetch_page(&self, slug: &str, include_blocks: bool) -> Result<PageRecord, ApiError> {
        let url = self.pages_url(Some(slug));
        let mut request = self.client.get(url.clone());
        if !include_blocks {
            request = request.query(&[("include_blocks", "false")]);
        }
        let body = self.send(request, &url, slug).await?;
        decode_body(&body)
    }

    async fn create_page(&self, draft: &PageDraft) -> Result<PageRecord, ApiError> {
        let url = self.pages_url(None);
        let body = self
            .send(self.client.post(url.clone()).json(draft), &url, &draft.slug)
            .await?;
        decode_body(&body)
    }

    async fn update_page(&self, slug: &str, update: &PageUpdate) -> Result<PageRecord, ApiError> {
        let url = self.pages_url(Some(slug));
        let body = self
            .send(self.client.put(url.clone()).json(update), &url, slug)
            .await?;
        decode_body(&body)
    }

    async fn list_pages(&self, query: &PageQuery) -> Result<PageList, ApiError> {
        let url = self.pages_url(None);
        let body = self
            .send(self.client.get(url.clone()).query(query), &url, "pages")
            .await?;
        decode_body(&body)
    }

    async fn delete_page(&self, slug: &str) -> Result<(), ApiError> {
        let url = self.pages_url(Some(slug));
        self.send(self.client.delete(url.clone()), &url, slug).await?;
        Ok(())
    }
}

pub(crate) fn pages_url(base: &Url, slug: Option<&str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("pages");
        if let Some(slug) = slug {
            segments.push(slug);
        }
    }
    url
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decode a bare payload, falling back to a `{ "data": ... }` envelope
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(bare_err) => serde_json::from_str::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|_| ApiError::Decode(bare_err.to_string())),
    }
}

/// Map a non-success status to an [`ApiError`]
pub(crate) fn status_error(status: u16, body: &str, resource: &str) -> ApiError {
    if status == 404 {
        return ApiError::NotFound(resource.to_string());
    }

    // prefer the server's own message when it sends one
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| truncate(body));

    ApiError::Status { status, message }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &body[..end])
}

fn transport_error(e: reqwest::Error, url: &Url) -> ApiError {
    let message = if e.is_timeout() {
        format!("timeout talking to {} (check network or increase timeoutSecs)", url)
    } else if e.is_connect() {
        format!("cannot connect to {}: {}", url, e)
    } else if e.is_decode() {
        return ApiError::Decode(format!("{}: {}", url, e));
    } else {
        format!("request to {} failed: {}", url, e)
    };
    error!(url = %url, error = %e, "page api request failed");
    ApiError::Transport(message)
}
