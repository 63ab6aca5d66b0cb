// src/api/client.rs
//! HTTP transport for the Notion API.
//!
//! A thin wrapper around reqwest: authentication headers, cursor
//! pagination and retry of transient failures. No business logic.

use super::pagination::{fetch_all_pages, PaginatedResponse};
use super::parser::{parse_api_response, ApiResponse};
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{Block, Database, Page};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    /// Asset downloads go to signed S3 URLs and must not carry the API key.
    asset_client: Client,
    retry: RetryPolicy,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            asset_client: Client::new(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Sends one request and parses the body, retrying transient failures.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        let (client, url, method) = (&self.client, url.as_str(), &method);

        retry_with_backoff(
            move || async move {
                log::debug!("{} {}", method, url);
                let mut request = client.request(method.clone(), url).query(query);
                if let Some(body) = body {
                    request = request.json(body);
                }
                let response = request.send().await?;
                parse_api_response(extract_response_text(response).await?)
            },
            self.retry,
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.request(Method::GET, endpoint, query, None).await
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: &Value) -> Result<T, AppError> {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        self.get(&format!("pages/{}", id), &[]).await
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError> {
        self.get(&format!("databases/{}", id), &[]).await
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent);
        fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut query = vec![("page_size", page_size.to_string())];
                if let Some(cursor) = cursor {
                    query.push(("start_cursor", cursor));
                }
                self.get::<PaginatedResponse<Block>>(&endpoint, &query).await
            }
        })
        .await
    }

    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError> {
        let endpoint = format!("databases/{}/query", database);
        fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut body = serde_json::json!({ "page_size": page_size });
                if let Some(cursor) = cursor {
                    body["start_cursor"] = Value::String(cursor);
                }
                self.post::<PaginatedResponse<Page>>(&endpoint, &body).await
            }
        })
        .await
    }

    async fn download_asset(&self, url: &str) -> Result<Vec<u8>, AppError> {
        log::debug!("GET asset {}", url);
        let response = self.asset_client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads the body along with the status and URL needed to interpret it.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    Ok(ApiResponse { body, status, url })
}
