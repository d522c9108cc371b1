//! Stateless HTTP request builder and response parser for the dummyjson API.
//!
//! # Design
//! `DummyJsonClient` holds only the base URL and an optional artificial
//! delay. Each remote operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` runs the round-trip in between, so
//! everything here stays deterministic.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Comment, Page, Todo, TodoList};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

#[derive(Debug, Clone)]
pub struct DummyJsonClient {
    base_url: String,
    delay_ms: Option<u64>,
}

impl Default for DummyJsonClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DummyJsonClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            delay_ms: None,
        }
    }

    /// Ask the remote to hold every read for `delay_ms` before answering.
    pub fn with_delay(mut self, delay_ms: Option<u64>) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self, page: Page) -> HttpRequest {
        let query = format!("skip={}&limit={}", page.skip, page.limit);
        self.get(format!("/todos?{}", self.with_delay_param(query)))
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        self.get(self.delayed(format!("/todos/{id}")))
    }

    pub fn build_get_comment(&self, id: u64) -> HttpRequest {
        self.get(self.delayed(format!("/comments/{id}")))
    }

    pub fn build_update_todo(
        &self,
        id: u64,
        fields: &Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.put(format!("/todos/{id}"), fields)
    }

    pub fn build_update_comment(
        &self,
        id: u64,
        fields: &Map<String, Value>,
    ) -> Result<HttpRequest, ApiError> {
        self.put(format!("/comments/{id}"), fields)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<TodoList, ApiError> {
        parse_body(response)
    }

    pub fn parse_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_body(response)
    }

    pub fn parse_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_body(response)
    }

    fn get(&self, path_and_query: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path_and_query}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn put(&self, path: String, fields: &Map<String, Value>) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(fields).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn delayed(&self, path: String) -> String {
        match self.delay_ms {
            Some(ms) => format!("{path}?delay={ms}"),
            None => path,
        }
    }

    fn with_delay_param(&self, query: String) -> String {
        match self.delay_ms {
            Some(ms) => format!("{query}&delay={ms}"),
            None => query,
        }
    }
}

/// Map non-success status codes and blank bodies to `ApiError`, then decode.
fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    let body = response.body.trim();
    if body.is_empty() || body == "null" {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
