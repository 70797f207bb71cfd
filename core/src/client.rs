//! Todo service operations on top of `AuthenticatedHttpClient`.
//!
//! # Design
//! Each operation is a thin composition: build the endpoint URL, serialize
//! the payload if there is one, delegate to the HTTP client, decode the
//! response. The `try_*` methods return every failure to the caller. The
//! plain methods call them, log any failure with `tracing::warn!` and return
//! `None` or `false` instead.
//!
//! `TodoServiceClient` holds only the base URL and the HTTP client, so it is
//! `Send + Sync` whenever the transport is.

use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::AuthenticatedHttpClient;
use crate::transport::{Transport, UreqTransport};
use crate::types::{TodoCollection, TodoRecord};

const LIST_PATH: &str = "/todos/api/v1.0/todos";
const CREATE_PATH: &str = "/todos/api/v1.0/todo/create";
const DELETE_PATH: &str = "/todos/api/v1.0/todo/delete";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous client for the todo service.
#[derive(Debug, Clone)]
pub struct TodoServiceClient<T = UreqTransport> {
    base_url: String,
    http: AuthenticatedHttpClient<T>,
}

impl TodoServiceClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let http = AuthenticatedHttpClient::new(config.credentials);
        Self::with_http(&config.base_url, http)
    }
}

impl<T: Transport> TodoServiceClient<T> {
    pub fn with_http(base_url: &str, http: AuthenticatedHttpClient<T>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &AuthenticatedHttpClient<T> {
        &self.http
    }

    pub fn list_url(&self) -> String {
        format!("{}{LIST_PATH}", self.base_url)
    }

    pub fn create_url(&self) -> String {
        format!("{}{CREATE_PATH}", self.base_url)
    }

    pub fn delete_url(&self, id: i64) -> String {
        format!("{}{DELETE_PATH}/{id}", self.base_url)
    }

    /// Fetch every todo, or `None` if the call failed.
    pub fn list_todos(&self) -> Option<TodoCollection> {
        self.try_list_todos()
            .inspect_err(|e| warn!(error = %e, "unable to get todos"))
            .ok()
    }

    /// Create a todo from raw fields, or `None` if it could not be created.
    pub fn create_todo(&self, title: &str, body: &str, priority: i32) -> Option<TodoRecord> {
        self.try_create_todo(title, body, priority)
            .inspect_err(|e| warn!(error = %e, title, "unable to upload todo"))
            .ok()
    }

    /// Send a pending todo and return the stored copy carrying its new id.
    pub fn create_todo_record(&self, todo: &TodoRecord) -> Option<TodoRecord> {
        self.try_create_todo_record(todo)
            .inspect_err(|e| warn!(error = %e, title = todo.title(), "unable to upload todo"))
            .ok()
    }

    /// Delete a todo by id. Returns `true` only for a 2xx answer.
    pub fn delete_todo(&self, id: i64) -> bool {
        self.try_delete_todo(id)
            .inspect_err(|e| warn!(error = %e, id, "unable to delete todo"))
            .is_ok()
    }

    pub fn try_list_todos(&self) -> Result<TodoCollection, ApiError> {
        let body = self.http.get(&self.list_url())?;
        parse_collection(&body)
    }

    pub fn try_create_todo(
        &self,
        title: &str,
        body: &str,
        priority: i32,
    ) -> Result<TodoRecord, ApiError> {
        let todo = TodoRecord::new(title, body, priority)?;
        self.try_create_todo_record(&todo)
    }

    pub fn try_create_todo_record(&self, todo: &TodoRecord) -> Result<TodoRecord, ApiError> {
        let data =
            serde_json::to_string(todo).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let body = self.http.post(&self.create_url(), JSON_CONTENT_TYPE, &data)?;
        parse_todo(&body)
    }

    pub fn try_delete_todo(&self, id: i64) -> Result<(), ApiError> {
        self.http.delete(&self.delete_url(id))?;
        Ok(())
    }
}

fn parse_collection(body: &str) -> Result<TodoCollection, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_todo(body: &str) -> Result<TodoRecord, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
