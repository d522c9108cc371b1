//! Read paths: fetch everything a page needs before it renders.
//!
//! A load either yields fully parsed remote data or fails; nothing here
//! substitutes placeholder values for a missing response.

use std::sync::Arc;

use futures::future;

use crate::client::DummyJsonClient;
use crate::error::{ApiError, LoadError, Resource};
use crate::transport::Transport;
use crate::types::{Comment, FormContext, Page, Todo, TodoList};

/// Todo shown and updated by the form demo page.
pub const FORM_TODO_ID: u64 = 1;
/// Comment shown and updated by the form demo page.
pub const FORM_COMMENT_ID: u64 = 1;

#[derive(Clone)]
pub struct Loader {
    client: DummyJsonClient,
    transport: Arc<dyn Transport>,
}

impl Loader {
    pub fn new(client: DummyJsonClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub async fn load_todo_list(&self, page: Page) -> Result<TodoList, LoadError> {
        let request = self.client.build_list_todos(page);
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| LoadError::from_api(Resource::TodoList, e))?;
        self.client
            .parse_list_todos(response)
            .map_err(|e| LoadError::from_api(Resource::TodoList, e))
    }

    /// Load one todo by its route parameter.
    ///
    /// A missing or blank parameter fails before any request is issued, and
    /// so does one that is not an integer, since no remote todo can have it.
    pub async fn load_todo_detail(&self, todo_id: Option<&str>) -> Result<Todo, LoadError> {
        let raw = todo_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LoadError::MissingParameter("todoId"))?;
        let Ok(id) = raw.parse::<u64>() else {
            tracing::debug!(todo_id = raw, "todo id is not numeric");
            return Err(LoadError::NotFound {
                resource: Resource::TodoRef(raw.to_string()),
            });
        };
        self.fetch_todo(id).await
    }

    /// Load the todo and the comment of the form demo concurrently.
    pub async fn load_form_context(&self) -> Result<FormContext, LoadError> {
        let (todo, comment) = future::try_join(
            self.fetch_todo(FORM_TODO_ID),
            self.fetch_comment(FORM_COMMENT_ID),
        )
        .await?;
        Ok(FormContext { todo, comment })
    }

    pub async fn fetch_todo(&self, id: u64) -> Result<Todo, LoadError> {
        let response = self
            .transport
            .execute(self.client.build_get_todo(id))
            .await
            .map_err(|e| LoadError::from_api(Resource::Todo(id), e))?;
        self.client
            .parse_todo(response)
            .and_then(|todo| ApiError::check_id("todo", id, todo.id).map(|()| todo))
            .map_err(|e| LoadError::from_api(Resource::Todo(id), e))
    }

    pub async fn fetch_comment(&self, id: u64) -> Result<Comment, LoadError> {
        let response = self
            .transport
            .execute(self.client.build_get_comment(id))
            .await
            .map_err(|e| LoadError::from_api(Resource::Comment(id), e))?;
        self.client
            .parse_comment(response)
            .and_then(|comment| ApiError::check_id("comment", id, comment.id).map(|()| comment))
            .map_err(|e| LoadError::from_api(Resource::Comment(id), e))
    }
}
