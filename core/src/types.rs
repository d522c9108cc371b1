//! Domain DTOs for the dummyjson todo and comment resources.
//!
//! # Design
//! The remote service owns these records; this crate only reads them and
//! forwards updates. Field names follow the remote's camelCase JSON. The
//! mock-server crate defines its own copies so integration tests catch any
//! schema drift.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

/// One page of todos together with the remote's paging counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Author summary embedded in a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    pub id: u64,
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub post_id: u64,
    pub likes: u64,
    pub user: CommentUser,
}

/// Paging window for the todo list. Defaults to the remote's first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 30 }
    }
}

/// Everything the form demo page needs before it can render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormContext {
    pub todo: Todo,
    pub comment: Comment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_user_id() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"todo":"Do something","completed":false,"userId":5}"#,
        )
        .unwrap();
        assert_eq!(todo.user_id, 5);

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], 5);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn comment_rejects_missing_user() {
        let result: Result<Comment, _> =
            serde_json::from_str(r#"{"id":1,"body":"Nice","postId":3,"likes":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn page_fills_missing_fields_with_defaults() {
        let page: Page = serde_json::from_str(r#"{"skip":30}"#).unwrap();
        assert_eq!(page, Page { skip: 30, limit: 30 });
    }
}
