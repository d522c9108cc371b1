use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub full_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub post_id: u64,
    pub likes: u64,
    pub user: User,
}

#[derive(Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Deserialize)]
struct ListQuery {
    skip: Option<u64>,
    limit: Option<u64>,
}

/// One request seen by the mock, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    /// Path and query as received.
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Todo,
    Comment,
}

#[derive(Default)]
struct Inner {
    todos: RwLock<BTreeMap<u64, Todo>>,
    comments: RwLock<BTreeMap<u64, Comment>>,
    blank: Mutex<HashSet<(Kind, u64)>>,
    calls: Mutex<Vec<RecordedCall>>,
    outage: AtomicBool,
    failing_updates: AtomicBool,
}

/// Shared fixtures and call log. Cloning shares the same state.
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Inner>,
}

impl MockState {
    /// State seeded with the fixtures the demo pages expect.
    pub fn seeded() -> Self {
        let todos = [
            (1, "Do something", false, 5),
            (2, "Memorize a poem", true, 13),
            (3, "Watch a classic movie", false, 68),
        ]
        .into_iter()
        .map(|(id, text, completed, user_id)| {
            let todo = Todo {
                id,
                todo: text.to_string(),
                completed,
                user_id,
            };
            (id, todo)
        })
        .collect();
        let comments = [
            comment(
                1,
                "This is some awesome thinking!",
                242,
                3,
                (105, "emmac", "Emma Wilson"),
            ),
            comment(
                2,
                "What terrific math skills you're showing!",
                46,
                4,
                (183, "cameronp", "Cameron Perez"),
            ),
        ]
        .into_iter()
        .map(|comment| (comment.id, comment))
        .collect();

        Self {
            inner: Arc::new(Inner {
                todos: RwLock::new(todos),
                comments: RwLock::new(comments),
                ..Inner::default()
            }),
        }
    }

    /// Answer every route for `(kind, id)` with `200 null`.
    pub fn blank(&self, kind: Kind, id: u64) {
        lock(&self.inner.blank).insert((kind, id));
    }

    /// When set, every route answers 503.
    pub fn set_outage(&self, down: bool) {
        self.inner.outage.store(down, Ordering::SeqCst);
    }

    /// When set, PUT routes answer 503 while reads keep working.
    pub fn fail_updates(&self, failing: bool) {
        self.inner.failing_updates.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.inner.calls).clone()
    }

    pub fn calls_with_method(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn clear_calls(&self) {
        lock(&self.inner.calls).clear();
    }

    fn record(&self, method: &Method, path: &str, body: Option<Value>) {
        lock(&self.inner.calls).push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            body,
        });
    }

    fn is_blank(&self, kind: Kind, id: u64) -> bool {
        lock(&self.inner.blank).contains(&(kind, id))
    }

    fn is_down(&self) -> bool {
        self.inner.outage.load(Ordering::SeqCst)
    }

    fn rejects_updates(&self) -> bool {
        self.is_down() || self.inner.failing_updates.load(Ordering::SeqCst)
    }
}

fn comment(id: u64, body: &str, post_id: u64, likes: u64, user: (u64, &str, &str)) -> Comment {
    Comment {
        id,
        body: body.to_string(),
        post_id,
        likes,
        user: User {
            id: user.0,
            username: user.1.to_string(),
            full_name: user.2.to_string(),
        },
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn app() -> Router {
    app_with_state(MockState::seeded())
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/{id}", get(get_todo).put(update_todo))
        .route("/comments/{id}", get(get_comment).put(update_comment))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::seeded()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "Service Unavailable"})),
    )
        .into_response()
}

fn not_found(kind: &str, id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("{kind} with id '{id}' not found")})),
    )
        .into_response()
}

fn blank() -> Response {
    Json(Value::Null).into_response()
}

async fn list_todos(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Response {
    state.record(&Method::GET, &uri.to_string(), None);
    if state.is_down() {
        return unavailable();
    }
    let todos = state.inner.todos.read().await;
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(30);
    let page: Vec<Todo> = todos
        .values()
        .skip(skip as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Json(TodoPage {
        limit: page.len() as u64,
        todos: page,
        total: todos.len() as u64,
        skip,
    })
    .into_response()
}

async fn get_todo(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<u64>,
) -> Response {
    state.record(&Method::GET, &uri.to_string(), None);
    if state.is_down() {
        return unavailable();
    }
    if state.is_blank(Kind::Todo, id) {
        return blank();
    }
    match state.inner.todos.read().await.get(&id) {
        Some(todo) => Json(todo.clone()).into_response(),
        None => not_found("Todo", id),
    }
}

/// Echo the todo with the known fields applied; nothing is persisted.
async fn update_todo(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<u64>,
    Json(input): Json<Map<String, Value>>,
) -> Response {
    state.record(&Method::PUT, &uri.to_string(), Some(Value::Object(input.clone())));
    if state.rejects_updates() {
        return unavailable();
    }
    if state.is_blank(Kind::Todo, id) {
        return blank();
    }
    let Some(mut todo) = state.inner.todos.read().await.get(&id).cloned() else {
        return not_found("Todo", id);
    };
    if let Some(text) = input.get("todo").and_then(Value::as_str) {
        todo.todo = text.to_string();
    }
    if let Some(completed) = input.get("completed").and_then(Value::as_bool) {
        todo.completed = completed;
    }
    if let Some(user_id) = input.get("userId").and_then(Value::as_u64) {
        todo.user_id = user_id;
    }
    Json(todo).into_response()
}

async fn get_comment(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<u64>,
) -> Response {
    state.record(&Method::GET, &uri.to_string(), None);
    if state.is_down() {
        return unavailable();
    }
    if state.is_blank(Kind::Comment, id) {
        return blank();
    }
    match state.inner.comments.read().await.get(&id) {
        Some(comment) => Json(comment.clone()).into_response(),
        None => not_found("Comment", id),
    }
}

async fn update_comment(
    State(state): State<MockState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<u64>,
    Json(input): Json<Map<String, Value>>,
) -> Response {
    state.record(&Method::PUT, &uri.to_string(), Some(Value::Object(input.clone())));
    if state.rejects_updates() {
        return unavailable();
    }
    if state.is_blank(Kind::Comment, id) {
        return blank();
    }
    let Some(mut comment) = state.inner.comments.read().await.get(&id).cloned() else {
        return not_found("Comment", id);
    };
    if let Some(body) = input.get("body").and_then(Value::as_str) {
        comment.body = body.to_string();
    }
    Json(comment).into_response()
}
