//! Page handlers: one loader per page, plus the form demo's action.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use todo_core::{FormData, Page, Submission};

use crate::error::PageError;
use crate::state::AppState;
use crate::templates::{
    FormSectionsTemplate, FormTemplate, FormView, HomeTemplate, TodoListTemplate, TodoTemplate,
};

fn render<T: Template>(template: &T, dev: bool) -> Result<Html<String>, PageError> {
    template
        .render()
        .map(Html)
        .map_err(|e| PageError::render_failed(e, dev))
}

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render(&HomeTemplate::default(), state.dev)
}

pub async fn todo_list(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Html<String>, PageError> {
    let list = state
        .loader
        .load_todo_list(page)
        .await
        .map_err(|e| PageError::from_load(e, state.dev))?;
    render(&TodoListTemplate::new(list, page), state.dev)
}

pub async fn todo_detail(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<Html<String>, PageError> {
    detail(&state, Some(todo_id.as_str())).await
}

/// `/todo/` with the parameter left off.
pub async fn todo_detail_missing(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    detail(&state, None).await
}

async fn detail(state: &AppState, todo_id: Option<&str>) -> Result<Html<String>, PageError> {
    let todo = state
        .loader
        .load_todo_detail(todo_id)
        .await
        .map_err(|e| PageError::from_load(e, state.dev))?;
    render(&TodoTemplate { todo }, state.dev)
}

pub async fn form_page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let context = state
        .loader
        .load_form_context()
        .await
        .map_err(|e| PageError::from_load(e, state.dev))?;
    render(
        &FormTemplate {
            view: FormView::new(context),
        },
        state.dev,
    )
}

/// Run the submission, then answer in the shape the caller asked for:
/// JSON for `Accept: application/json`, the form sections for htmx, or the
/// whole page for a plain form post. HTML answers re-run the loader first
/// so the page reflects the remote state after the update.
pub async fn form_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = FormData::new(fields);
    let intent = form.intent();
    let submission = state.action.submit(&form).await;
    tracing::info!(
        intent = intent.map(|i| i.as_str()).unwrap_or("none"),
        outcome = outcome_name(&submission),
        "form submitted"
    );

    if wants_json(&headers) {
        return json_outcome(submission);
    }

    let context = match state.loader.load_form_context().await {
        Ok(context) => context,
        Err(err) => return PageError::from_load(err, state.dev).into_response(),
    };
    let view = FormView::new(context).apply(intent, &submission);
    let rendered = if is_htmx(&headers) {
        render(&FormSectionsTemplate { view }, state.dev)
    } else {
        render(&FormTemplate { view }, state.dev)
    };
    rendered.into_response()
}

pub async fn not_found() -> PageError {
    PageError::not_found()
}

fn json_outcome(submission: Submission) -> Response {
    let status = match &submission {
        Submission::Success { .. } => StatusCode::OK,
        Submission::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Submission::RemoteError(_) => StatusCode::BAD_GATEWAY,
        Submission::Ignored => return StatusCode::NO_CONTENT.into_response(),
    };
    (status, Json(submission)).into_response()
}

fn outcome_name(submission: &Submission) -> &'static str {
    match submission {
        Submission::Success { .. } => "success",
        Submission::ValidationError(_) => "validation_error",
        Submission::RemoteError(_) => "remote_error",
        Submission::Ignored => "ignored",
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}
