//! Write path: turn a form submission into a remote update.
//!
//! # Design
//! Both intents report through the same `Submission` contract. A success
//! carries the entity the remote echoed back; a failure carries the
//! originally submitted fields plus form-level and per-field messages so the
//! page can re-render the form pre-filled. Remote failures never escape as
//! errors, the page always receives a `Submission`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::DummyJsonClient;
use crate::error::ApiError;
use crate::form::{checkbox_checked, FormData, Intent, INTENT_FIELD};
use crate::http::{HttpRequest, HttpResponse};
use crate::loader::{FORM_COMMENT_ID, FORM_TODO_ID};
use crate::transport::Transport;
use crate::types::{Comment, Todo};
use crate::validation::{Schema, ValidationErrors};

/// Form-level message for any failed remote update.
pub const REMOTE_FAILURE_MESSAGE: &str = "Failed!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Todo(Todo),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFailure {
    pub payload: Map<String, Value>,
    #[serde(flatten)]
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Submission {
    Success { entity: Entity },
    ValidationError(SubmissionFailure),
    RemoteError(SubmissionFailure),
    /// The intent was missing or unrecognized; nothing was sent.
    Ignored,
}

impl Submission {
    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match self {
            Submission::ValidationError(failure) | Submission::RemoteError(failure) => {
                Some(failure)
            }
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct FormAction {
    client: DummyJsonClient,
    transport: Arc<dyn Transport>,
    comment_schema: Schema,
}

impl FormAction {
    pub fn new(client: DummyJsonClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            client,
            transport,
            comment_schema: Schema::comment(),
        }
    }

    pub async fn submit(&self, form: &FormData) -> Submission {
        match form.intent() {
            Some(Intent::Todo) => self.update_todo(form).await,
            Some(Intent::Comment) => self.update_comment(form).await,
            None => {
                tracing::debug!(intent = ?form.get(INTENT_FIELD), "ignoring submission");
                Submission::Ignored
            }
        }
    }

    async fn update_todo(&self, form: &FormData) -> Submission {
        let mut fields = update_fields(form);
        let completed = checkbox_checked(form.get("completed"));
        fields.insert("completed".to_string(), Value::Bool(completed));

        let result = self
            .round_trip(self.client.build_update_todo(FORM_TODO_ID, &fields))
            .await
            .and_then(|response| self.client.parse_todo(response))
            .and_then(|todo| ApiError::check_id("todo", FORM_TODO_ID, todo.id).map(|()| todo));
        self.finish(form, result.map(Entity::Todo))
    }

    async fn update_comment(&self, form: &FormData) -> Submission {
        if let Err(errors) = self.comment_schema.validate(form) {
            return Submission::ValidationError(SubmissionFailure {
                payload: form.to_json(),
                errors,
            });
        }

        let fields = update_fields(form);
        let result = self
            .round_trip(self.client.build_update_comment(FORM_COMMENT_ID, &fields))
            .await
            .and_then(|response| self.client.parse_comment(response))
            .and_then(|comment| {
                ApiError::check_id("comment", FORM_COMMENT_ID, comment.id).map(|()| comment)
            });
        self.finish(form, result.map(Entity::Comment))
    }

    async fn round_trip(
        &self,
        request: Result<HttpRequest, ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        let request = request?;
        tracing::debug!(method = %request.method, url = %request.url, "sending update");
        self.transport.execute(request).await
    }

    fn finish(&self, form: &FormData, result: Result<Entity, ApiError>) -> Submission {
        match result {
            Ok(entity) => Submission::Success { entity },
            Err(err) => {
                tracing::warn!(error = %err, "remote update failed");
                Submission::RemoteError(SubmissionFailure {
                    payload: form.to_json(),
                    errors: ValidationErrors::form(REMOTE_FAILURE_MESSAGE),
                })
            }
        }
    }
}

/// Submitted fields forwarded to the remote, without the discriminator.
fn update_fields(form: &FormData) -> Map<String, Value> {
    let mut fields = form.to_json();
    fields.remove(INTENT_FIELD);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::fake::ScriptedTransport;
    use serde_json::json;

    const TODO_URL: &str = "http://api.test/todos/1";
    const COMMENT_URL: &str = "http://api.test/comments/1";
    const TODO_DONE: &str = r#"{"id":1,"todo":"Do something","completed":true,"userId":5}"#;
    const COMMENT_ECHO: &str = r#"{"id":1,"body":"hello world","postId":242,"likes":3,"user":{"id":105,"username":"emmac","fullName":"Emma Wilson"}}"#;

    fn action(transport: &Arc<ScriptedTransport>) -> FormAction {
        FormAction::new(DummyJsonClient::new("http://api.test"), transport.clone())
    }

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    fn sent_body(request: &HttpRequest) -> Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn todo_intent_sends_one_put_with_completed_true() {
        let transport =
            Arc::new(ScriptedTransport::default().respond(HttpMethod::Put, TODO_URL, 200, TODO_DONE));
        let result = action(&transport)
            .submit(&form(&[("completed", "on"), ("intent", "todo")]))
            .await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].url, TODO_URL);
        assert_eq!(sent_body(&calls[0]), json!({"completed": true}));

        match result {
            Submission::Success {
                entity: Entity::Todo(todo),
            } => assert!(todo.completed),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unchecked_box_sends_completed_false() {
        let transport =
            Arc::new(ScriptedTransport::default().respond(HttpMethod::Put, TODO_URL, 200, TODO_DONE));
        action(&transport).submit(&form(&[("intent", "todo")])).await;
        assert_eq!(sent_body(&transport.calls()[0]), json!({"completed": false}));
    }

    #[tokio::test]
    async fn todo_remote_failure_is_reported() {
        let transport =
            Arc::new(ScriptedTransport::default().fail(HttpMethod::Put, TODO_URL, "reset by peer"));
        let result = action(&transport)
            .submit(&form(&[("completed", "on"), ("intent", "todo")]))
            .await;

        let Submission::RemoteError(failure) = result else {
            panic!("expected remote error, got {result:?}");
        };
        assert_eq!(failure.errors.form_errors, [REMOTE_FAILURE_MESSAGE]);
        assert_eq!(failure.payload["completed"], "on");
        assert_eq!(failure.payload["intent"], "todo");
    }

    #[tokio::test]
    async fn short_comment_is_rejected_without_request() {
        let transport = Arc::new(ScriptedTransport::default());
        let result = action(&transport)
            .submit(&form(&[("body", "hi"), ("intent", "comment")]))
            .await;

        let Submission::ValidationError(failure) = result else {
            panic!("expected validation error, got {result:?}");
        };
        assert_eq!(failure.errors.field("body"), ["Message is too short"]);
        assert_eq!(failure.payload["body"], "hi");
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_body_is_validated_as_sent() {
        let transport = Arc::new(ScriptedTransport::default().respond(
            HttpMethod::Put,
            COMMENT_URL,
            200,
            COMMENT_ECHO,
        ));
        let result = action(&transport)
            .submit(&form(&[
                ("body", "hello world"),
                ("body", "hi"),
                ("intent", "comment"),
            ]))
            .await;

        let Submission::ValidationError(failure) = result else {
            panic!("expected validation error, got {result:?}");
        };
        assert_eq!(failure.errors.field("body"), ["Message is too short"]);
        assert!(transport.calls().is_empty());

        let result = action(&transport)
            .submit(&form(&[
                ("body", "hi"),
                ("body", "hello world"),
                ("intent", "comment"),
            ]))
            .await;
        assert!(matches!(result, Submission::Success { .. }));
        assert_eq!(sent_body(&transport.calls()[0]), json!({"body": "hello world"}));
    }

    #[tokio::test]
    async fn missing_comment_body_is_required() {
        let transport = Arc::new(ScriptedTransport::default());
        let result = action(&transport).submit(&form(&[("intent", "comment")])).await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.errors.field("body"), ["Message is required"]);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_comment_sends_one_put_and_returns_echo() {
        let transport = Arc::new(ScriptedTransport::default().respond(
            HttpMethod::Put,
            COMMENT_URL,
            200,
            COMMENT_ECHO,
        ));
        let result = action(&transport)
            .submit(&form(&[("body", "hello world"), ("intent", "comment")]))
            .await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(sent_body(&calls[0]), json!({"body": "hello world"}));
        match result {
            Submission::Success {
                entity: Entity::Comment(comment),
            } => assert_eq!(comment.body, "hello world"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_comment_echo_is_a_remote_error() {
        let transport =
            Arc::new(ScriptedTransport::default().respond(HttpMethod::Put, COMMENT_URL, 200, ""));
        let result = action(&transport)
            .submit(&form(&[("body", "hello world"), ("intent", "comment")]))
            .await;
        let Submission::RemoteError(failure) = result else {
            panic!("expected remote error, got {result:?}");
        };
        assert_eq!(failure.errors.form_errors, ["Failed!"]);
        assert!(failure.errors.field_errors.is_empty());
    }

    #[tokio::test]
    async fn echo_of_another_record_is_a_remote_error() {
        let other_todo = TODO_DONE.replacen(r#""id":1,"#, r#""id":2,"#, 1);
        let other_comment = COMMENT_ECHO.replacen(r#""id":1,"#, r#""id":7,"#, 1);
        let transport = Arc::new(
            ScriptedTransport::default()
                .respond(HttpMethod::Put, TODO_URL, 200, &other_todo)
                .respond(HttpMethod::Put, COMMENT_URL, 200, &other_comment),
        );

        for fields in [
            &[("completed", "on"), ("intent", "todo")][..],
            &[("body", "hello world"), ("intent", "comment")][..],
        ] {
            let result = action(&transport).submit(&form(fields)).await;
            let Submission::RemoteError(failure) = result else {
                panic!("expected remote error, got {result:?}");
            };
            assert_eq!(failure.errors.form_errors, [REMOTE_FAILURE_MESSAGE]);
        }
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn unknown_intent_is_ignored() {
        let transport = Arc::new(ScriptedTransport::default());
        for fields in [&[("intent", "delete")][..], &[("body", "hello world")][..]] {
            assert_eq!(action(&transport).submit(&form(fields)).await, Submission::Ignored);
        }
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn submission_serializes_with_kind_tag() {
        let mut errors = ValidationErrors::default();
        errors.add_field("body", "Message is too short");
        let failure = Submission::ValidationError(SubmissionFailure {
            payload: form(&[("body", "hi")]).to_json(),
            errors,
        });
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "kind": "validationError",
                "payload": {"body": "hi"},
                "formErrors": [],
                "fieldErrors": {"body": ["Message is too short"]}
            })
        );
        assert_eq!(
            serde_json::to_value(&Submission::Ignored).unwrap(),
            json!({"kind": "ignored"})
        );
    }
}
