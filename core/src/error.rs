//! Error types for the remote API client and the loaders built on it.
//!
//! # Design
//! `ApiError` describes what went wrong with one remote exchange. `NotFound`
//! and `EmptyBody` both mean "nothing usable came back" and the loaders fold
//! them into `LoadError::NotFound`; every other variant is a remote failure
//! and surfaces as `LoadError::Remote`.

use std::fmt;

use thiserror::Error;

/// Errors returned by `DummyJsonClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// 2xx with an empty or `null` body.
    #[error("response body was empty")]
    EmptyBody,

    /// The server returned a status other than 200 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The body parsed but contradicts the request (e.g. a different id).
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The round-trip itself failed (connect, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for the two "nothing usable came back" variants.
    pub fn is_absent(&self) -> bool {
        matches!(self, ApiError::NotFound | ApiError::EmptyBody)
    }

    /// `UnexpectedPayload` unless the remote answered for the `kind` record
    /// that was requested.
    pub fn check_id(kind: &str, requested: u64, received: u64) -> Result<(), ApiError> {
        if requested == received {
            Ok(())
        } else {
            Err(ApiError::UnexpectedPayload(format!(
                "requested {kind} {requested}, received {kind} {received}"
            )))
        }
    }
}

/// A remote resource, named the way error pages refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    TodoList,
    Todo(u64),
    /// A todo route parameter that is not a valid id.
    TodoRef(String),
    Comment(u64),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::TodoList => f.write_str("TODO list"),
            Resource::Todo(id) => write!(f, "TODO-{id}"),
            Resource::TodoRef(raw) => write!(f, "TODO-{raw}"),
            Resource::Comment(id) => write!(f, "COMMENT-{id}"),
        }
    }
}

/// Errors returned by `Loader`. All of them are terminal for the
/// navigation that triggered the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{resource} Not Found")]
    NotFound { resource: Resource },

    #[error("Missing {0} param")]
    MissingParameter(&'static str),

    #[error("remote service error")]
    Remote(#[source] ApiError),
}

impl LoadError {
    /// Classify a failed exchange for `resource`.
    pub fn from_api(resource: Resource, err: ApiError) -> Self {
        if err.is_absent() {
            LoadError::NotFound { resource }
        } else {
            LoadError::Remote(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_and_404_both_become_not_found() {
        for err in [ApiError::NotFound, ApiError::EmptyBody] {
            let load = LoadError::from_api(Resource::Todo(7), err);
            assert!(matches!(
                load,
                LoadError::NotFound {
                    resource: Resource::Todo(7)
                }
            ));
        }
    }

    #[test]
    fn transport_failure_is_not_folded_into_not_found() {
        let load = LoadError::from_api(
            Resource::Comment(1),
            ApiError::Transport("connection refused".to_string()),
        );
        assert!(matches!(load, LoadError::Remote(ApiError::Transport(_))));
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let load = LoadError::NotFound {
            resource: Resource::Comment(1),
        };
        assert_eq!(load.to_string(), "COMMENT-1 Not Found");
        assert_eq!(
            LoadError::MissingParameter("todoId").to_string(),
            "Missing todoId param"
        );
    }
}
