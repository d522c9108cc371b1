//! Loaders and form actions for the dummyjson todo demo.
//!
//! # Overview
//! `DummyJsonClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A
//! `Transport` executes the round-trip. `Loader` composes the two into the
//! read paths of each page, `FormAction` into the write path of the form
//! demo.
//!
//! # Design
//! - `DummyJsonClient` is stateless apart from its base URL and delay.
//! - Each remote operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and unit tests run against scripted transports.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod action;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod loader;
pub mod transport;
pub mod types;
pub mod validation;

pub use action::{Entity, FormAction, Submission, SubmissionFailure};
pub use client::DummyJsonClient;
pub use error::{ApiError, LoadError, Resource};
pub use form::{checkbox_checked, FormData, Intent};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use loader::{Loader, FORM_COMMENT_ID, FORM_TODO_ID};
pub use transport::Transport;
pub use types::{Comment, CommentUser, FormContext, Page, Todo, TodoList};
pub use validation::{Schema, ValidationErrors};
