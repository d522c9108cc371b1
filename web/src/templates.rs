use askama::Template;
use serde_json::Value;
use todo_core::{
    checkbox_checked, Comment, Entity, FormContext, Intent, Page, Submission, Todo, TodoList,
};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// `(path segment, label)` pairs.
    pub links: Vec<(&'static str, &'static str)>,
}

impl Default for HomeTemplate {
    fn default() -> Self {
        Self {
            links: vec![("todo", "Todo list"), ("form", "Form validation")],
        }
    }
}

#[derive(Template)]
#[template(path = "todos.html")]
pub struct TodoListTemplate {
    pub list: TodoList,
    pub limit: u64,
    pub prev_skip: Option<u64>,
    pub next_skip: Option<u64>,
}

impl TodoListTemplate {
    pub fn new(list: TodoList, page: Page) -> Self {
        let prev_skip = (page.skip > 0).then(|| page.skip.saturating_sub(page.limit));
        let shown_to = list.skip.saturating_add(list.todos.len() as u64);
        let next_skip = (!list.todos.is_empty() && shown_to < list.total).then_some(shown_to);
        Self {
            list,
            limit: page.limit,
            prev_skip,
            next_skip,
        }
    }
}

#[derive(Template)]
#[template(path = "todo.html")]
pub struct TodoTemplate {
    pub todo: Todo,
}

/// What the form demo shows: loaded entities, the values the inputs start
/// with, and any messages from the last submission.
#[derive(Debug, Clone)]
pub struct FormView {
    pub todo: Todo,
    pub comment: Comment,
    pub todo_checked: bool,
    pub todo_errors: Vec<String>,
    pub comment_input: String,
    pub comment_field_errors: Vec<String>,
    pub comment_form_errors: Vec<String>,
}

impl FormView {
    pub fn new(context: FormContext) -> Self {
        let FormContext { todo, comment } = context;
        Self {
            todo_checked: todo.completed,
            comment_input: comment.body.clone(),
            todo,
            comment,
            todo_errors: Vec::new(),
            comment_field_errors: Vec::new(),
            comment_form_errors: Vec::new(),
        }
    }

    /// Overlay a submission result: echoes replace the loaded entity,
    /// failures pre-fill the submitted values and carry their messages.
    pub fn apply(mut self, intent: Option<Intent>, submission: &Submission) -> Self {
        match submission {
            Submission::Success {
                entity: Entity::Todo(todo),
            } => {
                self.todo_checked = todo.completed;
                self.todo = todo.clone();
            }
            Submission::Success {
                entity: Entity::Comment(comment),
            } => {
                self.comment_input = comment.body.clone();
                self.comment = comment.clone();
            }
            Submission::ValidationError(failure) | Submission::RemoteError(failure) => {
                let submitted = |name: &str| failure.payload.get(name).and_then(Value::as_str);
                match intent {
                    Some(Intent::Todo) => {
                        self.todo_checked = checkbox_checked(submitted("completed"));
                        self.todo_errors = failure.errors.form_errors.clone();
                    }
                    Some(Intent::Comment) => {
                        self.comment_input = submitted("body").unwrap_or_default().to_string();
                        self.comment_field_errors = failure.errors.field("body").to_vec();
                        self.comment_form_errors = failure.errors.form_errors.clone();
                    }
                    None => {}
                }
            }
            Submission::Ignored => {}
        }
        self
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub view: FormView,
}

/// The form sections alone, swapped in place by htmx.
#[derive(Template)]
#[template(path = "form_sections.html")]
pub struct FormSectionsTemplate {
    pub view: FormView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub details: String,
    pub reason: String,
    pub diagnostic: String,
}
