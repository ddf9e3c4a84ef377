//! Wire DTOs for the to-do service.
//!
//! # Design
//! Field names follow the service's camelCase JSON (`createTime`,
//! `newTodo`). Request payloads are the exact bodies the service expects;
//! response envelopes are only used by the optional `parse_*` helpers.
//! The mock-server crate defines its own copies, so integration tests catch
//! schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single to-do item as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub create_time: i64,
    pub content: String,
    pub status: bool,
}

/// Credentials for `POST /users/sign_in`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /users/sign_up`: the login fields plus a nickname,
/// serialized flat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupForm {
    #[serde(flatten)]
    pub credentials: LoginForm,
    pub nickname: String,
}

impl SignupForm {
    pub fn new(email: &str, password: &str, nickname: &str) -> Self {
        Self {
            credentials: LoginForm {
                email: email.to_string(),
                password: password.to_string(),
            },
            nickname: nickname.to_string(),
        }
    }
}

/// Body for creating or rewriting a to-do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoContent {
    pub content: String,
}

/// Body for `PATCH /todos/{id}/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleTodo {
    pub id: String,
}

/// `POST /users/sign_up` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub status: bool,
    pub uid: String,
}

/// `POST /users/sign_in` success body. `exp` is a unix timestamp in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub status: bool,
    pub token: String,
    pub exp: i64,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// `GET /users/checkout` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub status: bool,
    pub uid: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// `GET /todos/` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub status: bool,
    pub data: Vec<Todo>,
}

/// `POST /todos/` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTodo {
    pub status: bool,
    pub new_todo: Todo,
}

/// Generic `{ status, message }` body returned by logout, update, delete
/// and toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub status: bool,
    #[serde(default)]
    pub message: String,
}
