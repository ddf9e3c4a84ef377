//! Stateless HTTP request builder and response parser for the to-do service.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Every operation has a `build_*`
//! method that produces an `HttpRequest`, and most have a `parse_*` method
//! that decodes the success body. Neither side touches the network, so the
//! request shape is a pure function of the inputs. Authorization is not
//! applied here; [`Api`](crate::api::Api) adds it from the cookie store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CheckoutResponse, CreatedTodo, LoginForm, LoginResponse, SignupForm, SignupResponse,
    StatusMessage, Todo, TodoContent, TodoList, ToggleTodo,
};

/// Synchronous, stateless client for the to-do service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self, endpoint: &str) -> String {
        format!("{}/users/{endpoint}", self.base_url)
    }

    fn todos_url(&self, rest: &str) -> String {
        format!("{}/todos/{rest}", self.base_url)
    }

    // -- users --------------------------------------------------------------

    pub fn build_signup(&self, form: &SignupForm) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.users_url("sign_up"), form)
    }

    pub fn build_login(&self, form: &LoginForm) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.users_url("sign_in"), form)
    }

    /// Logout posts an empty JSON object.
    pub fn build_logout(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.users_url("sign_out"),
            headers: json_headers(),
            body: Some("{}".to_string()),
        }
    }

    pub fn build_check_auth(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.users_url("checkout"))
    }

    // -- todos --------------------------------------------------------------

    pub fn build_list_todos(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.todos_url(""))
    }

    pub fn build_create_todo(&self, content: &str) -> Result<HttpRequest, ApiError> {
        let body = TodoContent {
            content: content.to_string(),
        };
        json_request(HttpMethod::Post, self.todos_url(""), &body)
    }

    pub fn build_update_todo(&self, id: &str, content: &str) -> Result<HttpRequest, ApiError> {
        let body = TodoContent {
            content: content.to_string(),
        };
        json_request(HttpMethod::Put, self.todos_url(id), &body)
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.todos_url(id))
    }

    pub fn build_toggle_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        let body = ToggleTodo { id: id.to_string() };
        json_request(HttpMethod::Patch, self.todos_url(&format!("{id}/toggle")), &body)
    }

    // -- parsers ------------------------------------------------------------

    pub fn parse_signup(&self, response: HttpResponse) -> Result<SignupResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<StatusMessage, ApiError> {
        parse_json(response)
    }

    pub fn parse_check_auth(&self, response: HttpResponse) -> Result<CheckoutResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json::<TodoList>(response).map(|list| list.data)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json::<CreatedTodo>(response).map(|created| created.new_todo)
    }

    /// Update, delete and toggle all answer with `{ status, message }`.
    pub fn parse_status(&self, response: HttpResponse) -> Result<StatusMessage, ApiError> {
        parse_json(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn bare_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    path: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: json_headers(),
        body: Some(body),
    })
}

/// Turn a non-2xx response into its classified error.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::from_response(response))
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
