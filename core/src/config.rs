//! Client configuration.

/// Host of the public to-do service.
pub const DEFAULT_BASE_URL: &str = "https://todolist-api.hexschool.io";

/// Name of the cookie holding the session token.
pub const DEFAULT_COOKIE_NAME: &str = "hexschoolTodoToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; `/users` and `/todos` are appended to it.
    pub base_url: String,
    pub cookie_name: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_cookie_name(mut self, name: &str) -> Self {
        self.cookie_name = name.to_string();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}
