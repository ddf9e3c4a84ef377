//! Async facade over the to-do service.
//!
//! # Design
//! `Api` groups the endpoints into two namespaces, [`Users`] and [`Todos`].
//! Each call builds one request with [`TodoClient`], attaches the stored
//! session token, executes it once and returns the raw response. Non-2xx
//! answers come back as a classified [`ApiError`]; nothing is retried,
//! cached or unwrapped here. Decoding the body is left to the caller
//! (see the `parse_*` helpers on `TodoClient`).

use crate::client::{check_status, TodoClient};
use crate::config::ClientConfig;
use crate::cookie::{CookieStore, MemoryCookieJar};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{LoginForm, LoginResponse, SignupForm};

/// Header the service reads the session token from.
pub const AUTHORIZATION: &str = "authorization";

#[derive(Debug)]
pub struct Api<T, C> {
    client: TodoClient,
    transport: T,
    cookies: C,
}

impl<T: Transport, C: CookieStore> Api<T, C> {
    pub fn new(config: &ClientConfig, transport: T, cookies: C) -> Self {
        Self {
            client: TodoClient::from_config(config),
            transport,
            cookies,
        }
    }

    pub fn users(&self) -> Users<'_, T, C> {
        Users { api: self }
    }

    pub fn todos(&self) -> Todos<'_, T, C> {
        Todos { api: self }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a session token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.cookies.get().is_some()
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = match self.cookies.get() {
            Some(token) => request.with_header(AUTHORIZATION, &token),
            None => request,
        };
        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        let response = self.transport.execute(request).await?;
        check_status(&response)?;
        Ok(response)
    }
}

impl<T: Transport> Api<T, MemoryCookieJar> {
    /// Facade whose in-memory jar is named after `config.cookie_name`.
    pub fn with_memory_jar(config: &ClientConfig, transport: T) -> Self {
        Self::new(config, transport, MemoryCookieJar::from_config(config))
    }
}

#[cfg(feature = "reqwest")]
impl<C: CookieStore> Api<crate::transport::ReqwestTransport, C> {
    /// Facade for the hosted service over a default `reqwest` client.
    pub fn hosted(cookies: C) -> Self {
        Self::new(&ClientConfig::default(), Default::default(), cookies)
    }
}

/// `/users` endpoints.
#[derive(Debug)]
pub struct Users<'a, T, C> {
    api: &'a Api<T, C>,
}

impl<T: Transport, C: CookieStore> Users<'_, T, C> {
    pub async fn signup(&self, form: &SignupForm) -> Result<HttpResponse, ApiError> {
        let request = self.api.client.build_signup(form)?;
        self.api.send(request).await
    }

    pub async fn login(&self, form: &LoginForm) -> Result<HttpResponse, ApiError> {
        let request = self.api.client.build_login(form)?;
        self.api.send(request).await
    }

    pub async fn logout(&self) -> Result<HttpResponse, ApiError> {
        self.api.send(self.api.client.build_logout()).await
    }

    pub async fn check_auth(&self) -> Result<HttpResponse, ApiError> {
        self.api.send(self.api.client.build_check_auth()).await
    }

    /// Log in and keep the issued token in the cookie store.
    pub async fn start_session(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        let response = self.login(form).await?;
        let login = self.api.client.parse_login(response)?;
        self.api.cookies.set(&login.token);
        Ok(login)
    }

    /// Log out and drop the stored token, whether or not the server call
    /// succeeded.
    pub async fn end_session(&self) -> Result<HttpResponse, ApiError> {
        let result = self.logout().await;
        self.api.cookies.clear();
        result
    }
}

/// `/todos` endpoints.
#[derive(Debug)]
pub struct Todos<'a, T, C> {
    api: &'a Api<T, C>,
}

impl<T: Transport, C: CookieStore> Todos<'_, T, C> {
    pub async fn list(&self) -> Result<HttpResponse, ApiError> {
        self.api.send(self.api.client.build_list_todos()).await
    }

    pub async fn create(&self, content: &str) -> Result<HttpResponse, ApiError> {
        let request = self.api.client.build_create_todo(content)?;
        self.api.send(request).await
    }

    pub async fn update(&self, id: &str, content: &str) -> Result<HttpResponse, ApiError> {
        let request = self.api.client.build_update_todo(id, content)?;
        self.api.send(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<HttpResponse, ApiError> {
        self.api.send(self.api.client.build_delete_todo(id)).await
    }

    pub async fn toggle(&self, id: &str) -> Result<HttpResponse, ApiError> {
        let request = self.api.client.build_toggle_todo(id)?;
        self.api.send(request).await
    }
}
