//! Client bindings for the hosted to-do list service.
//!
//! # Overview
//! Wraps the service's REST endpoints (sign-up, sign-in, sign-out, session
//! check, to-do CRUD and toggle) together with session-token storage and
//! error toasts.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network, so every request shape is a pure
//!   function of its inputs.
//! - `Api` is the async facade: one request per call, executed through a
//!   pluggable [`Transport`], with the stored token attached.
//! - The cookie store and the notifier are traits so hosts (a browser, a
//!   TUI, a test) inject their own; in-memory versions ship here.
//! - Failures are classified once into [`ApiError`]; [`report_error`] turns
//!   one into a user-facing toast.

pub mod api;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod http;
pub mod report;
pub mod toast;
pub mod transport;
pub mod types;

pub use api::{Api, Todos, Users};
pub use client::TodoClient;
pub use config::ClientConfig;
pub use cookie::{CookieStore, MemoryCookieJar, SessionCookie};
pub use error::{ApiError, SESSION_EXPIRED};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use report::{report_error, user_message, RELOGIN_PROMPT};
pub use toast::{MemoryNotifier, Notifier, Toast, ToastKind, ToastOptions, TracingNotifier};
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use types::{LoginForm, SignupForm, Todo};
