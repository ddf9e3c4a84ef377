//! Session token storage.
//!
//! The client keeps exactly one piece of state between calls: the token
//! handed out by sign-in. Hosts plug in their own [`CookieStore`] (a browser
//! cookie jar, a keychain, a file); [`MemoryCookieJar`] is the in-process
//! version and also knows how to render and read the browser cookie string.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::config::{ClientConfig, DEFAULT_COOKIE_NAME};

/// How long a stored token stays valid.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Storage for the single session token.
///
/// `get` returns `None` when no token is stored, when the stored one has
/// expired, and when it is the empty string.
pub trait CookieStore: Send + Sync {
    /// Store `token`, replacing any previous one, expiring 24h from now.
    fn set(&self, token: &str);
    fn get(&self) -> Option<String>;
    fn clear(&self);
}

/// A named cookie value with an absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
}

impl SessionCookie {
    /// Cookie for `value` issued at `now`.
    pub fn issue(name: &str, value: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            expires: now + Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }

    /// `document.cookie` assignment string, e.g.
    /// `hexschoolTodoToken=abc;expires=Thu, 02 Jan 2025 00:00:00 GMT`.
    pub fn to_header(&self) -> String {
        format!(
            "{}={};expires={}",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )
    }
}

/// Assignment string that blanks the cookie named `name`.
pub fn removal_header(name: &str) -> String {
    format!("{name}=")
}

/// Value of `name` in a `a=b; c=d` cookie string, or `""` when it is not
/// present. Later duplicates win.
pub fn read_cookie(header: &str, name: &str) -> String {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| key.trim() == name)
        .last()
        .map(|(_, value)| value.trim_start().to_string())
        .unwrap_or_default()
}

/// In-process cookie jar holding at most one session cookie.
#[derive(Debug)]
pub struct MemoryCookieJar {
    name: String,
    cookie: Mutex<Option<SessionCookie>>,
}

impl MemoryCookieJar {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cookie: Mutex::new(None),
        }
    }

    /// Jar named after `config.cookie_name`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.cookie_name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_at(&self, token: &str, now: DateTime<Utc>) {
        let cookie = SessionCookie::issue(&self.name, token, now);
        tracing::debug!(name = %self.name, expires = %cookie.expires, "session cookie stored");
        *self.slot() = Some(cookie);
    }

    pub fn get_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.slot()
            .as_ref()
            .filter(|cookie| !cookie.is_expired_at(now) && !cookie.value.is_empty())
            .map(|cookie| cookie.value.clone())
    }

    /// The stored cookie, expired or not.
    pub fn cookie(&self) -> Option<SessionCookie> {
        self.slot().clone()
    }

    /// Current `document.cookie`-style assignment for this jar.
    pub fn header(&self) -> String {
        match self.slot().as_ref() {
            Some(cookie) => cookie.to_header(),
            None => removal_header(&self.name),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<SessionCookie>> {
        self.cookie.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME)
    }
}

impl CookieStore for MemoryCookieJar {
    fn set(&self, token: &str) {
        self.set_at(token, Utc::now());
    }

    fn get(&self) -> Option<String> {
        self.get_at(Utc::now())
    }

    fn clear(&self) {
        tracing::debug!(name = %self.name, "session cookie cleared");
        *self.slot() = None;
    }
}
