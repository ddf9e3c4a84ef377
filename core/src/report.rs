//! Turning failed calls into error toasts.

use crate::error::ApiError;
use crate::toast::{Notifier, Toast};

/// Shown instead of the raw message when the session has expired.
pub const RELOGIN_PROMPT: &str = "驗證失效，請重新登入";

/// Text the user sees for `error`.
pub fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::SessionExpired { .. } => RELOGIN_PROMPT.to_string(),
        ApiError::Server { message, .. } => format!("錯誤：{message}"),
        other => other.to_string(),
    }
}

/// Log `error`, then raise exactly one error toast for it.
pub fn report_error<N: Notifier + ?Sized>(notifier: &N, error: &ApiError) {
    tracing::error!(status = ?error.status(), error = ?error, "request failed");
    notifier.notify(Toast::error(user_message(error)));
}
