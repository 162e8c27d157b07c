//! Email validation and the one-shot remote insert.

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use std::fmt;

const MAX_EMAIL_LENGTH: usize = 254;

/// Defensive cap on the insert call; the backend itself sets no deadline.
const SUBMIT_TIMEOUT_MS: u32 = 10_000;

const DEFAULT_ENDPOINT: &str = "api/emails";

pub const MSG_REQUIRED: &str = "Por favor, ingresa tu correo electrónico.";
pub const MSG_TOO_LONG: &str =
    "El correo electrónico es demasiado largo (máximo 254 caracteres).";
pub const MSG_INVALID: &str = "Por favor, ingresa un correo electrónico válido.";
pub const MSG_SUBMIT_FAILED: &str =
    "Hubo un problema al enviar tu correo. Por favor, intenta de nuevo.";

/// Validates a raw email input. Returns the user-facing error message, or
/// `None` when the address is acceptable. Check order is fixed: empty before
/// length before shape, so the most specific message never masks the
/// empty-input case.
pub fn validate_email(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Some(MSG_REQUIRED);
    }
    // Character count, not byte count: a multibyte address within the cap
    // must not be rejected.
    if trimmed.chars().count() > MAX_EMAIL_LENGTH {
        return Some(MSG_TOO_LONG);
    }
    if !looks_like_email(trimmed) {
        return Some(MSG_INVALID);
    }
    None
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot in
/// the domain with non-empty parts on both sides.
fn looks_like_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Serialize)]
struct EmailEntry {
    email: String,
    timestamp: String,
    user_agent: String,
}

#[derive(Debug)]
pub enum SubmitError {
    Network(String),
    Status(u16),
    Timeout,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Network(msg) => write!(f, "network error: {msg}"),
            SubmitError::Status(code) => write!(f, "server responded with HTTP {code}"),
            SubmitError::Timeout => write!(f, "submission timed out"),
        }
    }
}

fn endpoint() -> &'static str {
    option_env!("SNEAKER_EMAILS_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}

pub(crate) fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

fn client_user_agent() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default()
}

/// Sends the validated address to the remote sink. One attempt, no retry;
/// the caller shows a generic message on any failure.
pub async fn submit_email(email: &str) -> Result<(), SubmitError> {
    let entry = EmailEntry {
        email: email.trim().to_string(),
        timestamp: now_iso(),
        user_agent: client_user_agent(),
    };

    let request = async {
        let response = Request::post(endpoint())
            .json(&entry)
            .map_err(|err| SubmitError::Network(err.to_string()))?
            .send()
            .await
            .map_err(|err| SubmitError::Network(err.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SubmitError::Status(response.status()))
        }
    };
    let deadline = TimeoutFuture::new(SUBMIT_TIMEOUT_MS);
    pin_mut!(request, deadline);

    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SubmitError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_required_error() {
        assert_eq!(validate_email(""), Some(MSG_REQUIRED));
        assert_eq!(validate_email("   "), Some(MSG_REQUIRED));
    }

    #[test]
    fn overlong_input_is_too_long_error() {
        // 243 + 1 + 11 = 255 characters, one past the cap.
        let local = "a".repeat(243);
        let overlong = format!("{local}@example.com");
        assert_eq!(overlong.chars().count(), MAX_EMAIL_LENGTH + 1);
        assert_eq!(validate_email(&overlong), Some(MSG_TOO_LONG));
    }

    #[test]
    fn length_cap_counts_characters_not_bytes() {
        // 150 two-byte characters put the byte length past the cap while
        // the character count stays well under it.
        let local = "ü".repeat(150);
        let address = format!("{local}@mail.com");
        assert!(address.len() > MAX_EMAIL_LENGTH);
        assert!(address.chars().count() < MAX_EMAIL_LENGTH);
        assert_eq!(validate_email(&address), None);

        let wide_local = "ü".repeat(246);
        let wide = format!("{wide_local}@mail.com");
        assert_eq!(validate_email(&wide), Some(MSG_TOO_LONG));
    }

    #[test]
    fn domain_without_dot_is_invalid() {
        assert_eq!(validate_email("a@b"), Some(MSG_INVALID));
    }

    #[test]
    fn malformed_shapes_are_invalid() {
        assert_eq!(validate_email("plainaddress"), Some(MSG_INVALID));
        assert_eq!(validate_email("two@@signs.com"), Some(MSG_INVALID));
        assert_eq!(validate_email("@missing-local.com"), Some(MSG_INVALID));
        assert_eq!(validate_email("missing-domain@"), Some(MSG_INVALID));
        assert_eq!(validate_email("spaces in@local.com"), Some(MSG_INVALID));
        assert_eq!(validate_email("trailing@dot."), Some(MSG_INVALID));
        assert_eq!(validate_email("leading@.dot"), Some(MSG_INVALID));
    }

    #[test]
    fn well_formed_addresses_pass() {
        assert_eq!(validate_email("a@b.com"), None);
        assert_eq!(validate_email("user.name+tag@mail.example.co"), None);
    }

    #[test]
    fn input_is_trimmed_before_checks() {
        assert_eq!(validate_email(" a@b.com "), None);
    }
}
