//! Durable session flag: has this device already submitted an email?
//!
//! Single writer, read once at startup. Every failure mode (absent key,
//! malformed JSON, storage unavailable) decodes to the default "not
//! submitted" so the worst outcome is showing the capture form again.

use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "tinker_email_submitted";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSession {
    pub has_submitted_email: bool,
    pub submission_timestamp: Option<String>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self {
            has_submitted_email: false,
            submission_timestamp: None,
        }
    }
}

impl UserSession {
    pub fn submitted(timestamp_iso: String) -> Self {
        Self {
            has_submitted_email: true,
            submission_timestamp: Some(timestamp_iso),
        }
    }
}

pub fn load_session() -> UserSession {
    match LocalStorage::get::<UserSession>(STORAGE_KEY) {
        Ok(session) => session,
        Err(err) => {
            warn!("Falling back to default session state: {}", err);
            UserSession::default()
        }
    }
}

pub fn save_session(session: &UserSession) {
    if let Err(err) = LocalStorage::set(STORAGE_KEY, session) {
        warn!("Failed to persist session state: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_stored_payload_shape() {
        let json = r#"{"hasSubmittedEmail":true,"submissionTimestamp":"2026-01-05T12:00:00Z"}"#;
        let session: UserSession = serde_json::from_str(json).expect("valid payload");
        assert!(session.has_submitted_email);
        assert_eq!(
            session.submission_timestamp.as_deref(),
            Some("2026-01-05T12:00:00Z")
        );
    }

    #[test]
    fn missing_fields_default_to_not_submitted() {
        let session: UserSession = serde_json::from_str("{}").expect("empty object decodes");
        assert_eq!(session, UserSession::default());
        assert!(!session.has_submitted_email);
    }

    #[test]
    fn malformed_payload_is_rejected_by_the_decoder() {
        // load_session maps these cases to the default.
        assert!(serde_json::from_str::<UserSession>("not json").is_err());
        assert!(serde_json::from_str::<UserSession>(r#"{"hasSubmittedEmail":"yes"}"#).is_err());
    }

    #[test]
    fn submitted_constructor_sets_both_fields() {
        let session = UserSession::submitted("2026-02-01T00:00:00Z".to_string());
        assert!(session.has_submitted_email);
        assert!(session.submission_timestamp.is_some());
    }
}
