//! Authenticated subjects and login payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::EntityId;
use crate::{Error, ErrorKind, Result};

/// The authenticated administrator plus the opaque bearer token.
///
/// Fields the backend sends beyond the ones named here are kept in `extra`
/// and persisted with the session unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subject {
    /// Returns `true` if the subject carries an identifier.
    ///
    /// Subjects without one are never persisted.
    pub fn has_identity(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.as_str().is_empty())
    }

    /// Returns the name to display for this subject.
    pub fn display_name(&self) -> Option<&str> {
        self.admin_name.as_deref().or(self.user_name.as_deref())
    }
}

/// Login form input.
#[derive(Clone, Default, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginCredentials {
    /// Creates a new set of credentials.
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Envelope returned by the login endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Subject>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Extracts the subject, or an authentication error carrying the
    /// server's reason.
    pub fn into_subject(self) -> Result<Subject> {
        match self.data {
            Some(subject) if self.success => Ok(subject),
            _ => {
                let reason = self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| "Login failed".to_owned());
                Err(Error::new(ErrorKind::Authentication).with_message(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_identity() {
        assert!(!Subject::default().has_identity());
        let subject = Subject {
            id: Some(EntityId::from(7)),
            ..Default::default()
        };
        assert!(subject.has_identity());
    }

    #[test]
    fn test_subject_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": 7,
            "adminName": "root",
            "token": "jwt",
            "role": "super",
            "email": "root@example.com",
        });
        let subject: Subject = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(subject.extra["role"], "super");
        assert_eq!(subject.display_name(), Some("root"));

        assert_eq!(serde_json::to_value(&subject).unwrap(), raw);
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = LoginCredentials::new("root", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("root"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_login_response_failure_carries_reason() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "success": false,
            "error": "Invalid password"
        }))
        .unwrap();
        let error = response.into_subject().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.message(), "Invalid password");
    }

    #[test]
    fn test_login_response_success_requires_data() {
        let response: LoginResponse =
            serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
        assert!(response.into_subject().is_err());
    }
}
