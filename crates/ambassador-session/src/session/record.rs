//! The persisted session record.

use std::time::Duration;

use ambassador_core::types::Subject;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Default lifetime of a session: 7 days.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Authenticated subject plus its absolute expiry.
///
/// Stored as `{"subject": ..., "expiryTimestamp": <epoch ms>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub subject: Subject,
    /// Expiry in milliseconds since the Unix epoch.
    pub expiry_timestamp: i64,
}

impl SessionRecord {
    /// Creates a record for `subject` expiring `ttl` after `now`.
    pub fn new(subject: Subject, now: Timestamp, ttl: Duration) -> Self {
        let ttl = SignedDuration::try_from(ttl).unwrap_or(SignedDuration::MAX);
        let expiry = now.checked_add(ttl).unwrap_or(Timestamp::MAX);

        Self {
            subject,
            expiry_timestamp: expiry.as_millisecond(),
        }
    }

    /// Returns `true` while `now` is strictly before the expiry.
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        now.as_millisecond() < self.expiry_timestamp
    }

    /// Returns the expiry as a timestamp.
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.expiry_timestamp).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let record = SessionRecord {
            subject: Subject::default(),
            expiry_timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["expiryTimestamp"], 1_700_000_000_000_i64);
        assert!(json.get("subject").is_some());
    }

    #[test]
    fn test_validity_boundary() {
        let now = Timestamp::from_millisecond(1_000).unwrap();
        let record = SessionRecord::new(Subject::default(), now, Duration::from_millis(500));

        assert_eq!(record.expiry_timestamp, 1_500);
        assert!(record.is_valid_at(Timestamp::from_millisecond(1_499).unwrap()));
        assert!(!record.is_valid_at(Timestamp::from_millisecond(1_500).unwrap()));
    }
}
