//! User types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::record::{self, Record};

/// A storefront user.
///
/// Users are lazily created on first lookup. The core only consumes `id` for
/// order attribution; bonus and referral semantics live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// External user identifier.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Accumulated bonus points, never negative.
    pub bonus: i64,
    /// Ids of users referred by this one.
    pub referrals: Vec<i64>,
    /// This user's shareable referral code.
    #[serde(rename = "referralCode")]
    pub referral_code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied user fields for updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    /// Display name.
    pub username: String,
    /// Accumulated bonus points.
    #[serde(default)]
    pub bonus: i64,
    /// Ids of referred users.
    #[serde(default)]
    pub referrals: Vec<i64>,
    /// Shareable referral code.
    #[serde(rename = "referralCode", default)]
    pub referral_code: String,
}

impl UserDraft {
    /// Checks field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the bonus is negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bonus < 0 {
            return Err(DomainError::Validation("bonus must not be negative".into()));
        }
        Ok(())
    }
}

impl User {
    /// The default record materialized on first lookup of an unknown id.
    #[must_use]
    pub fn with_defaults(id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: format!("user_{id}"),
            bonus: 0,
            referrals: Vec::new(),
            referral_code: format!("REF{id:06}"),
            created_at: now,
            updated_at: now,
        }
    }

    /// Flattens the user into a stored record. Referrals are embedded as a
    /// serialized JSON value within the record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let referrals = serde_json::to_string(&self.referrals).unwrap_or_else(|_| "[]".to_owned());
        Record::from([
            ("id".to_owned(), self.id.to_string()),
            ("username".to_owned(), self.username.clone()),
            ("bonus".to_owned(), self.bonus.to_string()),
            ("referrals".to_owned(), referrals),
            ("referralCode".to_owned(), self.referral_code.clone()),
            ("created_at".to_owned(), self.created_at.to_rfc3339()),
            ("updated_at".to_owned(), self.updated_at.to_rfc3339()),
        ])
    }

    /// Reconstructs a user from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when required fields are absent or
    /// malformed.
    pub fn from_record(rec: &Record) -> Result<Self, DomainError> {
        let referrals: Vec<i64> = serde_json::from_str(record::str_or(rec, "referrals", "[]"))
            .map_err(|e| DomainError::Validation(format!("malformed referrals: {e}")))?;
        let id = record::require_i64(rec, "id")?;
        Ok(Self {
            id,
            username: record::str_or(rec, "username", "").to_owned(),
            bonus: record::i64_or(rec, "bonus", 0)?,
            referrals,
            referral_code: record::str_or(rec, "referralCode", "").to_owned(),
            created_at: record::require_datetime(rec, "created_at")?,
            updated_at: record::require_datetime(rec, "updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_match_first_lookup_contract() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let user = User::with_defaults(42, now);
        assert_eq!(user.username, "user_42");
        assert_eq!(user.bonus, 0);
        assert!(user.referrals.is_empty());
        assert_eq!(user.referral_code, "REF000042");
    }

    #[test]
    fn test_record_round_trip_keeps_referrals() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut user = User::with_defaults(42, now);
        user.referrals = vec![7, 9];
        user.bonus = 150;
        let restored = User::from_record(&user.to_record()).unwrap();
        assert_eq!(restored.referrals, vec![7, 9]);
        assert_eq!(restored.bonus, 150);
        assert_eq!(restored.referral_code, "REF000042");
    }
}
