use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::dates::parse_timestamp;
use crate::config::{IntakeConfig, DEFAULT_EXPIRING_SOON_DAYS};

/// Derived validity of a certificate at a given instant. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityStatus {
    Unknown,
    Expired,
    ExpiringSoon,
    Valid,
}

/// Display languages supported at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    English,
    Vietnamese,
}

impl ValidityStatus {
    pub fn display(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ValidityStatus::Valid, Locale::English) => "Valid",
            (ValidityStatus::ExpiringSoon, Locale::English) => "Expiring Soon",
            (ValidityStatus::Expired, Locale::English) => "Expired",
            (ValidityStatus::Unknown, Locale::English) => "Unknown",
            (ValidityStatus::Valid, Locale::Vietnamese) => "Còn hiệu lực",
            (ValidityStatus::ExpiringSoon, Locale::Vietnamese) => "Sắp hết hạn",
            (ValidityStatus::Expired, Locale::Vietnamese) => "Hết hạn",
            (ValidityStatus::Unknown, Locale::Vietnamese) => "Không xác định",
        }
    }
}

/// Grace days granted after expiry before a certificate flips to `Expired`, by term type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GracePolicy {
    days_by_type: BTreeMap<String, u32>,
    default_days: u32,
}

impl GracePolicy {
    pub const FULL_TERM: &'static str = "Full Term";
    pub const INTERIM: &'static str = "Interim";
    pub const PROVISIONAL: &'static str = "Provisional";
    pub const SHORT_TERM: &'static str = "Short Term";

    pub fn standard() -> Self {
        let days_by_type = [
            Self::FULL_TERM,
            Self::INTERIM,
            Self::PROVISIONAL,
            Self::SHORT_TERM,
        ]
        .into_iter()
        .map(|name| (name.to_uppercase(), 0))
        .collect();

        Self {
            days_by_type,
            default_days: 0,
        }
    }

    pub fn with_overrides(mut self, overrides: &BTreeMap<String, u32>) -> Self {
        for (name, days) in overrides {
            self.days_by_type.insert(name.trim().to_uppercase(), *days);
        }
        self
    }

    pub fn grace_days(&self, cert_type: Option<&str>) -> u32 {
        cert_type
            .map(|name| name.trim().to_uppercase())
            .and_then(|key| self.days_by_type.get(&key).copied())
            .unwrap_or(self.default_days)
    }
}

impl Default for GracePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Derives `ValidityStatus` from an expiry and the current instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCalculator {
    expiring_soon: Duration,
    grace: GracePolicy,
}

impl Default for StatusCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRING_SOON_DAYS, GracePolicy::standard())
    }
}

impl From<&IntakeConfig> for StatusCalculator {
    fn from(config: &IntakeConfig) -> Self {
        Self::new(
            config.expiring_soon_days,
            GracePolicy::standard().with_overrides(&config.grace_overrides),
        )
    }
}

impl StatusCalculator {
    pub fn new(expiring_soon_days: u32, grace: GracePolicy) -> Self {
        Self {
            expiring_soon: Duration::days(i64::from(expiring_soon_days)),
            grace,
        }
    }

    /// Total over its inputs: absent or unparseable expiry is `Unknown`.
    pub fn compute_status(
        &self,
        expiry: Option<&str>,
        cert_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> ValidityStatus {
        match expiry.and_then(parse_timestamp) {
            Some(expiry) => self.status_at(expiry, cert_type, now),
            None => ValidityStatus::Unknown,
        }
    }

    /// Ignores grace periods; the plain three-way split.
    pub fn basic_status(&self, expiry: DateTime<Utc>, now: DateTime<Utc>) -> ValidityStatus {
        if expiry < now {
            ValidityStatus::Expired
        } else if expiry - now <= self.expiring_soon {
            ValidityStatus::ExpiringSoon
        } else {
            ValidityStatus::Valid
        }
    }

    /// A certificate inside its grace window reports `ExpiringSoon` rather than `Expired`.
    pub fn status_at(
        &self,
        expiry: DateTime<Utc>,
        cert_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> ValidityStatus {
        let grace = Duration::days(i64::from(self.grace.grace_days(cert_type)));
        let deadline = expiry.checked_add_signed(grace).unwrap_or(expiry);
        if deadline < now {
            return ValidityStatus::Expired;
        }
        match self.basic_status(expiry, now) {
            ValidityStatus::Expired => ValidityStatus::ExpiringSoon,
            status => status,
        }
    }
}
