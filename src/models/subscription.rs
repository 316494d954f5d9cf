//! Email subscription records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::update::{FieldUpdate, require_non_empty};
use crate::{Error, Result};

/// Delivery status of a subscription.
///
/// Controls list filtering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Receiving mail.
    #[default]
    Active,
    /// Opted out.
    Unsubscribed,
    /// Mail to this address bounced.
    Bounced,
}

impl SubscriptionStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Unsubscribed, Self::Bounced];

    /// Returns the status as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Unsubscribed => "unsubscribed",
            Self::Bounced => "bounced",
        }
    }

    /// Parses a status, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "unsubscribed" => Some(Self::Unsubscribed),
            "bounced" => Some(Self::Bounced),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown subscription status '{s}' (expected active, unsubscribed, or bounced)"
            ))
        })
    }
}

/// An email subscription row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Auto-increment identifier.
    pub id: i64,
    /// Subscriber address. Not unique.
    pub email: String,
    /// Delivery status.
    pub status: SubscriptionStatus,
    /// Creation time, `YYYY-MM-DD HH:MM:SS` UTC.
    pub subscribed_at: String,
    /// Where the address came from.
    pub source: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Fields for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    /// Subscriber address (required).
    pub email: String,
    /// Delivery status.
    pub status: SubscriptionStatus,
    /// Where the address came from.
    pub source: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewSubscription {
    /// Creates an active subscription for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: SubscriptionStatus::Active,
            source: None,
            notes: None,
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the email is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the email is blank.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("email", &self.email).map(|_| ())
    }
}

/// Partial update for a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    /// New address. Cannot be cleared.
    pub email: FieldUpdate<String>,
    /// New status.
    pub status: Option<SubscriptionStatus>,
    /// New source.
    pub source: FieldUpdate<String>,
    /// New notes.
    pub notes: FieldUpdate<String>,
}

impl SubscriptionUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_keep()
            && self.status.is_none()
            && self.source.is_keep()
            && self.notes.is_keep()
    }

    /// Checks the email is not cleared or blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if it is.
    pub fn validate(&self) -> Result<()> {
        self.email.require_text("email")
    }
}
