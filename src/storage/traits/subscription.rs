//! Email subscription storage trait.

use crate::Result;
use crate::models::{
    NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate, UpdateOutcome,
};

/// Trait for email subscription storage backends.
pub trait SubscriptionBackend: Send + Sync {
    /// Creates a subscription stamped with the current time and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is blank or storage cannot be accessed.
    fn create_subscription(&self, subscription: &NewSubscription) -> Result<i64>;

    /// Gets a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_subscription(&self, id: i64) -> Result<Option<Subscription>>;

    /// Gets the first subscription whose email matches exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_subscription_by_email(&self, email: &str) -> Result<Option<Subscription>>;

    /// Lists subscriptions, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn list_subscriptions(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscription>>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the statement is rejected.
    fn update_subscription(&self, id: i64, update: &SubscriptionUpdate) -> Result<UpdateOutcome>;

    /// Deletes a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn delete_subscription(&self, id: i64) -> Result<bool>;
}
