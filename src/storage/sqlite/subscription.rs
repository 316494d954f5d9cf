//! [`SubscriptionBackend`] for [`SqliteStore`].

use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};

use super::sql::UpdateBuilder;
use super::{SqliteStore, op_failed};
use crate::models::{
    FieldUpdate, NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate,
    UpdateOutcome, blank_to_none,
};
use crate::storage::traits::SubscriptionBackend;
use crate::{Result, current_timestamp};

const ENTITY: &str = "email_subscriptions";

const SELECT_COLUMNS: &str =
    "SELECT id, email, status, subscribed_at, source, notes FROM email_subscriptions";

fn subscription_from_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let status: String = row.get(2)?;
    let status = SubscriptionStatus::parse(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown subscription status '{status}'").into(),
        )
    })?;

    Ok(Subscription {
        id: row.get(0)?,
        email: row.get(1)?,
        status,
        subscribed_at: row.get(3)?,
        source: row.get(4)?,
        notes: row.get(5)?,
    })
}

impl SubscriptionBackend for SqliteStore {
    fn create_subscription(&self, subscription: &NewSubscription) -> Result<i64> {
        subscription.validate()?;
        let subscribed_at = current_timestamp();
        self.with_conn(ENTITY, "create", |conn| {
            conn.execute(
                "INSERT INTO email_subscriptions (email, status, subscribed_at, source, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    subscription.email.trim(),
                    subscription.status.as_str(),
                    subscribed_at,
                    blank_to_none(subscription.source.as_deref()),
                    blank_to_none(subscription.notes.as_deref()),
                ],
            )
            .map_err(op_failed("create_subscription"))?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_subscription(&self, id: i64) -> Result<Option<Subscription>> {
        self.with_conn(ENTITY, "get", |conn| {
            conn.query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                subscription_from_row,
            )
            .optional()
            .map_err(op_failed("get_subscription"))
        })
    }

    fn get_subscription_by_email(&self, email: &str) -> Result<Option<Subscription>> {
        self.with_conn(ENTITY, "get_by_email", |conn| {
            conn.query_row(
                &format!("{SELECT_COLUMNS} WHERE email = ?1 ORDER BY id LIMIT 1"),
                params![email.trim()],
                subscription_from_row,
            )
            .optional()
            .map_err(op_failed("get_subscription_by_email"))
        })
    }

    fn list_subscriptions(&self, status: Option<SubscriptionStatus>) -> Result<Vec<Subscription>> {
        self.with_conn(ENTITY, "list", |conn| {
            let filter = if status.is_some() { "WHERE status = ?1" } else { "" };
            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_COLUMNS} {filter} ORDER BY subscribed_at DESC, id DESC"
                ))
                .map_err(op_failed("prepare_list_subscriptions"))?;
            let values: Vec<&str> = status.iter().map(SubscriptionStatus::as_str).collect();
            let rows = stmt
                .query_map(rusqlite::params_from_iter(values), subscription_from_row)
                .map_err(op_failed("list_subscriptions"))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(op_failed("list_subscriptions"))
        })
    }

    fn update_subscription(&self, id: i64, update: &SubscriptionUpdate) -> Result<UpdateOutcome> {
        if update.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }
        update.validate()?;
        let builder = UpdateBuilder::new(ENTITY)
            .text("email", update.email.clone().normalized())
            .text(
                "status",
                FieldUpdate::from_option(update.status.map(|s| s.as_str().to_string())),
            )
            .text("source", update.source.clone().normalized())
            .text("notes", update.notes.clone().normalized());
        self.apply_update(ENTITY, "update_subscription", id, builder)
    }

    fn delete_subscription(&self, id: i64) -> Result<bool> {
        self.delete_row(ENTITY, "delete_subscription", id)
    }
}
