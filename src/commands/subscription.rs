//! Email subscription subcommands.

use std::io::Write;

use clap::Subcommand;
use staffmail::models::{
    FieldUpdate, NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate,
};
use staffmail::rendering::Table;
use staffmail::{Error, Result, SubscriptionBackend};

use super::{OutputFormat, cell, not_found, output_error, report_delete, report_update, write_json};

/// Subscription subcommands.
#[derive(Debug, Subcommand)]
pub enum SubscriptionAction {
    /// List subscriptions, newest first.
    List {
        /// Only subscriptions with this status.
        #[arg(long)]
        status: Option<SubscriptionStatus>,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show one subscription.
    Get {
        /// Subscription id.
        id: i64,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Look up a subscription by email address.
    Find {
        /// Email address.
        email: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Add a subscription.
    Add {
        /// Email address.
        email: String,

        /// Initial status.
        #[arg(long, default_value_t = SubscriptionStatus::Active)]
        status: SubscriptionStatus,

        /// Where the address came from.
        #[arg(long)]
        source: Option<String>,

        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a subscription. Unspecified fields are left unchanged.
    Update {
        /// Subscription id.
        id: i64,

        /// New email address.
        #[arg(long)]
        email: Option<String>,

        /// New status.
        #[arg(long)]
        status: Option<SubscriptionStatus>,

        /// New source.
        #[arg(long, conflicts_with = "clear_source")]
        source: Option<String>,

        /// Remove the source.
        #[arg(long)]
        clear_source: bool,

        /// New notes.
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        /// Remove the notes.
        #[arg(long)]
        clear_notes: bool,
    },

    /// Delete a subscription.
    Delete {
        /// Subscription id.
        id: i64,
    },
}

/// Executes a subscription subcommand.
pub fn cmd_subscription<S>(store: &S, action: SubscriptionAction, out: &mut dyn Write) -> Result<()>
where
    S: SubscriptionBackend + ?Sized,
{
    match action {
        SubscriptionAction::List { status, format } => {
            let rows = store.list_subscriptions(status)?;
            write_rows(out, &rows, format)
        },
        SubscriptionAction::Get { id, format } => {
            let subscription = store
                .get_subscription(id)?
                .ok_or_else(|| not_found("subscription", id))?;
            write_one(out, subscription, format)
        },
        SubscriptionAction::Find { email, format } => {
            let subscription = store.get_subscription_by_email(email.trim())?.ok_or_else(|| {
                Error::InvalidInput(format!("no subscription for '{}'", email.trim()))
            })?;
            write_one(out, subscription, format)
        },
        SubscriptionAction::Add {
            email,
            status,
            source,
            notes,
        } => {
            let subscription = NewSubscription {
                source,
                notes,
                ..NewSubscription::new(email).with_status(status)
            };
            let id = store.create_subscription(&subscription)?;
            writeln!(out, "Created subscription {id}").map_err(output_error)
        },
        SubscriptionAction::Update {
            id,
            email,
            status,
            source,
            clear_source,
            notes,
            clear_notes,
        } => {
            let update = SubscriptionUpdate {
                email: FieldUpdate::from_option(email),
                status,
                source: FieldUpdate::from_parts(source, clear_source),
                notes: FieldUpdate::from_parts(notes, clear_notes),
            };
            let outcome = store.update_subscription(id, &update)?;
            report_update(out, "subscription", id, outcome)
        },
        SubscriptionAction::Delete { id } => {
            let deleted = store.delete_subscription(id)?;
            report_delete(out, "subscription", id, deleted)
        },
    }
}

fn write_one(out: &mut dyn Write, subscription: Subscription, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &subscription),
        OutputFormat::Table => write_rows(out, &[subscription], format),
    }
}

fn write_rows(out: &mut dyn Write, rows: &[Subscription], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, rows);
    }
    let mut table = Table::new(["ID", "EMAIL", "STATUS", "SUBSCRIBED", "SOURCE", "NOTES"]);
    for s in rows {
        table.push_row([
            s.id.to_string(),
            s.email.clone(),
            s.status.to_string(),
            s.subscribed_at.clone(),
            cell(s.source.as_deref()),
            cell(s.notes.as_deref()),
        ]);
    }
    table.write_to(out).map_err(output_error)
}
