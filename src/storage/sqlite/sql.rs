//! SQL helpers for partial updates.
//!
//! [`UpdateBuilder`] turns per-field tri-state changes into a single
//! parameterized `UPDATE ... SET ... WHERE id = ?N` statement with numbered
//! parameters. Column names are always compile-time constants; only values are
//! bound.

use crate::models::FieldUpdate;
use rusqlite::types::Value;

/// Builder for a parameterized partial `UPDATE`.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<&'static str>,
    values: Vec<Value>,
}

impl UpdateBuilder {
    /// Starts an update against `table`.
    #[must_use]
    pub const fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            values: Vec::new(),
        }
    }

    fn push(&mut self, column: &'static str, value: Value) {
        self.assignments.push(column);
        self.values.push(value);
    }

    /// Adds a text column change.
    #[must_use]
    pub fn text(mut self, column: &'static str, update: FieldUpdate<String>) -> Self {
        if let Some(value) = update.into_assignment() {
            self.push(column, value.map_or(Value::Null, Value::Text));
        }
        self
    }

    /// Adds an integer column change.
    #[must_use]
    pub fn integer(mut self, column: &'static str, update: FieldUpdate<i64>) -> Self {
        if let Some(value) = update.into_assignment() {
            self.push(column, value.map_or(Value::Null, Value::Integer));
        }
        self
    }

    /// Adds a boolean column change, stored as `0`/`1`.
    #[must_use]
    pub fn flag(mut self, column: &'static str, update: Option<bool>) -> Self {
        if let Some(value) = update {
            self.push(column, Value::Integer(i64::from(value)));
        }
        self
    }

    /// Returns true if no column is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Builds the statement and its parameters for row `id`.
    ///
    /// The id is bound as the last parameter.
    #[must_use]
    pub fn build(self, id: i64) -> (String, Vec<Value>) {
        let set_clause = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_param = self.assignments.len() + 1;
        let sql = format!(
            "UPDATE {} SET {set_clause} WHERE id = ?{id_param}",
            self.table
        );

        let mut values = self.values;
        values.push(Value::Integer(id));
        (sql, values)
    }
}
