use super::{Store, StoreError};
use crate::progress::{completion_columns, Catalog, CompletionStore};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension};
use std::collections::BTreeMap;

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

impl CompletionStore for Store {
    /// Completion flags of one user keyed by column name. Unknown users are
    /// `NotFound`.
    fn load_completion(&self, user_id: &str) -> Result<BTreeMap<String, bool>, StoreError> {
        let columns = completion_columns(Catalog::standard());
        let sql = format!(
            "SELECT {} FROM userMandatoryCourseCompleted WHERE userId = ?1",
            quoted(&columns)
        );
        let row = self.with_conn(|conn| {
            Ok(conn
                .query_row(&sql, params![user_id], |row| {
                    let mut flags = BTreeMap::new();
                    for (i, column) in columns.iter().enumerate() {
                        let value: i64 = row.get(i)?;
                        flags.insert(column.clone(), value != 0);
                    }
                    Ok(flags)
                })
                .optional()?)
        })?;
        row.ok_or_else(|| StoreError::NotFound("user".into()))
    }

    /// Writes every flag in `updates` with a single UPDATE.
    fn patch_completion(&self, user_id: &str, updates: &BTreeMap<String, bool>) -> Result<(), StoreError> {
        if updates.is_empty() {
            return Err(StoreError::Invalid("no course columns to update".into()));
        }
        let known = completion_columns(Catalog::standard());
        if let Some(bad) = updates.keys().find(|k| !known.contains(k)) {
            return Err(StoreError::Invalid(format!("unknown course column '{}'", bad)));
        }

        let assignments: Vec<String> = updates
            .keys()
            .enumerate()
            .map(|(i, column)| format!("\"{}\" = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE userMandatoryCourseCompleted SET {} WHERE userId = ?{}",
            assignments.join(", "),
            updates.len() + 1
        );
        let mut values: Vec<Value> = updates.values().map(|v| Value::Integer(i64::from(*v))).collect();
        values.push(Value::Text(user_id.to_string()));

        let changed = self.with_conn(|conn| Ok(conn.execute(&sql, params_from_iter(values.iter()))?))?;
        if changed == 0 {
            return Err(StoreError::NotFound("user".into()));
        }
        Ok(())
    }
}
