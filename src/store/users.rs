use super::{Store, StoreError};
use crate::models::UserData;
use rusqlite::{params, OptionalExtension};

impl Store {
    pub fn get_user(&self, user_id: &str) -> Result<Option<UserData>, StoreError> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, userId, email FROM userData WHERE userId = ?1",
                    params![user_id],
                    |row| {
                        Ok(UserData {
                            id: row.get(0)?,
                            user_id: row.get(1)?,
                            email: row.get(2)?,
                        })
                    },
                )
                .optional()?)
        })
    }

    /// Creates the user together with an all-false mandatory-course row.
    pub fn create_user(&self, user_id: &str, email: &str) -> Result<UserData, StoreError> {
        if user_id.trim().is_empty() {
            return Err(StoreError::Invalid("userId is required".into()));
        }
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM userData WHERE userId = ?1)",
                params![user_id],
                |row| row.get(0),
            )?;
            if exists {
                return Err(StoreError::Conflict("User already exists".into()));
            }
            tx.execute(
                "INSERT INTO userData (userId, email) VALUES (?1, ?2)",
                params![user_id, email],
            )?;
            let id = tx.last_insert_rowid();
            tx.execute(
                "INSERT OR IGNORE INTO userMandatoryCourseCompleted (userId) VALUES (?1)",
                params![user_id],
            )?;
            tx.commit()?;
            Ok(UserData { id, user_id: user_id.to_string(), email: email.to_string() })
        })
    }
}
