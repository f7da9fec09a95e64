use super::{Store, StoreError};
use crate::models::Review;
use chrono::Utc;
use rusqlite::params;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

impl Store {
    /// Reviews of one instructor, newest first.
    pub fn reviews_for(&self, instructor: &str) -> Result<Vec<Review>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, instructor, userId, rating, comment, createdAt
                 FROM reviews WHERE instructor = ?1 ORDER BY createdAt DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![instructor], |row| {
                Ok(Review {
                    id: row.get(0)?,
                    instructor: row.get(1)?,
                    user_id: row.get(2)?,
                    rating: row.get(3)?,
                    comment: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Stores a review and folds its rating into the instructor's aggregate.
    ///
    /// Both writes share one transaction. An instructor without a rating row
    /// gets one.
    pub fn post_review(
        &self,
        instructor: &str,
        user_id: &str,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<i64, StoreError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(StoreError::Invalid(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        if instructor.trim().is_empty() || user_id.trim().is_empty() {
            return Err(StoreError::Invalid("instructor and userId are required".into()));
        }

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO reviews (instructor, userId, rating, comment, createdAt)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![instructor, user_id, rating, comment, Utc::now().to_rfc3339()],
            )?;
            let review_id = tx.last_insert_rowid();

            let updated = tx.execute(
                "UPDATE professorRating
                 SET ratingSum = ratingSum + ?1,
                     ratingCount = ratingCount + 1,
                     avgRating = ROUND(CAST(ratingSum + ?1 AS REAL) / (ratingCount + 1), 2)
                 WHERE instructor = ?2",
                params![rating, instructor],
            )?;
            if updated == 0 {
                tx.execute(
                    "INSERT INTO professorRating (instructor, ratingCount, ratingSum, avgRating)
                     VALUES (?1, 1, ?2, ROUND(CAST(?2 AS REAL), 2))",
                    params![instructor, rating],
                )?;
            }
            tx.commit()?;
            Ok(review_id)
        })
    }
}
