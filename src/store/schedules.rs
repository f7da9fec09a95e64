use super::{Store, StoreError};
use crate::models::StoredSchedule;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

impl Store {
    pub fn get_schedule(&self, user_id: &str, term: &str) -> Result<Option<StoredSchedule>, StoreError> {
        let row = self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT scheduleId, userId, term, schedule FROM userScheduleCourses
                     WHERE userId = ?1 AND term = ?2 ORDER BY scheduleId DESC LIMIT 1",
                    params![user_id, term],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )
                .optional()?)
        })?;

        match row {
            None => Ok(None),
            Some((schedule_id, user_id, term, blob)) => {
                let schedule: Vec<Value> = serde_json::from_str(&blob)?;
                Ok(Some(StoredSchedule { schedule_id, user_id, term, schedule }))
            }
        }
    }

    /// Replaces the whole stored schedule of (user, term). Events are stored
    /// verbatim.
    pub fn put_schedule(&self, user_id: &str, term: &str, schedule: &[Value]) -> Result<StoredSchedule, StoreError> {
        if user_id.trim().is_empty() || term.trim().is_empty() {
            return Err(StoreError::Invalid("userId and term are required".into()));
        }
        let blob = serde_json::to_string(schedule)?;
        let schedule_id = self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM userScheduleCourses WHERE userId = ?1 AND term = ?2",
                params![user_id, term],
            )?;
            tx.execute(
                "INSERT INTO userScheduleCourses (userId, term, schedule) VALUES (?1, ?2, ?3)",
                params![user_id, term, blob],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })?;
        Ok(StoredSchedule {
            schedule_id,
            user_id: user_id.to_string(),
            term: term.to_string(),
            schedule: schedule.to_vec(),
        })
    }

    /// Returns whether anything was deleted.
    pub fn delete_schedule(&self, user_id: &str, term: &str) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM userScheduleCourses WHERE userId = ?1 AND term = ?2",
                params![user_id, term],
            )?;
            Ok(n > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(day: &str, label: &str) -> Value {
        json!({
            "day": day,
            "startTime": "09:15",
            "endTime": "10:30",
            "class": label,
            "color": "#a64d5d",
        })
    }

    #[test]
    fn put_replaces_previous_blob() {
        let store = Store::open_in_memory().unwrap();
        store.put_schedule("u1", "fall", &[event("Mon", "CSCI 111:01")]).unwrap();
        let second = vec![event("Tue", "MATH 141:02"), event("Thu", "MATH 141:02")];
        store.put_schedule("u1", "fall", &second).unwrap();

        let stored = store.get_schedule("u1", "fall").unwrap().unwrap();
        assert_eq!(stored.schedule, second);
        assert!(store.get_schedule("u1", "spring").unwrap().is_none());
    }

    #[test]
    fn events_are_stored_verbatim() {
        let store = Store::open_in_memory().unwrap();
        let events = vec![json!({
            "day": "Monday",
            "startTime": "09:00",
            "endTime": "10:00",
            "class": "A:01",
            "color": "#fff",
            "courseTitle": "A",
            "extra": 1,
        })];
        store.put_schedule("u1", "fall", &events).unwrap();

        let stored = store.get_schedule("u1", "fall").unwrap().unwrap();
        assert_eq!(stored.schedule, events);
        assert!(stored.schedule[0].get("instructor").is_none());
    }

    #[test]
    fn delete_removes_only_that_term() {
        let store = Store::open_in_memory().unwrap();
        store.put_schedule("u1", "fall", &[event("Mon", "A:01")]).unwrap();
        store.put_schedule("u1", "winter", &[event("Fri", "B:01")]).unwrap();
        assert!(store.delete_schedule("u1", "fall").unwrap());
        assert!(!store.delete_schedule("u1", "fall").unwrap());
        assert!(store.get_schedule("u1", "winter").unwrap().is_some());
    }
}
