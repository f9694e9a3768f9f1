// Append-only audit of sent reminders. Entries are only ever inserted;
// nothing in the app updates or deletes them.

use crate::db::connection::Database;
use crate::errors::ServerError;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Row};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReminderHistoryEntry {
    pub id: i64,
    pub property_id: i64,
    pub date_sent: NaiveDateTime,
    pub method: String,
}

fn map_entry(row: &Row) -> rusqlite::Result<ReminderHistoryEntry> {
    Ok(ReminderHistoryEntry {
        id: row.get(0)?,
        property_id: row.get(1)?,
        date_sent: row.get(2)?,
        method: row.get(3)?,
    })
}

/// Records one entry per property in a single transaction: a mid-batch
/// failure (e.g. an id that no longer exists) rolls the whole batch back,
/// so a batch is never half-marked as sent.
pub fn record_sent(
    db: &Database,
    property_ids: &[i64],
    method: &str,
) -> Result<usize, ServerError> {
    if property_ids.is_empty() {
        return Ok(0);
    }
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let mut recorded = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO reminder_history (property_id, date_sent, method) VALUES (?1, ?2, ?3)",
            )?;
            for property_id in property_ids {
                recorded += stmt.execute(params![property_id, now, method])?;
            }
        }
        tx.commit()?;
        Ok(recorded)
    })
}

/// When was the last reminder sent for this property, if ever.
pub fn last_sent_date(
    db: &Database,
    property_id: i64,
) -> Result<Option<NaiveDateTime>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT MAX(date_sent) FROM reminder_history WHERE property_id = ?1",
            params![property_id],
            |row| row.get(0),
        )
        .map_err(ServerError::from)
    })
}

/// Full history for a property, newest first, for the detail page.
pub fn list_for_property(
    db: &Database,
    property_id: i64,
) -> Result<Vec<ReminderHistoryEntry>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, property_id, date_sent, method
            FROM reminder_history
            WHERE property_id = ?1
            ORDER BY date_sent DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map(params![property_id], map_entry)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::init_db;
    use crate::db::{customers, properties};
    use crate::domain::{CustomerInput, PropertyInput};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_test_db() -> Database {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("reminder_history_test_{nanos}.sqlite"));
        let db = Database::new(path.to_string_lossy());
        init_db(&db).expect("schema init failed");
        db
    }

    fn seed_property(db: &Database) -> i64 {
        let customer_id = customers::create_customer(
            db,
            CustomerInput {
                title: None,
                first_name: "John".into(),
                last_name: "Smith".into(),
                phone: None,
                email: None,
                notes: None,
            },
        )
        .unwrap();
        properties::create_property(
            db,
            PropertyInput {
                customer_id,
                address_line_1: "12 High St".into(),
                address_line_2: None,
                town: "Oldcastle".into(),
                postcode: None,
                chimney_count: 1,
                square_feet: None,
                service_interval_months: Some(12),
                notes: None,
            },
        )
        .unwrap()
    }

    fn history_count(db: &Database) -> i64 {
        db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM reminder_history", [], |r| r.get(0))
                .map_err(ServerError::from)
        })
        .unwrap()
    }

    #[test]
    fn records_one_entry_per_property() {
        let db = make_test_db();
        let a = seed_property(&db);
        let b = seed_property(&db);
        let c = seed_property(&db);

        assert_eq!(record_sent(&db, &[a, b, c], "email").unwrap(), 3);
        assert_eq!(history_count(&db), 3);
        assert!(last_sent_date(&db, a).unwrap().is_some());
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let db = make_test_db();
        let a = seed_property(&db);
        let b = seed_property(&db);

        // The bogus id trips the foreign key mid-batch; nothing sticks.
        let result = record_sent(&db, &[a, 9999, b], "email");
        assert!(matches!(result, Err(ServerError::Constraint(_))));
        assert_eq!(history_count(&db), 0);
        assert_eq!(last_sent_date(&db, a).unwrap(), None);
    }

    #[test]
    fn empty_batch_records_nothing() {
        let db = make_test_db();
        assert_eq!(record_sent(&db, &[], "email").unwrap(), 0);
        assert_eq!(history_count(&db), 0);
    }

    #[test]
    fn last_sent_is_the_most_recent_entry() {
        let db = make_test_db();
        let a = seed_property(&db);
        record_sent(&db, &[a], "mail_merge").unwrap();
        record_sent(&db, &[a], "email").unwrap();

        let entries = list_for_property(&db, a).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].method, "email");
        assert_eq!(
            last_sent_date(&db, a).unwrap(),
            Some(entries[0].date_sent)
        );
    }
}
