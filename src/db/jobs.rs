use crate::db::connection::Database;
use crate::domain::{Job, JobInput};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

const JOB_COLUMNS: &str = "id, property_id, date_completed, service_type, cost_pence, \
     certificate_number, notes, created_at, updated_at";

fn map_job(row: &Row) -> rusqlite::Result<Job> {
    Ok(Job {
        id: row.get(0)?,
        property_id: row.get(1)?,
        date_completed: row.get(2)?,
        service_type: row.get(3)?,
        cost_pence: row.get(4)?,
        certificate_number: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_job(db: &Database, input: JobInput) -> Result<i64, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO jobs (
                property_id, date_completed, service_type, cost_pence,
                certificate_number, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                input.property_id,
                input.date_completed,
                input.service_type,
                input.cost_pence,
                input.certificate_number,
                input.notes,
                now,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn get_job(db: &Database, id: i64) -> Result<Option<Job>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"),
            params![id],
            map_job,
        )
        .optional()
        .map_err(ServerError::from)
    })
}

pub fn update_job(db: &Database, id: i64, input: JobInput) -> Result<usize, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let changes = conn.execute(
            r#"
            UPDATE jobs
            SET property_id = ?1, date_completed = ?2, service_type = ?3,
                cost_pence = ?4, certificate_number = ?5, notes = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
            params![
                input.property_id,
                input.date_completed,
                input.service_type,
                input.cost_pence,
                input.certificate_number,
                input.notes,
                now,
                id,
            ],
        )?;
        Ok(changes)
    })
}

pub fn delete_job(db: &Database, id: i64) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let changes = conn.execute("DELETE FROM jobs WHERE id = ?1", params![id])?;
        Ok(changes)
    })
}

/// Most recent first.
pub fn list_jobs_for_property(db: &Database, property_id: i64) -> Result<Vec<Job>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE property_id = ?1
            ORDER BY date_completed DESC, id DESC
            "#
        ))?;

        let rows = stmt.query_map(params![property_id], map_job)?;

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
        let path = std::env::temp_dir().join(format!("jobs_test_{nanos}.sqlite"));
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

    fn input(property_id: i64, date: &str) -> JobInput {
        JobInput {
            property_id,
            date_completed: date.parse().unwrap(),
            service_type: String::new(),
            cost_pence: Some(6500),
            certificate_number: Some("CERT-001".into()),
            notes: None,
        }
    }

    #[test]
    fn create_and_read_back() {
        let db = make_test_db();
        let property_id = seed_property(&db);
        let id = create_job(&db, input(property_id, "2024-01-15")).unwrap();
        let job = get_job(&db, id).unwrap().expect("job missing");
        assert_eq!(job.date_completed, "2024-01-15".parse().unwrap());
        assert_eq!(job.service_type, "sweep"); // blank input defaulted
        assert_eq!(job.cost_pence, Some(6500));
    }

    #[test]
    fn list_is_newest_first() {
        let db = make_test_db();
        let property_id = seed_property(&db);
        create_job(&db, input(property_id, "2023-01-01")).unwrap();
        create_job(&db, input(property_id, "2024-01-15")).unwrap();
        create_job(&db, input(property_id, "2023-06-30")).unwrap();

        let listed = list_jobs_for_property(&db, property_id).unwrap();
        let dates: Vec<String> = listed
            .iter()
            .map(|j| j.date_completed.to_string())
            .collect();
        assert_eq!(dates, ["2024-01-15", "2023-06-30", "2023-01-01"]);
    }

    #[test]
    fn update_and_delete_report_changes() {
        let db = make_test_db();
        let property_id = seed_property(&db);
        let id = create_job(&db, input(property_id, "2024-01-15")).unwrap();

        let mut edited = input(property_id, "2024-02-01");
        edited.cost_pence = Some(7000);
        assert_eq!(update_job(&db, id, edited).unwrap(), 1);
        assert_eq!(
            get_job(&db, id).unwrap().unwrap().cost_pence,
            Some(7000)
        );

        assert_eq!(delete_job(&db, id).unwrap(), 1);
        assert_eq!(delete_job(&db, id).unwrap(), 0);
    }

    #[test]
    fn job_for_missing_property_is_a_constraint_error() {
        let db = make_test_db();
        assert!(matches!(
            create_job(&db, input(999, "2024-01-15")),
            Err(ServerError::Constraint(_))
        ));
    }
}
