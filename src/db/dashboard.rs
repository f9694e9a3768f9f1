use crate::db::connection::Database;
use crate::domain::property::join_address;
use crate::errors::ServerError;
use chrono::NaiveDate;
use rusqlite::params;

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardCounts {
    pub customers: i64,
    pub properties: i64,
    pub jobs: i64,
}

pub fn counts(db: &Database) -> Result<DashboardCounts, ServerError> {
    db.with_conn(|conn| {
        let customers = conn.query_row("SELECT COUNT(*) FROM customers", [], |r| r.get(0))?;
        let properties = conn.query_row("SELECT COUNT(*) FROM properties", [], |r| r.get(0))?;
        let jobs = conn.query_row("SELECT COUNT(*) FROM jobs", [], |r| r.get(0))?;
        Ok(DashboardCounts {
            customers,
            properties,
            jobs,
        })
    })
}

#[derive(Debug, Clone)]
pub struct RecentJob {
    pub job_id: i64,
    pub property_id: i64,
    pub date_completed: NaiveDate,
    pub service_type: String,
    pub cost_pence: Option<i64>,
    pub address: String,
    pub customer_name: String,
}

/// The latest completed jobs across all properties, for the dashboard feed.
pub fn recent_jobs(db: &Database, limit: i64) -> Result<Vec<RecentJob>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT
                j.id,
                j.property_id,
                j.date_completed,
                j.service_type,
                j.cost_pence,
                p.address_line_1,
                p.address_line_2,
                p.town,
                p.postcode,
                c.first_name,
                c.last_name
            FROM jobs j
            JOIN properties p ON p.id = j.property_id
            JOIN customers c ON c.id = p.customer_id
            ORDER BY j.date_completed DESC, j.id DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            let line_1: String = row.get(5)?;
            let line_2: Option<String> = row.get(6)?;
            let town: String = row.get(7)?;
            let postcode: Option<String> = row.get(8)?;
            let first: String = row.get(9)?;
            let last: String = row.get(10)?;
            Ok(RecentJob {
                job_id: row.get(0)?,
                property_id: row.get(1)?,
                date_completed: row.get(2)?,
                service_type: row.get(3)?,
                cost_pence: row.get(4)?,
                address: join_address(&line_1, line_2.as_deref(), &town, postcode.as_deref()),
                customer_name: format!("{first} {last}"),
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}
