// The reminder engine: which properties are due for a nudge, as of a given
// date? The service history is the source of truth — last-cleaned dates are
// aggregated from `jobs` on every query rather than read from a cached
// column, so edits and deletes can never leave the report stale.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::collections::BTreeSet;

use crate::db::connection::Database;
use crate::domain::reminder::{
    in_window, month_offset, months_since, ReminderCandidate, DEFAULT_MAX_MONTHS,
    DEFAULT_MIN_MONTHS,
};
use crate::errors::ServerError;

/// One row per property with its aggregated service and reminder history.
struct ServiceSummary {
    property_id: i64,
    customer_name: String,
    address_line_1: String,
    address_line_2: Option<String>,
    town: String,
    postcode: Option<String>,
    chimney_count: i64,
    square_feet: Option<i64>,
    notes: Option<String>,
    last_cleaned: Option<NaiveDate>,
    last_reminder: Option<NaiveDateTime>,
}

/// Every property joined to its owner, its most recent job, and its most
/// recent reminder. Properties whose owner has vanished are dropped by the
/// inner join rather than failing the report. Ordered by property id so
/// downstream stable sorts break ties in insertion order.
fn load_service_summaries(conn: &mut Connection) -> Result<Vec<ServiceSummary>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        WITH latest_jobs AS (
            SELECT property_id, MAX(date_completed) AS last_cleaned
            FROM jobs
            GROUP BY property_id
        ),
        latest_reminders AS (
            SELECT property_id, MAX(date_sent) AS last_reminder
            FROM reminder_history
            GROUP BY property_id
        )
        SELECT
            p.id,
            c.first_name,
            c.last_name,
            p.address_line_1,
            p.address_line_2,
            p.town,
            p.postcode,
            p.chimney_count,
            p.square_feet,
            p.notes,
            lj.last_cleaned,
            lr.last_reminder
        FROM properties p
        JOIN customers c ON c.id = p.customer_id
        LEFT JOIN latest_jobs lj ON lj.property_id = p.id
        LEFT JOIN latest_reminders lr ON lr.property_id = p.id
        ORDER BY p.id
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        let first: String = row.get(1)?;
        let last: String = row.get(2)?;
        Ok(ServiceSummary {
            property_id: row.get(0)?,
            customer_name: format!("{first} {last}"),
            address_line_1: row.get(3)?,
            address_line_2: row.get(4)?,
            town: row.get(5)?,
            postcode: row.get(6)?,
            chimney_count: row.get(7)?,
            square_feet: row.get(8)?,
            notes: row.get(9)?,
            last_cleaned: row.get(10)?,
            last_reminder: row.get(11)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Properties whose last sweep falls inside `[min_months, max_months]`
/// calendar months before `today`, inclusive both ends, most overdue first
/// (ties in property-id order). Never-swept properties are excluded from
/// every finite window by policy.
pub fn due_for_reminder(
    db: &Database,
    min_months: i32,
    max_months: i32,
    today: NaiveDate,
) -> Result<Vec<ReminderCandidate>, ServerError> {
    let summaries = db.with_conn(load_service_summaries)?;

    let mut due: Vec<ReminderCandidate> = summaries
        .into_iter()
        .filter_map(|s| {
            let months = months_since(s.last_cleaned, today);
            if !in_window(months, min_months, max_months) {
                return None;
            }
            Some(ReminderCandidate {
                property_id: s.property_id,
                customer_name: s.customer_name,
                address_line_1: s.address_line_1,
                address_line_2: s.address_line_2,
                town: s.town,
                postcode: s.postcode,
                chimney_count: s.chimney_count,
                square_feet: s.square_feet,
                notes: s.notes,
                last_cleaned_date: s.last_cleaned,
                // in_window guarantees a finite value here
                months_since_last_clean: months?,
                last_reminder_date: s.last_reminder,
            })
        })
        .collect();

    // Stable: equal months keep their property-id order.
    due.sort_by(|a, b| b.months_since_last_clean.cmp(&a.months_since_last_clean));
    Ok(due)
}

/// The default window shifted `offset` months into the future: offset 0 is
/// "due this month" (11-12 months since last sweep), 1 is next month, etc.
pub fn due_by_month_offset(
    db: &Database,
    offset: i32,
    today: NaiveDate,
) -> Result<Vec<ReminderCandidate>, ServerError> {
    due_for_reminder(
        db,
        DEFAULT_MIN_MONTHS + offset,
        DEFAULT_MAX_MONTHS + offset,
        today,
    )
}

/// The distinct month offsets that currently contain at least one due
/// property, ascending. Built on the same `months_since` as the due query,
/// so every returned offset is guaranteed non-empty when queried.
pub fn available_month_offsets(
    db: &Database,
    today: NaiveDate,
) -> Result<Vec<i32>, ServerError> {
    let summaries = db.with_conn(load_service_summaries)?;

    let offsets: BTreeSet<i32> = summaries
        .iter()
        .filter_map(|s| month_offset(months_since(s.last_cleaned, today)))
        .collect();

    Ok(offsets.into_iter().collect())
}
