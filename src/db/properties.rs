use crate::db::connection::Database;
use crate::domain::{Property, PropertyInput};
use crate::errors::ServerError;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};

fn map_property(row: &Row) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        address_line_1: row.get(2)?,
        address_line_2: row.get(3)?,
        town: row.get(4)?,
        postcode: row.get(5)?,
        chimney_count: row.get(6)?,
        square_feet: row.get(7)?,
        service_interval_months: row.get(8)?,
        notes: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

const PROPERTY_COLUMNS: &str = "p.id, p.customer_id, p.address_line_1, p.address_line_2, p.town, \
     p.postcode, p.chimney_count, p.square_feet, p.service_interval_months, p.notes, \
     p.created_at, p.updated_at";

/// The owning customer must exist; a dangling `customer_id` surfaces as a
/// foreign-key `Constraint` error from the store.
pub fn create_property(db: &Database, input: PropertyInput) -> Result<i64, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO properties (
                customer_id, address_line_1, address_line_2, town, postcode,
                chimney_count, square_feet, service_interval_months, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                input.customer_id,
                input.address_line_1,
                input.address_line_2,
                input.town,
                input.postcode,
                input.chimney_count,
                input.square_feet,
                input.service_interval_months,
                input.notes,
                now,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn get_property(db: &Database, id: i64) -> Result<Option<Property>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {PROPERTY_COLUMNS} FROM properties p WHERE p.id = ?1"),
            params![id],
            map_property,
        )
        .optional()
        .map_err(ServerError::from)
    })
}

pub fn update_property(db: &Database, id: i64, input: PropertyInput) -> Result<usize, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let changes = conn.execute(
            r#"
            UPDATE properties
            SET customer_id = ?1, address_line_1 = ?2, address_line_2 = ?3,
                town = ?4, postcode = ?5, chimney_count = ?6, square_feet = ?7,
                service_interval_months = ?8, notes = ?9, updated_at = ?10
            WHERE id = ?11
            "#,
            params![
                input.customer_id,
                input.address_line_1,
                input.address_line_2,
                input.town,
                input.postcode,
                input.chimney_count,
                input.square_feet,
                input.service_interval_months,
                input.notes,
                now,
                id,
            ],
        )?;
        Ok(changes)
    })
}

/// Cascades to the property's jobs and reminder history.
pub fn delete_property(db: &Database, id: i64) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let changes = conn.execute("DELETE FROM properties WHERE id = ?1", params![id])?;
        Ok(changes)
    })
}

#[derive(Debug, Clone)]
pub struct PropertyWithCustomer {
    pub property: Property,
    pub customer_name: String,
}

/// Properties for display, with their owner's name, optionally restricted
/// to one customer. Ordered by town then first address line.
pub fn list_properties(
    db: &Database,
    customer_id: Option<i64>,
) -> Result<Vec<PropertyWithCustomer>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {PROPERTY_COLUMNS}, c.first_name, c.last_name
            FROM properties p
            JOIN customers c ON c.id = p.customer_id
            WHERE ?1 IS NULL OR p.customer_id = ?1
            ORDER BY p.town COLLATE NOCASE, p.address_line_1 COLLATE NOCASE
            "#
        ))?;

        let rows = stmt.query_map(params![customer_id], |row| {
            let property = map_property(row)?;
            let first: String = row.get(12)?;
            let last: String = row.get(13)?;
            Ok(PropertyWithCustomer {
                property,
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

/// The authoritative "last cleaned" date: the maximum `date_completed`
/// across the property's jobs, derived on demand so it can never go stale.
/// None means never swept.
pub fn last_cleaned_date(db: &Database, property_id: i64) -> Result<Option<NaiveDate>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT MAX(date_completed) FROM jobs WHERE property_id = ?1",
            params![property_id],
            |row| row.get(0),
        )
        .map_err(ServerError::from)
    })
}
