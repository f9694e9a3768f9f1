use crate::db::connection::Database;
use crate::domain::{Customer, CustomerInput};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

const CUSTOMER_COLUMNS: &str =
    "id, title, first_name, last_name, phone, email, notes, created_at, updated_at";

fn map_customer(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        title: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_customer(db: &Database, input: CustomerInput) -> Result<i64, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO customers (title, first_name, last_name, phone, email, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                input.title,
                input.first_name,
                input.last_name,
                input.phone,
                input.email,
                input.notes,
                now,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn get_customer(db: &Database, id: i64) -> Result<Option<Customer>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"),
            params![id],
            map_customer,
        )
        .optional()
        .map_err(ServerError::from)
    })
}

/// Writes the full editable field set; returns the changed-row count,
/// 0 when `id` does not exist.
pub fn update_customer(db: &Database, id: i64, input: CustomerInput) -> Result<usize, ServerError> {
    let input = input.validated()?;
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let changes = conn.execute(
            r#"
            UPDATE customers
            SET title = ?1, first_name = ?2, last_name = ?3,
                phone = ?4, email = ?5, notes = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
            params![
                input.title,
                input.first_name,
                input.last_name,
                input.phone,
                input.email,
                input.notes,
                now,
                id,
            ],
        )?;
        Ok(changes)
    })
}

/// Irreversible. Cascades to the customer's properties and their jobs in a
/// single statement, which SQLite applies atomically.
pub fn delete_customer(db: &Database, id: i64) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let changes = conn.execute("DELETE FROM customers WHERE id = ?1", params![id])?;
        Ok(changes)
    })
}

/// Customers ordered for display; `search` matches either name part,
/// case-insensitively.
pub fn list_customers(db: &Database, search: Option<&str>) -> Result<Vec<Customer>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE ?1 IS NULL
               OR first_name LIKE '%' || ?1 || '%'
               OR last_name LIKE '%' || ?1 || '%'
            ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE
            "#
        ))?;

        let rows = stmt.query_map(params![search], map_customer)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}
