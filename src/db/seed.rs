// Sample data for development, behind the --seed flag. Skipped when the
// database already has customers.

use chrono::{Months, Utc};
use log::info;

use crate::db::connection::Database;
use crate::db::{customers, jobs, properties};
use crate::domain::{CustomerInput, JobInput, PropertyInput};
use crate::errors::ServerError;

pub fn seed_database(db: &Database) -> Result<(), ServerError> {
    let existing: i64 = db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM customers", [], |r| r.get(0))
            .map_err(ServerError::from)
    })?;
    if existing > 0 {
        info!("database already has {existing} customers, skipping seed");
        return Ok(());
    }

    let today = Utc::now().date_naive();

    let samples = [
        ("Mr", "John", "Smith", "01234 567890", "john@example.com"),
        ("Mrs", "Jane", "Doe", "01234 567891", "jane@example.com"),
        ("Mr", "Robert", "Johnson", "01234 567892", "robert@example.com"),
    ];

    let addresses = [
        ("12 High St", "Oldcastle", "EX1 2AB", 1),
        ("3 Mill Lane", "Oldcastle", "EX1 3CD", 2),
        ("Rose Cottage", "Netherfield", "EX2 4EF", 1),
    ];

    // Stagger last sweeps so the reminders page has something to show:
    // 11 months ago lands in the default due window.
    let months_ago = [11u32, 12, 3];

    for (i, (title, first, last, phone, email)) in samples.iter().enumerate() {
        let customer_id = customers::create_customer(
            db,
            CustomerInput {
                title: Some((*title).into()),
                first_name: (*first).into(),
                last_name: (*last).into(),
                phone: Some((*phone).into()),
                email: Some((*email).into()),
                notes: None,
            },
        )?;

        let (line_1, town, postcode, chimneys) = addresses[i];
        let property_id = properties::create_property(
            db,
            PropertyInput {
                customer_id,
                address_line_1: line_1.into(),
                address_line_2: None,
                town: town.into(),
                postcode: Some(postcode.into()),
                chimney_count: chimneys,
                square_feet: None,
                service_interval_months: Some(12),
                notes: None,
            },
        )?;

        if let Some(swept) = today.checked_sub_months(Months::new(months_ago[i])) {
            jobs::create_job(
                db,
                JobInput {
                    property_id,
                    date_completed: swept,
                    service_type: "sweep".into(),
                    cost_pence: Some(6500),
                    certificate_number: Some(format!("CERT-{:03}", i + 1)),
                    notes: None,
                },
            )?;
        }
    }

    info!("seeded {} sample customers", samples.len());
    Ok(())
}
