use chrono::{Months, Utc};

use crate::db::{customers, jobs, properties, reminder_history};
use crate::domain::{CustomerInput, JobInput, PropertyInput};
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_test_app, post_form};

/// Customer + property with a sweep `months_ago` calendar months before
/// today, so it lands in the default due window when months_ago is 11.
fn seed_swept_property(db: &crate::db::Database, months_ago: u32) -> i64 {
    let customer_id = customers::create_customer(
        db,
        CustomerInput {
            title: None,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: None,
            email: None,
            notes: None,
        },
    )
    .unwrap();
    let property_id = properties::create_property(
        db,
        PropertyInput {
            customer_id,
            address_line_1: "12 High St".into(),
            address_line_2: None,
            town: "Oldcastle".into(),
            postcode: Some("EX1 2AB".into()),
            chimney_count: 1,
            square_feet: None,
            service_interval_months: Some(12),
            notes: None,
        },
    )
    .unwrap();

    let swept = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(months_ago))
        .unwrap();
    jobs::create_job(
        db,
        JobInput {
            property_id,
            date_completed: swept,
            service_type: "sweep".into(),
            cost_pence: Some(6500),
            certificate_number: None,
            notes: None,
        },
    )
    .unwrap();

    property_id
}

#[test]
fn due_property_appears_on_the_reminders_page() {
    let (db, config) = make_test_app();
    seed_swept_property(&db, 11);

    let mut resp = handle(get("/reminders?offset=0"), &db, &config).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("12 High St"));
}

#[test]
fn recently_swept_property_is_not_due() {
    let (db, config) = make_test_app();
    seed_swept_property(&db, 2);

    let mut resp = handle(get("/reminders?offset=0"), &db, &config).unwrap();
    let body = body_string(&mut resp);
    assert!(!body.contains("12 High St"));
}

#[test]
fn csv_export_downloads_the_batch() {
    let (db, config) = make_test_app();
    seed_swept_property(&db, 11);

    let mut resp = handle(get("/reminders/export.csv?offset=0"), &db, &config).unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = body_string(&mut resp);
    assert!(body.starts_with("Customer Name,Address,Last Cleaned"));
    assert!(body.contains("Jane Doe"));
    // The joined address contains commas, so it must arrive quoted.
    assert!(body.contains("\"12 High St, Oldcastle, EX1 2AB\""));
}

#[test]
fn recording_a_batch_writes_history_once_per_property() {
    let (db, config) = make_test_app();
    let property_id = seed_swept_property(&db, 11);

    let resp = handle(
        post_form(
            "/reminders/record",
            &[("offset", "0"), ("method", "mail_merge")],
        ),
        &db,
        &config,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let history = reminder_history::list_for_property(&db, property_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].method, "mail_merge");
    assert!(reminder_history::last_sent_date(&db, property_id)
        .unwrap()
        .is_some());
}

#[test]
fn api_reminders_returns_the_envelope() {
    let (db, config) = make_test_app();
    seed_swept_property(&db, 11);

    let mut resp = handle(get("/api/reminders?offset=0"), &db, &config).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("\"success\":true"));
    assert!(body.contains("\"customer_name\":\"Jane Doe\""));

    let mut resp = handle(get("/api/unknown"), &db, &config).unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_string(&mut resp);
    assert!(body.contains("\"success\":false"));
}
