use crate::db::{customers, jobs, properties};
use crate::domain::{CustomerInput, JobInput, PropertyInput};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_test_app, post_form};

#[test]
fn create_customer_then_list_shows_name() {
    let (db, config) = make_test_app();

    let resp = handle(
        post_form(
            "/customers",
            &[
                ("title", "Mrs"),
                ("first_name", "Jane"),
                ("last_name", "Doe"),
                ("phone", "01234 567891"),
            ],
        ),
        &db,
        &config,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let mut resp = handle(get("/customers"), &db, &config).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("Mrs Jane Doe"), "list should show the new customer");
}

#[test]
fn blank_last_name_is_rejected() {
    let (db, config) = make_test_app();

    let result = handle(
        post_form("/customers", &[("first_name", "Jane"), ("last_name", "  ")]),
        &db,
        &config,
    );
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
    assert!(customers::list_customers(&db, None).unwrap().is_empty());
}

#[test]
fn search_filters_the_list() {
    let (db, config) = make_test_app();
    for (first, last) in [("Jane", "Doe"), ("Robert", "Johnson")] {
        customers::create_customer(
            &db,
            CustomerInput {
                title: None,
                first_name: first.into(),
                last_name: last.into(),
                phone: None,
                email: None,
                notes: None,
            },
        )
        .unwrap();
    }

    let mut resp = handle(get("/customers?q=john"), &db, &config).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Robert Johnson"));
    assert!(!body.contains("Jane Doe"));
}

#[test]
fn delete_customer_cascades_through_the_routes() {
    let (db, config) = make_test_app();

    let customer_id = customers::create_customer(
        &db,
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
    let property_id = properties::create_property(
        &db,
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
    .unwrap();
    jobs::create_job(
        &db,
        JobInput {
            property_id,
            date_completed: "2024-01-15".parse().unwrap(),
            service_type: "sweep".into(),
            cost_pence: Some(6500),
            certificate_number: None,
            notes: None,
        },
    )
    .unwrap();

    let resp = handle(
        post_form(&format!("/customers/{customer_id}/delete"), &[]),
        &db,
        &config,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    assert!(properties::get_property(&db, property_id).unwrap().is_none());
    assert!(jobs::list_jobs_for_property(&db, property_id)
        .unwrap()
        .is_empty());
}

#[test]
fn missing_customer_page_is_not_found() {
    let (db, config) = make_test_app();
    assert!(matches!(
        handle(get("/customers/999"), &db, &config),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/nonsense"), &db, &config),
        Err(ServerError::NotFound)
    ));
}
