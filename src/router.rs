use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use chrono::{NaiveDate, Utc};

use crate::config::Config;
use crate::db::connection::Database;
use crate::db::{backup, customers, dashboard, jobs, properties, reminder_history};
use crate::domain::{money, CustomerInput, JobInput, PropertyInput};
use crate::errors::ServerError;
use crate::export;
use crate::reminders;
use crate::responses::{
    api_error, api_ok, csv_response, html_response, redirect_response, xlsx_response, ResultResp,
};
use crate::templates::pages;

pub fn handle(mut req: Request, db: &Database, config: &Config) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => dashboard_page(db, &query),

        // --- customers ---
        ("GET", ["customers"]) => {
            let search = query.get("q").map(String::as_str).filter(|q| !q.is_empty());
            let listed = customers::list_customers(db, search)?;
            html_response(pages::customers::customers_page(&listed, search))
        }
        ("GET", ["customers", "new"]) => html_response(pages::customers::customer_form(
            "Add customer",
            "/customers",
            None,
        )),
        ("POST", ["customers"]) => {
            let form = read_form(&mut req)?;
            let id = customers::create_customer(db, customer_input(&form))?;
            redirect_response(&format!("/customers/{id}"))
        }
        ("GET", ["customers", id]) => {
            let id = parse_id(id)?;
            let customer = customers::get_customer(db, id)?.ok_or(ServerError::NotFound)?;
            let owned = properties::list_properties(db, Some(id))?;
            html_response(pages::customers::customer_detail_page(&customer, &owned))
        }
        ("GET", ["customers", id, "edit"]) => {
            let id = parse_id(id)?;
            let customer = customers::get_customer(db, id)?.ok_or(ServerError::NotFound)?;
            html_response(pages::customers::customer_form(
                "Edit customer",
                &format!("/customers/{id}"),
                Some(&customer),
            ))
        }
        ("POST", ["customers", id]) => {
            let id = parse_id(id)?;
            if customers::update_customer(db, id, customer_input(&read_form(&mut req)?))? == 0 {
                return Err(ServerError::NotFound);
            }
            redirect_response(&format!("/customers/{id}"))
        }
        ("POST", ["customers", id, "delete"]) => {
            customers::delete_customer(db, parse_id(id)?)?;
            redirect_response("/customers")
        }

        // --- properties ---
        ("GET", ["properties"]) => {
            let listed = properties::list_properties(db, None)?;
            html_response(pages::properties::properties_page(&listed))
        }
        ("GET", ["properties", "new"]) => {
            let owners = customers::list_customers(db, None)?;
            let default_customer = query.get("customer_id").and_then(|v| v.parse().ok());
            html_response(pages::properties::property_form(
                "Add property",
                "/properties",
                &owners,
                None,
                default_customer,
            ))
        }
        ("POST", ["properties"]) => {
            let form = read_form(&mut req)?;
            let id = properties::create_property(db, property_input(&form)?)?;
            redirect_response(&format!("/properties/{id}"))
        }
        ("GET", ["properties", id]) => property_detail(db, parse_id(id)?),
        ("GET", ["properties", id, "edit"]) => {
            let id = parse_id(id)?;
            let property = properties::get_property(db, id)?.ok_or(ServerError::NotFound)?;
            let owners = customers::list_customers(db, None)?;
            html_response(pages::properties::property_form(
                "Edit property",
                &format!("/properties/{id}"),
                &owners,
                Some(&property),
                None,
            ))
        }
        ("POST", ["properties", id]) => {
            let id = parse_id(id)?;
            if properties::update_property(db, id, property_input(&read_form(&mut req)?)?)? == 0 {
                return Err(ServerError::NotFound);
            }
            redirect_response(&format!("/properties/{id}"))
        }
        ("POST", ["properties", id, "delete"]) => {
            let id = parse_id(id)?;
            let property = properties::get_property(db, id)?.ok_or(ServerError::NotFound)?;
            properties::delete_property(db, id)?;
            redirect_response(&format!("/customers/{}", property.customer_id))
        }
        ("GET", ["properties", id, "jobs", "new"]) => {
            let id = parse_id(id)?;
            let property = properties::get_property(db, id)?.ok_or(ServerError::NotFound)?;
            html_response(pages::jobs::job_form("Record a job", "/jobs", &property, None))
        }
        ("GET", ["properties", id, "jobs", "export.csv"]) => {
            let id = parse_id(id)?;
            let job_list = jobs::list_jobs_for_property(db, id)?;
            let bytes = export::jobs_csv(&job_list)?;
            csv_response(bytes, &format!("jobs-property-{id}.csv"))
        }
        ("GET", ["properties", id, "jobs", "export.xlsx"]) => {
            let id = parse_id(id)?;
            let job_list = jobs::list_jobs_for_property(db, id)?;
            let bytes = export::jobs_xlsx(&job_list)?;
            xlsx_response(bytes, &format!("jobs-property-{id}.xlsx"))
        }

        // --- jobs ---
        ("POST", ["jobs"]) => {
            let form = read_form(&mut req)?;
            let input = job_input(&form)?;
            let property_id = input.property_id;
            jobs::create_job(db, input)?;
            redirect_response(&format!("/properties/{property_id}"))
        }
        ("GET", ["jobs", id, "edit"]) => {
            let id = parse_id(id)?;
            let job = jobs::get_job(db, id)?.ok_or(ServerError::NotFound)?;
            let property =
                properties::get_property(db, job.property_id)?.ok_or(ServerError::NotFound)?;
            html_response(pages::jobs::job_form(
                "Edit job",
                &format!("/jobs/{id}"),
                &property,
                Some(&job),
            ))
        }
        ("POST", ["jobs", id]) => {
            let id = parse_id(id)?;
            let input = job_input(&read_form(&mut req)?)?;
            let property_id = input.property_id;
            if jobs::update_job(db, id, input)? == 0 {
                return Err(ServerError::NotFound);
            }
            redirect_response(&format!("/properties/{property_id}"))
        }
        ("POST", ["jobs", id, "delete"]) => {
            let id = parse_id(id)?;
            let job = jobs::get_job(db, id)?.ok_or(ServerError::NotFound)?;
            jobs::delete_job(db, id)?;
            redirect_response(&format!("/properties/{}", job.property_id))
        }

        // --- reminders ---
        ("GET", ["reminders"]) => reminders_page(db, &query),
        ("GET", ["reminders", "export.csv"]) => {
            let today = today();
            let offset = offset_param(&query);
            let due = reminders::due_by_month_offset(db, offset, today)?;
            let bytes = export::reminders_csv(&due)?;
            csv_response(bytes, &format!("reminders-month-{offset}-{today}.csv"))
        }
        ("GET", ["reminders", "export.xlsx"]) => {
            let today = today();
            let offset = offset_param(&query);
            let due = reminders::due_by_month_offset(db, offset, today)?;
            let bytes = export::reminders_xlsx(&due)?;
            xlsx_response(bytes, &format!("reminders-month-{offset}-{today}.xlsx"))
        }
        ("POST", ["reminders", "record"]) => {
            let form = read_form(&mut req)?;
            let offset = form
                .get("offset")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let method = form
                .get("method")
                .map(String::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("mail_merge")
                .to_string();
            let due = reminders::due_by_month_offset(db, offset, today())?;
            let ids: Vec<i64> = due.iter().map(|c| c.property_id).collect();
            let count = reminder_history::record_sent(db, &ids, &method)?;
            redirect_response(&format!("/reminders?offset={offset}&recorded={count}"))
        }

        // --- backup ---
        ("POST", ["backup"]) => {
            backup::backup_to_dir(db, &config.backup_dir)?;
            redirect_response("/?backup=ok")
        }

        // --- JSON API (envelope matches the desktop app this replaces) ---
        ("GET", ["api", "customers"]) => {
            let listed = customers::list_customers(db, None)?;
            api_ok(&listed)
        }
        ("GET", ["api", "reminders"]) => {
            let due = reminders::due_by_month_offset(db, offset_param(&query), today())?;
            api_ok(&due)
        }
        ("GET", ["api", ..]) => api_error(404, "Unknown API endpoint"),

        _ => Err(ServerError::NotFound),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn offset_param(query: &HashMap<String, String>) -> i32 {
    query
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn dashboard_page(db: &Database, query: &HashMap<String, String>) -> ResultResp {
    let counts = dashboard::counts(db)?;
    let due = reminders::due_by_month_offset(db, 0, today())?;
    let recent = dashboard::recent_jobs(db, 8)?;
    html_response(pages::dashboard::dashboard_page(&pages::dashboard::DashboardVm {
        counts,
        due_this_month: due.len(),
        recent_jobs: recent,
        backup_done: query.get("backup").map(String::as_str) == Some("ok"),
    }))
}

fn property_detail(db: &Database, id: i64) -> ResultResp {
    let property = properties::get_property(db, id)?.ok_or(ServerError::NotFound)?;
    let customer =
        customers::get_customer(db, property.customer_id)?.ok_or(ServerError::NotFound)?;
    let job_list = jobs::list_jobs_for_property(db, id)?;
    let last_cleaned = properties::last_cleaned_date(db, id)?;
    let last_reminder = reminder_history::last_sent_date(db, id)?;
    let history = reminder_history::list_for_property(db, id)?;

    html_response(pages::properties::property_detail_page(
        &pages::properties::PropertyDetailVm {
            property: &property,
            customer: &customer,
            jobs: &job_list,
            last_cleaned,
            last_reminder,
            reminder_history: &history,
        },
    ))
}

fn reminders_page(db: &Database, query: &HashMap<String, String>) -> ResultResp {
    let today = today();
    let offsets = reminders::available_month_offsets(db, today)?;
    let selected = query
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| offsets.first().copied().unwrap_or(0));
    let candidates = reminders::due_by_month_offset(db, selected, today)?;
    let recorded = query.get("recorded").and_then(|v| v.parse().ok());

    html_response(pages::reminders::reminders_page(&pages::reminders::RemindersVm {
        offsets,
        selected,
        candidates,
        today,
        recorded,
    }))
}

// --- request parsing ---

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable request body: {e}")))?;
    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

/// Empty or whitespace-only form fields come through as None.
fn form_value(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_i64(form: &HashMap<String, String>, key: &str, label: &str) -> Result<i64, ServerError> {
    form_value(form, key)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ServerError::BadRequest(format!("{label} is required")))
}

fn optional_i64(
    form: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<Option<i64>, ServerError> {
    match form_value(form, key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{label} must be a whole number"))),
        None => Ok(None),
    }
}

fn require_date(
    form: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<NaiveDate, ServerError> {
    let raw = form_value(form, key)
        .ok_or_else(|| ServerError::BadRequest(format!("{label} is required")))?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| ServerError::BadRequest(format!("'{raw}' is not a valid date")))
}

fn customer_input(form: &HashMap<String, String>) -> CustomerInput {
    CustomerInput {
        title: form_value(form, "title"),
        first_name: form.get("first_name").cloned().unwrap_or_default(),
        last_name: form.get("last_name").cloned().unwrap_or_default(),
        phone: form_value(form, "phone"),
        email: form_value(form, "email"),
        notes: form_value(form, "notes"),
    }
}

fn property_input(form: &HashMap<String, String>) -> Result<PropertyInput, ServerError> {
    Ok(PropertyInput {
        customer_id: require_i64(form, "customer_id", "Owner")?,
        address_line_1: form.get("address_line_1").cloned().unwrap_or_default(),
        address_line_2: form_value(form, "address_line_2"),
        town: form.get("town").cloned().unwrap_or_default(),
        postcode: form_value(form, "postcode"),
        chimney_count: optional_i64(form, "chimney_count", "Chimney count")?.unwrap_or(1),
        square_feet: optional_i64(form, "square_feet", "Square feet")?,
        service_interval_months: optional_i64(
            form,
            "service_interval_months",
            "Service interval",
        )?,
        notes: form_value(form, "notes"),
    })
}

fn job_input(form: &HashMap<String, String>) -> Result<JobInput, ServerError> {
    let cost_pence = match form_value(form, "cost") {
        Some(raw) => Some(money::parse_pounds(&raw).ok_or_else(|| {
            ServerError::BadRequest(format!("'{raw}' is not a valid amount"))
        })?),
        None => None,
    };

    Ok(JobInput {
        property_id: require_i64(form, "property_id", "Property")?,
        date_completed: require_date(form, "date_completed", "Date completed")?,
        service_type: form.get("service_type").cloned().unwrap_or_default(),
        cost_pence,
        certificate_number: form_value(form, "certificate_number"),
        notes: form_value(form, "notes"),
    })
}
