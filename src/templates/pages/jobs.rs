use maud::{html, Markup};

use crate::domain::money::format_pence;
use crate::domain::{Job, Property};
use crate::templates::components::{date_field, text_field, textarea_field};
use crate::templates::desktop_layout;

/// Shared by "record a job" and "edit job". Cost is entered in pounds and
/// stored in pence.
pub fn job_form(heading: &str, action: &str, property: &Property, existing: Option<&Job>) -> Markup {
    let cost_pounds = existing
        .and_then(|j| j.cost_pence)
        .map(|p| format_pence(p).trim_start_matches('£').to_string());

    desktop_layout(
        heading,
        html! {
            h1 { (heading) }
            p { "For " strong { (property.address_full()) } }

            form class="stacked" method="post" action=(action) {
                input type="hidden" name="property_id" value=(property.id);
                (date_field("Date completed", "date_completed", existing.map(|j| j.date_completed), true))
                (text_field("Service type", "service_type", existing.map(|j| j.service_type.as_str()).or(Some("sweep")), false))
                (text_field("Cost (£)", "cost", cost_pounds.as_deref(), false))
                (text_field("Certificate number", "certificate_number", existing.and_then(|j| j.certificate_number.as_deref()), false))
                (textarea_field("Notes", "notes", existing.and_then(|j| j.notes.as_deref())))
                button type="submit" { "Save job" }
            }
        },
    )
}
