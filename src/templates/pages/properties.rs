use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};

use crate::db::properties::PropertyWithCustomer;
use crate::db::reminder_history::ReminderHistoryEntry;
use crate::domain::money::format_pence;
use crate::domain::{Customer, Job, Property};
use crate::templates::components::{number_field, select_field, text_field, textarea_field};
use crate::templates::desktop_layout;

pub fn properties_page(properties: &[PropertyWithCustomer]) -> Markup {
    desktop_layout(
        "Properties",
        html! {
            h1 { "Properties" }

            @if properties.is_empty() {
                p class="muted" {
                    "No properties yet. Add one from a "
                    a href="/customers" { "customer's page" }
                    "."
                }
            } @else {
                table {
                    thead {
                        tr { th { "Address" } th { "Owner" } th { "Chimneys" } th {} }
                    }
                    tbody {
                        @for row in properties {
                            tr {
                                td {
                                    a href={ "/properties/" (row.property.id) } {
                                        (row.property.address_full())
                                    }
                                }
                                td { (row.customer_name) }
                                td { (row.property.chimney_count) }
                                td {
                                    a href={ "/properties/" (row.property.id) "/edit" } { "Edit" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn property_form(
    heading: &str,
    action: &str,
    customers: &[Customer],
    existing: Option<&Property>,
    default_customer: Option<i64>,
) -> Markup {
    let owner_options: Vec<(String, String)> = customers
        .iter()
        .map(|c| (c.id.to_string(), c.display_name()))
        .collect();
    let selected_owner = existing
        .map(|p| p.customer_id)
        .or(default_customer)
        .map(|id| id.to_string());

    desktop_layout(
        heading,
        html! {
            h1 { (heading) }
            form class="stacked" method="post" action=(action) {
                (select_field("Owner", "customer_id", &owner_options, selected_owner.as_deref()))
                (text_field("Address line 1", "address_line_1", existing.map(|p| p.address_line_1.as_str()), true))
                (text_field("Address line 2", "address_line_2", existing.and_then(|p| p.address_line_2.as_deref()), false))
                (text_field("Town", "town", existing.map(|p| p.town.as_str()), true))
                (text_field("Postcode", "postcode", existing.and_then(|p| p.postcode.as_deref()), false))
                (number_field("Number of chimneys", "chimney_count", existing.map(|p| p.chimney_count).or(Some(1)), true))
                (number_field("Square feet", "square_feet", existing.and_then(|p| p.square_feet), false))
                (number_field("Service interval (months)", "service_interval_months", existing.and_then(|p| p.service_interval_months).or(Some(12)), false))
                (textarea_field("Notes", "notes", existing.and_then(|p| p.notes.as_deref())))
                button type="submit" { "Save" }
            }
        },
    )
}

pub struct PropertyDetailVm<'a> {
    pub property: &'a Property,
    pub customer: &'a Customer,
    pub jobs: &'a [Job],
    pub last_cleaned: Option<NaiveDate>,
    pub last_reminder: Option<NaiveDateTime>,
    pub reminder_history: &'a [ReminderHistoryEntry],
}

pub fn property_detail_page(vm: &PropertyDetailVm) -> Markup {
    let property = vm.property;
    desktop_layout(
        &property.address_full(),
        html! {
            h1 { (property.address_full()) }
            p {
                "Owned by "
                a href={ "/customers/" (vm.customer.id) } { (vm.customer.display_name()) }
            }

            section class="card" {
                h3 { "Details" }
                p {
                    (property.chimney_count) " chimney(s)"
                    @if let Some(sq) = property.square_feet {
                        " · " (sq) " sq ft"
                    }
                    @if let Some(interval) = property.service_interval_months {
                        " · service interval " (interval) " months"
                    }
                }
                p {
                    "Last swept: "
                    @if let Some(date) = vm.last_cleaned {
                        strong { (date) }
                    } @else {
                        span class="muted" { "never" }
                    }
                    " · Last reminder: "
                    @if let Some(sent) = vm.last_reminder {
                        strong { (sent.format("%Y-%m-%d")) }
                    } @else {
                        span class="muted" { "never" }
                    }
                }
                @if let Some(notes) = property.notes.as_deref() {
                    p { (notes) }
                }
                p {
                    a href={ "/properties/" (property.id) "/edit" } { "Edit" }
                    " "
                    form class="inline" method="post"
                        action={ "/properties/" (property.id) "/delete" } {
                        button type="submit" { "Delete property and its jobs" }
                    }
                }
            }

            section class="card" {
                h3 { "Jobs" }
                @if vm.jobs.is_empty() {
                    p class="muted" { "No jobs recorded for this property." }
                } @else {
                    table {
                        thead {
                            tr { th { "Date" } th { "Type" } th { "Cost" } th { "Certificate" } th {} }
                        }
                        tbody {
                            @for job in vm.jobs {
                                tr {
                                    td { (job.date_completed) }
                                    td { (job.service_type) }
                                    td {
                                        @if let Some(p) = job.cost_pence {
                                            (format_pence(p))
                                        } @else {
                                            span class="muted" { "-" }
                                        }
                                    }
                                    td { (job.certificate_number.as_deref().unwrap_or("")) }
                                    td {
                                        a href={ "/jobs/" (job.id) "/edit" } { "Edit" }
                                        " "
                                        form class="inline" method="post"
                                            action={ "/jobs/" (job.id) "/delete" } {
                                            button type="submit" { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                p {
                    a href={ "/properties/" (property.id) "/jobs/new" } { "Record a job" }
                    @if !vm.jobs.is_empty() {
                        " · "
                        a href={ "/properties/" (property.id) "/jobs/export.csv" } { "Export CSV" }
                        " · "
                        a href={ "/properties/" (property.id) "/jobs/export.xlsx" } { "Export spreadsheet" }
                    }
                }
            }

            section class="card" {
                h3 { "Reminder history" }
                @if vm.reminder_history.is_empty() {
                    p class="muted" { "No reminders sent yet." }
                } @else {
                    table {
                        thead { tr { th { "Sent" } th { "Method" } } }
                        tbody {
                            @for entry in vm.reminder_history {
                                tr {
                                    td { (entry.date_sent.format("%Y-%m-%d %H:%M")) }
                                    td { (entry.method) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
