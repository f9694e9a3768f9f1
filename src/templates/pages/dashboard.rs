use maud::{html, Markup};

use crate::db::dashboard::{DashboardCounts, RecentJob};
use crate::domain::money::format_pence;
use crate::templates::desktop_layout;

pub struct DashboardVm {
    pub counts: DashboardCounts,
    pub due_this_month: usize,
    pub recent_jobs: Vec<RecentJob>,
    pub backup_done: bool,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            h1 { "Dashboard" }

            @if vm.backup_done {
                p class="flash" { "Backup written successfully." }
            }

            section class="card" {
                h3 { "At a glance" }
                p {
                    strong { (vm.counts.customers) } " customers · "
                    strong { (vm.counts.properties) } " properties · "
                    strong { (vm.counts.jobs) } " jobs on record"
                }
                p {
                    a href="/reminders" {
                        strong { (vm.due_this_month) } " properties due for a reminder this month"
                    }
                }
            }

            section class="card" {
                h3 { "Recent jobs" }
                @if vm.recent_jobs.is_empty() {
                    p class="muted" { "No jobs recorded yet." }
                } @else {
                    table {
                        thead {
                            tr { th { "Date" } th { "Property" } th { "Customer" } th { "Type" } th { "Cost" } }
                        }
                        tbody {
                            @for job in &vm.recent_jobs {
                                tr {
                                    td { (job.date_completed) }
                                    td { a href={ "/properties/" (job.property_id) } { (job.address) } }
                                    td { (job.customer_name) }
                                    td { (job.service_type) }
                                    td {
                                        @if let Some(p) = job.cost_pence {
                                            (format_pence(p))
                                        } @else {
                                            span class="muted" { "-" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section class="card" {
                h3 { "Backup" }
                p { "Write a snapshot of the database to the backup folder." }
                form method="post" action="/backup" {
                    button type="submit" { "Back up now" }
                }
            }
        },
    )
}
