use chrono::NaiveDate;
use maud::{html, Markup};

use crate::domain::ReminderCandidate;
use crate::templates::desktop_layout;

pub struct RemindersVm {
    pub offsets: Vec<i32>,
    pub selected: i32,
    pub candidates: Vec<ReminderCandidate>,
    pub today: NaiveDate,
    pub recorded: Option<usize>,
}

fn offset_label(offset: i32) -> String {
    match offset {
        0 => "Due this month".to_string(),
        1 => "Due next month".to_string(),
        n => format!("Due in {n} months"),
    }
}

pub fn reminders_page(vm: &RemindersVm) -> Markup {
    desktop_layout(
        "Reminders",
        html! {
            h1 { "Reminders" }
            p class="muted" { "As of " (vm.today) ". Properties swept 11-12 months before the selected month are due." }

            @if let Some(count) = vm.recorded {
                p class="flash" { "Recorded " (count) " reminders as sent." }
            }

            form method="get" action="/reminders" {
                label for="offset" { "Month" }
                " "
                select id="offset" name="offset" {
                    @for offset in &vm.offsets {
                        option value=(offset) selected[*offset == vm.selected] {
                            (offset_label(*offset))
                        }
                    }
                    @if vm.offsets.is_empty() {
                        option value="0" selected { (offset_label(0)) }
                    }
                }
                button type="submit" { "Show" }
            }

            @if vm.candidates.is_empty() {
                p class="muted" { "Nothing due for this month." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Customer" }
                            th { "Address" }
                            th { "Last swept" }
                            th { "Months since" }
                            th { "Last reminder" }
                        }
                    }
                    tbody {
                        @for row in &vm.candidates {
                            tr {
                                td { (row.customer_name) }
                                td {
                                    a href={ "/properties/" (row.property_id) } { (row.address_full()) }
                                }
                                td {
                                    @if let Some(date) = row.last_cleaned_date {
                                        (date)
                                    } @else {
                                        span class="muted" { "never" }
                                    }
                                }
                                td { (row.months_since_last_clean) }
                                td {
                                    @if let Some(sent) = row.last_reminder_date {
                                        (sent.format("%Y-%m-%d"))
                                    } @else {
                                        span class="muted" { "never" }
                                    }
                                }
                            }
                        }
                    }
                }

                p {
                    a href={ "/reminders/export.csv?offset=" (vm.selected) } { "Export CSV" }
                    " · "
                    a href={ "/reminders/export.xlsx?offset=" (vm.selected) } { "Export spreadsheet" }
                }

                form method="post" action="/reminders/record" {
                    input type="hidden" name="offset" value=(vm.selected);
                    label for="method" { "Sent via" }
                    " "
                    select id="method" name="method" {
                        option value="mail_merge" { "Mail merge" }
                        option value="email" { "Email" }
                    }
                    button type="submit" { "Mark batch as sent" }
                }
            }
        },
    )
}
