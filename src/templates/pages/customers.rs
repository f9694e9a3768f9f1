use maud::{html, Markup};

use crate::db::properties::PropertyWithCustomer;
use crate::domain::Customer;
use crate::templates::components::{text_field, textarea_field};
use crate::templates::desktop_layout;

pub fn customers_page(customers: &[Customer], search: Option<&str>) -> Markup {
    desktop_layout(
        "Customers",
        html! {
            h1 { "Customers" }

            form method="get" action="/customers" {
                input type="search" name="q" value=[search] placeholder="Search by name";
                button type="submit" { "Search" }
                " "
                a href="/customers/new" { "Add customer" }
            }

            @if customers.is_empty() {
                p class="muted" { "No customers found." }
            } @else {
                table {
                    thead {
                        tr { th { "Name" } th { "Phone" } th { "Email" } th {} }
                    }
                    tbody {
                        @for customer in customers {
                            tr {
                                td {
                                    a href={ "/customers/" (customer.id) } { (customer.display_name()) }
                                }
                                td { (customer.phone.as_deref().unwrap_or("")) }
                                td { (customer.email.as_deref().unwrap_or("")) }
                                td {
                                    a href={ "/customers/" (customer.id) "/edit" } { "Edit" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn customer_form(heading: &str, action: &str, existing: Option<&Customer>) -> Markup {
    desktop_layout(
        heading,
        html! {
            h1 { (heading) }
            form class="stacked" method="post" action=(action) {
                (text_field("Title", "title", existing.and_then(|c| c.title.as_deref()), false))
                (text_field("First name", "first_name", existing.map(|c| c.first_name.as_str()), true))
                (text_field("Last name", "last_name", existing.map(|c| c.last_name.as_str()), true))
                (text_field("Phone", "phone", existing.and_then(|c| c.phone.as_deref()), false))
                (text_field("Email", "email", existing.and_then(|c| c.email.as_deref()), false))
                (textarea_field("Notes", "notes", existing.and_then(|c| c.notes.as_deref())))
                button type="submit" { "Save" }
            }
        },
    )
}

pub fn customer_detail_page(customer: &Customer, properties: &[PropertyWithCustomer]) -> Markup {
    desktop_layout(
        &customer.display_name(),
        html! {
            h1 { (customer.display_name()) }

            section class="card" {
                h3 { "Contact" }
                p {
                    (customer.phone.as_deref().unwrap_or("No phone"))
                    " · "
                    (customer.email.as_deref().unwrap_or("no email"))
                }
                @if let Some(notes) = customer.notes.as_deref() {
                    p { (notes) }
                }
                p {
                    a href={ "/customers/" (customer.id) "/edit" } { "Edit" }
                    " "
                    form class="inline" method="post"
                        action={ "/customers/" (customer.id) "/delete" } {
                        button type="submit" { "Delete customer and all their data" }
                    }
                }
            }

            section class="card" {
                h3 { "Properties" }
                @if properties.is_empty() {
                    p class="muted" { "No properties yet." }
                } @else {
                    table {
                        thead { tr { th { "Address" } th { "Chimneys" } th {} } }
                        tbody {
                            @for row in properties {
                                tr {
                                    td {
                                        a href={ "/properties/" (row.property.id) } {
                                            (row.property.address_full())
                                        }
                                    }
                                    td { (row.property.chimney_count) }
                                    td {
                                        a href={ "/properties/" (row.property.id) "/edit" } { "Edit" }
                                    }
                                }
                            }
                        }
                    }
                }
                p {
                    a href={ "/properties/new?customer_id=" (customer.id) } { "Add property" }
                }
            }
        },
    )
}
