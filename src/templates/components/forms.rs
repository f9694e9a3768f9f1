// Labelled form controls shared by the new/edit pages.

use chrono::NaiveDate;
use maud::{html, Markup};

pub fn text_field(label: &str, name: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="text" id=(name) name=(name) value=[value] required[required];
    }
}

pub fn number_field(label: &str, name: &str, value: Option<i64>, required: bool) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="number" id=(name) name=(name) value=[value] required[required];
    }
}

pub fn date_field(label: &str, name: &str, value: Option<NaiveDate>, required: bool) -> Markup {
    let value = value.map(|d| d.format("%Y-%m-%d").to_string());
    html! {
        label for=(name) { (label) }
        input type="date" id=(name) name=(name) value=[value] required[required];
    }
}

pub fn textarea_field(label: &str, name: &str, value: Option<&str>) -> Markup {
    html! {
        label for=(name) { (label) }
        textarea id=(name) name=(name) rows="3" { (value.unwrap_or("")) }
    }
}

/// A select of (value, label) pairs with an optional preselected value.
pub fn select_field(
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: Option<&str>,
) -> Markup {
    html! {
        label for=(name) { (label) }
        select id=(name) name=(name) {
            @for (value, text) in options {
                option value=(value) selected[selected == Some(value.as_str())] { (text) }
            }
        }
    }
}
