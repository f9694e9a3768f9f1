use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::customer::clean_optional;
use crate::domain::postcode;
use crate::errors::ServerError;

/// A property as stored in the `properties` table. Address is kept as
/// structured fields; the single-line form is derived, never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: i64,
    pub customer_id: i64,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub town: String,
    pub postcode: Option<String>,
    pub chimney_count: i64,
    pub square_feet: Option<i64>,
    pub service_interval_months: Option<i64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Property {
    /// "12 High St, Flat 2, Oldcastle, EX1 2AB"
    pub fn address_full(&self) -> String {
        join_address(
            &self.address_line_1,
            self.address_line_2.as_deref(),
            &self.town,
            self.postcode.as_deref(),
        )
    }
}

pub(crate) fn join_address(
    line_1: &str,
    line_2: Option<&str>,
    town: &str,
    postcode: Option<&str>,
) -> String {
    let mut parts = vec![line_1];
    if let Some(l2) = line_2 {
        parts.push(l2);
    }
    parts.push(town);
    if let Some(pc) = postcode {
        parts.push(pc);
    }
    parts.join(", ")
}

/// The editable field set, as posted by the new/edit forms.
#[derive(Debug, Clone)]
pub struct PropertyInput {
    pub customer_id: i64,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub town: String,
    pub postcode: Option<String>,
    pub chimney_count: i64,
    pub square_feet: Option<i64>,
    pub service_interval_months: Option<i64>,
    pub notes: Option<String>,
}

impl PropertyInput {
    /// Trims fields, normalises the postcode, and rejects a missing address
    /// line or town. The postcode is optional; when supplied it must be a
    /// valid UK postcode and is stored in "SW1A 1AA" form.
    pub fn validated(self) -> Result<Self, ServerError> {
        let address_line_1 = self.address_line_1.trim().to_string();
        let town = self.town.trim().to_string();

        if address_line_1.is_empty() {
            return Err(ServerError::BadRequest("Address line 1 is required".into()));
        }
        if town.is_empty() {
            return Err(ServerError::BadRequest("Town is required".into()));
        }
        if self.chimney_count < 1 {
            return Err(ServerError::BadRequest(
                "Chimney count must be at least 1".into(),
            ));
        }
        if matches!(self.square_feet, Some(sq) if sq < 0) {
            return Err(ServerError::BadRequest(
                "Square feet cannot be negative".into(),
            ));
        }
        if matches!(self.service_interval_months, Some(m) if m < 1) {
            return Err(ServerError::BadRequest(
                "Service interval must be at least one month".into(),
            ));
        }

        let postcode = match clean_optional(self.postcode) {
            Some(raw) => Some(postcode::validate_and_format(&raw)?),
            None => None,
        };

        Ok(PropertyInput {
            customer_id: self.customer_id,
            address_line_1,
            address_line_2: clean_optional(self.address_line_2),
            town,
            postcode,
            chimney_count: self.chimney_count,
            square_feet: self.square_feet,
            service_interval_months: self.service_interval_months,
            notes: clean_optional(self.notes),
        })
    }
}
