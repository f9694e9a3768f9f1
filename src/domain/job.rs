use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::customer::clean_optional;
use crate::errors::ServerError;

pub const DEFAULT_SERVICE_TYPE: &str = "sweep";

/// A completed job as stored in the `jobs` table. Edits are last-write-wins;
/// no edit history is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: i64,
    pub property_id: i64,
    pub date_completed: NaiveDate,
    pub service_type: String,
    pub cost_pence: Option<i64>,
    pub certificate_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The editable field set, as posted by the add/edit forms.
#[derive(Debug, Clone)]
pub struct JobInput {
    pub property_id: i64,
    pub date_completed: NaiveDate,
    pub service_type: String,
    pub cost_pence: Option<i64>,
    pub certificate_number: Option<String>,
    pub notes: Option<String>,
}

impl JobInput {
    pub fn validated(self) -> Result<Self, ServerError> {
        if matches!(self.cost_pence, Some(p) if p < 0) {
            return Err(ServerError::BadRequest("Cost cannot be negative".into()));
        }

        let service_type = {
            let t = self.service_type.trim();
            if t.is_empty() {
                DEFAULT_SERVICE_TYPE.to_string()
            } else {
                t.to_string()
            }
        };

        Ok(JobInput {
            property_id: self.property_id,
            date_completed: self.date_completed,
            service_type,
            cost_pence: self.cost_pence,
            certificate_number: clean_optional(self.certificate_number),
            notes: clean_optional(self.notes),
        })
    }
}
