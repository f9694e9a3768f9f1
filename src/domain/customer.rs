use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::ServerError;

/// A customer as stored in the `customers` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: i64,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// "Jane Doe" — the concatenation used on reminder rows and exports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Mrs Jane Doe" when a title is on file, for letter-style display.
    pub fn display_name(&self) -> String {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => format!("{} {} {}", t, self.first_name, self.last_name),
            _ => self.full_name(),
        }
    }
}

/// The editable field set, as posted by the new/edit forms.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl CustomerInput {
    /// Trims every field, drops empty optionals, and rejects a missing
    /// first or last name.
    pub fn validated(self) -> Result<Self, ServerError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();

        if first_name.is_empty() {
            return Err(ServerError::BadRequest("First name is required".into()));
        }
        if last_name.is_empty() {
            return Err(ServerError::BadRequest("Last name is required".into()));
        }

        Ok(CustomerInput {
            title: clean_optional(self.title),
            first_name,
            last_name,
            phone: clean_optional(self.phone),
            email: clean_optional(self.email),
            notes: clean_optional(self.notes),
        })
    }
}

/// Empty or whitespace-only optional text becomes None.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_rejects_blank_names() {
        let input = CustomerInput {
            first_name: "  ".into(),
            last_name: "Doe".into(),
            ..Default::default()
        };
        assert!(matches!(
            input.validated(),
            Err(ServerError::BadRequest(_))
        ));
    }

    #[test]
    fn validated_cleans_optionals() {
        let input = CustomerInput {
            title: Some("  ".into()),
            first_name: " Jane ".into(),
            last_name: "Doe".into(),
            phone: Some(" 01234 567890 ".into()),
            ..Default::default()
        };
        let clean = input.validated().unwrap();
        assert_eq!(clean.title, None);
        assert_eq!(clean.first_name, "Jane");
        assert_eq!(clean.phone.as_deref(), Some("01234 567890"));
    }
}
