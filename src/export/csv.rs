use crate::domain::money::format_pence;
use crate::domain::ReminderCandidate;
use crate::errors::ServerError;

/// A reminder batch as CSV, one row per candidate. Fields containing a
/// comma, quote, or newline are quoted with internal quotes doubled; the
/// csv writer only quotes when it has to.
pub fn reminders_csv(candidates: &[ReminderCandidate]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "Customer Name",
        "Address",
        "Last Cleaned",
        "Months Since Last Clean",
        "Square Feet",
        "Number of Chimneys",
        "Notes",
    ])?;

    for row in candidates {
        let address = row.address_full();
        let last_cleaned = row
            .last_cleaned_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Never".to_string());
        let months = row.months_since_last_clean.to_string();
        let square_feet = row.square_feet.map(|s| s.to_string()).unwrap_or_default();
        let chimneys = row.chimney_count.to_string();

        writer.write_record([
            row.customer_name.as_str(),
            address.as_str(),
            last_cleaned.as_str(),
            months.as_str(),
            square_feet.as_str(),
            chimneys.as_str(),
            row.notes.as_deref().unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ServerError::CsvError(e.to_string()))
}

/// Per-job CSV used from the property page; costs render as pounds.
pub fn jobs_csv(jobs: &[crate::domain::Job]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "Date Completed",
        "Service Type",
        "Cost",
        "Certificate Number",
        "Notes",
    ])?;

    for job in jobs {
        let date = job.date_completed.to_string();
        let cost = job.cost_pence.map(format_pence).unwrap_or_default();

        writer.write_record([
            date.as_str(),
            job.service_type.as_str(),
            cost.as_str(),
            job.certificate_number.as_deref().unwrap_or(""),
            job.notes.as_deref().unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ServerError::CsvError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(notes: Option<&str>) -> ReminderCandidate {
        ReminderCandidate {
            property_id: 1,
            customer_name: "Jane Doe".into(),
            address_line_1: "12 High St".into(),
            address_line_2: None,
            town: "Oldcastle".into(),
            postcode: Some("EX1 2AB".into()),
            chimney_count: 2,
            square_feet: Some(1400),
            notes: notes.map(String::from),
            last_cleaned_date: NaiveDate::from_ymd_opt(2023, 3, 1),
            months_since_last_clean: 12,
            last_reminder_date: None,
        }
    }

    #[test]
    fn quotes_and_commas_are_escaped() {
        let bytes = reminders_csv(&[candidate(Some("Say \"hi\", please"))]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Say \"\"hi\"\", please\""));
        // The address holds commas, so it must be quoted too.
        assert!(text.contains("\"12 High St, Oldcastle, EX1 2AB\""));
    }

    #[test]
    fn plain_fields_stay_unquoted() {
        let bytes = reminders_csv(&[candidate(None)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Customer Name,Address,Last Cleaned,Months Since Last Clean,Square Feet,Number of Chimneys,Notes"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Jane Doe,\"12 High St, Oldcastle, EX1 2AB\",2023-03-01,12,1400,2,"
        );
    }
}
