use rust_xlsxwriter::Workbook;

use crate::domain::money::format_pence;
use crate::domain::ReminderCandidate;
use crate::errors::ServerError;

/// The reminder batch as a spreadsheet, structured-address variant, for the
/// mail-merge workflow.
pub fn reminders_xlsx(candidates: &[ReminderCandidate]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "Customer Name",
        "Address Line 1",
        "Address Line 2",
        "Town",
        "Postcode",
        "Last Sweep",
        "Months Since",
        "Chimneys",
        "Square Feet",
        "Last Reminder",
        "Notes",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in candidates.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet.write_string(r, 0, &row.customer_name)?;
        worksheet.write_string(r, 1, &row.address_line_1)?;
        worksheet.write_string(r, 2, row.address_line_2.as_deref().unwrap_or(""))?;
        worksheet.write_string(r, 3, &row.town)?;
        worksheet.write_string(r, 4, row.postcode.as_deref().unwrap_or(""))?;

        let last_sweep = row
            .last_cleaned_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Never".to_string());
        worksheet.write_string(r, 5, &last_sweep)?;

        worksheet.write_number(r, 6, row.months_since_last_clean as f64)?;
        worksheet.write_number(r, 7, row.chimney_count as f64)?;

        match row.square_feet {
            Some(sq) => {
                worksheet.write_number(r, 8, sq as f64)?;
            }
            None => {
                worksheet.write_string(r, 8, "")?;
            }
        }

        let last_reminder = row
            .last_reminder_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        worksheet.write_string(r, 9, &last_reminder)?;
        worksheet.write_string(r, 10, row.notes.as_deref().unwrap_or(""))?;
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// A property's job history as a spreadsheet.
pub fn jobs_xlsx(jobs: &[crate::domain::Job]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = ["Date Completed", "Service Type", "Cost", "Certificate", "Notes"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, job) in jobs.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &job.date_completed.to_string())?;
        worksheet.write_string(r, 1, &job.service_type)?;
        worksheet.write_string(r, 2, &job.cost_pence.map(format_pence).unwrap_or_default())?;
        worksheet.write_string(r, 3, job.certificate_number.as_deref().unwrap_or(""))?;
        worksheet.write_string(r, 4, job.notes.as_deref().unwrap_or(""))?;
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}
