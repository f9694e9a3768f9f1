pub mod csv;
pub mod xlsx;

pub use csv::{jobs_csv, reminders_csv};
pub use xlsx::{jobs_xlsx, reminders_xlsx};
