pub mod customers;
pub mod dashboard;
pub mod jobs;
pub mod properties;
pub mod reminders;
