pub mod backup;
pub mod connection;
pub mod customers;
pub mod dashboard;
pub mod jobs;
pub mod properties;
pub mod reminder_history;
pub mod seed;

pub use connection::{init_db, Database};
