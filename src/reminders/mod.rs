pub mod engine;

pub use engine::{available_month_offsets, due_by_month_offset, due_for_reminder};
