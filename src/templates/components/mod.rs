pub mod forms;

pub use forms::{date_field, number_field, select_field, text_field, textarea_field};
