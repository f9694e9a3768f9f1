mod customer_tests;
mod reminder_tests;
