pub mod errors;
pub mod files;
pub mod html;
pub mod json;

pub use errors::{error_response, ResultResp};
pub use files::{csv_response, xlsx_response};
pub use html::{html_response, redirect_response};
pub use json::{api_error, api_ok};
