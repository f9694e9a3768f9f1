// JSON envelope matching the desktop app this replaces:
// {"success": true, "payload": ...} / {"success": false, "error": "..."}

use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn api_ok<T: Serialize>(payload: &T) -> ResultResp {
    let body = serde_json::json!({ "success": true, "payload": payload });
    json_response(200, &body)
}

pub fn api_error(status: u16, message: &str) -> ResultResp {
    let body = serde_json::json!({ "success": false, "error": message });
    json_response(status, &body)
}

fn json_response(status: u16, body: &serde_json::Value) -> ResultResp {
    let text = serde_json::to_string(body).map_err(|_| ServerError::InternalError)?;
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(text))
        .map_err(|_| ServerError::InternalError)
}
