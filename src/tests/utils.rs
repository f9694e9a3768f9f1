use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::db::connection::{init_db, Database};

/// A fresh temp-file database with the production schema, plus a config
/// pointing the backup directory somewhere disposable.
pub fn make_test_app() -> (Database, Config) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("sweepcrm_router_test_{nanos}"));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let db_path = dir.join("test.sqlite");
    let db = Database::new(db_path.to_string_lossy());
    init_db(&db).expect("schema init failed");

    let config = Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        backup_dir: dir.join("backups"),
    };

    (db, config)
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::from(""))
        .unwrap()
}

pub fn post_form(path: &str, fields: &[(&str, &str)]) -> Request {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();

    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut buf = Vec::new();
    resp.body_mut().reader().read_to_end(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}
