#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const SECRET: &str = "topsecret";
pub const SECRET_ENV: &str = "MARKETPAY_WEBHOOK_SECRET";
pub const PAYLOAD: &str = r#"{"event":"charge.success"}"#;
pub const GOLDEN_SIGNATURE: &str = "28010ec07b9afa645d164f580bc88158acab3a7b32ee1ec403df3dea7f062c1bf235f8652c4b70900cf98f55613646d9a6156b5c0e335e5368e5b69d4a95be8b";

/// Writes `contents` to a fresh temp file without a trailing newline.
pub fn payload_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Writes a seed CSV with one row per `(kind, id, value)`.
pub fn seed_file(rows: &[(&str, &str, &str)]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(file.path()).unwrap();
    wtr.write_record(["kind", "id", "value"]).unwrap();
    for (kind, id, value) in rows {
        wtr.write_record([*kind, *id, *value]).unwrap();
    }
    wtr.flush().unwrap();
    file
}
