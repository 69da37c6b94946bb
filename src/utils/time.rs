use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Date stamp used in export filenames, e.g. "2026-08-07".
pub fn date_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}
