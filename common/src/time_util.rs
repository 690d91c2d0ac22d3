use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

/// Seconds since the Unix epoch, used to stamp `created_at`/`updated_at`
/// metadata fields.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

/// Current local time formatted for log lines and `DUMP DATABASE` headers.
pub fn now_str() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
