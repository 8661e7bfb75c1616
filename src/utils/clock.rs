use std::time::{SystemTime, UNIX_EPOCH};

/// Source of capture timestamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u128;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    }
}

/// File name for a photo captured at `millis`.
pub fn photo_file_name(millis: u128) -> String {
    format!("{}.jpeg", millis)
}
