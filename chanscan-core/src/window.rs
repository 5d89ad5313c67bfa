use crate::error::ConfigError;
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// How the run's time window is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Everything since midnight UTC of the reference day.
    Today,
    /// Everything within the last N hours.
    RecentHours(i64),
}

/// Computes the inclusive lower bound of the scan window. The window has no
/// upper bound: messages posted while the scan is running are still in scope.
pub fn lower_bound(
    mode: WindowMode,
    reference: DateTime<Utc>,
) -> Result<DateTime<Utc>, ConfigError> {
    match mode {
        WindowMode::Today => Ok(reference.date_naive().and_time(NaiveTime::MIN).and_utc()),
        WindowMode::RecentHours(hours) => {
            if hours <= 0 {
                return Err(ConfigError::InvalidHours { hours });
            }
            Ok(reference - Duration::hours(hours))
        }
    }
}
