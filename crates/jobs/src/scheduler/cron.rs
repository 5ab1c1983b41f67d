//! Cron expression normalization and parsing helpers.

use std::str::FromStr;

use cron::Schedule;

use super::ScheduleError;

/// Normalize a 5-field cron expression to 6-field by prepending "0 " for
/// seconds.
///
/// The `cron` crate requires 6 fields: `sec min hour day-of-month month
/// day-of-week`. Registration requests use standard 5-field cron:
/// `min hour day-of-month month day-of-week`.
pub(crate) fn normalize_cron(cron_5field: &str) -> String {
    let trimmed = cron_5field.trim();
    let field_count = trimmed.split_whitespace().count();
    if field_count == 5 {
        format!("0 {}", trimmed)
    } else {
        // Already 6-field or non-standard; pass through as-is.
        trimmed.to_string()
    }
}

/// Normalize and parse an expression, keeping the normalized text for
/// listing alongside the parsed schedule.
pub(crate) fn parse_schedule(expression: &str) -> Result<(String, Schedule), ScheduleError> {
    let normalized = normalize_cron(expression);
    let schedule =
        Schedule::from_str(&normalized).map_err(|source| ScheduleError::InvalidExpression {
            expression: expression.to_string(),
            source,
        })?;
    Ok((normalized, schedule))
}
