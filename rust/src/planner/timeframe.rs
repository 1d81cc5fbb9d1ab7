//! Timeframe extraction and proportional duration rescaling.

use std::sync::OnceLock;

use regex::Regex;

// ASCII digits only; `\d` would also match other scripts' digits
const TIMEFRAME_PATTERN: &str = r"([0-9]+)\s*(days?|weeks?|months?)";

fn timeframe_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TIMEFRAME_PATTERN).expect("timeframe pattern compiles"))
}

/// Find the first "<n> day(s) / week(s) / month(s)" phrase in a goal.
///
/// Weeks count as 7 days and months as 30. The result is at least one day;
/// counts too large for `u32` saturate at `u32::MAX` days.
pub fn extract_timeframe_days(goal: &str) -> Option<u32> {
    let lower = goal.to_lowercase();
    let caps = timeframe_pattern().captures(&lower)?;
    // Only ASCII digits match, so overflow is the only way parsing fails
    let amount: u32 = caps.get(1)?.as_str().parse().unwrap_or(u32::MAX);
    let unit = caps.get(2)?.as_str();

    let days = if unit.starts_with("week") {
        amount.saturating_mul(7)
    } else if unit.starts_with("month") {
        amount.saturating_mul(30)
    } else {
        amount
    };
    Some(days.max(1))
}

/// Scale `durations` in place so they sum to `target_days`.
///
/// Each duration is multiplied by `target / sum`, rounded to the nearest day
/// and kept at one day or more. Whatever rounding drift remains goes to the
/// last entry, which is also kept at one day or more, so the sum can only
/// overshoot the target when there are more entries than target days.
/// Returns whether anything changed.
pub fn rescale_durations(durations: &mut [u32], target_days: u32) -> bool {
    let current: u64 = durations.iter().map(|&d| u64::from(d)).sum();
    if durations.is_empty() || current == 0 || current == u64::from(target_days) {
        return false;
    }

    let factor = f64::from(target_days) / current as f64;
    for duration in durations.iter_mut() {
        let scaled = (f64::from(*duration) * factor).round();
        *duration = scaled.clamp(1.0, f64::from(u32::MAX)) as u32;
    }

    let adjusted: i64 = durations.iter().map(|&d| i64::from(d)).sum();
    let drift = i64::from(target_days) - adjusted;
    if drift != 0 {
        if let Some(last) = durations.last_mut() {
            let nudged = (i64::from(*last) + drift).max(1);
            *last = u32::try_from(nudged).unwrap_or(u32::MAX);
        }
    }
    true
}
