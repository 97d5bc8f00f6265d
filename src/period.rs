use crate::error::{codes, PlanError};
use crate::model::ShiftEntry;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Filters a (possibly year-spanning) entry set to the inclusive window.
pub fn project(
    mut entries: Vec<ShiftEntry>,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ShiftEntry> {
    entries.retain(|e| e.date >= window_start && e.date <= window_end);
    entries
}

/// Default end date for a continuous-shift plan: the later of the Sunday
/// closing ISO week 1 of the next year and `start + 17 weeks`. The second
/// candidate guards against short horizons when the start date sits close
/// to the year boundary.
pub fn default_end_date(start: NaiveDate) -> NaiveDate {
    let week_one_sunday = NaiveDate::from_isoywd_opt(start.year() + 1, 1, Weekday::Sun)
        .unwrap_or_else(|| start + Duration::weeks(52));
    let horizon = start + Duration::weeks(17);
    week_one_sunday.max(horizon)
}

/// Resolves the effective end date of a plan request. Ordinary plans must
/// carry one; continuous plans fall back to the default policy.
pub fn resolve_end_date(
    start: NaiveDate,
    end: Option<NaiveDate>,
    continuous: bool,
) -> Result<NaiveDate, PlanError> {
    match end {
        Some(end) => Ok(end),
        None if continuous => Ok(default_end_date(start)),
        None => Err(PlanError::validation(
            codes::END_DATE_REQUIRED,
            "end date is required for non-continuous plans",
        )),
    }
}
