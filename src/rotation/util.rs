use crate::model::{EmployeeId, ShiftCode};
use chrono::NaiveDate;

/// Phase order shared by every table-driven archetype.
pub(super) const PHASE_WHEEL: [ShiftCode; 4] = [
    ShiftCode::Early,
    ShiftCode::Late,
    ShiftCode::Night,
    ShiftCode::Off,
];

pub(super) fn days_between(start: NaiveDate, current: NaiveDate) -> i64 {
    current.signed_duration_since(start).num_days()
}

/// Crew ids deduplicated in first-seen order; slot index is positional.
pub(super) fn distinct_crew(crew: &[EmployeeId]) -> Vec<EmployeeId> {
    let mut out: Vec<EmployeeId> = Vec::with_capacity(crew.len());
    for id in crew {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Inclusive day iteration helper.
pub(super) fn each_day(
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    window_start
        .iter_days()
        .take_while(move |d| *d <= window_end)
}
