use super::util::{days_between, each_day, PHASE_WHEEL};
use crate::model::{EmployeeId, ShiftEntry};
use chrono::NaiveDate;

const STANDARD_CYCLE_DAYS: i64 = 8;
const LONG_CYCLE_DAYS: i64 = 16;

/// Four crews, eight-day cycle, 2-2-2 blocks: each crew slot works two days
/// of one duty, then moves on; the fourth slot is always off. Over any eight
/// consecutive days every employee sees each duty code exactly twice.
pub(super) fn generate_standard(
    crew: &[EmployeeId],
    reference_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ShiftEntry> {
    generate_blocked(crew, reference_start, window_start, window_end, 2, STANDARD_CYCLE_DAYS)
}

/// Four crews, sixteen-day cycle, 4-4-4-4 blocks with the phase offset by
/// the employee's slot index.
pub(super) fn generate_long(
    crew: &[EmployeeId],
    reference_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ShiftEntry> {
    generate_blocked(crew, reference_start, window_start, window_end, 4, LONG_CYCLE_DAYS)
}

fn generate_blocked(
    crew: &[EmployeeId],
    reference_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
    block_days: i64,
    cycle_days: i64,
) -> Vec<ShiftEntry> {
    debug_assert_eq!(crew.len(), 4);
    let mut out = Vec::new();

    for date in each_day(window_start, window_end) {
        let cycle_day = days_between(reference_start, date).rem_euclid(cycle_days);
        let block = cycle_day / block_days;

        for (slot, employee) in crew.iter().enumerate() {
            let phase = ((slot as i64 + block) % 4) as usize;
            out.push(ShiftEntry::on(employee.clone(), date, PHASE_WHEEL[phase]));
        }
    }

    out
}
