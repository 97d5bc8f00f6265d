use super::util::{days_between, each_day, PHASE_WHEEL};
use crate::model::{EmployeeId, ShiftEntry};
use chrono::NaiveDate;

/// Days spent in one phase before the wheel advances.
const PHASE_DAYS: i64 = 3;
/// One pass through all four phases (Early, Late, Night, Off x 3 days).
const WHEEL_DAYS: i64 = 12;

/// Three crews on the 3x3 continuous wheel: three days each of early, late
/// and night duty plus three days off. The per-employee offset advances one
/// step every twelve days, so every crew member passes through every phase.
pub(super) fn generate(
    crew: &[EmployeeId],
    reference_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ShiftEntry> {
    debug_assert_eq!(crew.len(), 3);
    let mut out = Vec::new();

    for date in each_day(window_start, window_end) {
        let elapsed = days_between(reference_start, date);
        let cycle_day = elapsed.rem_euclid(WHEEL_DAYS);
        let rotation = elapsed.div_euclid(WHEEL_DAYS);
        let block = cycle_day / PHASE_DAYS;

        for (slot, employee) in crew.iter().enumerate() {
            let phase = (block + rotation + slot as i64).rem_euclid(4) as usize;
            out.push(ShiftEntry::on(employee.clone(), date, PHASE_WHEEL[phase]));
        }
    }

    out
}
