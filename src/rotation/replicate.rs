use crate::model::ShiftEntry;
use chrono::{Datelike, NaiveDate, Weekday};

/// Generic template replication: the template is split into week A and week B
/// by the ISO week of its first date, then A and B are replayed on
/// alternating ISO weeks across the target year. Each template entry is
/// remapped onto the same weekday of the projected week; dates falling
/// outside the target calendar year are dropped.
///
/// A one-week template replays week A everywhere.
pub(super) fn replicate(template: &[ShiftEntry], target_year: i32) -> Vec<ShiftEntry> {
    let Some(first_date) = template.iter().map(|e| e.date).min() else {
        return Vec::new();
    };
    let anchor = first_date.iso_week();

    let (week_a, week_b): (Vec<&ShiftEntry>, Vec<&ShiftEntry>) = template
        .iter()
        .partition(|e| e.date.iso_week() == anchor);

    let mut out = Vec::new();
    for week in 1..=52u32 {
        let source = if week_b.is_empty() || parity_matches(anchor.week(), week) {
            &week_a
        } else {
            &week_b
        };
        for entry in source {
            let Some(date) = projected_date(target_year, week, entry.date.weekday()) else {
                continue;
            };
            if date.year() != target_year {
                continue;
            }
            let mut projected = (*entry).clone();
            projected.date = date;
            out.push(projected);
        }
    }

    out.sort_by(|a, b| (a.date, &a.employee_id).cmp(&(b.date, &b.employee_id)));
    out
}

fn parity_matches(anchor_week: u32, week: u32) -> bool {
    (i64::from(week) - i64::from(anchor_week)).rem_euclid(2) == 0
}

fn projected_date(year: i32, week: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, weekday)
}
