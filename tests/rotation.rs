#![forbid(unsafe_code)]
use chrono::{Datelike, Duration, NaiveDate};
use schichtplan::{generate, EmployeeId, RotationArchetype, ShiftCode, ShiftEntry};
use std::collections::{HashMap, HashSet};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn crew(n: usize) -> Vec<EmployeeId> {
    (1..=n).map(|i| EmployeeId::new(format!("e{i}"))).collect()
}

fn code_of(entries: &[ShiftEntry], employee: &EmployeeId, date: NaiveDate) -> ShiftCode {
    entries
        .iter()
        .find(|e| &e.employee_id == employee && e.date == date)
        .map(|e| e.code)
        .unwrap_or_else(|| panic!("no entry for {} on {date}", employee.as_str()))
}

#[test]
fn four_crew_standard_matches_documented_pattern() {
    let crew = crew(4);
    let start = d(2025, 1, 1);
    let entries = generate(
        RotationArchetype::FourCrewStandardEightDay,
        &crew,
        &[],
        start,
        start,
        start + Duration::days(15),
    );

    let expect = [
        // days 0-1
        (0, 0, ShiftCode::Early),
        (0, 1, ShiftCode::Late),
        (0, 2, ShiftCode::Night),
        (0, 3, ShiftCode::Off),
        // days 2-3
        (2, 0, ShiftCode::Late),
        (2, 1, ShiftCode::Night),
        (2, 2, ShiftCode::Off),
        (2, 3, ShiftCode::Early),
    ];
    for (day, slot, code) in expect {
        let date = start + Duration::days(day);
        assert_eq!(code_of(&entries, &crew[slot], date), code, "day {day} slot {slot}");
        // second day of the same block
        assert_eq!(code_of(&entries, &crew[slot], date + Duration::days(1)), code);
    }

    // the cycle repeats after 8 days
    for slot in 0..4 {
        assert_eq!(
            code_of(&entries, &crew[slot], start),
            code_of(&entries, &crew[slot], start + Duration::days(8)),
        );
    }
}

#[test]
fn four_crew_standard_spreads_codes_evenly() {
    let crew = crew(4);
    let start = d(2025, 3, 10);
    let entries = generate(
        RotationArchetype::FourCrewStandardEightDay,
        &crew,
        &[],
        start,
        start,
        start + Duration::days(7),
    );

    for employee in &crew {
        let mut counts: HashMap<ShiftCode, usize> = HashMap::new();
        for e in entries.iter().filter(|e| &e.employee_id == employee) {
            *counts.entry(e.code).or_default() += 1;
        }
        for code in [ShiftCode::Early, ShiftCode::Late, ShiftCode::Night, ShiftCode::Off] {
            assert_eq!(counts.get(&code), Some(&2), "{code} for {}", employee.as_str());
        }
    }
}

#[test]
fn four_crew_long_uses_four_day_blocks() {
    let crew = crew(4);
    let start = d(2025, 1, 6);
    let entries = generate(
        RotationArchetype::FourCrewLongSixteenDay,
        &crew,
        &[],
        start,
        start,
        start + Duration::days(31),
    );

    // slot 0 works early duty for the first four days, then moves on
    for day in 0..4 {
        assert_eq!(code_of(&entries, &crew[0], start + Duration::days(day)), ShiftCode::Early);
    }
    for day in 4..8 {
        assert_eq!(code_of(&entries, &crew[0], start + Duration::days(day)), ShiftCode::Late);
    }
    // full cycle length is sixteen days
    for slot in 0..4 {
        assert_eq!(
            code_of(&entries, &crew[slot], start),
            code_of(&entries, &crew[slot], start + Duration::days(16)),
        );
    }
}

#[test]
fn three_crew_never_exceeds_three_consecutive_same_codes() {
    let crew = crew(3);
    let start = d(2025, 2, 3);
    let end = start + Duration::days(59);
    let entries = generate(
        RotationArchetype::ThreeCrewNineDay,
        &crew,
        &[],
        start,
        start,
        end,
    );

    for employee in &crew {
        let mut run = 0usize;
        let mut last: Option<ShiftCode> = None;
        let mut seen: HashSet<ShiftCode> = HashSet::new();
        let mut date = start;
        while date <= end {
            let code = code_of(&entries, employee, date);
            seen.insert(code);
            if last == Some(code) {
                run += 1;
            } else {
                run = 1;
                last = Some(code);
            }
            assert!(run <= 3, "{} worked {run} days of {code}", employee.as_str());
            date += Duration::days(1);
        }
        assert_eq!(seen.len(), 4, "{} missed a phase", employee.as_str());
    }
}

#[test]
fn generated_sets_contain_no_employee_date_duplicates() {
    let cases = [
        (RotationArchetype::ThreeCrewNineDay, 3),
        (RotationArchetype::FourCrewStandardEightDay, 4),
        (RotationArchetype::FourCrewLongSixteenDay, 4),
    ];
    let start = d(2025, 6, 1);
    for (archetype, size) in cases {
        let crew = crew(size);
        let entries = generate(archetype, &crew, &[], start, start, start + Duration::days(29));
        let mut seen = HashSet::new();
        for e in &entries {
            assert!(
                seen.insert((e.employee_id.clone(), e.date)),
                "duplicate for {} on {} ({archetype:?})",
                e.employee_id.as_str(),
                e.date
            );
        }
        assert_eq!(entries.len(), size * 30);
    }
}

#[test]
fn generation_is_deterministic() {
    let crew = crew(4);
    let start = d(2025, 9, 1);
    let a = generate(
        RotationArchetype::FourCrewLongSixteenDay,
        &crew,
        &[],
        start,
        start,
        start + Duration::days(45),
    );
    let b = generate(
        RotationArchetype::FourCrewLongSixteenDay,
        &crew,
        &[],
        start,
        start,
        start + Duration::days(45),
    );
    assert_eq!(a, b);
}

fn two_week_template() -> Vec<ShiftEntry> {
    // ISO weeks 10 and 11 of 2025 (Mon 2025-03-03 .. Sun 2025-03-16)
    vec![
        ShiftEntry::on(EmployeeId::new("e1"), d(2025, 3, 3), ShiftCode::Early),
        ShiftEntry::on(EmployeeId::new("e2"), d(2025, 3, 4), ShiftCode::Late),
        ShiftEntry::on(EmployeeId::new("e1"), d(2025, 3, 10), ShiftCode::Night),
        ShiftEntry::on(EmployeeId::new("e2"), d(2025, 3, 12), ShiftCode::Off),
    ]
}

#[test]
fn template_replication_reproduces_source_weeks() {
    let template = two_week_template();
    let entries = generate(
        RotationArchetype::GenericTemplateReplication,
        &[],
        &template,
        d(2025, 1, 1),
        d(2025, 1, 1),
        d(2025, 12, 31),
    );

    // the source weeks come back verbatim
    for original in &template {
        assert!(entries.contains(original), "missing {original:?}");
    }
    // week A replays two weeks after its anchor, on the matching weekday
    assert!(entries.contains(&ShiftEntry::on(
        EmployeeId::new("e1"),
        d(2025, 3, 17),
        ShiftCode::Early
    )));
    // week B likewise
    assert!(entries.contains(&ShiftEntry::on(
        EmployeeId::new("e1"),
        d(2025, 3, 24),
        ShiftCode::Night
    )));
    // nothing escapes the target calendar year
    assert!(entries.iter().all(|e| e.date.year() == 2025));
}

#[test]
fn wrong_crew_size_falls_back_to_template_replication() {
    let template = two_week_template();
    let short_crew = crew(2);
    let fallback = generate(
        RotationArchetype::ThreeCrewNineDay,
        &short_crew,
        &template,
        d(2025, 1, 1),
        d(2025, 1, 1),
        d(2025, 12, 31),
    );
    let generic = generate(
        RotationArchetype::GenericTemplateReplication,
        &short_crew,
        &template,
        d(2025, 1, 1),
        d(2025, 1, 1),
        d(2025, 12, 31),
    );
    assert_eq!(fallback, generic);
    assert!(!fallback.is_empty());
}
