use crate::model::{EmployeeId, ShiftCode, ShiftEntry, ShiftPlan, ShiftRow};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Seed-shift import from CSV: header `employee_id,date,shift_code[,start,end]`.
/// Times default to the code's fixed hours when the columns are absent.
pub fn import_seed_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftEntry>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let employee = rec.get(0).context("missing employee_id")?.trim();
        let date = rec.get(1).context("missing date")?.trim();
        let code = rec.get(2).context("missing shift_code")?.trim();
        if employee.is_empty() {
            bail!("invalid seed row (empty employee_id)");
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date}"))?;
        let code: ShiftCode = code
            .parse()
            .map_err(|e| anyhow::anyhow!("{e} (row for employee {employee})"))?;

        let mut entry = ShiftEntry::on(EmployeeId::new(employee), date, code);
        if let Some(start) = non_empty(rec.get(3)) {
            entry.start_time = Some(parse_time(start)?);
        }
        if let Some(end) = non_empty(rec.get(4)) {
            entry.end_time = Some(parse_time(end)?);
        }
        out.push(entry);
    }
    Ok(out)
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time: {raw}"))
}

/// JSON export of a plan header plus its rows (pretty-printed).
pub fn export_plan_json<P: AsRef<Path>>(
    path: P,
    plan: &ShiftPlan,
    shifts: &[ShiftRow],
) -> anyhow::Result<()> {
    let doc = serde_json::json!({ "plan": plan, "shifts": shifts });
    let s = serde_json::to_string_pretty(&doc)?;
    fs::write(path, s)?;
    Ok(())
}

/// CSV export of shift rows: header `id,plan_id,employee_id,date,shift_code,start,end,status`.
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, shifts: &[ShiftRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "plan_id",
        "employee_id",
        "date",
        "shift_code",
        "start",
        "end",
        "status",
    ])?;
    let mut ids = itoa::Buffer::new();
    let mut plan_ids = itoa::Buffer::new();
    for s in shifts {
        let date = s.date.format("%Y-%m-%d").to_string();
        let start = s.start_time.map(|t| t.format("%H:%M").to_string());
        let end = s.end_time.map(|t| t.format("%H:%M").to_string());
        w.write_record([
            ids.format(s.id.value()),
            plan_ids.format(s.plan_id.value()),
            s.employee_id.as_str(),
            date.as_str(),
            s.code.as_str(),
            start.as_deref().unwrap_or(""),
            end.as_deref().unwrap_or(""),
            match s.status {
                crate::model::PlanStatus::Draft => "draft",
                crate::model::PlanStatus::Published => "published",
                crate::model::PlanStatus::Archived => "archived",
            },
        ])?;
    }
    w.flush()?;
    Ok(())
}
