use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Strong identifier for a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strong identifier for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub(crate) i64);

        impl $name {
            pub fn from_value(value: i64) -> Self {
                Self(value)
            }
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Sequential plan id (relational key on the backend side).
    PlanId
);
numeric_id!(
    /// Sequential id of a persisted shift row.
    ShiftRowId
);
numeric_id!(
    /// Sequential id of a manual assignment.
    AssignmentId
);

/// Daily duty code of one crew member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftCode {
    Early,
    Late,
    Night,
    Off,
}

impl ShiftCode {
    /// Fixed wall-clock hours of the duty; `None` for a free day.
    /// Night (22:00–06:00) crosses midnight.
    pub fn hours(self) -> Option<(NaiveTime, NaiveTime)> {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        match self {
            ShiftCode::Early => Some((hm(6, 0), hm(14, 0))),
            ShiftCode::Late => Some((hm(14, 0), hm(22, 0))),
            ShiftCode::Night => Some((hm(22, 0), hm(6, 0))),
            ShiftCode::Off => None,
        }
    }

    pub fn crosses_midnight(self) -> bool {
        matches!(self, ShiftCode::Night)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftCode::Early => "early",
            ShiftCode::Late => "late",
            ShiftCode::Night => "night",
            ShiftCode::Off => "off",
        }
    }
}

impl FromStr for ShiftCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" | "frueh" | "früh" | "f" => Ok(ShiftCode::Early),
            "late" | "spaet" | "spät" | "s" => Ok(ShiftCode::Late),
            "night" | "nacht" | "n" => Ok(ShiftCode::Night),
            "off" | "frei" | "-" => Ok(ShiftCode::Off),
            other => Err(format!("unknown shift code: {other}")),
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic generated unit: one employee, one date, one duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub code: ShiftCode,
}

impl ShiftEntry {
    /// Builds an entry carrying the code's default hours.
    pub fn on(employee_id: EmployeeId, date: NaiveDate, code: ShiftCode) -> Self {
        let (start_time, end_time) = match code.hours() {
            Some((s, e)) => (Some(s), Some(e)),
            None => (None, None),
        };
        Self {
            employee_id,
            date,
            start_time,
            end_time,
            code,
        }
    }
}

/// Plan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Published,
    Archived,
}

/// Shift-plan header, owner of 0..n shift rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPlan {
    pub id: PlanId,
    pub tenant_id: TenantId,
    pub name: String,
    pub department_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PlanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Persisted shift row, attached to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRow {
    pub id: ShiftRowId,
    pub tenant_id: TenantId,
    pub plan_id: PlanId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub code: ShiftCode,
    pub department_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<i64>,
    pub status: PlanStatus,
    pub created_by: String,
}

/// Status of a manual assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Cancelled,
}

/// Manual assignment of an employee to a shift row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: AssignmentId,
    pub tenant_id: TenantId,
    pub shift_id: ShiftRowId,
    pub employee_id: EmployeeId,
    pub assigned_by: String,
    pub status: AssignmentStatus,
}

/// Complete persistable state: plans, rows, assignments and id sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub plans: Vec<ShiftPlan>,
    pub shifts: Vec<ShiftRow>,
    pub assignments: Vec<ShiftAssignment>,
    #[serde(default)]
    plan_seq: i64,
    #[serde(default)]
    shift_seq: i64,
    #[serde(default)]
    assignment_seq: i64,
}

impl Registry {
    pub(crate) fn next_plan_id(&mut self) -> PlanId {
        self.plan_seq += 1;
        PlanId(self.plan_seq)
    }

    pub(crate) fn next_shift_id(&mut self) -> ShiftRowId {
        self.shift_seq += 1;
        ShiftRowId(self.shift_seq)
    }

    pub(crate) fn next_assignment_id(&mut self) -> AssignmentId {
        self.assignment_seq += 1;
        AssignmentId(self.assignment_seq)
    }

    pub fn find_plan(&self, tenant: &TenantId, id: PlanId) -> Option<&ShiftPlan> {
        self.plans
            .iter()
            .find(|p| p.id == id && &p.tenant_id == tenant)
    }

    pub fn find_plan_mut(&mut self, tenant: &TenantId, id: PlanId) -> Option<&mut ShiftPlan> {
        self.plans
            .iter_mut()
            .find(|p| p.id == id && &p.tenant_id == tenant)
    }

    pub fn find_shift(&self, tenant: &TenantId, id: ShiftRowId) -> Option<&ShiftRow> {
        self.shifts
            .iter()
            .find(|s| s.id == id && &s.tenant_id == tenant)
    }

    pub fn plan_shifts(&self, tenant: &TenantId, plan_id: PlanId) -> Vec<&ShiftRow> {
        let mut rows: Vec<&ShiftRow> = self
            .shifts
            .iter()
            .filter(|s| s.plan_id == plan_id && &s.tenant_id == tenant)
            .collect();
        rows.sort_by(|a, b| (a.date, &a.employee_id).cmp(&(b.date, &b.employee_id)));
        rows
    }

    pub fn find_assignment(&self, tenant: &TenantId, id: AssignmentId) -> Option<&ShiftAssignment> {
        self.assignments
            .iter()
            .find(|a| a.id == id && &a.tenant_id == tenant)
    }
}
