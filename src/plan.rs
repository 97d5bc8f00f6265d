use crate::assignment;
use crate::error::{codes, PlanError};
use crate::model::{
    AssignmentId, EmployeeId, PlanId, PlanStatus, Registry, ShiftEntry, ShiftPlan, ShiftRow,
    ShiftRowId, TenantId,
};
use crate::period;
use crate::rotation::{self, RotationArchetype};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Incoming plan request, as handed over by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub department_id: i64,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub machine_id: Option<i64>,
    #[serde(default)]
    pub area_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pattern_hint: Option<RotationArchetype>,
    #[serde(default)]
    pub continuous: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub shifts: Vec<ShiftEntry>,
}

/// Partial header update; only supplied fields are rebuilt. A supplied
/// shift list replaces the plan's rows wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub machine_id: Option<i64>,
    #[serde(default)]
    pub area_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub shifts: Option<Vec<ShiftEntry>>,
}

/// Lookup filter for `get_plan`; all supplied fields must match.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub id: Option<PlanId>,
    pub name: Option<String>,
    pub department_id: Option<i64>,
}

impl PlanFilter {
    pub fn by_id(id: PlanId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn matches(&self, plan: &ShiftPlan) -> bool {
        self.id.map_or(true, |id| plan.id == id)
            && self.name.as_deref().map_or(true, |n| plan.name == n)
            && self.department_id.map_or(true, |d| plan.department_id == d)
    }

    fn describe(&self) -> String {
        match (self.id, &self.name) {
            (Some(id), _) => id.to_string(),
            (None, Some(name)) => name.clone(),
            _ => "<filter>".to_owned(),
        }
    }
}

/// Result of a plan mutation, echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub plan_id: PlanId,
    pub shift_ids: Vec<ShiftRowId>,
    pub message: String,
}

/// Plan assembler: orchestrates classification, generation, projection and
/// transactional persistence over the in-memory registry.
#[derive(Debug, Default)]
pub struct Planner {
    registry: Registry,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
        }
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Commit-or-rollback wrapper: the body mutates a live registry; on any
    /// error the previous snapshot is restored, leaving no partial state.
    pub fn transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Registry) -> Result<T, PlanError>,
    ) -> Result<T, PlanError> {
        let snapshot = self.registry.clone();
        match body(&mut self.registry) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.registry = snapshot;
                Err(err)
            }
        }
    }

    /// Creates a plan header plus its shift rows in one transaction.
    ///
    /// Continuous-shift requests with a non-empty seed list have the seed
    /// replaced by generator output over the resolved window; any other
    /// request persists the seed list as-is.
    pub fn create_plan(
        &mut self,
        request: &PlanRequest,
        tenant: &TenantId,
        user: &str,
    ) -> Result<PlanOutcome, PlanError> {
        let start = request.start_date;
        if let Some(end) = request.end_date {
            if start > end {
                return Err(PlanError::validation(
                    codes::START_AFTER_END,
                    format!("start date {start} is after end date {end}"),
                ));
            }
        }

        let name = request
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_plan_name(start));
        let continuous = request
            .continuous
            .unwrap_or_else(|| request.pattern_hint.is_some() || rotation::looks_continuous(&name));
        let end = period::resolve_end_date(start, request.end_date, continuous)?;

        let crew = distinct_employees(&request.shifts);
        let archetype = rotation::classify(Some(&name), request.pattern_hint, &crew);
        debug!(%archetype, continuous, %start, %end, "creating plan");

        let request = request.clone();
        let tenant = tenant.clone();
        let user = user.to_owned();
        self.transaction(move |reg| {
            if reg
                .plans
                .iter()
                .any(|p| p.tenant_id == tenant && p.name == name)
            {
                return Err(PlanError::conflict(
                    codes::DUPLICATE_PLAN_NAME,
                    format!("a plan named '{name}' already exists"),
                ));
            }

            let plan = ShiftPlan {
                id: reg.next_plan_id(),
                tenant_id: tenant.clone(),
                name: name.clone(),
                department_id: request.department_id,
                team_id: request.team_id,
                machine_id: request.machine_id,
                area_id: request.area_id,
                start_date: start,
                end_date: end,
                status: PlanStatus::Draft,
                notes: request.notes.clone(),
            };
            let plan_id = plan.id;

            let entries = if continuous && !request.shifts.is_empty() {
                let generated =
                    rotation::generate(archetype, &crew, &request.shifts, start, start, end);
                period::project(generated, start, end)
            } else {
                request.shifts.clone()
            };
            reject_same_day_duplicates(&entries)?;

            let shift_ids = insert_rows(reg, &plan, &user, entries);
            let message = format!(
                "Schichtplan '{}' angelegt ({} Schichten)",
                plan.name,
                shift_ids.len()
            );
            reg.plans.push(plan);

            Ok(PlanOutcome {
                plan_id,
                shift_ids,
                message,
            })
        })
    }

    /// Rebuilds the supplied header fields; a supplied shift list triggers a
    /// full delete-then-reinsert of the plan's rows (never an incremental
    /// patch), so the per-day uniqueness invariant survives partial edits.
    pub fn update_plan(
        &mut self,
        plan_id: PlanId,
        update: &PlanUpdate,
        tenant: &TenantId,
        user: &str,
    ) -> Result<PlanOutcome, PlanError> {
        let update = update.clone();
        let tenant = tenant.clone();
        let user = user.to_owned();
        self.transaction(move |reg| {
            let plan = {
                let plan = reg
                    .find_plan_mut(&tenant, plan_id)
                    .ok_or_else(|| PlanError::not_found("plan", plan_id))?;
                if let Some(name) = &update.name {
                    plan.name = name.clone();
                }
                if let Some(start) = update.start_date {
                    plan.start_date = start;
                }
                if let Some(end) = update.end_date {
                    plan.end_date = end;
                }
                if let Some(department_id) = update.department_id {
                    plan.department_id = department_id;
                }
                if let Some(team_id) = update.team_id {
                    plan.team_id = Some(team_id);
                }
                if let Some(machine_id) = update.machine_id {
                    plan.machine_id = Some(machine_id);
                }
                if let Some(area_id) = update.area_id {
                    plan.area_id = Some(area_id);
                }
                if let Some(notes) = &update.notes {
                    plan.notes = Some(notes.clone());
                }
                if plan.start_date > plan.end_date {
                    return Err(PlanError::validation(
                        codes::START_AFTER_END,
                        format!(
                            "start date {} is after end date {}",
                            plan.start_date, plan.end_date
                        ),
                    ));
                }
                plan.clone()
            };

            let shift_ids = match &update.shifts {
                Some(new_shifts) => {
                    reject_same_day_duplicates(new_shifts)?;
                    remove_plan_rows(reg, &tenant, plan_id);
                    insert_rows(reg, &plan, &user, new_shifts.clone())
                }
                None => reg
                    .plan_shifts(&tenant, plan_id)
                    .iter()
                    .map(|s| s.id)
                    .collect(),
            };

            Ok(PlanOutcome {
                plan_id,
                shift_ids,
                message: format!("Schichtplan '{}' aktualisiert", plan.name),
            })
        })
    }

    /// Deletes a plan: rows first, then the header; assignments referencing
    /// the deleted rows go with them.
    pub fn delete_plan(&mut self, plan_id: PlanId, tenant: &TenantId) -> Result<(), PlanError> {
        let tenant = tenant.clone();
        self.transaction(move |reg| {
            if reg.find_plan(&tenant, plan_id).is_none() {
                return Err(PlanError::not_found("plan", plan_id));
            }
            remove_plan_rows(reg, &tenant, plan_id);
            reg.plans
                .retain(|p| !(p.id == plan_id && p.tenant_id == tenant));
            Ok(())
        })
    }

    /// Fetches the first plan matching the filter plus its rows.
    pub fn get_plan(
        &self,
        filter: &PlanFilter,
        tenant: &TenantId,
    ) -> Result<(ShiftPlan, Vec<ShiftRow>), PlanError> {
        let plan = self
            .registry
            .plans
            .iter()
            .find(|p| &p.tenant_id == tenant && filter.matches(p))
            .ok_or_else(|| PlanError::not_found("plan", filter.describe()))?;
        let shifts = self
            .registry
            .plan_shifts(tenant, plan.id)
            .into_iter()
            .cloned()
            .collect();
        Ok((plan.clone(), shifts))
    }

    pub fn list_plans(&self, tenant: &TenantId) -> Vec<&ShiftPlan> {
        self.registry
            .plans
            .iter()
            .filter(|p| &p.tenant_id == tenant)
            .collect()
    }

    /// Draft → Published.
    pub fn publish_plan(&mut self, plan_id: PlanId, tenant: &TenantId) -> Result<(), PlanError> {
        self.set_status(plan_id, tenant, PlanStatus::Draft, PlanStatus::Published)
    }

    /// Published (or Draft) → Archived.
    pub fn archive_plan(&mut self, plan_id: PlanId, tenant: &TenantId) -> Result<(), PlanError> {
        let tenant = tenant.clone();
        self.transaction(move |reg| {
            let plan = reg
                .find_plan_mut(&tenant, plan_id)
                .ok_or_else(|| PlanError::not_found("plan", plan_id))?;
            if plan.status == PlanStatus::Archived {
                return Err(PlanError::validation(
                    codes::INVALID_STATUS,
                    "plan is already archived",
                ));
            }
            plan.status = PlanStatus::Archived;
            Ok(())
        })
    }

    fn set_status(
        &mut self,
        plan_id: PlanId,
        tenant: &TenantId,
        expected: PlanStatus,
        next: PlanStatus,
    ) -> Result<(), PlanError> {
        let tenant = tenant.clone();
        self.transaction(move |reg| {
            let plan = reg
                .find_plan_mut(&tenant, plan_id)
                .ok_or_else(|| PlanError::not_found("plan", plan_id))?;
            if plan.status != expected {
                return Err(PlanError::validation(
                    codes::INVALID_STATUS,
                    format!("plan status does not allow this transition ({:?})", plan.status),
                ));
            }
            plan.status = next;
            Ok(())
        })
    }

    /// Manual assignment path, guarded against double-booking.
    pub fn assign(
        &mut self,
        employee: &EmployeeId,
        shift_id: ShiftRowId,
        tenant: &TenantId,
        assigned_by: &str,
    ) -> Result<AssignmentId, PlanError> {
        assignment::assign(self, employee, shift_id, tenant, assigned_by)
    }

    /// Cancels a manual assignment.
    pub fn unassign(
        &mut self,
        assignment_id: AssignmentId,
        tenant: &TenantId,
    ) -> Result<(), PlanError> {
        assignment::unassign(self, assignment_id, tenant)
    }
}

/// Derived plan name for requests that omit one.
fn default_plan_name(start: NaiveDate) -> String {
    let iso = start.iso_week();
    format!("Wochenplan KW {}/{}", iso.week(), iso.year())
}

/// Seed-list crew in first-seen order; slot order matters for the rotation
/// tables.
fn distinct_employees(entries: &[ShiftEntry]) -> Vec<EmployeeId> {
    let mut out: Vec<EmployeeId> = Vec::new();
    for entry in entries {
        if !out.contains(&entry.employee_id) {
            out.push(entry.employee_id.clone());
        }
    }
    out
}

fn reject_same_day_duplicates(entries: &[ShiftEntry]) -> Result<(), PlanError> {
    let mut seen: HashSet<(&EmployeeId, NaiveDate)> = HashSet::new();
    for entry in entries {
        if !seen.insert((&entry.employee_id, entry.date)) {
            return Err(PlanError::conflict(
                codes::DOUBLE_BOOKED,
                format!(
                    "employee {} has more than one shift on {}",
                    entry.employee_id.as_str(),
                    entry.date
                ),
            ));
        }
    }
    Ok(())
}

fn insert_rows(
    reg: &mut Registry,
    plan: &ShiftPlan,
    user: &str,
    entries: Vec<ShiftEntry>,
) -> Vec<ShiftRowId> {
    let mut shift_ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = reg.next_shift_id();
        reg.shifts.push(ShiftRow {
            id,
            tenant_id: plan.tenant_id.clone(),
            plan_id: plan.id,
            employee_id: entry.employee_id,
            date: entry.date,
            start_time: entry.start_time,
            end_time: entry.end_time,
            code: entry.code,
            department_id: plan.department_id,
            team_id: plan.team_id,
            machine_id: plan.machine_id,
            area_id: plan.area_id,
            status: plan.status,
            created_by: user.to_owned(),
        });
        shift_ids.push(id);
    }
    shift_ids
}

fn remove_plan_rows(reg: &mut Registry, tenant: &TenantId, plan_id: PlanId) {
    let removed: HashSet<ShiftRowId> = reg
        .shifts
        .iter()
        .filter(|s| s.plan_id == plan_id && &s.tenant_id == tenant)
        .map(|s| s.id)
        .collect();
    reg.shifts
        .retain(|s| !(s.plan_id == plan_id && &s.tenant_id == tenant));
    reg.assignments
        .retain(|a| !(&a.tenant_id == tenant && removed.contains(&a.shift_id)));
}
