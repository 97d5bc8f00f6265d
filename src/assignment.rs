use crate::error::{codes, PlanError};
use crate::model::{
    AssignmentId, AssignmentStatus, EmployeeId, ShiftAssignment, ShiftCode, ShiftRowId, TenantId,
};
use crate::plan::Planner;

/// Manual assignment guard. Check-then-insert inside one transaction:
/// rejects a duplicate assignment to the same shift and any second booking
/// on the same calendar date within the tenant. Application-level only —
/// there is no storage uniqueness constraint behind it, so genuinely
/// concurrent writers can still race.
pub(crate) fn assign(
    planner: &mut Planner,
    employee: &EmployeeId,
    shift_id: ShiftRowId,
    tenant: &TenantId,
    assigned_by: &str,
) -> Result<AssignmentId, PlanError> {
    let employee = employee.clone();
    let tenant = tenant.clone();
    let assigned_by = assigned_by.to_owned();
    planner.transaction(move |reg| {
        let date = reg
            .find_shift(&tenant, shift_id)
            .ok_or_else(|| PlanError::not_found("shift", shift_id))?
            .date;

        let active = |a: &&ShiftAssignment| {
            a.status == AssignmentStatus::Active && a.tenant_id == tenant
        };

        if reg
            .assignments
            .iter()
            .filter(active)
            .any(|a| a.shift_id == shift_id && a.employee_id == employee)
        {
            return Err(PlanError::conflict(
                codes::DUPLICATE_ASSIGNMENT,
                format!(
                    "employee {} is already assigned to shift {shift_id}",
                    employee.as_str()
                ),
            ));
        }

        let double_booked = reg
            .assignments
            .iter()
            .filter(active)
            .filter(|a| a.employee_id == employee)
            .any(|a| {
                reg.find_shift(&tenant, a.shift_id)
                    .map_or(false, |s| s.date == date)
            });
        if double_booked {
            return Err(PlanError::conflict(
                codes::DOUBLE_BOOKED,
                format!(
                    "employee {} already has an assignment on {date}",
                    employee.as_str()
                ),
            ));
        }

        // Generated rotation rows count as bookings too; an off-day row does not.
        let booked_by_plan = reg.shifts.iter().any(|s| {
            s.tenant_id == tenant
                && s.id != shift_id
                && s.employee_id == employee
                && s.date == date
                && s.code != ShiftCode::Off
        });
        if booked_by_plan {
            return Err(PlanError::conflict(
                codes::DOUBLE_BOOKED,
                format!(
                    "employee {} already has a planned shift on {date}",
                    employee.as_str()
                ),
            ));
        }

        let id = reg.next_assignment_id();
        reg.assignments.push(ShiftAssignment {
            id,
            tenant_id: tenant.clone(),
            shift_id,
            employee_id: employee.clone(),
            assigned_by: assigned_by.clone(),
            status: AssignmentStatus::Active,
        });
        Ok(id)
    })
}

/// Cancels an active assignment; already-cancelled ones are rejected.
pub(crate) fn unassign(
    planner: &mut Planner,
    assignment_id: AssignmentId,
    tenant: &TenantId,
) -> Result<(), PlanError> {
    let tenant = tenant.clone();
    planner.transaction(move |reg| {
        let assignment = reg
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id && a.tenant_id == tenant)
            .ok_or_else(|| PlanError::not_found("assignment", assignment_id))?;
        if assignment.status == AssignmentStatus::Cancelled {
            return Err(PlanError::validation(
                codes::INVALID_STATUS,
                "assignment is already cancelled",
            ));
        }
        assignment.status = AssignmentStatus::Cancelled;
        Ok(())
    })
}
