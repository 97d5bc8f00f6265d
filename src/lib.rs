#![forbid(unsafe_code)]
//! Schichtplan — shift-rotation scheduling engine (multi-tenant, no DB).
//!
//! - Deterministic multi-crew 24/7 rotation generators (3- and 4-crew
//!   tables, generic template replication).
//! - Transactional plan assembly with commit-or-rollback semantics.
//! - Double-booking guard on the manual assignment path.
//! - JSON storage, CSV import/export; all dates are naive calendar dates.

mod assignment;
pub mod error;
pub mod io;
pub mod model;
pub mod period;
pub mod plan;
pub mod rotation;
pub mod storage;

pub use error::{codes, PlanError};
pub use model::{
    AssignmentId, AssignmentStatus, EmployeeId, PlanId, PlanStatus, Registry, ShiftAssignment,
    ShiftCode, ShiftEntry, ShiftPlan, ShiftRow, ShiftRowId, TenantId,
};
pub use plan::{PlanFilter, PlanOutcome, PlanRequest, PlanUpdate, Planner};
pub use rotation::{classify, generate, looks_continuous, RotationArchetype};
pub use storage::{JsonStorage, Storage};
