#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use schichtplan::{
    io,
    model::{AssignmentId, EmployeeId, PlanId, ShiftRowId, TenantId},
    plan::{PlanFilter, PlanRequest, PlanUpdate, Planner},
    rotation::RotationArchetype,
    storage::{JsonStorage, Storage},
    PlanError,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Minimal shift-plan CLI (JSON store, no database)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Enable logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// JSON registry file
    #[arg(long, global = true, default_value = "schichtplan.json")]
    store: String,

    /// Tenant the command operates on
    #[arg(long, global = true, default_value = "default")]
    tenant: String,

    /// Acting user recorded on created rows
    #[arg(long, global = true, default_value = "cli")]
    user: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a shift plan (continuous plans generate their rotation)
    CreatePlan {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD; optional for continuous plans
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department_id: i64,
        #[arg(long)]
        team_id: Option<i64>,
        #[arg(long)]
        machine_id: Option<i64>,
        #[arg(long)]
        area_id: Option<i64>,
        /// Explicit rotation archetype (e.g. "3-schicht", "4-schicht-lang")
        #[arg(long)]
        pattern: Option<String>,
        /// Force continuous-shift handling instead of name inference
        #[arg(long)]
        continuous: bool,
        /// Seed shifts CSV: employee_id,date,shift_code[,start,end]
        #[arg(long)]
        seed_csv: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update header fields and/or replace a plan's shifts
    UpdatePlan {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Replacement shifts CSV (full reinsert)
        #[arg(long)]
        seed_csv: Option<String>,
    },

    /// Delete a plan and its shifts
    DeletePlan {
        #[arg(long)]
        id: i64,
    },

    /// Show one plan with its shifts, optionally exporting
    Show {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// List the tenant's plans
    List,

    /// Manually assign an employee to a shift row
    Assign {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        shift_id: i64,
    },

    /// Cancel a manual assignment
    Unassign {
        #[arg(long)]
        assignment_id: i64,
    },

    /// Mark a draft plan as published
    Publish {
        #[arg(long)]
        id: i64,
    },

    /// Archive a plan
    Archive {
        #[arg(long)]
        id: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut planner = match storage.load() {
        Ok(registry) => Planner::from_registry(registry),
        Err(_) => Planner::new(),
    };
    let tenant = TenantId::new(&cli.tenant);

    let code = match run(cli.cmd, &mut planner, &storage, &tenant, &cli.user) {
        Ok(()) => 0,
        Err(err) => {
            if let Some(domain) = err.downcast_ref::<PlanError>() {
                match domain {
                    PlanError::NotFound { .. } => eprintln!("{}: {domain}", domain.code()),
                    _ => eprintln!("{domain}"),
                }
            } else {
                eprintln!("error: {err:#}");
            }
            1
        }
    };
    std::process::exit(code);
}

fn run(
    cmd: Commands,
    planner: &mut Planner,
    storage: &JsonStorage,
    tenant: &TenantId,
    user: &str,
) -> Result<()> {
    match cmd {
        Commands::CreatePlan {
            start,
            end,
            name,
            department_id,
            team_id,
            machine_id,
            area_id,
            pattern,
            continuous,
            seed_csv,
            notes,
        } => {
            let pattern_hint = pattern
                .map(|p| p.parse::<RotationArchetype>().map_err(anyhow::Error::msg))
                .transpose()?;
            let shifts = match seed_csv {
                Some(path) => io::import_seed_shifts_csv(path)?,
                None => Vec::new(),
            };
            let request = PlanRequest {
                start_date: start.parse()?,
                end_date: end.map(|e| e.parse()).transpose()?,
                department_id,
                team_id,
                machine_id,
                area_id,
                name,
                pattern_hint,
                continuous: continuous.then_some(true),
                notes,
                shifts,
            };
            let outcome = planner.create_plan(&request, tenant, user)?;
            storage.save(planner.registry())?;
            println!("{} (plan {})", outcome.message, outcome.plan_id);
            Ok(())
        }
        Commands::UpdatePlan {
            id,
            name,
            start,
            end,
            seed_csv,
        } => {
            let update = PlanUpdate {
                name,
                start_date: start.map(|s| s.parse()).transpose()?,
                end_date: end.map(|e| e.parse()).transpose()?,
                shifts: seed_csv.map(io::import_seed_shifts_csv).transpose()?,
                ..PlanUpdate::default()
            };
            let outcome = planner.update_plan(plan_id(id), &update, tenant, user)?;
            storage.save(planner.registry())?;
            println!("{} ({} Schichten)", outcome.message, outcome.shift_ids.len());
            Ok(())
        }
        Commands::DeletePlan { id } => {
            planner.delete_plan(plan_id(id), tenant)?;
            storage.save(planner.registry())?;
            println!("Schichtplan {id} gelöscht");
            Ok(())
        }
        Commands::Show {
            id,
            name,
            out_json,
            out_csv,
        } => {
            let filter = PlanFilter {
                id: id.map(plan_id),
                name,
                department_id: None,
            };
            let (plan, shifts) = planner.get_plan(&filter, tenant)?;
            println!(
                "{} [{}] {} – {} ({} Schichten)",
                plan.name,
                plan.id,
                plan.start_date,
                plan.end_date,
                shifts.len()
            );
            for s in &shifts {
                println!("  #{} {} {} {}", s.id, s.date, s.employee_id.as_str(), s.code);
            }
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan, &shifts)?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, &shifts)?;
            }
            Ok(())
        }
        Commands::List => {
            for plan in planner.list_plans(tenant) {
                println!(
                    "{} [{}] {:?} {} – {}",
                    plan.name, plan.id, plan.status, plan.start_date, plan.end_date
                );
            }
            Ok(())
        }
        Commands::Assign { employee, shift_id } => {
            let id = planner.assign(
                &EmployeeId::new(employee),
                ShiftRowId::from_value(shift_id),
                tenant,
                user,
            )?;
            storage.save(planner.registry())?;
            println!("Zuweisung {id} angelegt");
            Ok(())
        }
        Commands::Unassign { assignment_id } => {
            planner.unassign(AssignmentId::from_value(assignment_id), tenant)?;
            storage.save(planner.registry())?;
            println!("Zuweisung {assignment_id} storniert");
            Ok(())
        }
        Commands::Publish { id } => {
            planner.publish_plan(plan_id(id), tenant)?;
            storage.save(planner.registry())?;
            println!("Schichtplan {id} veröffentlicht");
            Ok(())
        }
        Commands::Archive { id } => {
            planner.archive_plan(plan_id(id), tenant)?;
            storage.save(planner.registry())?;
            println!("Schichtplan {id} archiviert");
            Ok(())
        }
    }
}

fn plan_id(raw: i64) -> PlanId {
    PlanId::from_value(raw)
}
