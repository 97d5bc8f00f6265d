mod classify;
mod four_crew;
mod replicate;
mod three_crew;
mod util;

pub use classify::{classify, looks_continuous};

use crate::model::{EmployeeId, ShiftEntry};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Closed set of rotation-pattern families. Free-text pattern strings are
/// resolved to one of these at the classification boundary; generation
/// dispatches exhaustively on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationArchetype {
    ThreeCrewNineDay,
    FourCrewStandardEightDay,
    FourCrewLongSixteenDay,
    GenericTemplateReplication,
}

impl RotationArchetype {
    pub fn as_str(self) -> &'static str {
        match self {
            RotationArchetype::ThreeCrewNineDay => "3-schicht",
            RotationArchetype::FourCrewStandardEightDay => "4-schicht",
            RotationArchetype::FourCrewLongSixteenDay => "4-schicht-lang",
            RotationArchetype::GenericTemplateReplication => "vorlage",
        }
    }
}

impl fmt::Display for RotationArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3-schicht" | "dreischicht" | "three-crew" => Ok(RotationArchetype::ThreeCrewNineDay),
            "4-schicht" | "vierschicht" | "four-crew" => {
                Ok(RotationArchetype::FourCrewStandardEightDay)
            }
            "4-schicht-lang" | "langschicht" | "four-crew-long" => {
                Ok(RotationArchetype::FourCrewLongSixteenDay)
            }
            "vorlage" | "template" | "generic" => Ok(RotationArchetype::GenericTemplateReplication),
            other => Err(format!("unknown rotation archetype: {other}")),
        }
    }
}

/// Generates the abstract shift entries for one archetype over the window.
///
/// Pure and deterministic: identical inputs always yield an identical entry
/// set. A crew-size mismatch never fails; it degrades to template
/// replication with a logged warning.
pub fn generate(
    archetype: RotationArchetype,
    crew: &[EmployeeId],
    template: &[ShiftEntry],
    reference_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ShiftEntry> {
    let crew = util::distinct_crew(crew);
    match archetype {
        RotationArchetype::ThreeCrewNineDay if crew.len() == 3 => {
            three_crew::generate(&crew, reference_start, window_start, window_end)
        }
        RotationArchetype::FourCrewStandardEightDay if crew.len() == 4 => {
            four_crew::generate_standard(&crew, reference_start, window_start, window_end)
        }
        RotationArchetype::FourCrewLongSixteenDay if crew.len() == 4 => {
            four_crew::generate_long(&crew, reference_start, window_start, window_end)
        }
        RotationArchetype::GenericTemplateReplication => {
            replicate::replicate(template, window_start.year())
        }
        other => {
            warn!(
                archetype = %other,
                crew_size = crew.len(),
                "crew size does not match archetype, falling back to template replication"
            );
            replicate::replicate(template, window_start.year())
        }
    }
}
