use super::RotationArchetype;
use crate::model::EmployeeId;
use std::collections::HashSet;
use tracing::debug;

/// Name markers checked in order; the long four-crew variants must come
/// before the plain "4-schicht" substring.
const THREE_CREW_MARKERS: &[&str] = &["3-schicht", "dreischicht", "3 schicht"];
const FOUR_CREW_LONG_MARKERS: &[&str] = &["4-schicht-lang", "4-schicht lang", "langschicht", "16-tage"];
const FOUR_CREW_MARKERS: &[&str] = &["4-schicht", "vierschicht", "4 schicht"];
const CONTINUOUS_MARKERS: &[&str] = &["vollkonti", "konti", "24/7", "vollcontischicht"];

/// Resolves the rotation archetype for a plan request. Total: an explicit
/// hint wins, then a case-insensitive substring match on the plan name, then
/// the distinct crew-member count. Anything else is generic replication.
pub fn classify(
    name_hint: Option<&str>,
    explicit_hint: Option<RotationArchetype>,
    crew: &[EmployeeId],
) -> RotationArchetype {
    if let Some(hint) = explicit_hint {
        return hint;
    }

    if let Some(name) = name_hint {
        let name = name.to_lowercase();
        if let Some(by_name) = classify_by_name(&name) {
            debug!(archetype = %by_name, "archetype matched by plan name");
            return by_name;
        }
    }

    let distinct: HashSet<&EmployeeId> = crew.iter().collect();
    match distinct.len() {
        3 => RotationArchetype::ThreeCrewNineDay,
        4 => RotationArchetype::FourCrewStandardEightDay,
        _ => RotationArchetype::GenericTemplateReplication,
    }
}

fn classify_by_name(name: &str) -> Option<RotationArchetype> {
    if THREE_CREW_MARKERS.iter().any(|m| name.contains(m)) {
        return Some(RotationArchetype::ThreeCrewNineDay);
    }
    if FOUR_CREW_LONG_MARKERS.iter().any(|m| name.contains(m)) {
        return Some(RotationArchetype::FourCrewLongSixteenDay);
    }
    if FOUR_CREW_MARKERS.iter().any(|m| name.contains(m)) {
        return Some(RotationArchetype::FourCrewStandardEightDay);
    }
    None
}

/// Fuzzy continuous-shift detection on the free-text plan name.
/// TODO: replace with an explicit request flag once the API migration lands;
/// the flag is already honored when callers supply it.
pub fn looks_continuous(name: &str) -> bool {
    let name = name.to_lowercase();
    CONTINUOUS_MARKERS.iter().any(|m| name.contains(m)) || classify_by_name(&name).is_some()
}
