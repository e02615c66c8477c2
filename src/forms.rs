use crate::models::{ExerciseInput, ExerciseTemplate, PlanDayInput, SetEntry, SetTemplate};
use std::collections::{BTreeSet, HashMap};

pub use crate::workouts::MAX_SET_COUNT;

pub const DEFAULT_SET_COUNT: usize = 4;

pub type FormFields = HashMap<String, String>;

/// Submit buttons share the `action` field; anything but a re-render is a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Resize,
    AddRow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseForm {
    pub action: FormAction,
    pub input: ExerciseInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanDayForm {
    pub action: FormAction,
    pub input: PlanDayInput,
}

fn field<'a>(fields: &'a FormFields, key: &str) -> Option<&'a str> {
    fields.get(key).map(String::as_str)
}

fn action(fields: &FormFields) -> FormAction {
    match field(fields, "action") {
        Some("resize") => FormAction::Resize,
        Some("add_row") => FormAction::AddRow,
        _ => FormAction::Save,
    }
}

/// A weight that is not a positive number counts as absent.
pub fn parse_weight(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight > 0.0)
}

/// Blank or non-numeric rep counts stay unset.
pub fn parse_reps(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok()
}

/// Unparsable or zero counts fall back to the default. Counts above the
/// maximum are kept so saving rejects them instead of dropping sets.
pub fn parse_set_count(raw: Option<&str>) -> usize {
    match raw.and_then(|raw| raw.trim().parse::<usize>().ok()) {
        Some(0) | None => DEFAULT_SET_COUNT,
        Some(count) => count,
    }
}

/// Planned reps of a plan-day row: one value for every set, or a comma
/// separated value per set where blanks stay unset.
pub fn parse_planned(raw: Option<&str>, count: usize) -> Vec<SetTemplate> {
    let values: Vec<Option<u32>> = raw
        .unwrap_or_default()
        .split(',')
        .map(|part| parse_reps(Some(part)))
        .collect();

    if values.len() <= 1 {
        let planned = values.first().copied().flatten();
        return vec![SetTemplate { planned }; count];
    }
    (0..count)
        .map(|i| SetTemplate {
            planned: values.get(i).copied().flatten(),
        })
        .collect()
}

/// Inverse of [`parse_planned`]: a single value when all sets agree.
pub fn format_planned(sets: &[SetTemplate]) -> String {
    let reps = |set: &SetTemplate| set.planned.map(|planned| planned.to_string()).unwrap_or_default();
    match sets.split_first() {
        None => String::new(),
        Some((first, rest)) if rest.iter().all(|set| set == first) => reps(first),
        Some(_) => sets.iter().map(reps).collect::<Vec<_>>().join(","),
    }
}

pub fn parse_exercise_form(fields: &FormFields) -> ExerciseForm {
    let count = parse_set_count(field(fields, "sets_count"));
    let sets = (0..count)
        .map(|i| SetEntry {
            planned: parse_reps(field(fields, &format!("planned_{i}"))),
            actual: parse_reps(field(fields, &format!("actual_{i}"))),
        })
        .collect();

    ExerciseForm {
        action: action(fields),
        input: ExerciseInput {
            id: field(fields, "id")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            slot: field(fields, "slot").and_then(|slot| slot.trim().parse().ok()),
            name: field(fields, "name").unwrap_or_default().trim().to_string(),
            weight: parse_weight(field(fields, "weight")),
            sets,
        },
    }
}

/// Rows are `ex_name_<i>`, `ex_weight_<i>`, `ex_sets_<i>`, `ex_reps_<i>`;
/// rows without a name are dropped.
pub fn parse_plan_day_form(fields: &FormFields) -> PlanDayForm {
    let rows: BTreeSet<usize> = fields
        .keys()
        .filter_map(|key| key.strip_prefix("ex_name_"))
        .filter_map(|index| index.parse().ok())
        .collect();

    let exercises = rows
        .into_iter()
        .filter_map(|i| {
            let name = field(fields, &format!("ex_name_{i}"))?.trim();
            if name.is_empty() {
                return None;
            }
            let count = parse_set_count(field(fields, &format!("ex_sets_{i}")));
            Some(ExerciseTemplate {
                name: name.to_string(),
                weight: parse_weight(field(fields, &format!("ex_weight_{i}"))),
                sets: parse_planned(field(fields, &format!("ex_reps_{i}")), count),
            })
        })
        .collect();

    PlanDayForm {
        action: action(fields),
        input: PlanDayInput {
            id: field(fields, "id")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            name: field(fields, "name").unwrap_or_default().trim().to_string(),
            exercises,
        },
    }
}

/// Checked boxes arrive as `day_<index>`.
pub fn parse_schedule_form(fields: &FormFields) -> Vec<u8> {
    (0u8..7)
        .filter(|day| fields.contains_key(&format!("day_{day}")))
        .collect()
}

pub fn is_confirmed(fields: &FormFields) -> bool {
    field(fields, "confirm") == Some("yes")
}
