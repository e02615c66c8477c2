use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weekdays trained by default on a fresh document: Monday, Wednesday, Friday.
pub const DEFAULT_TRAINING_DAYS: [u8; 3] = [1, 3, 5];

/// The whole per-user document. It is always loaded and saved as one value.
///
/// A field missing from a persisted document comes back empty. Only a document
/// that is absent or unreadable falls back to [`UserData::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub training_days: BTreeSet<u8>,
    #[serde(default)]
    pub plan_days: Vec<PlanDay>,
    #[serde(default)]
    pub workouts: BTreeMap<String, Vec<LoggedExercise>>,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            training_days: DEFAULT_TRAINING_DAYS.into_iter().collect(),
            plan_days: Vec::new(),
            workouts: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub sets: Vec<SetTemplate>,
}

/// A planned set. Stored as `{planned, actual: null}` so templates and logs
/// share one set shape in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SetEntry", into = "SetEntry")]
pub struct SetTemplate {
    pub planned: Option<u32>,
}

impl From<SetEntry> for SetTemplate {
    fn from(entry: SetEntry) -> Self {
        Self {
            planned: entry.planned,
        }
    }
}

impl From<SetTemplate> for SetEntry {
    fn from(set: SetTemplate) -> Self {
        Self {
            planned: set.planned,
            actual: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default)]
    pub planned: Option<u32>,
    #[serde(default)]
    pub actual: Option<u32>,
}

/// New or edited exercise for a date. Without an id the exercise is appended.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExerciseInput {
    #[serde(default)]
    pub id: Option<String>,
    /// List position, used to find a template copy whose id was never stored.
    #[serde(default)]
    pub slot: Option<usize>,
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// New or edited plan day. Without an id a new plan day is appended.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanDayInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseTemplate>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBody {
    pub training_days: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct PlanDaySummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub weekday: u8,
    pub training_day: bool,
    pub plan_day: Option<PlanDaySummary>,
    /// Whether the exercises come from a saved log rather than a fresh template copy.
    pub saved: bool,
    pub exercises: Vec<LoggedExercise>,
}
