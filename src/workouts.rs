use crate::dates::date_key;
use crate::errors::TrackerError;
use crate::ids::new_id;
use crate::models::{ExerciseInput, ExerciseTemplate, LoggedExercise, PlanDay, SetEntry, UserData};
use chrono::NaiveDate;
use tracing::debug;

/// Editable exercise list for a date.
///
/// A saved, non-empty log always wins. Otherwise the plan day, if any, is
/// copied into fresh records with unset actuals. The copy is not stored here.
pub fn exercises_for_date(
    saved: Option<&[LoggedExercise]>,
    plan_day: Option<&PlanDay>,
) -> Vec<LoggedExercise> {
    match (saved, plan_day) {
        (Some(saved), _) if !saved.is_empty() => saved.to_vec(),
        (_, Some(plan_day)) => materialize(plan_day),
        _ => Vec::new(),
    }
}

pub fn materialize(plan_day: &PlanDay) -> Vec<LoggedExercise> {
    plan_day
        .exercises
        .iter()
        .map(LoggedExercise::from_template)
        .collect()
}

impl LoggedExercise {
    pub fn from_template(template: &ExerciseTemplate) -> Self {
        Self {
            id: new_id(),
            name: template.name.clone(),
            weight: template.weight,
            sets: template
                .sets
                .iter()
                .map(|set| SetEntry {
                    planned: set.planned,
                    actual: None,
                })
                .collect(),
        }
    }
}

/// Finds an exercise by id. Template copies get new ids on every read, so
/// until the date has a saved log the list position is accepted as well.
fn locate(exercises: &[LoggedExercise], id: &str, slot: Option<usize>, frozen: bool) -> Option<usize> {
    exercises
        .iter()
        .position(|exercise| exercise.id == id)
        .or_else(|| slot.filter(|slot| !frozen && *slot < exercises.len()))
}

pub const MAX_SET_COUNT: usize = 10;

/// Every exercise, logged or planned, carries between one and ten sets.
pub fn check_set_count(name: &str, count: usize) -> Result<(), TrackerError> {
    if (1..=MAX_SET_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(TrackerError::SetCountOutOfRange {
            name: name.to_string(),
            count,
        })
    }
}

/// Keeps only positive, finite weights.
pub fn normalize_weight(weight: Option<f64>) -> Option<f64> {
    weight.filter(|value| value.is_finite() && *value > 0.0)
}

impl UserData {
    /// The saved log for `date`, ignoring an empty entry.
    pub fn saved_exercises(&self, date: NaiveDate) -> Option<&[LoggedExercise]> {
        self.workouts
            .get(&date_key(date))
            .map(Vec::as_slice)
            .filter(|exercises| !exercises.is_empty())
    }

    pub fn exercises_for(&self, date: NaiveDate) -> Vec<LoggedExercise> {
        exercises_for_date(self.saved_exercises(date), self.plan_day_for(date))
    }

    /// Looks up one exercise of the date's current list, with its position.
    pub fn find_exercise(
        &self,
        date: NaiveDate,
        id: &str,
        slot: Option<usize>,
    ) -> Option<(usize, LoggedExercise)> {
        let frozen = self.saved_exercises(date).is_some();
        let mut exercises = self.exercises_for(date);
        let position = locate(&exercises, id, slot, frozen)?;
        Some((position, exercises.swap_remove(position)))
    }

    /// Replaces the exercise with the same id, or appends a new one. The
    /// date's current list is frozen into the log first, so template-derived
    /// exercises are stored as they looked at the first edit.
    pub fn upsert_exercise(
        &mut self,
        date: NaiveDate,
        input: ExerciseInput,
    ) -> Result<LoggedExercise, TrackerError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyExerciseName);
        }
        check_set_count(name, input.sets.len())?;

        let frozen = self.saved_exercises(date).is_some();
        let mut exercises = self.exercises_for(date);
        let record = match input.id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let position = locate(&exercises, &id, input.slot, frozen)
                    .ok_or(TrackerError::ExerciseNotFound(id))?;
                let existing = &mut exercises[position];
                existing.name = name.to_string();
                existing.weight = normalize_weight(input.weight);
                existing.sets = input.sets;
                existing.clone()
            }
            None => {
                let record = LoggedExercise {
                    id: new_id(),
                    name: name.to_string(),
                    weight: normalize_weight(input.weight),
                    sets: input.sets,
                };
                exercises.push(record.clone());
                record
            }
        };

        debug!(date = %date, exercise = %record.id, "upserted exercise");
        self.workouts.insert(date_key(date), exercises);
        Ok(record)
    }

    pub fn delete_exercise(
        &mut self,
        date: NaiveDate,
        id: &str,
        slot: Option<usize>,
    ) -> Result<LoggedExercise, TrackerError> {
        let frozen = self.saved_exercises(date).is_some();
        let mut exercises = self.exercises_for(date);
        let position = locate(&exercises, id, slot, frozen)
            .ok_or_else(|| TrackerError::ExerciseNotFound(id.to_string()))?;
        let removed = exercises.remove(position);

        debug!(date = %date, exercise = %removed.id, "deleted exercise");
        self.workouts.insert(date_key(date), exercises);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SetTemplate;

    // 2026-01-05 is a Monday; the default schedule trains on it.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn template(name: &str, weight: Option<f64>, planned: &[Option<u32>]) -> ExerciseTemplate {
        ExerciseTemplate {
            name: name.to_string(),
            weight,
            sets: planned.iter().map(|planned| SetTemplate { planned: *planned }).collect(),
        }
    }

    fn data_with_plan() -> UserData {
        let mut data = UserData::default();
        data.plan_days.push(PlanDay {
            id: "push".into(),
            name: "Push".into(),
            exercises: vec![
                template("Bench", Some(60.0), &[Some(10), Some(8)]),
                template("Dips", None, &[None, None, None]),
            ],
        });
        data
    }

    fn shape(exercises: &[LoggedExercise]) -> Vec<(String, Option<f64>, Vec<Option<u32>>)> {
        exercises
            .iter()
            .map(|exercise| {
                (
                    exercise.name.clone(),
                    exercise.weight,
                    exercise.sets.iter().map(|set| set.planned).collect(),
                )
            })
            .collect()
    }

    fn input(id: Option<&str>, name: &str) -> ExerciseInput {
        ExerciseInput {
            id: id.map(str::to_string),
            slot: None,
            name: name.to_string(),
            weight: None,
            sets: vec![SetEntry { planned: Some(5), actual: Some(5) }],
        }
    }

    #[test]
    fn materializes_template_with_unset_actuals() {
        let data = data_with_plan();
        let exercises = data.exercises_for(monday());

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Bench");
        assert_eq!(exercises[0].weight, Some(60.0));
        assert_eq!(
            exercises[0].sets,
            vec![
                SetEntry { planned: Some(10), actual: None },
                SetEntry { planned: Some(8), actual: None },
            ]
        );
        assert!(exercises[1].sets.iter().all(|set| set.actual.is_none()));
        assert_ne!(exercises[0].id, exercises[1].id);
    }

    #[test]
    fn reading_does_not_store_materialized_list() {
        let data = data_with_plan();
        let _ = data.exercises_for(monday());
        assert!(data.workouts.is_empty());
    }

    #[test]
    fn repeated_materialization_matches_except_ids() {
        let data = data_with_plan();
        let first = data.exercises_for(monday());
        let second = data.exercises_for(monday());

        assert_eq!(shape(&first), shape(&second));
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn no_plan_day_means_empty_list() {
        let data = UserData::default();
        assert!(data.exercises_for(monday()).is_empty());

        let tuesday = monday().succ_opt().unwrap();
        assert!(data_with_plan().exercises_for(tuesday).is_empty());
    }

    #[test]
    fn empty_saved_log_falls_back_to_template() {
        let mut data = data_with_plan();
        data.workouts.insert(date_key(monday()), Vec::new());
        assert_eq!(data.exercises_for(monday()).len(), 2);
    }

    #[test]
    fn first_edit_freezes_template_into_log() {
        let mut data = data_with_plan();
        let added = data.upsert_exercise(monday(), input(None, "  Curl ")).unwrap();

        assert_eq!(added.name, "Curl");
        let saved = data.saved_exercises(monday()).unwrap();
        assert_eq!(
            saved.iter().map(|exercise| exercise.name.as_str()).collect::<Vec<_>>(),
            vec!["Bench", "Dips", "Curl"]
        );
    }

    #[test]
    fn saved_log_ignores_later_schedule_and_template_changes() {
        let mut data = data_with_plan();
        data.upsert_exercise(monday(), input(None, "Curl")).unwrap();
        let before = data.exercises_for(monday());

        data.plan_days[0].exercises.clear();
        data.plan_days[0].exercises.push(template("Press", None, &[Some(1)]));
        data.training_days.clear();
        data.training_days.insert(2);

        assert_eq!(data.exercises_for(monday()), before);
    }

    #[test]
    fn edit_replaces_by_id_in_place() {
        let mut data = data_with_plan();
        let bench_id = data.exercises_for(monday())[0].id.clone();
        // Fresh ids on every read: freeze first so the id is stable.
        data.upsert_exercise(monday(), input(None, "Curl")).unwrap();
        let bench_id_saved = data.saved_exercises(monday()).unwrap()[0].id.clone();
        assert_ne!(bench_id, bench_id_saved);

        let mut edit = input(Some(&bench_id_saved), "Incline bench");
        edit.weight = Some(-5.0);
        let edited = data.upsert_exercise(monday(), edit).unwrap();

        let saved = data.saved_exercises(monday()).unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].id, bench_id_saved);
        assert_eq!(saved[0].name, "Incline bench");
        assert_eq!(saved[0].weight, None);
        assert_eq!(saved[0], edited);
    }

    #[test]
    fn edit_of_unknown_id_changes_nothing() {
        let mut data = data_with_plan();
        let result = data.upsert_exercise(monday(), input(Some("missing"), "Curl"));

        assert_eq!(result, Err(TrackerError::ExerciseNotFound("missing".into())));
        assert!(data.workouts.is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut data = data_with_plan();
        assert_eq!(
            data.upsert_exercise(monday(), input(None, "   ")),
            Err(TrackerError::EmptyExerciseName)
        );
        assert!(data.workouts.is_empty());
    }

    #[test]
    fn set_count_outside_one_to_ten_is_rejected() {
        let mut data = data_with_plan();
        let mut crowded = input(None, "Plank");
        crowded.sets = vec![SetEntry { planned: Some(1), actual: Some(1) }; 11];
        assert_eq!(
            data.upsert_exercise(monday(), crowded),
            Err(TrackerError::SetCountOutOfRange { name: "Plank".into(), count: 11 })
        );

        let mut bare = input(None, "Plank");
        bare.sets.clear();
        assert!(matches!(
            data.upsert_exercise(monday(), bare),
            Err(TrackerError::SetCountOutOfRange { count: 0, .. })
        ));
        assert!(data.workouts.is_empty());

        let mut full = input(None, "Plank");
        full.sets = vec![SetEntry::default(); MAX_SET_COUNT];
        assert_eq!(data.upsert_exercise(monday(), full).unwrap().sets.len(), 10);
    }

    #[test]
    fn delete_removes_exactly_one_exercise() {
        let mut data = data_with_plan();
        data.upsert_exercise(monday(), input(None, "Curl")).unwrap();
        let before = data.saved_exercises(monday()).unwrap().to_vec();

        let removed = data.delete_exercise(monday(), &before[1].id, None).unwrap();
        assert_eq!(removed, before[1]);

        let after = data.saved_exercises(monday()).unwrap();
        assert_eq!(after, &[before[0].clone(), before[2].clone()][..]);
    }

    #[test]
    fn unsaved_template_exercise_is_found_by_slot() {
        let mut data = data_with_plan();
        let listed = data.exercises_for(monday());

        let removed = data.delete_exercise(monday(), &listed[0].id, Some(0)).unwrap();
        assert_eq!(removed.name, "Bench");
        let saved = data.saved_exercises(monday()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Dips");
    }

    #[test]
    fn unsaved_template_exercise_can_be_edited_by_slot() {
        let mut data = data_with_plan();
        let listed = data.exercises_for(monday());

        let mut edit = input(Some(&listed[1].id), "Ring dips");
        edit.slot = Some(1);
        data.upsert_exercise(monday(), edit).unwrap();

        let saved = data.saved_exercises(monday()).unwrap();
        assert_eq!(saved[0].name, "Bench");
        assert_eq!(saved[1].name, "Ring dips");
        assert_eq!(saved[1].sets, vec![SetEntry { planned: Some(5), actual: Some(5) }]);
    }

    #[test]
    fn slot_is_ignored_once_the_log_is_saved() {
        let mut data = data_with_plan();
        data.upsert_exercise(monday(), input(None, "Curl")).unwrap();

        assert_eq!(
            data.delete_exercise(monday(), "stale", Some(0)),
            Err(TrackerError::ExerciseNotFound("stale".into()))
        );
        assert_eq!(data.saved_exercises(monday()).unwrap().len(), 3);
    }

    #[test]
    fn unknown_id_without_slot_is_not_found() {
        let mut data = data_with_plan();
        assert!(matches!(
            data.delete_exercise(monday(), "nope", None),
            Err(TrackerError::ExerciseNotFound(_))
        ));
        assert!(data.workouts.is_empty());
    }
}
