use crate::errors::TrackerError;
use crate::ids::new_id;
use crate::models::{ExerciseTemplate, PlanDay, PlanDayInput, UserData};
use crate::workouts::{check_set_count, normalize_weight};
use tracing::debug;

impl UserData {
    pub fn plan_day(&self, id: &str) -> Option<&PlanDay> {
        self.plan_days.iter().find(|plan_day| plan_day.id == id)
    }

    /// Replaces the plan day with the same id, or appends a new one. Saved
    /// workout logs are never touched.
    pub fn upsert_plan_day(&mut self, input: PlanDayInput) -> Result<PlanDay, TrackerError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyPlanDayName);
        }
        let exercises = clean_templates(input.exercises)?;

        let record = match input.id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let existing = self
                    .plan_days
                    .iter_mut()
                    .find(|plan_day| plan_day.id == id)
                    .ok_or(TrackerError::PlanDayNotFound(id))?;
                existing.name = name.to_string();
                existing.exercises = exercises;
                existing.clone()
            }
            None => {
                let record = PlanDay {
                    id: new_id(),
                    name: name.to_string(),
                    exercises,
                };
                self.plan_days.push(record.clone());
                record
            }
        };

        debug!(plan_day = %record.id, exercises = record.exercises.len(), "upserted plan day");
        Ok(record)
    }

    /// Removes a plan day. Later slots shift down, which changes the plan
    /// assigned to dates that have no saved log yet.
    pub fn delete_plan_day(&mut self, id: &str) -> Result<PlanDay, TrackerError> {
        let position = self
            .plan_days
            .iter()
            .position(|plan_day| plan_day.id == id)
            .ok_or_else(|| TrackerError::PlanDayNotFound(id.to_string()))?;
        let removed = self.plan_days.remove(position);
        debug!(plan_day = %removed.id, "deleted plan day");
        Ok(removed)
    }

    pub fn set_training_days<I>(&mut self, days: I) -> Result<(), TrackerError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut schedule = std::collections::BTreeSet::new();
        for day in days {
            if day > 6 {
                return Err(TrackerError::WeekdayOutOfRange(day));
            }
            schedule.insert(day);
        }
        debug!(?schedule, "set training days");
        self.training_days = schedule;
        Ok(())
    }
}

/// Trims names, drops unnamed rows and non-positive weights. Named rows
/// must carry one to ten sets.
fn clean_templates(exercises: Vec<ExerciseTemplate>) -> Result<Vec<ExerciseTemplate>, TrackerError> {
    let mut cleaned = Vec::with_capacity(exercises.len());
    for exercise in exercises {
        let name = exercise.name.trim();
        if name.is_empty() {
            continue;
        }
        check_set_count(name, exercise.sets.len())?;
        cleaned.push(ExerciseTemplate {
            name: name.to_string(),
            weight: normalize_weight(exercise.weight),
            sets: exercise.sets,
        });
    }
    Ok(cleaned)
}
