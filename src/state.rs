use crate::errors::TrackerError;
use crate::identity::UserId;
use crate::models::UserData;
use crate::storage::{document_path, load_data, persist_data};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the per-user documents. Nothing is cached: every call
/// goes back to storage.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load(&self, user: &UserId) -> UserData {
        load_data(&document_path(&self.data_dir, user)).await
    }

    /// Load, mutate, save as one step. Mutations never interleave, and a
    /// failed mutation leaves storage untouched.
    pub async fn update<T, F>(&self, user: &UserId, mutate: F) -> Result<T, TrackerError>
    where
        F: FnOnce(&mut UserData) -> Result<T, TrackerError>,
    {
        let _guard = self.write_lock.lock().await;
        let path = document_path(&self.data_dir, user);
        let mut data = load_data(&path).await;
        let output = mutate(&mut data)?;
        persist_data(&path, &data).await?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanDayInput;

    fn state(label: &str) -> AppState {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("workout_tracker_state_{label}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        AppState::new(dir)
    }

    fn plan_day(name: &str) -> PlanDayInput {
        PlanDayInput {
            id: None,
            name: name.to_string(),
            exercises: Vec::new(),
        }
    }

    #[tokio::test]
    async fn users_get_separate_documents() {
        let state = state("users");
        let alice = UserId::from_platform(Some("1"));
        let bob = UserId::from_platform(Some("2"));

        state.update(&alice, |data| data.upsert_plan_day(plan_day("A"))).await.unwrap();

        assert_eq!(state.load(&alice).await.plan_days.len(), 1);
        assert!(state.load(&bob).await.plan_days.is_empty());
        assert!(state.load(&UserId::local()).await.plan_days.is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_is_not_saved() {
        let state = state("failed");
        let user = UserId::local();

        let result = state
            .update(&user, |data| {
                data.training_days.clear();
                data.upsert_plan_day(plan_day(""))
            })
            .await;

        assert_eq!(result, Err(TrackerError::EmptyPlanDayName));
        assert_eq!(state.load(&user).await, UserData::default());
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() {
        let state = state("concurrent");
        let user = UserId::local();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    state
                        .update(&user, |data| data.upsert_plan_day(plan_day(&format!("P{i}"))))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(state.load(&user).await.plan_days.len(), 16);
    }
}
