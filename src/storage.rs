use crate::errors::TrackerError;
use crate::identity::UserId;
use crate::models::UserData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// One JSON file per storage key.
pub fn document_path(data_dir: &Path, user: &UserId) -> PathBuf {
    data_dir.join(format!("{}.json", user.storage_key()))
}

/// Reads a document. Anything unreadable yields the default document.
pub async fn load_data(path: &Path) -> UserData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                UserData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => UserData::default(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            UserData::default()
        }
    }
}

fn storage_error(err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(err.to_string())
}

/// Writes the whole document next to its target and renames it into place.
pub async fn persist_data(path: &Path, data: &UserData) -> Result<(), TrackerError> {
    let payload = serde_json::to_vec_pretty(data).map_err(storage_error)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, payload).await.map_err(storage_error)?;
    fs::rename(&staging, path).await.map_err(storage_error)?;
    debug!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("workout_tracker_{label}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_file_gives_default_document() {
        let dir = scratch_dir("missing");
        let data = load_data(&dir.join("nothing.json")).await;
        assert_eq!(data, UserData::default());
        assert_eq!(data.training_days.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn malformed_file_gives_default_document() {
        let dir = scratch_dir("malformed");
        let path = dir.join("broken.json");
        std::fs::write(&path, b"{\"trainingDays\": [1, ").unwrap();
        assert_eq!(load_data(&path).await, UserData::default());

        std::fs::write(&path, b"[]").unwrap();
        assert_eq!(load_data(&path).await, UserData::default());
    }

    #[tokio::test]
    async fn persisted_document_reloads_equal() {
        let dir = scratch_dir("round_trip");
        let path = document_path(&dir, &UserId::from_platform(Some("42")));
        assert!(path.ends_with("workout_tracker_tg_42.json"));

        let mut data = UserData::default();
        data.set_training_days([0, 2]).unwrap();
        persist_data(&path, &data).await.unwrap();

        assert_eq!(load_data(&path).await, data);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
