use axum::http::StatusCode;

/// Domain failures raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("exercise name must not be empty")]
    EmptyExerciseName,
    #[error("plan day name must not be empty")]
    EmptyPlanDayName,
    #[error("weekday index {0} is out of range, expected 0-6")]
    WeekdayOutOfRange(u8),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("exercise {0} not found")]
    ExerciseNotFound(String),
    #[error("plan day {0} not found")]
    PlanDayNotFound(String),
    #[error("{name:?} has {count} sets, expected 1-{max}", max = crate::workouts::MAX_SET_COUNT)]
    SetCountOutOfRange { name: String, count: usize },
    #[error("could not save document: {0}")]
    Storage(String),
}

impl TrackerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ExerciseNotFound(_) | Self::PlanDayNotFound(_))
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Storage(_) => Self::internal(err),
            err if err.is_not_found() => Self::not_found(err.to_string()),
            err => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
