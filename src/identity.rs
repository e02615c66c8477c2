use axum::http::HeaderMap;
use tracing::warn;

pub const STORAGE_PREFIX: &str = "workout_tracker_";
pub const FALLBACK_USER: &str = "local";
pub const USER_HEADER: &str = "x-user-id";

/// Who the document belongs to. Only a numeric platform id is trusted; anything
/// else shares the fallback document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserId {
    platform_id: Option<i64>,
}

impl UserId {
    pub fn local() -> Self {
        Self { platform_id: None }
    }

    pub fn from_platform(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::local();
        };
        match raw.parse::<i64>() {
            Ok(id) => Self {
                platform_id: Some(id),
            },
            Err(_) => {
                warn!("ignoring non-numeric user id {raw:?}, using fallback identity");
                Self::local()
            }
        }
    }

    /// Header wins over the `user` query parameter.
    pub fn resolve(headers: &HeaderMap, query_user: Option<&str>) -> Self {
        let header = headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok());
        Self::from_platform(header.or(query_user))
    }

    pub fn platform_id(&self) -> Option<i64> {
        self.platform_id
    }

    pub fn name(&self) -> String {
        match self.platform_id {
            Some(id) => format!("tg_{id}"),
            None => FALLBACK_USER.to_string(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{STORAGE_PREFIX}{}", self.name())
    }
}
