use crate::dates::date_key;
use crate::identity::UserId;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Profile,
}

/// Which record a form is open for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editing {
    NewExercise,
    /// `slot` is the list position when the form was opened from a listing.
    Exercise { id: String, slot: Option<usize> },
    NewPlanDay,
    PlanDay(String),
}

/// Per-request view state: built from the path and query on every
/// navigation, read by the renderer, set by the action handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub user: UserId,
    pub screen: Screen,
    pub date: NaiveDate,
    pub editing: Option<Editing>,
}

impl ViewState {
    pub fn main(user: UserId, date: NaiveDate) -> Self {
        Self {
            user,
            screen: Screen::Main,
            date,
            editing: None,
        }
    }

    pub fn profile(user: UserId, date: NaiveDate) -> Self {
        Self {
            user,
            screen: Screen::Profile,
            date,
            editing: None,
        }
    }

    pub fn editing(mut self, editing: Editing) -> Self {
        self.editing = Some(editing);
        self
    }

    /// Link that keeps the caller's identity.
    pub fn href(&self, path: &str) -> String {
        match self.user.platform_id() {
            Some(id) => {
                let separator = if path.contains('?') { '&' } else { '?' };
                format!("{path}{separator}user={id}")
            }
            None => path.to_string(),
        }
    }

    pub fn day_path(&self) -> String {
        day_path(self.date)
    }

    pub fn day_href(&self, date: NaiveDate) -> String {
        self.href(&day_path(date))
    }

    pub fn profile_href(&self) -> String {
        self.profile_link("")
    }

    /// Profile sub-page link; keeps the day the user came from.
    pub fn profile_link(&self, sub_path: &str) -> String {
        self.href(&format!("/profile{sub_path}?date={}", date_key(self.date)))
    }
}

pub fn day_path(date: NaiveDate) -> String {
    format!("/day/{}", date_key(date))
}
