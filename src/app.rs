use crate::state::AppState;
use crate::{api, handlers};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/day/:date", get(handlers::day))
        .route("/day/:date/exercises", post(handlers::save_exercise))
        .route("/day/:date/exercises/new", get(handlers::new_exercise))
        .route("/day/:date/exercises/:id/edit", get(handlers::edit_exercise))
        .route("/day/:date/exercises/:id/delete", post(handlers::delete_exercise))
        .route("/profile", get(handlers::profile))
        .route("/profile/schedule", post(handlers::save_schedule))
        .route("/profile/plan-days", post(handlers::save_plan_day))
        .route("/profile/plan-days/new", get(handlers::new_plan_day))
        .route("/profile/plan-days/:id/edit", get(handlers::edit_plan_day))
        .route("/profile/plan-days/:id/delete", post(handlers::delete_plan_day))
        .route("/api/document", get(api::get_document))
        .route("/api/days/:date", get(api::get_day))
        .route("/api/days/:date/exercises", put(api::put_exercise))
        .route("/api/days/:date/exercises/:id", delete(api::delete_exercise))
        .route("/api/schedule", get(api::get_schedule).put(api::put_schedule))
        .route("/api/plan-days", get(api::list_plan_days).put(api::put_plan_day))
        .route("/api/plan-days/:id", delete(api::delete_plan_day))
        .with_state(state)
}
