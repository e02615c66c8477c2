use crate::dates::{date_key, parse_date_key, weekday_index};
use crate::errors::AppError;
use crate::identity::UserId;
use crate::models::{
    DayResponse, ExerciseInput, PlanDay, PlanDayInput, PlanDaySummary, ScheduleBody, UserData,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct ApiQuery {
    pub user: Option<String>,
    pub slot: Option<usize>,
}

impl ApiQuery {
    fn user(&self, headers: &HeaderMap) -> UserId {
        UserId::resolve(headers, self.user.as_deref())
    }
}

pub fn day_response(data: &UserData, date: NaiveDate) -> DayResponse {
    DayResponse {
        date: date_key(date),
        weekday: weekday_index(date),
        training_day: data.is_training_day(date),
        plan_day: data.plan_day_for(date).map(|plan_day| PlanDaySummary {
            id: plan_day.id.clone(),
            name: plan_day.name.clone(),
        }),
        saved: data.saved_exercises(date).is_some(),
        exercises: data.exercises_for(date),
    }
}

pub async fn get_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Json<UserData> {
    Json(state.load(&query.user(&headers)).await)
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date_key(&date)?;
    let data = state.load(&query.user(&headers)).await;
    Ok(Json(day_response(&data, date)))
}

pub async fn put_exercise(
    State(state): State<AppState>,
    Path(date): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
    Json(payload): Json<ExerciseInput>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date_key(&date)?;
    let user = query.user(&headers);
    let response = state
        .update(&user, |data| {
            let exercise = data.upsert_exercise(date, payload)?;
            info!(user = %user.name(), date = %date_key(date), exercise = %exercise.id, "saved exercise");
            Ok(day_response(data, date))
        })
        .await?;
    Ok(Json(response))
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date_key(&date)?;
    let user = query.user(&headers);
    let response = state
        .update(&user, |data| {
            data.delete_exercise(date, &id, query.slot)?;
            info!(user = %user.name(), date = %date_key(date), exercise = %id, "deleted exercise");
            Ok(day_response(data, date))
        })
        .await?;
    Ok(Json(response))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Json<ScheduleBody> {
    let data = state.load(&query.user(&headers)).await;
    Json(ScheduleBody {
        training_days: data.training_days.into_iter().collect(),
    })
}

pub async fn put_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
    Json(payload): Json<ScheduleBody>,
) -> Result<Json<ScheduleBody>, AppError> {
    let user = query.user(&headers);
    let training_days = state
        .update(&user, |data| {
            data.set_training_days(payload.training_days)?;
            Ok(data.training_days.iter().copied().collect::<Vec<u8>>())
        })
        .await?;
    info!(user = %user.name(), ?training_days, "saved training days");
    Ok(Json(ScheduleBody { training_days }))
}

pub async fn list_plan_days(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Json<Vec<PlanDay>> {
    Json(state.load(&query.user(&headers)).await.plan_days)
}

pub async fn put_plan_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
    Json(payload): Json<PlanDayInput>,
) -> Result<Json<PlanDay>, AppError> {
    let user = query.user(&headers);
    let plan_day = state
        .update(&user, |data| data.upsert_plan_day(payload))
        .await?;
    info!(user = %user.name(), plan_day = %plan_day.id, "saved plan day");
    Ok(Json(plan_day))
}

pub async fn delete_plan_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ApiQuery>,
) -> Result<Json<PlanDay>, AppError> {
    let user = query.user(&headers);
    let removed = state
        .update(&user, |data| data.delete_plan_day(&id))
        .await?;
    info!(user = %user.name(), plan_day = %removed.id, "deleted plan day");
    Ok(Json(removed))
}
