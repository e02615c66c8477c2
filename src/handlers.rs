use crate::dates::{date_key, parse_date_key, today};
use crate::errors::{AppError, TrackerError};
use crate::forms::{
    is_confirmed, parse_exercise_form, parse_plan_day_form, parse_schedule_form, parse_set_count,
    FormAction, FormFields, DEFAULT_SET_COUNT, MAX_SET_COUNT,
};
use crate::identity::UserId;
use crate::models::{ExerciseInput, PlanDayInput};
use crate::state::AppState;
use crate::ui::{
    render_confirm, render_exercise_form, render_main, render_plan_day_form, render_profile,
    Confirmation, DayScreen,
};
use crate::view::{Editing, ViewState};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

/// Blank plan-day rows offered for new exercises.
const BLANK_PLAN_ROWS: usize = 1;

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub user: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
}

impl ViewQuery {
    fn user(&self, headers: &HeaderMap) -> UserId {
        UserId::resolve(headers, self.user.as_deref())
    }

    fn date(&self) -> NaiveDate {
        self.date
            .as_deref()
            .and_then(|raw| parse_date_key(raw).ok())
            .unwrap_or_else(today)
    }

    fn slot(&self) -> Option<usize> {
        self.slot.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

fn redirect(href: String) -> Response {
    Redirect::to(&href).into_response()
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Html<String> {
    let view = ViewState::main(query.user(&headers), query.date());
    render_day(&state, &view).await
}

pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, AppError> {
    let view = ViewState::main(query.user(&headers), parse_date_key(&date)?);
    Ok(render_day(&state, &view).await)
}

async fn render_day(state: &AppState, view: &ViewState) -> Html<String> {
    let data = state.load(&view.user).await;
    let exercises = data.exercises_for(view.date);
    let screen = DayScreen {
        training_day: data.is_training_day(view.date) || data.saved_exercises(view.date).is_some(),
        plan_day: data.plan_day_for(view.date).map(|plan_day| plan_day.name.clone()),
        exercises,
    };
    Html(render_main(view, &screen))
}

pub async fn new_exercise(
    Path(date): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, AppError> {
    let view = ViewState::main(query.user(&headers), parse_date_key(&date)?).editing(Editing::NewExercise);
    let input = ExerciseInput {
        id: None,
        slot: None,
        name: String::new(),
        weight: None,
        sets: Vec::new(),
    };
    Ok(Html(render_exercise_form(&view, &input, DEFAULT_SET_COUNT)))
}

pub async fn edit_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    let view = ViewState::main(query.user(&headers), parse_date_key(&date)?);
    let data = state.load(&view.user).await;
    let Some((slot, exercise)) = data.find_exercise(view.date, &id, query.slot()) else {
        return Ok(redirect(view.day_href(view.date)));
    };

    let rows = if exercise.sets.is_empty() {
        DEFAULT_SET_COUNT
    } else {
        exercise.sets.len()
    };
    let input = ExerciseInput {
        id: Some(exercise.id.clone()),
        slot: Some(slot),
        name: exercise.name,
        weight: exercise.weight,
        sets: exercise.sets,
    };
    let view = view.editing(Editing::Exercise {
        id: exercise.id,
        slot: Some(slot),
    });
    Ok(Html(render_exercise_form(&view, &input, rows)).into_response())
}

pub async fn save_exercise(
    State(state): State<AppState>,
    Path(date): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let view = ViewState::main(query.user(&headers), parse_date_key(&date)?);
    let form = parse_exercise_form(&fields);
    let view = match &form.input.id {
        Some(id) => view.editing(Editing::Exercise {
            id: id.clone(),
            slot: form.input.slot,
        }),
        None => view.editing(Editing::NewExercise),
    };

    if form.action != FormAction::Save {
        let rows = parse_set_count(fields.get("sets_count").map(String::as_str)).min(MAX_SET_COUNT);
        return Ok(Html(render_exercise_form(&view, &form.input, rows)).into_response());
    }

    let date = view.date;
    let input = form.input.clone();
    match state
        .update(&view.user, |data| data.upsert_exercise(date, input))
        .await
    {
        Ok(exercise) => {
            info!(user = %view.user.name(), date = %date_key(date), exercise = %exercise.id, "saved exercise");
            Ok(redirect(view.day_href(view.date)))
        }
        Err(TrackerError::ExerciseNotFound(_)) => Ok(redirect(view.day_href(view.date))),
        Err(err @ TrackerError::Storage(_)) => Err(err.into()),
        Err(_) => {
            let rows = form.input.sets.len().max(1);
            Ok(Html(render_exercise_form(&view, &form.input, rows)).into_response())
        }
    }
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let view = ViewState::main(query.user(&headers), parse_date_key(&date)?);
    let slot = fields.get("slot").and_then(|raw| raw.trim().parse::<usize>().ok());

    if !is_confirmed(&fields) {
        let data = state.load(&view.user).await;
        let Some((_, exercise)) = data.find_exercise(view.date, &id, slot) else {
            return Ok(redirect(view.day_href(view.date)));
        };
        let confirmation = Confirmation {
            message: format!("Delete exercise \"{}\"?", exercise.name),
            action: view.href(&format!("{}/exercises/{id}/delete", view.day_path())),
            hidden: slot
                .map(|slot| vec![("slot".to_string(), slot.to_string())])
                .unwrap_or_default(),
            cancel: view.day_href(view.date),
        };
        return Ok(Html(render_confirm(&confirmation)).into_response());
    }

    let date = view.date;
    match state
        .update(&view.user, |data| data.delete_exercise(date, &id, slot))
        .await
    {
        Ok(removed) => {
            info!(user = %view.user.name(), date = %date_key(date), exercise = %removed.id, "deleted exercise");
        }
        Err(TrackerError::ExerciseNotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }
    Ok(redirect(view.day_href(view.date)))
}

pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Html<String> {
    let view = ViewState::profile(query.user(&headers), query.date());
    let data = state.load(&view.user).await;
    Html(render_profile(&view, &data))
}

pub async fn save_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let date = query.date();
    let view = ViewState::main(query.user(&headers), date);
    let days = parse_schedule_form(&fields);

    state
        .update(&view.user, |data| data.set_training_days(days.iter().copied()))
        .await?;
    info!(user = %view.user.name(), ?days, "saved training days");
    Ok(redirect(view.day_href(date)))
}

pub async fn new_plan_day(headers: HeaderMap, Query(query): Query<ViewQuery>) -> Html<String> {
    let view = ViewState::profile(query.user(&headers), query.date()).editing(Editing::NewPlanDay);
    let input = PlanDayInput {
        id: None,
        name: String::new(),
        exercises: Vec::new(),
    };
    Html(render_plan_day_form(&view, &input, BLANK_PLAN_ROWS))
}

pub async fn edit_plan_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Response {
    let view = ViewState::profile(query.user(&headers), query.date());
    let data = state.load(&view.user).await;
    let Some(plan_day) = data.plan_day(&id) else {
        return redirect(view.profile_href());
    };

    let input = PlanDayInput {
        id: Some(plan_day.id.clone()),
        name: plan_day.name.clone(),
        exercises: plan_day.exercises.clone(),
    };
    let view = view.editing(Editing::PlanDay(id));
    Html(render_plan_day_form(&view, &input, BLANK_PLAN_ROWS)).into_response()
}

pub async fn save_plan_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let form = parse_plan_day_form(&fields);
    let view = ViewState::profile(query.user(&headers), query.date());
    let view = match &form.input.id {
        Some(id) => view.editing(Editing::PlanDay(id.clone())),
        None => view.editing(Editing::NewPlanDay),
    };

    if form.action == FormAction::AddRow {
        return Ok(Html(render_plan_day_form(&view, &form.input, BLANK_PLAN_ROWS + 1)).into_response());
    }

    let input = form.input.clone();
    match state.update(&view.user, |data| data.upsert_plan_day(input)).await {
        Ok(plan_day) => {
            info!(user = %view.user.name(), plan_day = %plan_day.id, "saved plan day");
            Ok(redirect(view.profile_href()))
        }
        Err(TrackerError::PlanDayNotFound(_)) => Ok(redirect(view.profile_href())),
        Err(err @ TrackerError::Storage(_)) => Err(err.into()),
        Err(_) => Ok(Html(render_plan_day_form(&view, &form.input, BLANK_PLAN_ROWS)).into_response()),
    }
}

pub async fn delete_plan_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let view = ViewState::profile(query.user(&headers), query.date());

    if !is_confirmed(&fields) {
        let data = state.load(&view.user).await;
        let Some(plan_day) = data.plan_day(&id) else {
            return Ok(redirect(view.profile_href()));
        };
        let confirmation = Confirmation {
            message: format!("Remove \"{}\" from the plan?", plan_day.name),
            action: view.profile_link(&format!("/plan-days/{id}/delete")),
            hidden: Vec::new(),
            cancel: view.profile_href(),
        };
        return Ok(Html(render_confirm(&confirmation)).into_response());
    }

    match state.update(&view.user, |data| data.delete_plan_day(&id)).await {
        Ok(removed) => info!(user = %view.user.name(), plan_day = %removed.id, "deleted plan day"),
        Err(TrackerError::PlanDayNotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }
    Ok(redirect(view.profile_href()))
}
