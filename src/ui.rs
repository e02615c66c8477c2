use crate::dates::{format_title, shift_days, WEEKDAY_LABELS};
use crate::forms::{format_planned, DEFAULT_SET_COUNT, MAX_SET_COUNT};
use crate::models::{ExerciseInput, LoggedExercise, PlanDayInput, UserData};
use crate::view::{Editing, ViewState};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// What the main screen shows for one date.
#[derive(Debug, Clone)]
pub struct DayScreen {
    pub training_day: bool,
    pub plan_day: Option<String>,
    pub exercises: Vec<LoggedExercise>,
}

/// A pending destructive action waiting for a yes/no.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub message: String,
    pub action: String,
    pub hidden: Vec<(String, String)>,
    pub cancel: String,
}

fn page(title: &str, content: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app { (content) }
            }
        }
    }
    .into_string()
}

fn format_weight(weight: f64) -> String {
    format!("{weight} kg")
}

fn reps(value: Option<u32>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

pub fn render_main(view: &ViewState, day: &DayScreen) -> String {
    let date = view.date;
    let add_href = view.href(&format!("{}/exercises/new", view.day_path()));

    let content = html! {
        header.topbar {
            a.nav href=(view.day_href(shift_days(date, -1))) { "‹" }
            div.title {
                h1 { (format_title(date)) }
                @if let Some(plan_day) = &day.plan_day {
                    p.subtitle { (plan_day) }
                }
            }
            a.nav href=(view.day_href(shift_days(date, 1))) { "›" }
            a.profile href=(view.profile_href()) { "Profile" }
        }
        @if !day.training_day {
            div.empty-state {
                p { "No training on this day" }
                p { "Set your training days in the profile" }
            }
        } @else {
            @if day.exercises.is_empty() {
                div.empty-state {
                    p { "No exercises for this day" }
                    p { "Add them to a plan day in the profile or below" }
                }
            }
            @for (slot, exercise) in day.exercises.iter().enumerate() {
                (exercise_card(view, slot, exercise))
            }
            a.button.primary href=(add_href) { "Add exercise" }
        }
    };

    page("Workout", content)
}

fn exercise_card(view: &ViewState, slot: usize, exercise: &LoggedExercise) -> Markup {
    let base = format!("{}/exercises/{}", view.day_path(), exercise.id);
    let edit_href = view.href(&format!("{base}/edit?slot={slot}"));
    let delete_action = view.href(&format!("{base}/delete"));

    html! {
        div.exercise-card {
            div.exercise-header {
                span.exercise-name { (exercise.name) }
                div.exercise-actions {
                    a.icon href=(edit_href) { "Edit" }
                    form method="post" action=(delete_action) {
                        input type="hidden" name="slot" value=(slot);
                        button.icon type="submit" { "Delete" }
                    }
                }
            }
            @if let Some(weight) = exercise.weight {
                div.exercise-weight { (format_weight(weight)) }
            }
            div.sets-row {
                @for (i, set) in exercise.sets.iter().enumerate() {
                    div.set-badge {
                        span { "Set " (i + 1) }
                        span.rep-count {
                            @match set.actual {
                                Some(actual) => { (actual) }
                                None => { "—" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Add/edit form. `set_rows` rows are shown, reusing entered values.
pub fn render_exercise_form(view: &ViewState, input: &ExerciseInput, set_rows: usize) -> String {
    let heading = match &view.editing {
        Some(Editing::Exercise { .. }) => "Edit exercise",
        _ => "New exercise",
    };
    let action = view.href(&format!("{}/exercises", view.day_path()));

    let content = html! {
        h1 { (heading) }
        p.subtitle { (format_title(view.date)) }
        form.editor method="post" action=(action) {
            @if let Some(id) = &input.id {
                input type="hidden" name="id" value=(id);
            }
            @if let Some(slot) = input.slot {
                input type="hidden" name="slot" value=(slot);
            }
            label {
                "Name"
                input type="text" name="name" value=(input.name) required;
            }
            label {
                "Weight, kg"
                input type="number" name="weight" min="0" step="any"
                    value=[input.weight.map(|weight| weight.to_string())];
            }
            div.inline {
                label {
                    "Sets"
                    input type="number" name="sets_count" min="1" max=(MAX_SET_COUNT) value=(set_rows);
                }
                button.secondary type="submit" name="action" value="resize" formnovalidate { "Update sets" }
            }
            h3 { "Sets" }
            @for i in 0..set_rows {
                @let set = input.sets.get(i).copied().unwrap_or_default();
                div.set-input-row {
                    span { "Set " (i + 1) }
                    input type="number" name=(format!("planned_{i}")) placeholder="Plan" min="0" value=(reps(set.planned));
                    input type="number" name=(format!("actual_{i}")) placeholder="Done" min="0" value=(reps(set.actual));
                }
            }
            div.actions {
                a.button.secondary href=(view.day_href(view.date)) { "Cancel" }
                button.primary type="submit" name="action" value="save" { "Save" }
            }
        }
    };

    page(heading, content)
}

pub fn render_profile(view: &ViewState, data: &UserData) -> String {
    let schedule_action = view.profile_link("/schedule");
    let new_plan_href = view.profile_link("/plan-days/new");

    let content = html! {
        header.topbar {
            a.nav href=(view.day_href(view.date)) { "‹" }
            div.title { h1 { "Profile" } }
        }
        section {
            h2 { "Training days" }
            form method="post" action=(schedule_action) {
                div.days-grid {
                    @for (index, label) in WEEKDAY_LABELS.iter().enumerate() {
                        @let checked = data.training_days.contains(&(index as u8));
                        label.day-check.active[checked] {
                            input type="checkbox" name=(format!("day_{index}")) checked[checked];
                            span { (label) }
                        }
                    }
                }
                button.primary type="submit" { "Save" }
            }
        }
        section {
            h2 { "Plan" }
            @if data.plan_days.is_empty() {
                div.empty-state { p { "No plan days yet" } }
            }
            @for plan_day in &data.plan_days {
                @let base = format!("/plan-days/{}", plan_day.id);
                div.plan-day-card {
                    span.plan-day-name { (plan_day.name) }
                    span.plan-day-ex-count { (plan_day.exercises.len()) " exercises" }
                    div.exercise-actions {
                        a.icon href=(view.profile_link(&format!("{base}/edit"))) { "Edit" }
                        form method="post" action=(view.profile_link(&format!("{base}/delete"))) {
                            button.icon type="submit" { "Delete" }
                        }
                    }
                }
            }
            a.button.secondary href=(new_plan_href) { "Add plan day" }
        }
    };

    page("Profile", content)
}

/// Plan-day editor: existing rows followed by `blank_rows` empty ones.
pub fn render_plan_day_form(view: &ViewState, input: &PlanDayInput, blank_rows: usize) -> String {
    let heading = match &view.editing {
        Some(Editing::PlanDay(_)) => "Edit plan day",
        _ => "New plan day",
    };
    let rows = input.exercises.len() + blank_rows;

    let content = html! {
        h1 { (heading) }
        form.editor method="post" action=(view.profile_link("/plan-days")) {
            @if let Some(id) = &input.id {
                input type="hidden" name="id" value=(id);
            }
            label {
                "Name"
                input type="text" name="name" value=(input.name) required;
            }
            h3 { "Exercises" }
            @for i in 0..rows {
                @let exercise = input.exercises.get(i);
                div.plan-ex-row {
                    input type="text" name=(format!("ex_name_{i}")) placeholder="Name"
                        value=(exercise.map(|exercise| exercise.name.as_str()).unwrap_or_default());
                    input type="number" name=(format!("ex_weight_{i}")) placeholder="Weight" min="0" step="any"
                        value=[exercise.and_then(|exercise| exercise.weight).map(|weight| weight.to_string())];
                    input type="number" name=(format!("ex_sets_{i}")) placeholder="Sets" min="1" max=(MAX_SET_COUNT)
                        value=(exercise.map(|exercise| exercise.sets.len()).unwrap_or(DEFAULT_SET_COUNT));
                    input type="text" name=(format!("ex_reps_{i}")) placeholder="Reps, e.g. 10 or 10,8,6"
                        value=(exercise.map(|exercise| format_planned(&exercise.sets)).unwrap_or_default());
                }
            }
            button.secondary type="submit" name="action" value="add_row" formnovalidate { "Add exercise row" }
            div.actions {
                a.button.secondary href=(view.profile_href()) { "Cancel" }
                button.primary type="submit" name="action" value="save" { "Save" }
            }
        }
    };

    page(heading, content)
}

pub fn render_confirm(confirmation: &Confirmation) -> String {
    let content = html! {
        div.confirm {
            p { (confirmation.message) }
            form method="post" action=(confirmation.action) {
                @for (name, value) in &confirmation.hidden {
                    input type="hidden" name=(name) value=(value);
                }
                input type="hidden" name="confirm" value="yes";
                div.actions {
                    a.button.secondary href=(confirmation.cancel) { "Cancel" }
                    button.danger type="submit" { "Delete" }
                }
            }
        }
    };

    page("Confirm", content)
}

const CSS: &str = r#"
    :root {
      --bg-1: #1c1c1e;
      --card: #2c2c2e;
      --ink: #f2f2f7;
      --muted: #8e8e93;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --danger: #d64545;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 16px;
    }

    .app {
      width: min(640px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 16px;
    }

    h1 {
      font-size: 1.4rem;
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .topbar {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .topbar .title {
      flex: 1;
      text-align: center;
    }

    a {
      color: inherit;
    }

    .nav, .profile, .icon {
      text-decoration: none;
      padding: 6px 10px;
      border-radius: 10px;
      background: var(--card);
    }

    .empty-state {
      text-align: center;
      color: var(--muted);
      padding: 24px;
    }

    .exercise-card, .plan-day-card {
      background: var(--card);
      border-radius: 16px;
      padding: 14px;
      display: grid;
      gap: 8px;
    }

    .exercise-header, .plan-day-card {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 8px;
    }

    .exercise-actions {
      display: flex;
      gap: 6px;
    }

    .exercise-actions form {
      margin: 0;
    }

    .exercise-name, .plan-day-name {
      font-weight: 600;
    }

    .exercise-weight, .plan-day-ex-count {
      color: var(--muted);
    }

    .sets-row {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .set-badge {
      display: grid;
      text-align: center;
      background: var(--accent-2);
      border-radius: 10px;
      padding: 6px 10px;
      font-size: 0.85rem;
    }

    .rep-count {
      font-size: 1.1rem;
      font-weight: 600;
    }

    .days-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
      margin-bottom: 12px;
    }

    .day-check {
      display: grid;
      justify-items: center;
      padding: 8px 0;
      border-radius: 10px;
      background: var(--card);
    }

    .day-check.active {
      background: var(--accent);
    }

    .editor {
      display: grid;
      gap: 10px;
    }

    .editor label {
      display: grid;
      gap: 4px;
    }

    .inline {
      display: flex;
      align-items: end;
      gap: 8px;
    }

    .set-input-row, .plan-ex-row {
      display: grid;
      grid-template-columns: 1fr 1fr 1fr;
      gap: 6px;
      align-items: center;
    }

    .plan-ex-row {
      grid-template-columns: 2fr 1fr 1fr 1fr;
    }

    input {
      padding: 8px;
      border-radius: 8px;
      border: 1px solid #3a3a3c;
      background: #1c1c1e;
      color: var(--ink);
      font: inherit;
    }

    .actions {
      display: flex;
      justify-content: flex-end;
      gap: 8px;
    }

    button, .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
      color: var(--ink);
    }

    .primary {
      background: var(--accent);
    }

    .secondary {
      background: var(--accent-2);
    }

    .danger {
      background: var(--danger);
    }

    .icon {
      border: none;
      font-size: 0.85rem;
      padding: 6px 10px;
      border-radius: 10px;
    }
"#;
