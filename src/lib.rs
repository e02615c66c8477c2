pub mod api;
pub mod app;
pub mod dates;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod identity;
pub mod ids;
pub mod models;
pub mod plan;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod ui;
pub mod view;
pub mod workouts;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_dir};
