pub mod app;
pub mod archive;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod score;
pub mod shot_log;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, spawn_writer};
pub use tracker::{CommitHook, Tracker};
