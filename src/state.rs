use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The one writer handle shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}
