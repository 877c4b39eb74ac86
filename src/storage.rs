use crate::errors::AppError;
use crate::models::AppData;
use crate::tracker::CommitHook;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Publishes each committed snapshot to the background writer. Only the latest
/// snapshot is kept, so a slow disk never queues up stale writes.
pub struct PersistHook {
    tx: watch::Sender<AppData>,
}

impl CommitHook for PersistHook {
    fn on_commit(&mut self, data: &AppData) {
        self.tx.send_replace(data.clone());
    }
}

/// Starts the task that writes snapshots to `path` and returns the hook that
/// feeds it along with the task handle. Must be called inside a tokio runtime.
/// A failed write is logged; the in-memory state is never rolled back.
///
/// Once the hook is dropped the task writes whatever snapshot it has not seen
/// yet and exits, so awaiting the handle after that flushes the last commit.
pub fn spawn_writer(path: PathBuf, initial: AppData) -> (PersistHook, JoinHandle<()>) {
    let (tx, mut rx) = watch::channel(initial);
    let writer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            match persist_data(&path, &snapshot).await {
                Ok(()) => debug!(path = %path.display(), "state persisted"),
                Err(err) => error!("failed to persist state: {}", err.message),
            }
        }
        debug!(path = %path.display(), "state writer stopped");
    });
    (PersistHook { tx }, writer)
}
