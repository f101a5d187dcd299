pub mod appreciation;
pub mod wall;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value as JsonValue;
use tauri::async_runtime;
use tracing::{error, warn};

use crate::db::kv_store::SqliteKeyValueStore;
use crate::error::{AppError, AppResult};
use crate::models::contributor::ContributorRecord;
use crate::services::appreciation_service::AppreciationStore;
use crate::services::wall_service::WallController;

pub type SharedWall = Arc<Mutex<WallController<SqliteKeyValueStore>>>;

#[derive(Clone)]
pub struct AppState {
    wall: Result<SharedWall, String>,
}

impl AppState {
    /// A failed load is kept so every command can report it; the front end
    /// shows the error state instead of the wall.
    pub fn new(
        records: AppResult<Vec<ContributorRecord>>,
        appreciation: AppreciationStore<SqliteKeyValueStore>,
    ) -> Self {
        let wall = records
            .map(|records| Arc::new(Mutex::new(WallController::new(records, appreciation))))
            .map_err(|err| err.to_string());
        Self { wall }
    }

    pub fn with_wall<T>(
        &self,
        task: impl FnOnce(&mut WallController<SqliteKeyValueStore>) -> T,
    ) -> AppResult<T> {
        let wall = self
            .wall
            .as_ref()
            .map_err(|message| AppError::DataSource {
                message: message.clone(),
            })?;
        let mut guard = wall
            .lock()
            .map_err(|_| AppError::other("contributor wall lock poisoned"))?;
        Ok(task(&mut guard))
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => CommandError::new("NOT_FOUND", "resource not found", None),
            AppError::DataSource { message } => {
                warn!(target: "app::command", %message, "contributor data unavailable in command");
                CommandError::new("DATA_UNAVAILABLE", "could not load contributors", None)
            }
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "serialization failed", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "file system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("command task failed: {err}"), None))?
        .map_err(CommandError::from)
}
