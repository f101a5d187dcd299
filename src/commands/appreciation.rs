use serde::Serialize;
use tauri::State;

use crate::models::appreciation::{AppreciationKind, AppreciationSummary};

use super::{run_blocking, AppState, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppreciationSendResult {
    /// False when this reaction had already been sent for the username.
    pub accepted: bool,
    pub summary: AppreciationSummary,
}

#[tauri::command]
pub async fn appreciation_send(
    state: State<'_, AppState>,
    username: String,
    kind: String,
) -> CommandResult<AppreciationSendResult> {
    let app_state = state.inner().clone();
    run_blocking(move || {
        let kind: AppreciationKind = kind.parse()?;
        app_state.with_wall(|wall| {
            let accepted = wall.appreciate(&username, kind).is_some();
            AppreciationSendResult {
                accepted,
                summary: wall.appreciation().summary(&username),
            }
        })
    })
    .await
}
