use tauri::State;

use crate::models::wall::{FilterOutcome, SortKey, SpotlightCard, WallSnapshot};

use super::{run_blocking, AppState, CommandResult};

#[tauri::command]
pub async fn wall_snapshot(state: State<'_, AppState>) -> CommandResult<WallSnapshot> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.with_wall(|wall| wall.snapshot())).await
}

#[tauri::command]
pub async fn wall_set_sort(
    state: State<'_, AppState>,
    sort_key: String,
) -> CommandResult<FilterOutcome> {
    let app_state = state.inner().clone();
    let key = SortKey::parse_or_default(&sort_key);
    run_blocking(move || app_state.with_wall(|wall| wall.set_sort(key))).await
}

#[tauri::command]
pub async fn wall_set_search(
    state: State<'_, AppState>,
    search: String,
) -> CommandResult<FilterOutcome> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.with_wall(|wall| wall.set_search(&search))).await
}

#[tauri::command]
pub async fn wall_toggle_badge(
    state: State<'_, AppState>,
    badge: String,
) -> CommandResult<FilterOutcome> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.with_wall(|wall| wall.toggle_badge(&badge))).await
}

#[tauri::command]
pub async fn spotlight_next(state: State<'_, AppState>) -> CommandResult<Option<SpotlightCard>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.with_wall(|wall| wall.spotlight())).await
}
