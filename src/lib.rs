#[cfg(feature = "desktop")]
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
use tauri::Manager;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

#[cfg(feature = "desktop")]
fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle();

            let data_dir = handle
                .path()
                .app_data_dir()
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            std::fs::create_dir_all(&data_dir)?;

            let config = crate::config::WallConfig::load(&data_dir)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            crate::utils::logger::init_logging(&data_dir.join("logs"), &config.log_directives)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let pool = crate::db::DbPool::new(config.database_path(&data_dir))
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            let appreciation = crate::services::appreciation_service::AppreciationStore::with_key(
                crate::db::kv_store::SqliteKeyValueStore::new(pool),
                config.storage_key.clone(),
            );

            let records = crate::services::contributor_service::load_contributors(&config.data_file);
            app.manage(crate::commands::AppState::new(records, appreciation));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::wall::wall_snapshot,
            crate::commands::wall::wall_set_sort,
            crate::commands::wall::wall_set_search,
            crate::commands::wall::wall_toggle_badge,
            crate::commands::wall::spotlight_next,
            crate::commands::appreciation::appreciation_send,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
