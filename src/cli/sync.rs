use crate::{
    cli::{load_dashboard, spinner},
    config, error, success, warning,
};

pub async fn sync(history_days: Option<u32>) {
    let dashboard = load_dashboard().await;
    let days = history_days.unwrap_or_else(config::history_days);

    let pb = spinner(format!("Syncing {} days of charging history...", days));
    let result = dashboard.sync_with(Some(days)).await;
    pb.finish_and_clear();

    match result {
        Ok(message) => success!("{}", message),
        Err(e) => error!("Sync failed: {}", e),
    }
}

pub async fn refresh() {
    warning!("`refresh` is deprecated, use `zapdash sync` followed by `zapdash generate`.");

    let dashboard = load_dashboard().await;
    let pb = spinner("Refreshing data...".to_string());
    let result = dashboard.refresh().await;
    pb.finish_and_clear();

    match result {
        Ok(message) => success!("{}", message),
        Err(e) => error!("Refresh failed: {}", e),
    }
}
