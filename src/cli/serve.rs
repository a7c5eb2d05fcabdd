use std::sync::Arc;

use crate::{cli::load_dashboard, config, error, info, server, warning};

pub async fn serve(addr: Option<String>, open: bool) {
    let dashboard = Arc::new(load_dashboard().await);
    let addr = addr.unwrap_or_else(config::server_addr);
    let url = format!("http://{}", addr);

    info!(
        "Dashboard for {} running at {}",
        dashboard.client().base_url(),
        url
    );

    if open && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    if let Err(e) = server::start_dashboard_server(dashboard, &addr).await {
        error!("Dashboard server stopped: {}", e);
    }
}
