use std::io::{self, BufRead, Write};

use crate::{
    cli::{load_dashboard, spinner},
    config,
    dashboard::View,
    error, info,
    management::SessionManager,
    success, warning,
};

pub async fn login(username: String, password: Option<String>) {
    let password = match password {
        Some(password) => password,
        None => match read_password() {
            Ok(password) => password,
            Err(e) => error!("Cannot read password from stdin: {}", e),
        },
    };

    let dashboard = load_dashboard().await;
    if dashboard.view().await == View::LoggedIn {
        warning!("Already logged in, replacing the stored session.");
    }

    let pb = spinner(format!("Logging in as {}...", username));
    let result = dashboard.login(&username, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(message) => success!("{}", message),
        Err(e) => error!("Login failed: {}", e),
    }
}

pub async fn logout() {
    let dashboard = load_dashboard().await;
    if dashboard.view().await == View::LoggedOut {
        info!("Not logged in.");
        return;
    }

    match dashboard.logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Cannot clear session: {}", e),
    }
}

pub async fn status() {
    let dashboard = load_dashboard().await;
    let ui = dashboard.ui().await;

    match dashboard.view().await {
        View::LoggedIn => success!("Logged in"),
        View::LoggedOut => info!("Logged out. Run `zapdash login` to start a session."),
    }
    info!("API: {}", dashboard.client().base_url());
    info!("Session file: {}", SessionManager::default_path().display());
    info!(
        "Defaults: sync {} days, invoices for {}",
        ui.history_days, ui.target_month
    );
    if let Some(url) = config::baas_url() {
        info!("BaaS: {}", url);
    }
}

fn read_password() -> io::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
