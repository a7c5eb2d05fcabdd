use std::sync::Arc;

use axum::{
    Extension, Form,
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::{
    dashboard::{Dashboard, DashboardError, render},
    types::TargetMonth,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncForm {
    #[serde(default)]
    pub history_days: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub target_month: Option<String>,
}

pub async fn index(Extension(dashboard): Extension<Arc<Dashboard>>) -> Html<String> {
    let snapshot = dashboard.snapshot().await;
    Html(render::page(&snapshot))
}

pub async fn login(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Form(form): Form<LoginForm>,
) -> Redirect {
    report("login", dashboard.login(&form.username, &form.password).await);
    Redirect::to("/")
}

pub async fn logout(Extension(dashboard): Extension<Arc<Dashboard>>) -> Redirect {
    if let Err(e) = dashboard.logout().await {
        dashboard.set_status(Some(e.to_string())).await;
    }
    Redirect::to("/")
}

pub async fn sync(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Form(form): Form<SyncForm>,
) -> Redirect {
    let mut days = None;
    if let Some(raw) = form.history_days.filter(|v| !v.trim().is_empty()) {
        match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => days = Some(value),
            _ => {
                dashboard
                    .set_status(Some(format!(
                        "Invalid history window `{}`, expected a positive number of days",
                        raw
                    )))
                    .await;
                return Redirect::to("/");
            }
        }
    }

    report("sync", dashboard.sync_with(days).await);
    Redirect::to("/")
}

pub async fn generate(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Form(form): Form<GenerateForm>,
) -> Redirect {
    let mut month = None;
    if let Some(raw) = form.target_month.filter(|v| !v.trim().is_empty()) {
        match raw.parse::<TargetMonth>() {
            Ok(value) => month = Some(value),
            Err(e) => {
                dashboard.set_status(Some(e.to_string())).await;
                return Redirect::to("/");
            }
        }
    }

    report("generate", dashboard.generate_invoices_for(month).await);
    Redirect::to("/")
}

pub async fn refresh(Extension(dashboard): Extension<Arc<Dashboard>>) -> Redirect {
    report("refresh", dashboard.refresh().await);
    Redirect::to("/")
}

fn report(action: &str, result: Result<String, DashboardError>) {
    match result {
        Ok(_) | Err(DashboardError::Busy) => {}
        Err(e) => warning!("Dashboard {} failed: {}", action, e),
    }
}
