use crate::{
    cli::{load_dashboard, spinner},
    dashboard::{View, render},
    error, info, success,
    types::TargetMonth,
    warning,
};

pub async fn generate(month: Option<TargetMonth>) {
    let dashboard = load_dashboard().await;
    let month = month.unwrap_or_else(TargetMonth::last_completed);

    let pb = spinner(format!("Generating invoices for {}...", month));
    let result = dashboard.generate_invoices_for(Some(month)).await;
    pb.finish_and_clear();

    match result {
        Ok(message) => success!("{}", message),
        Err(e) => error!("Invoice generation failed: {}", e),
    }
}

pub async fn invoices(open: Option<String>) {
    let dashboard = load_dashboard().await;
    if dashboard.view().await == View::LoggedOut {
        error!("Not logged in. Run `zapdash login` first.");
    }

    let pb = spinner("Fetching invoices...".to_string());
    let result = dashboard.fetch_invoices().await;
    pb.finish_and_clear();

    let invoices = match result {
        Ok(invoices) => invoices,
        Err(e) => error!("Failed to load invoices: {}", e),
    };

    let api_base = dashboard.client().base_url();

    let Some(invoice_id) = open else {
        println!("{}", render::invoice_table(&invoices, api_base));
        return;
    };

    let Some(invoice) = invoices.iter().find(|i| i.invoice_id == invoice_id) else {
        error!("No invoice with id {}", invoice_id);
    };

    let Some(url) = invoice.pdf_link(api_base) else {
        error!("Invoice {} has no PDF yet", invoice_id);
    };
    info!("{}", invoice.label());
    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please open the following URL manually:\n{}",
            url
        );
    }
}
