use tabled::Table;

use crate::{
    dashboard::{Snapshot, View},
    types::{Invoice, InvoiceTableRow},
};

pub const EMPTY_INVOICES: &str = "No invoices generated yet.";

/// Invoice list as a terminal table.
pub fn invoice_table(invoices: &[Invoice], api_base: &str) -> String {
    if invoices.is_empty() {
        return EMPTY_INVOICES.to_string();
    }

    let rows: Vec<InvoiceTableRow> = invoices
        .iter()
        .map(|invoice| InvoiceTableRow::from_invoice(invoice, api_base))
        .collect();
    Table::new(rows).to_string()
}

/// Invoice list as an HTML fragment, one link per PDF. Invoices without a PDF
/// are listed as plain text.
pub fn invoice_list_html(invoices: &[Invoice], api_base: &str) -> String {
    let mut html = String::from("<h2>Invoices</h2>\n");
    if invoices.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", EMPTY_INVOICES));
        return html;
    }

    html.push_str("<ul>\n");
    for invoice in invoices {
        let label = escape(&invoice.label());
        match invoice.pdf_link(api_base) {
            Some(href) => html.push_str(&format!(
                "  <li><a href=\"{href}\" target=\"_blank\" rel=\"noreferrer\">{label}</a></li>\n",
                href = escape(&href),
                label = label,
            )),
            None => html.push_str(&format!("  <li>{}</li>\n", label)),
        }
    }
    html.push_str("</ul>\n");
    html
}

/// Full dashboard page for the local server.
pub fn page(snapshot: &Snapshot) -> String {
    let body = match snapshot.view {
        View::LoggedOut => login_form(snapshot),
        View::LoggedIn => controls(snapshot),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Zaptec Invoice Dashboard</title>
</head>
<body style="padding: 2rem; font-family: Arial">
<h1>Zaptec Invoice Dashboard</h1>
{status}{body}</body>
</html>
"#,
        status = status_line(snapshot),
        body = body,
    )
}

fn status_line(snapshot: &Snapshot) -> String {
    let mut html = String::new();
    if snapshot.loading {
        html.push_str("<p><em>Working…</em></p>\n");
    }
    if let Some(status) = &snapshot.ui.status {
        html.push_str(&format!("<p id=\"status\">{}</p>\n", escape(status)));
    }
    html
}

fn login_form(snapshot: &Snapshot) -> String {
    format!(
        r#"<form method="post" action="/login">
  <label>Username <input name="username" autocomplete="username" required></label>
  <label>Password <input name="password" type="password" autocomplete="current-password" required></label>
  <button type="submit"{disabled}>Log in</button>
</form>
"#,
        disabled = disabled(snapshot),
    )
}

fn controls(snapshot: &Snapshot) -> String {
    format!(
        r#"<form method="post" action="/sync">
  <label>History (days) <input name="history_days" type="number" min="1" value="{days}"></label>
  <button type="submit"{disabled}>Sync charging history</button>
</form>
<form method="post" action="/generate">
  <label>Month <input name="target_month" type="month" value="{month}"></label>
  <button type="submit"{disabled}>Generate invoices</button>
</form>
<form method="post" action="/refresh">
  <button type="submit"{disabled}>Refresh data (legacy)</button>
</form>
<form method="post" action="/logout">
  <button type="submit">Log out</button>
</form>
{list}"#,
        days = snapshot.ui.history_days,
        month = snapshot.ui.target_month,
        disabled = disabled(snapshot),
        list = invoice_list_html(&snapshot.invoices, &snapshot.api_base),
    )
}

fn disabled(snapshot: &Snapshot) -> &'static str {
    if snapshot.loading { " disabled" } else { "" }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
