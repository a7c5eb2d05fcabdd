use chrono::NaiveDate;
use zapdash::{
    dashboard::render,
    error::ApiError,
    types::{Invoice, InvoiceTableRow, TargetMonth, parse_target_month},
};

fn invoice(pdf_url: &str) -> Invoice {
    Invoice {
        invoice_id: "inv-1".to_string(),
        owner_id: None,
        period_start: "2024-03-01".to_string(),
        period_end: "2024-03-31".to_string(),
        total_amount: Some(42.5),
        pdf_url: Some(pdf_url.to_string()),
        generated_at: None,
    }
}

#[test]
fn test_target_month_parse_and_display() {
    let month: TargetMonth = "2024-03".parse().unwrap();
    assert_eq!(month.year(), 2024);
    assert_eq!(month.month(), 3);
    assert_eq!(month.to_string(), "2024-03");
}

#[test]
fn test_target_month_rejects_malformed_input() {
    for input in ["2024-3", "2024-13", "2024-00", "24-03", "2024/03", "march", "", "+202-03"] {
        let err = input.parse::<TargetMonth>().unwrap_err();
        assert!(matches!(err, ApiError::InvalidMonth(_)), "accepted {input:?}");
    }
    assert!(parse_target_month("2024-13").unwrap_err().contains("YYYY-MM"));
}

#[test]
fn test_target_month_previous_of() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(TargetMonth::previous_of(date).to_string(), "2024-02");

    let january = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    assert_eq!(TargetMonth::previous_of(january).to_string(), "2024-12");
}

#[test]
fn test_invoice_accepts_numeric_id() {
    let invoice: Invoice = serde_json::from_str(
        r#"{"invoice_id":17,"period_start":"2024-03-01","period_end":"2024-03-31",
            "total_amount":12.0,"pdf_url":"/invoices/17.pdf","generated_at":"2024-04-01T08:00:00"}"#,
    )
    .unwrap();
    assert_eq!(invoice.invoice_id, "17");
    assert_eq!(invoice.generated_at.as_deref(), Some("2024-04-01T08:00:00"));
    assert_eq!(invoice.owner_id, None);
}

#[test]
fn test_pdf_link_resolves_relative_urls() {
    assert_eq!(
        invoice("/invoices/inv-1.pdf").pdf_link("http://localhost:8000/"),
        Some("http://localhost:8000/invoices/inv-1.pdf".to_string())
    );
    assert_eq!(
        invoice("invoices/inv-1.pdf").pdf_link("http://localhost:8000"),
        Some("http://localhost:8000/invoices/inv-1.pdf".to_string())
    );
    assert_eq!(
        invoice("https://cdn.example.com/inv-1.pdf").pdf_link("http://localhost:8000"),
        Some("https://cdn.example.com/inv-1.pdf".to_string())
    );
}

#[test]
fn test_invoice_label() {
    assert_eq!(
        invoice("/x.pdf").label(),
        "Invoice 2024-03-01 to 2024-03-31 (42.50 €)"
    );
}

#[test]
fn test_invoice_without_amount_or_pdf() {
    let invoice: Invoice = serde_json::from_str(
        r#"{"invoice_id":"inv-9","period_start":"2024-03-01","period_end":"2024-03-31",
            "total_amount":null,"pdf_url":null}"#,
    )
    .unwrap();
    assert_eq!(invoice.total_amount, None);
    assert_eq!(invoice.pdf_link("http://localhost:8000"), None);
    assert_eq!(invoice.label(), "Invoice 2024-03-01 to 2024-03-31 (n/a)");

    let row = InvoiceTableRow::from_invoice(&invoice, "http://localhost:8000");
    assert_eq!(row.amount, "n/a");
    assert_eq!(row.pdf, "");

    let html = render::invoice_list_html(&[invoice], "http://localhost:8000");
    assert!(html.contains("<li>Invoice 2024-03-01 to 2024-03-31 (n/a)</li>"));
    assert!(!html.contains("<a "));
}

#[test]
fn test_invoice_missing_fields_and_blank_pdf() {
    assert_eq!(invoice("  ").pdf_link("http://localhost:8000"), None);

    let parsed: Invoice = serde_json::from_str(
        r#"{"invoice_id":3,"period_start":"2024-03-01","period_end":"2024-03-31"}"#,
    )
    .unwrap();
    assert_eq!(parsed.total_amount, None);
    assert_eq!(parsed.pdf_url, None);
}
