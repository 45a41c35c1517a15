use super::*;

fn invoice(id: i64, number: &str, supplier_id: i64, status: &str) -> Invoice {
    Invoice {
        id,
        invoice_number: number.to_owned(),
        supplier_id,
        invoice_date: "2024-01-05T09:00:00".to_owned(),
        due_date: None,
        total_amount: 99.5,
        tax_amount: 9.5,
        net_amount: 90.0,
        currency: "USD".to_owned(),
        po_number: None,
        status: status.to_owned(),
        processing_status: "completed".to_owned(),
        confidence_score: 0.9,
        is_touchless: id % 2 == 0,
        po_matched: false,
        approval_status: None,
        created_at: None,
        validation_errors: None,
    }
}

fn sample() -> Vec<Invoice> {
    vec![
        invoice(1, "INV-2024-001", 12, "approved"),
        invoice(2, "inv-2024-002", 7, "pending"),
        invoice(3, "ACME-77", 120, "rejected"),
    ]
}

#[test]
fn status_filter_parses_case_insensitively() {
    assert_eq!("Approved".parse::<StatusFilter>().unwrap(), StatusFilter::Approved);
    assert_eq!(" all ".parse::<StatusFilter>().unwrap(), StatusFilter::All);
    assert!("archived".parse::<StatusFilter>().is_err());
}

#[test]
fn empty_filter_matches_everything() {
    let view = DocumentsView::build(&sample(), &DocumentFilter::default());
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.total, 3);
}

#[test]
fn search_on_invoice_number_ignores_case() {
    let filter = DocumentFilter { search: "INV-2024".to_owned(), status: StatusFilter::All };
    let ids: Vec<i64> = DocumentsView::build(&sample(), &filter).rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn search_on_supplier_id_is_substring() {
    let filter = DocumentFilter { search: "12".to_owned(), status: StatusFilter::All };
    let ids: Vec<i64> = DocumentsView::build(&sample(), &filter).rows.iter().map(|r| r.id).collect();
    // 12 matches supplier 12 and supplier 120.
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn status_filter_combines_with_search() {
    let filter = DocumentFilter { search: "inv".to_owned(), status: StatusFilter::Pending };
    let view = DocumentsView::build(&sample(), &filter);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].invoice_number, "inv-2024-002");
}

#[test]
fn row_formats_supplier_date_and_amount() {
    let row = DocumentRow::from_invoice(&invoice(2, "X", 7, "pending"));
    assert_eq!(row.supplier, "Supplier #7");
    assert_eq!(row.date, "Jan 05, 2024");
    assert_eq!(row.amount, "$99.50");
    assert_eq!(row.handling, "Touchless");
}

#[test]
fn render_includes_footer_count() {
    let filter = DocumentFilter { search: String::new(), status: StatusFilter::Rejected };
    let rendered = DocumentsView::build(&sample(), &filter).to_string();
    assert!(rendered.contains("ACME-77"));
    assert!(rendered.ends_with("Showing 1 of 3 documents\n"));
}

#[test]
fn render_empty_result() {
    let filter = DocumentFilter { search: "zzz".to_owned(), status: StatusFilter::All };
    let rendered = DocumentsView::build(&sample(), &filter).to_string();
    assert!(rendered.contains("No documents found"));
    assert!(!rendered.contains("Showing"));
}
