use super::*;

fn invoice(id: i64, processing_status: &str) -> Invoice {
    Invoice {
        id,
        invoice_number: format!("INV-{id:03}"),
        supplier_id: 40 + id,
        invoice_date: "2024-03-01T00:00:00".to_owned(),
        due_date: None,
        total_amount: 1234.5,
        tax_amount: 234.5,
        net_amount: 1000.0,
        currency: "USD".to_owned(),
        po_number: None,
        status: "pending".to_owned(),
        processing_status: processing_status.to_owned(),
        confidence_score: 0.874,
        is_touchless: false,
        po_matched: false,
        approval_status: None,
        created_at: None,
        validation_errors: None,
    }
}

#[test]
fn status_labels_cover_known_statuses() {
    assert_eq!(processing_status_label("completed"), "Completed");
    assert_eq!(processing_status_label("pending_approval"), "Pending Approval");
    assert_eq!(processing_status_label("pending_clarification"), "Needs Clarification");
    assert_eq!(processing_status_label("processing"), "Processing");
    assert_eq!(processing_status_label("archived"), "archived");
}

#[test]
fn from_invoices_partitions_pending_and_processed() {
    let invoices = vec![
        invoice(1, "completed"),
        invoice(2, "pending_approval"),
        invoice(3, "pending_clarification"),
        invoice(4, "processing"),
        invoice(5, "completed"),
    ];
    let view = InboxView::from_invoices(&invoices);

    assert_eq!(view.all.len(), 5);
    assert_eq!(view.pending.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(view.processed_count, 2);
}

#[test]
fn card_formats_amount_confidence_and_handling() {
    let mut inv = invoice(7, "completed");
    inv.is_touchless = true;
    inv.po_number = Some("PO-77".to_owned());
    let card = InvoiceCard::from_invoice(&inv);

    assert_eq!(card.supplier, "Supplier ID: 47");
    assert_eq!(card.amount, "$1234.50");
    assert_eq!(card.confidence, "87%");
    assert_eq!(card.handling, "Touchless");
    assert_eq!(card.to_string(), "INV-007 [Completed] Supplier ID: 47 | Amount $1234.50 | Confidence 87% | Touchless | PO: PO-77");
}

#[test]
fn card_hides_empty_po() {
    let mut inv = invoice(8, "processing");
    inv.po_number = Some(String::new());
    assert_eq!(InvoiceCard::from_invoice(&inv).po_number, None);
}

#[test]
fn empty_inbox_renders_hint() {
    let rendered = InboxView::from_invoices(&[]).to_string();
    assert!(rendered.contains("Total Invoices: 0  Pending Action: 0  Processed: 0"));
    assert!(rendered.contains("No invoices yet"));
    assert!(!rendered.contains("Pending Action ("));
}

#[test]
fn pending_section_rendered_when_present() {
    let rendered = InboxView::from_invoices(&[invoice(2, "pending_approval")]).to_string();
    assert!(rendered.contains("Pending Action (1)"));
    assert!(rendered.contains("All Invoices (1)"));
}

#[test]
fn detail_formats_amounts_and_processing_type() {
    let detail = InvoiceDetail::from_invoice(&invoice(3, "pending_clarification"));

    assert_eq!(detail.status, "Needs Clarification");
    assert_eq!(detail.total_amount, "$1234.50");
    assert_eq!(detail.tax_amount, "$234.50");
    assert_eq!(detail.confidence, "87%");
    assert_eq!(detail.processing_type, "Manual Review");
}

#[test]
fn detail_lists_validation_errors() {
    let mut inv = invoice(4, "pending_clarification");
    inv.is_touchless = true;
    inv.validation_errors = Some(vec!["PO number missing".to_owned(), "Tax mismatch".to_owned()]);
    let rendered = InvoiceDetail::from_invoice(&inv).to_string();

    assert!(rendered.contains("Processing Type:  Touchless"));
    assert!(rendered.ends_with("Validation Errors:\n  - PO number missing\n  - Tax mismatch\n"));
}

#[test]
fn detail_hides_absent_or_empty_validation_errors() {
    let absent = invoice(5, "completed");
    let mut empty = invoice(6, "completed");
    empty.validation_errors = Some(Vec::new());

    for inv in [absent, empty] {
        let detail = InvoiceDetail::from_invoice(&inv);
        assert!(detail.validation_errors.is_empty());
        assert!(!detail.to_string().contains("Validation Errors"));
    }
}
