use super::*;

// =============================================================
// Role serde
// =============================================================

#[test]
fn role_serializes_to_snake_case() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&Role::FinanceManager).unwrap(), "\"finance_manager\"");
    assert_eq!(serde_json::to_string(&Role::Approver).unwrap(), "\"approver\"");
    assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), "\"viewer\"");
}

#[test]
fn role_display_matches_wire_name() {
    for role in [Role::Admin, Role::FinanceManager, Role::Approver, Role::Viewer] {
        let wire = serde_json::to_string(&role).unwrap();
        assert_eq!(wire.trim_matches('"'), role.to_string());
    }
}

#[test]
fn role_rejects_unknown_name() {
    assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
}

// =============================================================
// UserRecord
// =============================================================

#[test]
fn user_record_decodes_server_payload() {
    let user: UserRecord = serde_json::from_value(serde_json::json!({
        "id": 3,
        "username": "approver",
        "email": "approver@perfo.ai",
        "full_name": "Invoice Approver",
        "role": "approver",
        "is_active": true
    }))
    .unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.role, Role::Approver);
    assert!(user.is_active);
}

// =============================================================
// Invoice
// =============================================================

#[test]
fn invoice_minimal_payload_fills_defaults() {
    let invoice: Invoice = serde_json::from_value(serde_json::json!({
        "id": 7,
        "invoice_number": "INV-007",
        "supplier_id": 12,
        "invoice_date": "2024-03-01T00:00:00",
        "total_amount": 120.5,
        "tax_amount": 20.5,
        "status": "pending",
        "processing_status": "pending_approval",
        "confidence_score": 0.82,
        "is_touchless": false
    }))
    .unwrap();
    assert_eq!(invoice.currency, "USD");
    assert_eq!(invoice.po_number, None);
    assert!(!invoice.po_matched);
    assert_eq!(invoice.validation_errors, None);
    assert!((invoice.net_amount - 0.0).abs() < f64::EPSILON);
}

#[test]
fn invoice_full_payload_keeps_optional_fields() {
    let invoice: Invoice = serde_json::from_value(serde_json::json!({
        "id": 8,
        "invoice_number": "INV-008",
        "supplier_id": 1,
        "invoice_date": "2024-03-02T10:00:00",
        "due_date": "2024-04-01T10:00:00",
        "total_amount": 100.0,
        "tax_amount": 19.0,
        "net_amount": 81.0,
        "currency": "EUR",
        "po_number": "PO-1",
        "status": "approved",
        "processing_status": "completed",
        "confidence_score": 0.99,
        "is_touchless": true,
        "po_matched": true,
        "approval_status": "approved",
        "created_at": "2024-03-02T10:01:00",
        "validation_errors": ["missing tax id"]
    }))
    .unwrap();
    assert_eq!(invoice.currency, "EUR");
    assert_eq!(invoice.po_number.as_deref(), Some("PO-1"));
    assert_eq!(invoice.validation_errors, Some(vec!["missing tax id".to_owned()]));
    assert!(invoice.po_matched);
}

#[test]
fn invoice_update_skips_unset_fields() {
    let update = InvoiceUpdate { notes: Some("checked".to_owned()), ..InvoiceUpdate::default() };
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "notes": "checked" }));
}

#[test]
fn invoice_query_serializes_only_present_params() {
    let query = InvoiceQuery { limit: Some(10), status: Some("pending".to_owned()), ..InvoiceQuery::default() };
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        serde_json::json!({ "limit": 10, "status": "pending" })
    );
}

#[test]
fn dashboard_metrics_missing_fields_default_to_zero() {
    let metrics: DashboardMetrics = serde_json::from_value(serde_json::json!({ "incoming_invoices": 4 })).unwrap();
    assert_eq!(metrics.incoming_invoices, 4);
    assert_eq!(metrics.pending_clarifications, 0);
    assert!(metrics.touchless_bookings.abs() < f64::EPSILON);
}

// =============================================================
// Suppliers
// =============================================================

#[test]
fn supplier_update_is_partial() {
    let update = SupplierUpdate { is_active: Some(false), ..SupplierUpdate::default() };
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "is_active": false }));
}

#[test]
fn supplier_decodes_without_risk_fields() {
    let supplier: Supplier = serde_json::from_value(serde_json::json!({
        "id": 2,
        "name": "Acme GmbH",
        "tax_id": "DE123",
        "is_active": true
    }))
    .unwrap();
    assert_eq!(supplier.risk_score, 0);
    assert!(!supplier.is_verified);
    assert_eq!(supplier.email, None);
}
