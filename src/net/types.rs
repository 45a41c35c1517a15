//! Wire DTOs for the invoice API.
//!
//! DESIGN
//! ======
//! Response types mirror the server's JSON payloads. Fields the server may omit
//! carry serde defaults so older or partial payloads still decode; request
//! types skip unset optional fields so updates stay partial.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Role granted to a back-office user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    FinanceManager,
    Approver,
    Viewer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::FinanceManager => "finance_manager",
            Self::Approver => "approver",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A back-office user as returned by `/api/v1/auth/me` and persisted in the
/// `user` storage entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
}

/// Body of `POST /api/v1/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/v1/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub password: String,
}

/// Token issued by the server login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// =============================================================================
// INVOICES
// =============================================================================

/// Read-only snapshot of a server-side invoice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub supplier_id: i64,
    /// ISO-8601 timestamp as sent by the server.
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub total_amount: f64,
    pub tax_amount: f64,
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub po_number: Option<String>,
    /// Business status: `pending`, `approved` or `rejected`.
    pub status: String,
    /// Pipeline status: `processing`, `completed`, `pending_approval`,
    /// `pending_clarification`.
    pub processing_status: String,
    /// Extraction confidence in `0.0..=1.0`.
    pub confidence_score: f64,
    pub is_touchless: bool,
    #[serde(default)]
    pub po_matched: bool,
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<Vec<String>>,
}

fn default_currency() -> String {
    "USD".to_owned()
}

/// Partial update body for `PUT /api/v1/invoices/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query parameters for `GET /api/v1/invoices/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Aggregate counts from `GET /api/v1/invoices/stats/overview`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub total_invoices: u64,
    pub pending_invoices: u64,
    pub approved_invoices: u64,
    pub rejected_invoices: u64,
    /// Percentage in `0.0..=100.0`.
    pub touchless_rate: f64,
    /// Days.
    pub avg_processing_time: f64,
}

/// Home-page metrics from `GET /api/v1/invoices/dashboard/metrics`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardMetrics {
    pub incoming_invoices: u64,
    /// Percentage of touchless bookings over the last 30 days.
    pub touchless_bookings: f64,
    pub days_payable_outstanding: f64,
    /// Percentage.
    pub realized_cash_discounts: f64,
    /// Days.
    pub invoice_cycle_time: f64,
    pub pending_clarifications: u64,
}

// =============================================================================
// SUPPLIERS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub risk_score: i32,
}

/// Body of `POST /api/v1/suppliers/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Partial update body for `PUT /api/v1/suppliers/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/suppliers/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SupplierQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
