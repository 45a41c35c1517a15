//! Inbox screen: recently uploaded invoices and those waiting on a person.

#[cfg(test)]
#[path = "inbox_test.rs"]
mod inbox_test;

use std::fmt;

use super::handling_label;
use crate::net::types::Invoice;
use crate::util::format::{money, percent_from_ratio};

/// Human label for an invoice's pipeline status. Unknown statuses are shown
/// as-is.
#[must_use]
pub fn processing_status_label(status: &str) -> &str {
    match status {
        "completed" => "Completed",
        "pending_approval" => "Pending Approval",
        "pending_clarification" => "Needs Clarification",
        "processing" => "Processing",
        other => other,
    }
}

/// Whether the invoice waits on approval or clarification.
#[must_use]
pub fn needs_action(invoice: &Invoice) -> bool {
    matches!(invoice.processing_status.as_str(), "pending_clarification" | "pending_approval")
}

#[must_use]
pub fn is_processed(invoice: &Invoice) -> bool {
    invoice.processing_status == "completed"
}

/// One invoice card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceCard {
    pub id: i64,
    pub invoice_number: String,
    pub supplier: String,
    pub status: String,
    pub amount: String,
    pub confidence: String,
    pub handling: &'static str,
    pub po_number: Option<String>,
}

impl InvoiceCard {
    #[must_use]
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            supplier: format!("Supplier ID: {}", invoice.supplier_id),
            status: processing_status_label(&invoice.processing_status).to_owned(),
            amount: money(invoice.total_amount),
            confidence: percent_from_ratio(invoice.confidence_score),
            handling: handling_label(invoice.is_touchless),
            po_number: invoice.po_number.clone().filter(|po| !po.is_empty()),
        }
    }
}

impl fmt::Display for InvoiceCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} | Amount {} | Confidence {} | {}",
            self.invoice_number, self.status, self.supplier, self.amount, self.confidence, self.handling
        )?;
        if let Some(po) = &self.po_number {
            write!(f, " | PO: {po}")?;
        }
        Ok(())
    }
}

/// Whole inbox: counters plus the pending and full card lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboxView {
    pub all: Vec<InvoiceCard>,
    pub pending: Vec<InvoiceCard>,
    pub processed_count: usize,
}

impl InboxView {
    #[must_use]
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        Self {
            all: invoices.iter().map(InvoiceCard::from_invoice).collect(),
            pending: invoices
                .iter()
                .filter(|invoice| needs_action(invoice))
                .map(InvoiceCard::from_invoice)
                .collect(),
            processed_count: invoices.iter().filter(|invoice| is_processed(invoice)).count(),
        }
    }
}

impl fmt::Display for InboxView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inbox")?;
        writeln!(
            f,
            "Total Invoices: {}  Pending Action: {}  Processed: {}",
            self.all.len(),
            self.pending.len(),
            self.processed_count
        )?;

        if !self.pending.is_empty() {
            writeln!(f)?;
            writeln!(f, "Pending Action ({})", self.pending.len())?;
            for card in &self.pending {
                writeln!(f, "  {card}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "All Invoices ({})", self.all.len())?;
        if self.all.is_empty() {
            writeln!(f, "  No invoices yet. Upload your first invoice to get started.")?;
        }
        for card in &self.all {
            writeln!(f, "  {card}")?;
        }
        Ok(())
    }
}

// =============================================================================
// DETAIL
// =============================================================================

/// Detail panel for one invoice opened from the inbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceDetail {
    pub invoice_number: String,
    pub status: String,
    pub total_amount: String,
    pub tax_amount: String,
    pub confidence: String,
    pub processing_type: &'static str,
    /// Empty when the server reported none.
    pub validation_errors: Vec<String>,
}

impl InvoiceDetail {
    #[must_use]
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            status: processing_status_label(&invoice.processing_status).to_owned(),
            total_amount: money(invoice.total_amount),
            tax_amount: money(invoice.tax_amount),
            confidence: percent_from_ratio(invoice.confidence_score),
            processing_type: if invoice.is_touchless { "Touchless" } else { "Manual Review" },
            validation_errors: invoice.validation_errors.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for InvoiceDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invoice Details")?;
        writeln!(f, "  Invoice Number:   {}", self.invoice_number)?;
        writeln!(f, "  Status:           {}", self.status)?;
        writeln!(f, "  Total Amount:     {}", self.total_amount)?;
        writeln!(f, "  Tax Amount:       {}", self.tax_amount)?;
        writeln!(f, "  Confidence Score: {}", self.confidence)?;
        writeln!(f, "  Processing Type:  {}", self.processing_type)?;
        if !self.validation_errors.is_empty() {
            writeln!(f, "Validation Errors:")?;
            for error in &self.validation_errors {
                writeln!(f, "  - {error}")?;
            }
        }
        Ok(())
    }
}
