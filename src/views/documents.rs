//! Documents screen: searchable table of every invoice.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use std::fmt;
use std::str::FromStr;

use super::handling_label;
use crate::net::types::Invoice;
use crate::util::format::{display_date, money};

/// Business-status filter offered by the documents screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    Pending,
    Rejected,
}

impl StatusFilter {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn matches(self, status: &str) -> bool {
        self == Self::All || self.as_str() == status
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown status filter '{other}' (expected all, approved, pending or rejected)")),
        }
    }
}

/// Search box plus status dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl DocumentFilter {
    /// Matches when the invoice number contains the search term
    /// (case-insensitive) or the supplier id contains it, and the status
    /// filter accepts the invoice's business status. An empty term matches
    /// everything.
    #[must_use]
    pub fn matches(&self, invoice: &Invoice) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = invoice.invoice_number.to_lowercase().contains(&term)
            || invoice.supplier_id.to_string().contains(self.search.as_str());
        matches_search && self.status.matches(&invoice.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRow {
    pub id: i64,
    pub invoice_number: String,
    pub supplier: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub handling: &'static str,
}

impl DocumentRow {
    #[must_use]
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            supplier: format!("Supplier #{}", invoice.supplier_id),
            date: display_date(&invoice.invoice_date),
            amount: money(invoice.total_amount),
            status: invoice.status.clone(),
            handling: handling_label(invoice.is_touchless),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentsView {
    pub rows: Vec<DocumentRow>,
    /// Number of documents before filtering.
    pub total: usize,
}

impl DocumentsView {
    #[must_use]
    pub fn build(invoices: &[Invoice], filter: &DocumentFilter) -> Self {
        Self {
            rows: invoices
                .iter()
                .filter(|invoice| filter.matches(invoice))
                .map(DocumentRow::from_invoice)
                .collect(),
            total: invoices.len(),
        }
    }
}

impl fmt::Display for DocumentsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:<14} {:<13} {:>12} {:<10} {}",
            "INVOICE NUMBER", "SUPPLIER", "DATE", "AMOUNT", "STATUS", "TYPE"
        )?;
        if self.rows.is_empty() {
            return writeln!(f, "No documents found");
        }
        for row in &self.rows {
            writeln!(
                f,
                "{:<16} {:<14} {:<13} {:>12} {:<10} {}",
                row.invoice_number, row.supplier, row.date, row.amount, row.status, row.handling
            )?;
        }
        writeln!(f, "Showing {} of {} documents", self.rows.len(), self.total)
    }
}
