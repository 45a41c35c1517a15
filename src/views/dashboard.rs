//! Dashboard screen: headline metrics and processing charts.
//!
//! The metric cards come from `/api/v1/invoices/dashboard/metrics`. The chart
//! series are static sample data until the API exposes weekly history.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::fmt;

use crate::net::types::DashboardMetrics;
use crate::util::format::{percent, trim_number};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
    /// Trend badge in percent, when the card shows one.
    pub trend: Option<u32>,
}

/// Six headline cards. Missing metrics render as zero.
#[must_use]
pub fn metric_cards(metrics: Option<&DashboardMetrics>) -> Vec<MetricCard> {
    let m = metrics.cloned().unwrap_or_default();
    vec![
        MetricCard {
            title: "Incoming Invoices",
            value: m.incoming_invoices.to_string(),
            subtitle: "Last 30 days",
            trend: Some(12),
        },
        MetricCard {
            title: "Touchless Bookings",
            value: percent(m.touchless_bookings),
            subtitle: "Auto-processed rate",
            trend: Some(5),
        },
        MetricCard {
            title: "Pending Clarifications",
            value: m.pending_clarifications.to_string(),
            subtitle: "Requiring attention",
            trend: None,
        },
        MetricCard {
            title: "Days Payable Outstanding",
            value: trim_number(m.days_payable_outstanding),
            subtitle: "Average payment days",
            trend: None,
        },
        MetricCard {
            title: "Realized Cash Discounts",
            value: percent(m.realized_cash_discounts),
            subtitle: "Early payment savings",
            trend: Some(3),
        },
        MetricCard {
            title: "Invoice Cycle Time",
            value: format!("{} days", trim_number(m.invoice_cycle_time)),
            subtitle: "Average processing time",
            trend: None,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeeklyPoint {
    pub day: &'static str,
    pub invoices: u32,
    pub touchless: u32,
}

/// Sample weekday volumes for the processing chart.
#[must_use]
pub fn weekly_series() -> [WeeklyPoint; 5] {
    [
        WeeklyPoint { day: "Mon", invoices: 12, touchless: 10 },
        WeeklyPoint { day: "Tue", invoices: 15, touchless: 13 },
        WeeklyPoint { day: "Wed", invoices: 18, touchless: 16 },
        WeeklyPoint { day: "Thu", invoices: 14, touchless: 12 },
        WeeklyPoint { day: "Fri", invoices: 16, touchless: 14 },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSlice {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

/// Sample status distribution for the pie chart.
#[must_use]
pub fn status_breakdown() -> [StatusSlice; 3] {
    [
        StatusSlice { name: "Approved", value: 45, color: "#10b981" },
        StatusSlice { name: "Pending", value: 25, color: "#f59e0b" },
        StatusSlice { name: "Clarification", value: 5, color: "#ef4444" },
    ]
}

/// Share of `value` in `total` as a whole percent; 0 when `total` is 0.
#[must_use]
pub fn share_percent(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (u64::from(value) * 100 / u64::from(total)).try_into().unwrap_or(100)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardView {
    pub cards: Vec<MetricCard>,
    pub weekly: [WeeklyPoint; 5],
    pub statuses: [StatusSlice; 3],
}

impl DashboardView {
    #[must_use]
    pub fn new(metrics: Option<&DashboardMetrics>) -> Self {
        Self { cards: metric_cards(metrics), weekly: weekly_series(), statuses: status_breakdown() }
    }
}

fn bar(count: u32) -> String {
    "#".repeat(usize::try_from(count).unwrap_or(0))
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard")?;
        for card in &self.cards {
            write!(f, "  {:<26} {:>10}  {}", card.title, card.value, card.subtitle)?;
            if let Some(trend) = card.trend {
                write!(f, "  (+{trend}%)")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Weekly Invoice Processing")?;
        for point in &self.weekly {
            writeln!(f, "  {} total     {:>3} {}", point.day, point.invoices, bar(point.invoices))?;
            writeln!(f, "      touchless {:>3} {}", point.touchless, bar(point.touchless))?;
        }

        writeln!(f)?;
        writeln!(f, "Invoice Status")?;
        let total: u32 = self.statuses.iter().map(|slice| slice.value).sum();
        for slice in &self.statuses {
            writeln!(f, "  {:<14} {:>3} ({}%)", slice.name, slice.value, share_percent(slice.value, total))?;
        }
        Ok(())
    }
}
