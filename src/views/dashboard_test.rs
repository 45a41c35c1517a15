use super::*;

fn metrics() -> DashboardMetrics {
    DashboardMetrics {
        incoming_invoices: 42,
        touchless_bookings: 87.5,
        days_payable_outstanding: 45.0,
        realized_cash_discounts: 2.3,
        invoice_cycle_time: 2.8,
        pending_clarifications: 3,
    }
}

#[test]
fn metric_cards_format_values() {
    let m = metrics();
    let cards = metric_cards(Some(&m));
    let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["42", "87.5%", "3", "45", "2.3%", "2.8 days"]);
}

#[test]
fn metric_cards_without_metrics_render_zero() {
    let cards = metric_cards(None);
    let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["0", "0%", "0", "0", "0%", "0 days"]);
}

#[test]
fn trend_badges_on_three_cards() {
    let trends: Vec<Option<u32>> = metric_cards(None).iter().map(|c| c.trend).collect();
    assert_eq!(trends, vec![Some(12), Some(5), None, None, Some(3), None]);
}

#[test]
fn weekly_series_touchless_never_exceeds_total() {
    for point in weekly_series() {
        assert!(point.touchless <= point.invoices, "{}", point.day);
    }
}

#[test]
fn status_breakdown_totals() {
    let total: u32 = status_breakdown().iter().map(|s| s.value).sum();
    assert_eq!(total, 75);
}

#[test]
fn share_percent_handles_zero_total() {
    assert_eq!(share_percent(5, 0), 0);
    assert_eq!(share_percent(45, 75), 60);
    assert_eq!(share_percent(5, 75), 6);
}

#[test]
fn render_lists_cards_and_charts() {
    let m = metrics();
    let rendered = DashboardView::new(Some(&m)).to_string();
    assert!(rendered.contains("Incoming Invoices"));
    assert!(rendered.contains("(+12%)"));
    assert!(rendered.contains("Weekly Invoice Processing"));
    assert!(rendered.contains("Approved"));
    assert!(rendered.contains("(60%)"));
}
