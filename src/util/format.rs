//! Display formatting for amounts, rates and dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;
use time::macros::format_description;

/// `1234.5` → `"$1234.50"`.
#[must_use]
pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Ratio in `0.0..=1.0` → whole percent, e.g. `0.874` → `"87%"`.
#[must_use]
pub fn percent_from_ratio(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Value already in percent → `"12.5%"`, without a trailing `.0`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{}%", trim_number(value))
}

/// Shortest decimal form, e.g. `45.0` → `"45"`, `2.8` → `"2.8"`.
#[must_use]
pub fn trim_number(value: f64) -> String {
    // f64's Display already omits a zero fraction.
    format!("{value}")
}

/// ISO timestamp or date → `"Mar 01, 2024"`. Unparseable input is returned
/// unchanged.
#[must_use]
pub fn display_date(raw: &str) -> String {
    let parsed = raw
        .get(..10)
        .and_then(|prefix| Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok());
    match parsed {
        Some(date) => date
            .format(format_description!("[month repr:short] [day], [year]"))
            .unwrap_or_else(|_| raw.to_owned()),
        None => raw.to_owned(),
    }
}
