//! View models for the back-office screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each screen loads its data through the API layer, then hands it to one of
//! these pure builders. The builders own the screen's filtering, labelling and
//! formatting; `Display` renders them as plain text for terminal hosts.

pub mod dashboard;
pub mod documents;
pub mod inbox;

/// `Touchless` when the server booked the invoice without manual review.
#[must_use]
pub fn handling_label(is_touchless: bool) -> &'static str {
    if is_touchless { "Touchless" } else { "Manual" }
}
