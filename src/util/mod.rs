//! Utility helpers shared across views and the terminal host.

pub mod format;
