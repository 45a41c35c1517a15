//! # invoice-desk
//!
//! Client core for the invoice-processing back office: the session store, the
//! REST access layer for the invoice API, and the view models behind the
//! dashboard, documents and inbox screens.
//!
//! The `invoice-desk` binary hosts these pieces as a terminal application; a
//! browser or desktop host wires them up the same way.

pub mod config;
pub mod net;
pub mod state;
pub mod storage;
pub mod util;
pub mod views;
