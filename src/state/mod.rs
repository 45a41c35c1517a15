//! Client-side application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the single source of truth for who is logged in; `directory`
//! is the fixed user table the mock login resolves identifiers against.

pub mod directory;
pub mod session;

pub use session::{LoginFailure, LoginOutcome, Session, SessionStore};
