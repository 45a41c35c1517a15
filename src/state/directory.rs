//! Fixed user table backing the mock login.
//!
//! This is not an identity provider: any secret is accepted for a known
//! username and the token is derived from the username alone.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use crate::net::types::{Role, UserRecord};

const TOKEN_PREFIX: &str = "mock-token-";

struct Entry {
    id: i64,
    username: &'static str,
    email: &'static str,
    full_name: &'static str,
    role: Role,
}

const USERS: [Entry; 4] = [
    Entry { id: 1, username: "admin", email: "admin@perfo.ai", full_name: "Admin User", role: Role::Admin },
    Entry {
        id: 2,
        username: "finance_manager",
        email: "finance@perfo.ai",
        full_name: "Finance Manager",
        role: Role::FinanceManager,
    },
    Entry {
        id: 3,
        username: "approver",
        email: "approver@perfo.ai",
        full_name: "Invoice Approver",
        role: Role::Approver,
    },
    Entry { id: 4, username: "viewer", email: "viewer@perfo.ai", full_name: "Read Only User", role: Role::Viewer },
];

/// Resolve `username` to its user record. Matching is exact.
#[must_use]
pub fn lookup(username: &str) -> Option<UserRecord> {
    USERS.iter().find(|entry| entry.username == username).map(|entry| UserRecord {
        id: entry.id,
        username: entry.username.to_owned(),
        email: entry.email.to_owned(),
        full_name: entry.full_name.to_owned(),
        role: entry.role,
        is_active: true,
    })
}

/// Usernames in table order.
#[must_use]
pub fn usernames() -> Vec<&'static str> {
    USERS.iter().map(|entry| entry.username).collect()
}

/// Token issued for `username` by the mock login.
#[must_use]
pub fn mock_token(username: &str) -> String {
    format!("{TOKEN_PREFIX}{username}")
}
