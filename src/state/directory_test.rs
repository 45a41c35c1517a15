use super::*;

#[test]
fn lookup_known_usernames_match_roles() {
    let expected = [
        ("admin", Role::Admin, 1),
        ("finance_manager", Role::FinanceManager, 2),
        ("approver", Role::Approver, 3),
        ("viewer", Role::Viewer, 4),
    ];
    for (username, role, id) in expected {
        let user = lookup(username).unwrap();
        assert_eq!(user.username, username);
        assert_eq!(user.role, role);
        assert_eq!(user.id, id);
        assert!(user.is_active);
    }
}

#[test]
fn lookup_is_exact() {
    assert!(lookup("Admin").is_none());
    assert!(lookup(" admin").is_none());
    assert!(lookup("nobody").is_none());
    assert!(lookup("").is_none());
}

#[test]
fn finance_manager_email_is_shortened() {
    assert_eq!(lookup("finance_manager").unwrap().email, "finance@perfo.ai");
}

#[test]
fn usernames_in_table_order() {
    assert_eq!(usernames(), vec!["admin", "finance_manager", "approver", "viewer"]);
}

#[test]
fn mock_token_prefixes_username() {
    assert_eq!(mock_token("viewer"), "mock-token-viewer");
}
