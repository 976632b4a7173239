// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{AuthError, AuthenticationService, AuthorizationService, Role};

use super::helpers::{as_customer, as_professional, create_test_admin};

#[test]
fn test_authenticate_parses_id_and_role() {
    let actor = AuthenticationService::authenticate(" 42 ", "Customer").unwrap();
    assert_eq!(actor.id, 42);
    assert_eq!(actor.role, Role::Customer);
}

#[test]
fn test_authenticate_rejects_empty_id() {
    let result = AuthenticationService::authenticate("   ", "admin");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason.contains("empty")
    ));
}

#[test]
fn test_authenticate_rejects_non_positive_or_non_numeric_id() {
    for raw in ["0", "-3", "abc", "1.5"] {
        let result = AuthenticationService::authenticate(raw, "admin");
        assert!(
            matches!(result, Err(AuthError::AuthenticationFailed { .. })),
            "'{raw}' should be rejected"
        );
    }
}

#[test]
fn test_authenticate_rejects_unknown_role() {
    let result = AuthenticationService::authenticate("7", "bidder");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason.contains("bidder")
    ));
}

#[test]
fn test_role_round_trips_through_its_name() {
    for role in [Role::Admin, Role::Professional, Role::Customer] {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_authorize_admin_rejects_other_roles() {
    assert!(AuthorizationService::authorize_admin(&create_test_admin(), "create_service").is_ok());

    let err = AuthorizationService::authorize_admin(&as_customer(3), "create_service").unwrap_err();
    assert_eq!(
        err,
        AuthError::Unauthorized {
            action: String::from("create_service"),
            required_role: String::from("admin"),
        }
    );
    assert!(AuthorizationService::authorize_admin(&as_professional(3), "create_service").is_err());
}

#[test]
fn test_only_customers_may_create_leads() {
    assert!(AuthorizationService::authorize_create_lead(&as_customer(1)).is_ok());
    assert!(AuthorizationService::authorize_create_lead(&create_test_admin()).is_err());
    assert!(AuthorizationService::authorize_create_lead(&as_professional(1)).is_err());
}
