// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Customer, DomainError, NewCustomer, NewProfessional};

#[test]
fn test_new_professional_normalizes_fields() {
    let professional: NewProfessional = NewProfessional::new(
        " Dana Reyes ",
        "Dana@Example.com",
        Some("  "),
        Some(" Reyes Plumbing "),
        Some(1),
        None,
        Some(2),
    )
    .unwrap();

    assert_eq!(professional.name, "Dana Reyes");
    assert_eq!(professional.email, "dana@example.com");
    assert_eq!(professional.phone_number, None);
    assert_eq!(professional.business_name.as_deref(), Some("Reyes Plumbing"));
}

#[test]
fn test_new_professional_rejects_bad_email() {
    let result = NewProfessional::new("Dana", "dana", None, None, None, None, None);
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_new_customer_requires_names() {
    let result = NewCustomer::new("", "Smith", "s@example.com", None, None);
    assert!(matches!(result, Err(DomainError::InvalidName { .. })));
}

#[test]
fn test_customer_display_name() {
    let customer: Customer = Customer {
        customer_id: 1,
        first_name: String::from("Ana"),
        last_name: String::from("Lima"),
        email: String::from("ana@example.com"),
        phone_number: None,
        address: None,
        created_at: String::from("2026-01-01T00:00:00Z"),
    };
    assert_eq!(customer.display_name(), "Ana Lima");
}
