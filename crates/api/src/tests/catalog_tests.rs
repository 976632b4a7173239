// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, CreateCustomerRequest, CreateProfessionalRequest, CreateServiceCityPairRequest,
    LinkCityToStateRequest, NamedRef, SetProfessionalVerificationRequest, create_city,
    create_customer, create_professional, create_service, create_service_city_pair,
    create_state, link_city_to_state, list_cities, list_service_city_pairs, list_services,
    list_states, set_professional_verification,
};

use super::helpers::{
    as_customer, as_professional, create_test_admin, create_unpaired_market, named,
    register_customer, register_professional, setup_test_persistence,
};

#[test]
fn test_admin_creates_and_lists_catalog_entries() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();

    create_service(&mut persistence, &named("  Roofing "), &admin).unwrap();
    create_service(&mut persistence, &named("Electrical"), &admin).unwrap();
    create_city(&mut persistence, &named("Shelbyville"), &admin).unwrap();
    create_state(&mut persistence, &named("Oregon"), &admin).unwrap();

    let services = list_services(&mut persistence).unwrap().services;
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Electrical", "Roofing"]);
    assert_eq!(list_cities(&mut persistence).unwrap().cities.len(), 1);
    assert_eq!(list_states(&mut persistence).unwrap().states[0].name, "Oregon");
}

#[test]
fn test_non_admins_cannot_change_the_catalog() {
    let mut persistence = setup_test_persistence();

    let by_customer = create_service(&mut persistence, &named("Roofing"), &as_customer(1));
    let by_professional = create_city(&mut persistence, &named("Ogdenville"), &as_professional(1));

    assert!(matches!(by_customer, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(by_professional, Err(ApiError::Unauthorized { .. })));
    assert!(list_services(&mut persistence).unwrap().services.is_empty());
}

#[test]
fn test_catalog_name_is_validated() {
    let mut persistence = setup_test_persistence();
    let result = create_state(&mut persistence, &named(" X "), &create_test_admin());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "name"
    ));
}

#[test]
fn test_duplicate_service_is_a_rule_violation() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    create_service(&mut persistence, &named("Roofing"), &admin).unwrap();

    let result = create_service(&mut persistence, &named("Roofing"), &admin);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique"
    ));
}

#[test]
fn test_link_requires_existing_state_and_city() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    let city_id = create_city(&mut persistence, &named("Capital City"), &admin)
        .unwrap()
        .id;

    let result = link_city_to_state(
        &mut persistence,
        &LinkCityToStateRequest {
            state_id: 404,
            city_id,
        },
        &admin,
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "State"
    ));
}

#[test]
fn test_service_city_pair_reports_default_state() {
    let mut persistence = setup_test_persistence();
    let (service_id, city_id, state_id, service_city_pair_id) =
        create_unpaired_market(&mut persistence);

    let listed = list_service_city_pairs(&mut persistence)
        .unwrap()
        .service_city_pairs;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].service_city_pair_id, service_city_pair_id);
    assert_eq!(
        listed[0].service,
        NamedRef {
            id: service_id,
            name: String::from("Plumbing"),
        }
    );
    assert_eq!(listed[0].city.id, city_id);
    assert_eq!(listed[0].state.as_ref().map(|s| s.id), Some(state_id));
}

#[test]
fn test_service_city_pair_requires_existing_service() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    let city_id = create_city(&mut persistence, &named("North Haverbrook"), &admin)
        .unwrap()
        .id;

    let result = create_service_city_pair(
        &mut persistence,
        &CreateServiceCityPairRequest {
            service_id: 77,
            city_id,
        },
        &admin,
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Service"
    ));
}

#[test]
fn test_duplicate_service_city_pair_is_rejected() {
    let mut persistence = setup_test_persistence();
    let (service_id, city_id, _, _) = create_unpaired_market(&mut persistence);

    let result = create_service_city_pair(
        &mut persistence,
        &CreateServiceCityPairRequest {
            service_id,
            city_id,
        },
        &create_test_admin(),
    );
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_professional_registration_checks_referenced_catalog() {
    let mut persistence = setup_test_persistence();
    let request = CreateProfessionalRequest {
        name: String::from("Eve Wiring"),
        email: String::from("eve@example.com"),
        phone_number: None,
        business_name: Some(String::from("Eve's Electric")),
        service_id: Some(12),
        state_id: None,
        city_id: None,
    };

    let result = create_professional(&mut persistence, &request, &create_test_admin());
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Service"
    ));
}

#[test]
fn test_professional_starts_unverified_and_can_be_verified() {
    let mut persistence = setup_test_persistence();
    let professional_id =
        register_professional(&mut persistence, "Frank Grout", "FRANK@Example.com");

    let verified = set_professional_verification(
        &mut persistence,
        professional_id,
        &SetProfessionalVerificationRequest { verified: true },
        &create_test_admin(),
    )
    .unwrap();

    assert!(verified.verified);
    assert_eq!(verified.email, "frank@example.com");
}

#[test]
fn test_verifying_unknown_professional_is_not_found() {
    let mut persistence = setup_test_persistence();
    let result = set_professional_verification(
        &mut persistence,
        99,
        &SetProfessionalVerificationRequest { verified: true },
        &create_test_admin(),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_customer_sign_up_validates_names() {
    let mut persistence = setup_test_persistence();
    let request = CreateCustomerRequest {
        first_name: String::from("Gil"),
        last_name: String::from("   "),
        email: String::from("gil@example.com"),
        phone_number: None,
        address: None,
    };

    let result = create_customer(&mut persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "last_name"
    ));
}

#[test]
fn test_customer_email_must_be_unique() {
    let mut persistence = setup_test_persistence();
    register_customer(&mut persistence, "hank@example.com");

    let request = CreateCustomerRequest {
        first_name: String::from("Hank"),
        last_name: String::from("Scorpio"),
        email: String::from("Hank@Example.com"),
        phone_number: None,
        address: None,
    };
    let result = create_customer(&mut persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique"
    ));
}
