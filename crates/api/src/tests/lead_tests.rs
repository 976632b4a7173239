// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use protown_persistence::Persistence;

use crate::{
    ApiError, CreateCatalogEntryRequest, CreateLeadRequest, LinkCityToStateRequest,
    UpdateLeadStatusRequest, create_city, create_lead, create_service, create_state, delete_lead,
    get_lead, link_city_to_state, list_leads, update_lead_status,
};

use super::helpers::{
    Market, as_customer, as_professional, create_test_admin, create_test_market,
    create_unpaired_market, lead_request, register_customer, register_pair,
    register_professional, setup_test_persistence,
};

fn submit(persistence: &mut Persistence, market: &Market) -> i64 {
    create_lead(
        persistence,
        &lead_request(market),
        &as_customer(market.customer_id),
    )
    .unwrap()
    .lead_id
}

#[test]
fn test_leads_alternate_between_the_two_pairs() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let customer = as_customer(market.customer_id);

    let assigned: Vec<i64> = (0..4)
        .map(|_| {
            create_lead(&mut persistence, &lead_request(&market), &customer)
                .unwrap()
                .pair
                .unwrap()
                .id
        })
        .collect();

    assert_eq!(
        assigned,
        vec![market.pair_a, market.pair_b, market.pair_a, market.pair_b]
    );
}

#[test]
fn test_lead_response_is_enriched() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);

    let mut request = lead_request(&market);
    request.status = Some(String::from("URGENT"));
    let lead = create_lead(&mut persistence, &request, &as_customer(market.customer_id)).unwrap();

    assert_eq!(lead.customer.name, "Dana Reyes");
    assert_eq!(lead.service.name, "Plumbing");
    assert_eq!(lead.city.name, "Springfield");
    assert_eq!(lead.state.id, market.state_id);
    assert_eq!(lead.status, "urgent");
    assert_eq!(lead.description, "Basement drain backs up after rain");

    let pair = lead.pair.unwrap();
    assert_eq!(pair.quantity, 2);
    assert_eq!(pair.professionals[0].name, "Alice Pipes");
    assert_eq!(pair.professionals[1].id, market.bob_id);
}

#[test]
fn test_only_customers_submit_leads() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);

    let by_admin = create_lead(&mut persistence, &lead_request(&market), &create_test_admin());
    let by_professional = create_lead(
        &mut persistence,
        &lead_request(&market),
        &as_professional(market.alice_id),
    );

    assert!(matches!(by_admin, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(by_professional, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_unknown_customer_is_checked_first() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);

    let mut request = lead_request(&market);
    request.service_id = 999;
    request.description = String::new();

    let result = create_lead(&mut persistence, &request, &as_customer(500));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Customer"
    ));
}

#[test]
fn test_unknown_service_is_reported_before_bad_description() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);

    let mut request = lead_request(&market);
    request.service_id = 999;
    request.description = String::from("   ");

    let result = create_lead(&mut persistence, &request, &as_customer(market.customer_id));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Service"
    ));
}

#[test]
fn test_unknown_city_is_reported_before_state() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);

    let mut request = lead_request(&market);
    request.city_id = 999;
    request.state_id = Some(888);

    let result = create_lead(&mut persistence, &request, &as_customer(market.customer_id));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "City"
    ));
}

#[test]
fn test_explicit_state_must_contain_the_city() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let other_state = create_state(
        &mut persistence,
        &CreateCatalogEntryRequest {
            name: String::from("Nevada"),
        },
        &create_test_admin(),
    )
    .unwrap()
    .id;

    let mut request = lead_request(&market);
    request.state_id = Some(other_state);

    let result = create_lead(&mut persistence, &request, &as_customer(market.customer_id));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "state_id"
    ));
}

#[test]
fn test_explicit_state_is_used_when_linked() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let admin = create_test_admin();
    let second_state = create_state(
        &mut persistence,
        &CreateCatalogEntryRequest {
            name: String::from("Missouri"),
        },
        &admin,
    )
    .unwrap()
    .id;
    link_city_to_state(
        &mut persistence,
        &LinkCityToStateRequest {
            state_id: second_state,
            city_id: market.city_id,
        },
        &admin,
    )
    .unwrap();

    let mut request = lead_request(&market);
    request.state_id = Some(second_state);
    let lead = create_lead(&mut persistence, &request, &as_customer(market.customer_id)).unwrap();

    assert_eq!(lead.state.id, second_state);
}

#[test]
fn test_city_without_state_requires_state_id() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let stateless = create_city(
        &mut persistence,
        &CreateCatalogEntryRequest {
            name: String::from("Brockway"),
        },
        &create_test_admin(),
    )
    .unwrap()
    .id;

    let mut request = lead_request(&market);
    request.city_id = stateless;

    let result = create_lead(&mut persistence, &request, &as_customer(market.customer_id));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, message })
            if field == "state_id" && message.contains("not associated")
    ));
}

#[test]
fn test_description_and_status_are_validated() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let customer = as_customer(market.customer_id);

    let mut blank = lead_request(&market);
    blank.description = String::from("  ");
    let mut too_long = lead_request(&market);
    too_long.description = "x".repeat(901);
    let mut bad_status = lead_request(&market);
    bad_status.status = Some(String::from("whenever"));

    for (request, expected_field) in [
        (blank, "description"),
        (too_long, "description"),
        (bad_status, "status"),
    ] {
        let result = create_lead(&mut persistence, &request, &customer);
        assert!(
            matches!(&result, Err(ApiError::InvalidInput { field, .. }) if field == expected_field),
            "unexpected result for {expected_field}: {result:?}"
        );
    }
    assert!(list_leads(&mut persistence, &create_test_admin())
        .unwrap()
        .leads
        .is_empty());
}

#[test]
fn test_unpaired_service_is_not_configured() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let roofing = create_service(
        &mut persistence,
        &CreateCatalogEntryRequest {
            name: String::from("Roofing"),
        },
        &create_test_admin(),
    )
    .unwrap()
    .id;

    let request = CreateLeadRequest {
        service_id: roofing,
        ..lead_request(&market)
    };
    let result = create_lead(&mut persistence, &request, &as_customer(market.customer_id));
    assert!(matches!(
        result,
        Err(ApiError::AssignmentNotConfigured { message }) if message.contains("No pairing")
    ));
}

#[test]
fn test_single_pair_is_not_configured_and_writes_nothing() {
    let mut persistence = setup_test_persistence();
    let (service_id, city_id, _, service_city_pair_id) = create_unpaired_market(&mut persistence);
    register_pair(&mut persistence, service_city_pair_id, None, None);
    let customer_id = register_customer(&mut persistence, "lone@example.com");

    let request = CreateLeadRequest {
        service_id,
        city_id,
        state_id: None,
        description: String::from("Leaky faucet"),
        status: None,
    };
    let result = create_lead(&mut persistence, &request, &as_customer(customer_id));

    assert!(matches!(
        result,
        Err(ApiError::AssignmentNotConfigured { .. })
    ));
    assert!(list_leads(&mut persistence, &create_test_admin())
        .unwrap()
        .leads
        .is_empty());
}

#[test]
fn test_lead_visibility_follows_role() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let first = submit(&mut persistence, &market);
    let second = submit(&mut persistence, &market);
    let outsider = register_professional(&mut persistence, "Lou Outside", "lou@example.com");
    let other_customer = register_customer(&mut persistence, "other@example.com");

    let admin_view = list_leads(&mut persistence, &create_test_admin()).unwrap();
    assert_eq!(admin_view.leads.len(), 2);

    let owner_view = list_leads(&mut persistence, &as_customer(market.customer_id)).unwrap();
    assert_eq!(owner_view.leads.len(), 2);
    assert!(
        list_leads(&mut persistence, &as_customer(other_customer))
            .unwrap()
            .leads
            .is_empty()
    );

    let bob_view = list_leads(&mut persistence, &as_professional(market.bob_id)).unwrap();
    let bob_ids: Vec<i64> = bob_view.leads.iter().map(|l| l.lead_id).collect();
    assert_eq!(bob_ids, vec![first]);

    let carol_view = list_leads(&mut persistence, &as_professional(market.carol_id)).unwrap();
    let carol_ids: Vec<i64> = carol_view.leads.iter().map(|l| l.lead_id).collect();
    assert_eq!(carol_ids, vec![second]);

    assert!(
        list_leads(&mut persistence, &as_professional(outsider))
            .unwrap()
            .leads
            .is_empty()
    );
}

#[test]
fn test_listing_for_unknown_professional_is_not_found() {
    let mut persistence = setup_test_persistence();
    let result = list_leads(&mut persistence, &as_professional(404));
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Professional"
    ));
}

#[test]
fn test_hidden_lead_reads_as_not_found() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let lead_id = submit(&mut persistence, &market);
    let other_customer = register_customer(&mut persistence, "nosy@example.com");

    assert_eq!(
        get_lead(&mut persistence, lead_id, &as_professional(market.alice_id))
            .unwrap()
            .lead_id,
        lead_id
    );
    assert!(matches!(
        get_lead(&mut persistence, lead_id, &as_customer(other_customer)),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_lead(&mut persistence, lead_id, &as_professional(market.carol_id)),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_lead(&mut persistence, lead_id + 100, &create_test_admin()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_status_update_keeps_the_pair() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let lead_id = submit(&mut persistence, &market);

    let updated = update_lead_status(
        &mut persistence,
        lead_id,
        &UpdateLeadStatusRequest {
            status: String::from("urgent"),
        },
        &create_test_admin(),
    )
    .unwrap();

    assert_eq!(updated.status, "urgent");
    assert_eq!(updated.pair.map(|p| p.id), Some(market.pair_a));
}

#[test]
fn test_status_update_is_admin_only() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let lead_id = submit(&mut persistence, &market);

    let result = update_lead_status(
        &mut persistence,
        lead_id,
        &UpdateLeadStatusRequest {
            status: String::from("urgent"),
        },
        &as_customer(market.customer_id),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_deleting_a_lead_shifts_the_rotation() {
    let mut persistence = setup_test_persistence();
    let market = create_test_market(&mut persistence);
    let first = submit(&mut persistence, &market);

    delete_lead(&mut persistence, first, &create_test_admin()).unwrap();

    let next = create_lead(
        &mut persistence,
        &lead_request(&market),
        &as_customer(market.customer_id),
    )
    .unwrap();
    assert_eq!(next.pair.map(|p| p.id), Some(market.pair_a));
}

#[test]
fn test_deleting_unknown_lead_is_not_found() {
    let mut persistence = setup_test_persistence();
    let result = delete_lead(&mut persistence, 12, &create_test_admin());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
