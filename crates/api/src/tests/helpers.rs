// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use protown_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateCatalogEntryRequest, CreateCustomerRequest, CreateLeadRequest,
    CreateProfessionalPairRequest, CreateProfessionalRequest, CreateServiceCityPairRequest,
    LinkCityToStateRequest, Role, create_city, create_customer, create_professional,
    create_professional_pair, create_service, create_service_city_pair, create_state,
    link_city_to_state,
};

/// A service offered in a city with two registered pairs and one customer.
pub struct Market {
    pub service_id: i64,
    pub city_id: i64,
    pub state_id: i64,
    pub service_city_pair_id: i64,
    pub customer_id: i64,
    /// Members of the first pair.
    pub alice_id: i64,
    pub bob_id: i64,
    /// Member of the second pair.
    pub carol_id: i64,
    pub pair_a: i64,
    pub pair_b: i64,
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub fn as_customer(customer_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(customer_id, Role::Customer)
}

pub fn as_professional(professional_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(professional_id, Role::Professional)
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn named(name: &str) -> CreateCatalogEntryRequest {
    CreateCatalogEntryRequest {
        name: name.to_string(),
    }
}

pub fn register_professional(persistence: &mut Persistence, name: &str, email: &str) -> i64 {
    let request = CreateProfessionalRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone_number: None,
        business_name: None,
        service_id: None,
        state_id: None,
        city_id: None,
    };
    create_professional(persistence, &request, &create_test_admin())
        .unwrap()
        .professional_id
}

pub fn register_customer(persistence: &mut Persistence, email: &str) -> i64 {
    let request = CreateCustomerRequest {
        first_name: String::from("Dana"),
        last_name: String::from("Reyes"),
        email: email.to_string(),
        phone_number: Some(String::from("555-0100")),
        address: None,
    };
    create_customer(persistence, &request).unwrap().customer_id
}

pub fn register_pair(
    persistence: &mut Persistence,
    service_city_pair_id: i64,
    first: Option<i64>,
    second: Option<i64>,
) -> i64 {
    let request = CreateProfessionalPairRequest {
        service_city_pair_id,
        professional_id_1: first,
        professional_id_2: second,
    };
    create_professional_pair(persistence, &request, &create_test_admin())
        .unwrap()
        .pair_id
}

/// Plumbing offered in Springfield, Illinois, with no pairs yet.
pub fn create_unpaired_market(persistence: &mut Persistence) -> (i64, i64, i64, i64) {
    let admin = create_test_admin();
    let service_id = create_service(persistence, &named("Plumbing"), &admin)
        .unwrap()
        .id;
    let city_id = create_city(persistence, &named("Springfield"), &admin)
        .unwrap()
        .id;
    let state_id = create_state(persistence, &named("Illinois"), &admin)
        .unwrap()
        .id;
    link_city_to_state(
        persistence,
        &LinkCityToStateRequest { state_id, city_id },
        &admin,
    )
    .unwrap();
    let service_city_pair_id = create_service_city_pair(
        persistence,
        &CreateServiceCityPairRequest {
            service_id,
            city_id,
        },
        &admin,
    )
    .unwrap()
    .service_city_pair_id;

    (service_id, city_id, state_id, service_city_pair_id)
}

pub fn create_test_market(persistence: &mut Persistence) -> Market {
    let (service_id, city_id, state_id, service_city_pair_id) = create_unpaired_market(persistence);

    let alice_id = register_professional(persistence, "Alice Pipes", "alice@example.com");
    let bob_id = register_professional(persistence, "Bob Drains", "bob@example.com");
    let carol_id = register_professional(persistence, "Carol Valves", "carol@example.com");

    let pair_a = register_pair(
        persistence,
        service_city_pair_id,
        Some(alice_id),
        Some(bob_id),
    );
    let pair_b = register_pair(persistence, service_city_pair_id, Some(carol_id), None);
    let customer_id = register_customer(persistence, "dana@example.com");

    Market {
        service_id,
        city_id,
        state_id,
        service_city_pair_id,
        customer_id,
        alice_id,
        bob_id,
        carol_id,
        pair_a,
        pair_b,
    }
}

pub fn lead_request(market: &Market) -> CreateLeadRequest {
    CreateLeadRequest {
        service_id: market.service_id,
        city_id: market.city_id,
        state_id: None,
        description: String::from("Basement drain backs up after rain"),
        status: None,
    }
}
