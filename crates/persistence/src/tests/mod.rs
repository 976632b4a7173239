// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use diesel::prelude::*;
use protown_domain::{
    CatalogName, LeadDescription, LeadStatus, NewCustomer, NewLead, NewProfessional,
    ProfessionalPair,
};

use crate::diesel_schema::{professional_pairs, service_city_pairs};
use crate::{BackendConnection, Persistence};

/// Identifiers of a fully configured service/city pairing.
pub struct Marketplace {
    pub service_id: i64,
    pub city_id: i64,
    pub state_id: i64,
    pub service_city_pair_id: i64,
    pub customer_id: i64,
    pub pair_a: i64,
    pub pair_b: i64,
}

pub fn catalog_name(entity: &'static str, raw: &str) -> CatalogName {
    CatalogName::new(entity, raw).unwrap()
}

pub fn create_test_professional(persistence: &mut Persistence, name: &str, email: &str) -> i64 {
    let professional: NewProfessional =
        NewProfessional::new(name, email, None, None, None, None, None).unwrap();
    persistence
        .create_professional(&professional)
        .unwrap()
        .professional_id
}

pub fn create_test_customer(persistence: &mut Persistence, email: &str) -> i64 {
    let customer: NewCustomer = NewCustomer::new("Dana", "Reyes", email, None, None).unwrap();
    persistence.create_customer(&customer).unwrap().customer_id
}

/// Creates Plumbing in Springfield, Illinois with the pairing and one customer,
/// but no professional pairs.
pub fn create_unpaired_marketplace(persistence: &mut Persistence) -> Marketplace {
    let service_id: i64 = persistence
        .create_service(&catalog_name("service", "Plumbing"))
        .unwrap()
        .service_id;
    let city_id: i64 = persistence
        .create_city(&catalog_name("city", "Springfield"))
        .unwrap()
        .city_id;
    let state_id: i64 = persistence
        .create_state(&catalog_name("state", "Illinois"))
        .unwrap()
        .state_id;
    persistence.link_city_to_state(state_id, city_id).unwrap();
    let service_city_pair_id: i64 = persistence
        .create_service_city_pair(service_id, city_id)
        .unwrap()
        .service_city_pair_id;
    let customer_id: i64 = create_test_customer(persistence, "dana@example.com");

    Marketplace {
        service_id,
        city_id,
        state_id,
        service_city_pair_id,
        customer_id,
        pair_a: 0,
        pair_b: 0,
    }
}

/// Creates a marketplace whose pairing has two pairs of two professionals.
pub fn create_test_marketplace(persistence: &mut Persistence) -> Marketplace {
    let mut market: Marketplace = create_unpaired_marketplace(persistence);

    let alice: i64 = create_test_professional(persistence, "Alice Pipes", "alice@example.com");
    let bob: i64 = create_test_professional(persistence, "Bob Wrench", "bob@example.com");
    let carol: i64 = create_test_professional(persistence, "Carol Valve", "carol@example.com");
    let dave: i64 = create_test_professional(persistence, "Dave Drain", "dave@example.com");

    let first: ProfessionalPair = persistence
        .create_professional_pair(market.service_city_pair_id, Some(alice), Some(bob))
        .unwrap();
    let second: ProfessionalPair = persistence
        .create_professional_pair(market.service_city_pair_id, Some(carol), Some(dave))
        .unwrap();

    market.pair_a = first.pair_id;
    market.pair_b = second.pair_id;
    market
}

pub fn create_test_lead(market: &Marketplace) -> NewLead {
    NewLead {
        customer_id: market.customer_id,
        service_id: market.service_id,
        state_id: market.state_id,
        city_id: market.city_id,
        description: LeadDescription::new("Kitchen sink is leaking").unwrap(),
        status: LeadStatus::Normal,
    }
}

/// Inserts a service/city pairing with a fixed identifier.
pub fn insert_service_city_pair_with_id(
    persistence: &mut Persistence,
    service_city_pair_id: i64,
    service_id: i64,
    city_id: i64,
) {
    let BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("fixed-id inserts are only used with SQLite");
    };
    diesel::insert_into(service_city_pairs::table)
        .values((
            service_city_pairs::service_city_pair_id.eq(service_city_pair_id),
            service_city_pairs::service_id.eq(service_id),
            service_city_pairs::city_id.eq(city_id),
        ))
        .execute(conn)
        .unwrap();
}

/// Inserts an empty professional pair with a fixed identifier.
pub fn insert_pair_with_id(persistence: &mut Persistence, pair_id: i64, service_city_pair_id: i64) {
    let BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("fixed-id inserts are only used with SQLite");
    };
    diesel::insert_into(professional_pairs::table)
        .values((
            professional_pairs::pair_id.eq(pair_id),
            professional_pairs::service_city_pair_id.eq(service_city_pair_id),
        ))
        .execute(conn)
        .unwrap();
}
