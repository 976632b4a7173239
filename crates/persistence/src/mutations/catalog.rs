// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog mutations.
//!
//! Names are validated by the domain before they reach this module; the
//! database enforces uniqueness.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::{CatalogName, City, Service, ServiceCityPair, State, StateCityPair};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{cities, service_city_pairs, services, state_city_pairs, states};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a service.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken, or
/// another error if the insert fails.
pub fn create_service(conn: &mut _, name: &CatalogName) -> Result<Service, PersistenceError> {
    diesel::insert_into(services::table)
        .values(services::name.eq(name.value()))
        .execute(conn)?;

    let service_id: i64 = conn.get_last_insert_rowid()?;
    info!(service_id, name = name.value(), "Created service");

    Ok(Service {
        service_id,
        name: name.value().to_string(),
    })
}
}

backend_fn! {
/// Creates a city.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken, or
/// another error if the insert fails.
pub fn create_city(conn: &mut _, name: &CatalogName) -> Result<City, PersistenceError> {
    diesel::insert_into(cities::table)
        .values(cities::name.eq(name.value()))
        .execute(conn)?;

    let city_id: i64 = conn.get_last_insert_rowid()?;
    info!(city_id, name = name.value(), "Created city");

    Ok(City {
        city_id,
        name: name.value().to_string(),
    })
}
}

backend_fn! {
/// Creates a state.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken, or
/// another error if the insert fails.
pub fn create_state(conn: &mut _, name: &CatalogName) -> Result<State, PersistenceError> {
    diesel::insert_into(states::table)
        .values(states::name.eq(name.value()))
        .execute(conn)?;

    let state_id: i64 = conn.get_last_insert_rowid()?;
    info!(state_id, name = name.value(), "Created state");

    Ok(State {
        state_id,
        name: name.value().to_string(),
    })
}
}

backend_fn! {
/// Links a city to a state.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the link exists,
/// `PersistenceError::ForeignKeyViolation` if either side is missing, or
/// another error if the insert fails.
pub fn link_city_to_state(
    conn: &mut _,
    state_id: i64,
    city_id: i64,
) -> Result<StateCityPair, PersistenceError> {
    diesel::insert_into(state_city_pairs::table)
        .values((
            state_city_pairs::state_id.eq(state_id),
            state_city_pairs::city_id.eq(city_id),
        ))
        .execute(conn)?;

    let state_city_pair_id: i64 = conn.get_last_insert_rowid()?;
    info!(state_city_pair_id, state_id, city_id, "Linked city to state");

    Ok(StateCityPair {
        state_city_pair_id,
        state_id,
        city_id,
    })
}
}

backend_fn! {
/// Creates the pairing for a service offered in a city.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the pairing exists,
/// `PersistenceError::ForeignKeyViolation` if the service or city is
/// missing, or another error if the insert fails.
pub fn create_service_city_pair(
    conn: &mut _,
    service_id: i64,
    city_id: i64,
) -> Result<ServiceCityPair, PersistenceError> {
    diesel::insert_into(service_city_pairs::table)
        .values((
            service_city_pairs::service_id.eq(service_id),
            service_city_pairs::city_id.eq(city_id),
        ))
        .execute(conn)?;

    let service_city_pair_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        service_city_pair_id,
        service_id, city_id, "Created service/city pairing"
    );

    Ok(ServiceCityPair {
        service_city_pair_id,
        service_id,
        city_id,
    })
}
}
