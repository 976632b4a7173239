// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog queries: services, cities, states, and their pairings.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::{City, Service, ServiceCityPair, State};
use tracing::debug;

use crate::data_models::{
    CityRow, ServiceCityPairListing, ServiceCityPairRow, ServiceRow, StateRow,
};
use crate::diesel_schema::{cities, service_city_pairs, services, state_city_pairs, states};
use crate::error::PersistenceError;

backend_fn! {
/// Lists all services ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_services(conn: &mut _) -> Result<Vec<Service>, PersistenceError> {
    let rows: Vec<ServiceRow> = services::table
        .order(services::name.asc())
        .select(ServiceRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Service::from).collect())
}
}

backend_fn! {
/// Retrieves a service by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the service does not exist.
pub fn get_service(conn: &mut _, service_id: i64) -> Result<Option<Service>, PersistenceError> {
    let row: Option<ServiceRow> = services::table
        .find(service_id)
        .select(ServiceRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Service::from))
}
}

backend_fn! {
/// Lists all cities ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_cities(conn: &mut _) -> Result<Vec<City>, PersistenceError> {
    let rows: Vec<CityRow> = cities::table
        .order(cities::name.asc())
        .select(CityRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(City::from).collect())
}
}

backend_fn! {
/// Retrieves a city by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the city does not exist.
pub fn get_city(conn: &mut _, city_id: i64) -> Result<Option<City>, PersistenceError> {
    let row: Option<CityRow> = cities::table
        .find(city_id)
        .select(CityRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(City::from))
}
}

backend_fn! {
/// Lists all states ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_states(conn: &mut _) -> Result<Vec<State>, PersistenceError> {
    let rows: Vec<StateRow> = states::table
        .order(states::name.asc())
        .select(StateRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(State::from).collect())
}
}

backend_fn! {
/// Retrieves a state by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the state does not exist.
pub fn get_state(conn: &mut _, state_id: i64) -> Result<Option<State>, PersistenceError> {
    let row: Option<StateRow> = states::table
        .find(state_id)
        .select(StateRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(State::from))
}
}

backend_fn! {
/// Finds the default state of a city: the state of its lowest-id
/// state/city link.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the city is not linked to any state.
pub fn find_state_for_city(conn: &mut _, city_id: i64) -> Result<Option<i64>, PersistenceError> {
    debug!(city_id, "Resolving default state for city");

    state_city_pairs::table
        .filter(state_city_pairs::city_id.eq(city_id))
        .order(state_city_pairs::state_city_pair_id.asc())
        .select(state_city_pairs::state_id)
        .first::<i64>(conn)
        .optional()
        .map_err(Into::into)
}
}

backend_fn! {
/// Checks whether a city is linked to a state.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_city_in_state(
    conn: &mut _,
    city_id: i64,
    state_id: i64,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count_star;

    let links: i64 = state_city_pairs::table
        .filter(state_city_pairs::city_id.eq(city_id))
        .filter(state_city_pairs::state_id.eq(state_id))
        .select(count_star())
        .first(conn)?;

    Ok(links > 0)
}
}

backend_fn! {
/// Looks up the pairing for a service offered in a city.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the service is not offered in the city.
pub fn find_service_city_pair(
    conn: &mut _,
    service_id: i64,
    city_id: i64,
) -> Result<Option<ServiceCityPair>, PersistenceError> {
    debug!(service_id, city_id, "Looking up service/city pairing");

    let row: Option<ServiceCityPairRow> = service_city_pairs::table
        .filter(service_city_pairs::service_id.eq(service_id))
        .filter(service_city_pairs::city_id.eq(city_id))
        .select(ServiceCityPairRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ServiceCityPair::from))
}
}

backend_fn! {
/// Retrieves a service/city pairing by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the pairing does not exist.
pub fn get_service_city_pair(
    conn: &mut _,
    service_city_pair_id: i64,
) -> Result<Option<ServiceCityPair>, PersistenceError> {
    let row: Option<ServiceCityPairRow> = service_city_pairs::table
        .find(service_city_pair_id)
        .select(ServiceCityPairRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ServiceCityPair::from))
}
}

backend_fn! {
/// Lists every service/city pairing with service and city names and the
/// city's default state, ordered by service name then city name.
///
/// # Errors
///
/// Returns an error if any database query fails.
pub fn list_service_city_pairs(
    conn: &mut _,
) -> Result<Vec<ServiceCityPairListing>, PersistenceError> {
    let rows: Vec<(i64, i64, String, i64, String)> = service_city_pairs::table
        .inner_join(services::table)
        .inner_join(cities::table)
        .order((services::name.asc(), cities::name.asc()))
        .select((
            service_city_pairs::service_city_pair_id,
            services::service_id,
            services::name,
            cities::city_id,
            cities::name,
        ))
        .load(conn)?;

    let mut listings: Vec<ServiceCityPairListing> = Vec::with_capacity(rows.len());
    for (service_city_pair_id, service_id, service_name, city_id, city_name) in rows {
        let state: Option<State> = state_city_pairs::table
            .inner_join(states::table)
            .filter(state_city_pairs::city_id.eq(city_id))
            .order(state_city_pairs::state_city_pair_id.asc())
            .select(StateRow::as_select())
            .first::<StateRow>(conn)
            .optional()?
            .map(State::from);

        listings.push(ServiceCityPairListing {
            service_city_pair_id,
            service_id,
            service_name,
            city_id,
            city_name,
            state,
        });
    }

    debug!(count = listings.len(), "Listed service/city pairings");
    Ok(listings)
}
}
