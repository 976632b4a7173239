// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pair registry queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::ProfessionalPair;
use tracing::debug;

use crate::data_models::ProfessionalPairRow;
use crate::diesel_schema::professional_pairs;
use crate::error::PersistenceError;

backend_fn! {
/// Lists the pairs registered for a service/city pairing in ascending ID
/// order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_professional_pairs(
    conn: &mut _,
    service_city_pair_id: i64,
) -> Result<Vec<ProfessionalPair>, PersistenceError> {
    let rows: Vec<ProfessionalPairRow> = professional_pairs::table
        .filter(professional_pairs::service_city_pair_id.eq(service_city_pair_id))
        .order(professional_pairs::pair_id.asc())
        .select(ProfessionalPairRow::as_select())
        .load(conn)?;

    debug!(
        service_city_pair_id,
        count = rows.len(),
        "Loaded professional pairs"
    );

    Ok(rows.into_iter().map(ProfessionalPair::from).collect())
}
}

backend_fn! {
/// Retrieves a professional pair by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the pair does not exist.
pub fn get_professional_pair(
    conn: &mut _,
    pair_id: i64,
) -> Result<Option<ProfessionalPair>, PersistenceError> {
    let row: Option<ProfessionalPairRow> = professional_pairs::table
        .find(pair_id)
        .select(ProfessionalPairRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ProfessionalPair::from))
}
}

backend_fn! {
/// Lists the IDs of every pair a professional belongs to, in either slot.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pair_ids_for_professional(
    conn: &mut _,
    professional_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    professional_pairs::table
        .filter(
            professional_pairs::professional_id_1
                .eq(professional_id)
                .or(professional_pairs::professional_id_2.eq(professional_id)),
        )
        .order(professional_pairs::pair_id.asc())
        .select(professional_pairs::pair_id)
        .load::<i64>(conn)
        .map_err(Into::into)
}
}

backend_fn! {
/// Lists every registered pair in ascending ID order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_professional_pairs(
    conn: &mut _,
) -> Result<Vec<ProfessionalPair>, PersistenceError> {
    let rows: Vec<ProfessionalPairRow> = professional_pairs::table
        .order(professional_pairs::pair_id.asc())
        .select(ProfessionalPairRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(ProfessionalPair::from).collect())
}
}
