// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pair registry mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::ProfessionalPair;
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::professional_pairs;
use crate::error::PersistenceError;
use crate::queries::catalog::{get_service_city_pair_mysql, get_service_city_pair_sqlite};
use crate::queries::leads::{count_leads_for_pairs_mysql, count_leads_for_pairs_sqlite};
use crate::queries::pairs::{list_professional_pairs_mysql, list_professional_pairs_sqlite};
use crate::queries::roster::{get_professional_mysql, get_professional_sqlite};

backend_fn! {
/// Inserts a professional pair row and returns it.
///
/// Callers must have checked that the service/city pairing and the
/// professionals exist.
///
/// # Errors
///
/// Returns an error if the insert fails.
fn insert_professional_pair(
    conn: &mut _,
    service_city_pair_id: i64,
    professional_id_1: Option<i64>,
    professional_id_2: Option<i64>,
) -> Result<ProfessionalPair, PersistenceError> {
    diesel::insert_into(professional_pairs::table)
        .values((
            professional_pairs::service_city_pair_id.eq(service_city_pair_id),
            professional_pairs::professional_id_1.eq(professional_id_1),
            professional_pairs::professional_id_2.eq(professional_id_2),
        ))
        .execute(conn)?;

    let pair_id: i64 = conn.get_last_insert_rowid()?;

    Ok(ProfessionalPair {
        pair_id,
        service_city_pair_id,
        professional_id_1,
        professional_id_2,
    })
}
}

/// Registers a professional pair under a service/city pairing (`SQLite` version).
///
/// A third or later pair is accepted but never receives leads; a warning is
/// logged.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the pairing or a referenced
/// professional does not exist, or another error if the insert fails.
pub fn create_professional_pair_sqlite(
    conn: &mut SqliteConnection,
    service_city_pair_id: i64,
    professional_id_1: Option<i64>,
    professional_id_2: Option<i64>,
) -> Result<ProfessionalPair, PersistenceError> {
    if get_service_city_pair_sqlite(conn, service_city_pair_id)?.is_none() {
        return Err(PersistenceError::NotFound(format!(
            "Service/city pairing with ID {service_city_pair_id} not found"
        )));
    }

    for professional_id in professional_id_1.into_iter().chain(professional_id_2) {
        if get_professional_sqlite(conn, professional_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Professional with ID {professional_id} not found"
            )));
        }
    }

    let existing: usize = list_professional_pairs_sqlite(conn, service_city_pair_id)?.len();
    if existing >= 2 {
        warn!(
            service_city_pair_id,
            existing, "Registering pair beyond the first two; it will not receive leads"
        );
    }

    let pair: ProfessionalPair = insert_professional_pair_sqlite(
        conn,
        service_city_pair_id,
        professional_id_1,
        professional_id_2,
    )?;
    info!(pair_id = pair.pair_id, service_city_pair_id, "Created professional pair");

    Ok(pair)
}

/// Registers a professional pair under a service/city pairing (`MySQL` version).
///
/// A third or later pair is accepted but never receives leads; a warning is
/// logged.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the pairing or a referenced
/// professional does not exist, or another error if the insert fails.
pub fn create_professional_pair_mysql(
    conn: &mut MysqlConnection,
    service_city_pair_id: i64,
    professional_id_1: Option<i64>,
    professional_id_2: Option<i64>,
) -> Result<ProfessionalPair, PersistenceError> {
    if get_service_city_pair_mysql(conn, service_city_pair_id)?.is_none() {
        return Err(PersistenceError::NotFound(format!(
            "Service/city pairing with ID {service_city_pair_id} not found"
        )));
    }

    for professional_id in professional_id_1.into_iter().chain(professional_id_2) {
        if get_professional_mysql(conn, professional_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Professional with ID {professional_id} not found"
            )));
        }
    }

    let existing: usize = list_professional_pairs_mysql(conn, service_city_pair_id)?.len();
    if existing >= 2 {
        warn!(
            service_city_pair_id,
            existing, "Registering pair beyond the first two; it will not receive leads"
        );
    }

    let pair: ProfessionalPair = insert_professional_pair_mysql(
        conn,
        service_city_pair_id,
        professional_id_1,
        professional_id_2,
    )?;
    info!(pair_id = pair.pair_id, service_city_pair_id, "Created professional pair");

    Ok(pair)
}

/// Deletes a professional pair if no lead references it (`SQLite` version).
///
/// # Errors
///
/// Returns an error if:
/// - Leads reference the pair
/// - The pair does not exist
/// - The database operation fails
pub fn delete_professional_pair_sqlite(
    conn: &mut SqliteConnection,
    pair_id: i64,
) -> Result<(), PersistenceError> {
    info!(pair_id, "Attempting to delete professional pair");

    let lead_count: u64 = count_leads_for_pairs_sqlite(conn, &[pair_id])?;
    if lead_count > 0 {
        return Err(PersistenceError::PairReferenced {
            pair_id,
            lead_count,
        });
    }

    let rows_affected: usize = diesel::delete(professional_pairs::table)
        .filter(professional_pairs::pair_id.eq(pair_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Professional pair with ID {pair_id} not found"
        )));
    }

    info!(pair_id, "Deleted professional pair");
    Ok(())
}

/// Deletes a professional pair if no lead references it (`MySQL` version).
///
/// # Errors
///
/// Returns an error if:
/// - Leads reference the pair
/// - The pair does not exist
/// - The database operation fails
pub fn delete_professional_pair_mysql(
    conn: &mut MysqlConnection,
    pair_id: i64,
) -> Result<(), PersistenceError> {
    info!(pair_id, "Attempting to delete professional pair");

    let lead_count: u64 = count_leads_for_pairs_mysql(conn, &[pair_id])?;
    if lead_count > 0 {
        return Err(PersistenceError::PairReferenced {
            pair_id,
            lead_count,
        });
    }

    let rows_affected: usize = diesel::delete(professional_pairs::table)
        .filter(professional_pairs::pair_id.eq(pair_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Professional pair with ID {pair_id} not found"
        )));
    }

    info!(pair_id, "Deleted professional pair");
    Ok(())
}
