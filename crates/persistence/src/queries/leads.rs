// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead ledger queries.
//!
//! All listings are ordered by ascending lead ID, which is also the order in
//! which assignments committed.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use protown_domain::Lead;
use tracing::debug;

use crate::data_models::LeadRow;
use crate::diesel_schema::leads;
use crate::error::PersistenceError;
use crate::queries::pairs::{
    list_pair_ids_for_professional_mysql, list_pair_ids_for_professional_sqlite,
};

fn into_leads(rows: Vec<LeadRow>) -> Result<Vec<Lead>, PersistenceError> {
    rows.into_iter().map(Lead::try_from).collect()
}

backend_fn! {
/// Counts the leads referencing any of the given pairs.
///
/// Inside an assignment transaction this sees every committed lead plus the
/// transaction's own writes.
///
/// # Errors
///
/// Returns an error if the database query fails or the count is negative.
pub fn count_leads_for_pairs(conn: &mut _, pair_ids: &[i64]) -> Result<u64, PersistenceError> {
    use diesel::dsl::count_star;

    let count: i64 = leads::table
        .filter(leads::pair_id.eq_any(pair_ids.to_vec()))
        .select(count_star())
        .first(conn)?;

    debug!(?pair_ids, count, "Counted leads for pairs");

    count.to_u64().ok_or_else(|| {
        PersistenceError::DatabaseError("Count conversion failed".to_string())
    })
}
}

backend_fn! {
/// Retrieves a lead by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if the lead does not exist.
pub fn get_lead(conn: &mut _, lead_id: i64) -> Result<Option<Lead>, PersistenceError> {
    let row: Option<LeadRow> = leads::table
        .find(lead_id)
        .select(LeadRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Lead::try_from).transpose()
}
}

backend_fn! {
/// Lists every lead.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_leads(conn: &mut _) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;

    into_leads(rows)
}
}

backend_fn! {
/// Lists the leads submitted by a customer.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_leads_for_customer(
    conn: &mut _,
    customer_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .filter(leads::customer_id.eq(customer_id))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;

    into_leads(rows)
}
}

/// Lists the leads assigned to any pair the professional belongs to (`SQLite` version).
///
/// # Errors
///
/// Returns an error if a database query fails or a row is corrupt.
pub fn list_leads_for_professional_sqlite(
    conn: &mut SqliteConnection,
    professional_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let pair_ids: Vec<i64> = list_pair_ids_for_professional_sqlite(conn, professional_id)?;
    if pair_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<LeadRow> = leads::table
        .filter(leads::pair_id.eq_any(pair_ids))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;

    into_leads(rows)
}

/// Lists the leads assigned to any pair the professional belongs to (`MySQL` version).
///
/// # Errors
///
/// Returns an error if a database query fails or a row is corrupt.
pub fn list_leads_for_professional_mysql(
    conn: &mut MysqlConnection,
    professional_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let pair_ids: Vec<i64> = list_pair_ids_for_professional_mysql(conn, professional_id)?;
    if pair_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<LeadRow> = leads::table
        .filter(leads::pair_id.eq_any(pair_ids))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;

    into_leads(rows)
}
