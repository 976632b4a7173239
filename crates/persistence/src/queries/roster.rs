// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Professional and customer directory queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::{Customer, Professional};

use crate::data_models::{CustomerRow, ProfessionalRow};
use crate::diesel_schema::{customers, professionals};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a professional by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the professional does not exist.
pub fn get_professional(
    conn: &mut _,
    professional_id: i64,
) -> Result<Option<Professional>, PersistenceError> {
    let row: Option<ProfessionalRow> = professionals::table
        .find(professional_id)
        .select(ProfessionalRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Professional::from))
}
}

backend_fn! {
/// Retrieves the display names of the given professionals, keyed by ID.
///
/// Unknown IDs are absent from the result.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_professional_names(
    conn: &mut _,
    professional_ids: &[i64],
) -> Result<Vec<(i64, String)>, PersistenceError> {
    professionals::table
        .filter(professionals::professional_id.eq_any(professional_ids.to_vec()))
        .order(professionals::professional_id.asc())
        .select((professionals::professional_id, professionals::name))
        .load::<(i64, String)>(conn)
        .map_err(Into::into)
}
}

backend_fn! {
/// Retrieves a customer by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the customer does not exist.
pub fn get_customer(conn: &mut _, customer_id: i64) -> Result<Option<Customer>, PersistenceError> {
    let row: Option<CustomerRow> = customers::table
        .find(customer_id)
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Customer::from))
}
}
