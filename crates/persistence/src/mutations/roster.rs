// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Professional and customer mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown_domain::{Customer, NewCustomer, NewProfessional, Professional};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::ProfessionalRow;
use crate::diesel_schema::{customers, professionals};
use crate::error::PersistenceError;
use crate::mutations::now_rfc3339;

backend_fn! {
/// Registers a professional. New professionals start unverified.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken,
/// `PersistenceError::ForeignKeyViolation` if a referenced service, state,
/// or city is missing, or another error if the insert fails.
pub fn create_professional(
    conn: &mut _,
    professional: &NewProfessional,
) -> Result<Professional, PersistenceError> {
    let created_at: String = now_rfc3339()?;

    diesel::insert_into(professionals::table)
        .values((
            professionals::name.eq(&professional.name),
            professionals::email.eq(&professional.email),
            professionals::phone_number.eq(professional.phone_number.as_deref()),
            professionals::business_name.eq(professional.business_name.as_deref()),
            professionals::service_id.eq(professional.service_id),
            professionals::state_id.eq(professional.state_id),
            professionals::city_id.eq(professional.city_id),
            professionals::verified.eq(0),
            professionals::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let professional_id: i64 = conn.get_last_insert_rowid()?;
    info!(professional_id, email = %professional.email, "Registered professional");

    Ok(Professional {
        professional_id,
        name: professional.name.clone(),
        email: professional.email.clone(),
        phone_number: professional.phone_number.clone(),
        business_name: professional.business_name.clone(),
        service_id: professional.service_id,
        state_id: professional.state_id,
        city_id: professional.city_id,
        verified: false,
        created_at,
    })
}
}

backend_fn! {
/// Sets a professional's verification flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the professional does not exist,
/// or another error if the update fails.
pub fn set_professional_verified(
    conn: &mut _,
    professional_id: i64,
    verified: bool,
) -> Result<Professional, PersistenceError> {
    let rows_affected: usize = diesel::update(professionals::table)
        .filter(professionals::professional_id.eq(professional_id))
        .set(professionals::verified.eq(i32::from(verified)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Professional with ID {professional_id} not found"
        )));
    }

    info!(professional_id, verified, "Updated professional verification");

    let row: ProfessionalRow = professionals::table
        .find(professional_id)
        .select(ProfessionalRow::as_select())
        .first(conn)?;
    Ok(Professional::from(row))
}
}

backend_fn! {
/// Registers a customer.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken, or
/// another error if the insert fails.
pub fn create_customer(conn: &mut _, customer: &NewCustomer) -> Result<Customer, PersistenceError> {
    let created_at: String = now_rfc3339()?;

    diesel::insert_into(customers::table)
        .values((
            customers::first_name.eq(&customer.first_name),
            customers::last_name.eq(&customer.last_name),
            customers::email.eq(&customer.email),
            customers::phone_number.eq(customer.phone_number.as_deref()),
            customers::address.eq(customer.address.as_deref()),
            customers::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let customer_id: i64 = conn.get_last_insert_rowid()?;
    info!(customer_id, email = %customer.email, "Registered customer");

    Ok(Customer {
        customer_id,
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        email: customer.email.clone(),
        phone_number: customer.phone_number.clone(),
        address: customer.address.clone(),
        created_at,
    })
}
}
