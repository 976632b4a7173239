// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead ledger mutations.
//!
//! Lead creation is the only write that runs the assignment engine. The
//! engine's reads, its lock, and the insert share one assignment
//! transaction, so the pair recorded on a lead is exactly the pair the
//! engine chose under the lock, and an aborted insert leaves no trace.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use protown::{PairAssignment, choose_pair_for_service_city};
use protown_domain::{Lead, LeadStatus, NewLead};
use std::convert::Infallible;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{LeadRow, RecordedLead};
use crate::diesel_schema::leads;
use crate::error::PersistenceError;
use crate::ledger::LedgerStore;
use crate::mutations::now_rfc3339;

/// Result of a preview transaction, which is always rolled back.
enum PreviewOutcome {
    Chosen(PairAssignment),
    Failed(PersistenceError),
}

impl From<diesel::result::Error> for PreviewOutcome {
    fn from(err: diesel::result::Error) -> Self {
        Self::Failed(PersistenceError::from(err))
    }
}

backend_fn! {
/// Records a lead against the pair chosen by the assignment engine.
///
/// # Arguments
///
/// * `conn` - The database connection (must not be inside a transaction)
/// * `new_lead` - The validated lead
///
/// # Errors
///
/// Returns `PersistenceError::Assignment` if the service/city pairing or its
/// two pairs are not configured, a constraint error if the insert is
/// rejected, or another database error. Nothing is written on error.
pub fn create_lead(conn: &mut _, new_lead: &NewLead) -> Result<RecordedLead, PersistenceError> {
    conn.assignment_transaction::<_, PersistenceError, _>(|tx| {
        let assignment: PairAssignment = choose_pair_for_service_city(
            &mut LedgerStore::new(tx),
            new_lead.service_id,
            new_lead.city_id,
        )?;
        let created_at: String = now_rfc3339()?;

        diesel::insert_into(leads::table)
            .values((
                leads::customer_id.eq(new_lead.customer_id),
                leads::service_id.eq(new_lead.service_id),
                leads::state_id.eq(new_lead.state_id),
                leads::city_id.eq(new_lead.city_id),
                leads::description.eq(new_lead.description.value()),
                leads::status.eq(new_lead.status.as_str()),
                leads::pair_id.eq(Some(assignment.pair_id)),
                leads::created_at.eq(&created_at),
            ))
            .execute(tx)?;

        let lead_id: i64 = tx.get_last_insert_rowid()?;
        info!(
            lead_id,
            pair_id = assignment.pair_id,
            slot = %assignment.slot,
            customer_id = new_lead.customer_id,
            "Recorded lead"
        );

        Ok(RecordedLead {
            lead: Lead {
                lead_id,
                customer_id: new_lead.customer_id,
                service_id: new_lead.service_id,
                state_id: new_lead.state_id,
                city_id: new_lead.city_id,
                description: new_lead.description.value().to_string(),
                status: new_lead.status,
                pair_id: Some(assignment.pair_id),
                created_at,
            },
            assignment,
        })
    })
}
}

backend_fn! {
/// Reports which pair the next lead for a service in a city would receive.
///
/// Runs the engine inside an assignment transaction that is always rolled
/// back, so nothing is written and the lock is released immediately.
///
/// # Errors
///
/// Returns `PersistenceError::Assignment` if the pairing or its two pairs
/// are not configured, or a database error.
pub fn preview_assignment(
    conn: &mut _,
    service_id: i64,
    city_id: i64,
) -> Result<PairAssignment, PersistenceError> {
    let outcome: Result<Infallible, PreviewOutcome> =
        conn.assignment_transaction::<Infallible, PreviewOutcome, _>(|tx| {
            match choose_pair_for_service_city(&mut LedgerStore::new(tx), service_id, city_id) {
                Ok(assignment) => Err(PreviewOutcome::Chosen(assignment)),
                Err(err) => Err(PreviewOutcome::Failed(PersistenceError::from(err))),
            }
        });

    match outcome {
        Ok(never) => match never {},
        Err(PreviewOutcome::Chosen(assignment)) => Ok(assignment),
        Err(PreviewOutcome::Failed(err)) => Err(err),
    }
}
}

backend_fn! {
/// Changes a lead's status. The assigned pair is never touched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the lead does not exist, or
/// another error if the update fails.
pub fn update_lead_status(
    conn: &mut _,
    lead_id: i64,
    status: LeadStatus,
) -> Result<Lead, PersistenceError> {
    let rows_affected: usize = diesel::update(leads::table)
        .filter(leads::lead_id.eq(lead_id))
        .set(leads::status.eq(status.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Lead with ID {lead_id} not found"
        )));
    }

    info!(lead_id, status = %status, "Updated lead status");

    let row: LeadRow = leads::table
        .find(lead_id)
        .select(LeadRow::as_select())
        .first(conn)?;
    Lead::try_from(row)
}
}

backend_fn! {
/// Deletes a lead.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the lead does not exist, or
/// another error if the delete fails.
pub fn delete_lead(conn: &mut _, lead_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(leads::table)
        .filter(leads::lead_id.eq(lead_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Lead with ID {lead_id} not found"
        )));
    }

    info!(lead_id, "Deleted lead");
    Ok(())
}
}
