// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting queries over the lead ledger.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use protown_domain::{LeadStatus, ProfessionalPair};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::{LeadReportFilter, LeadStatusCount, PairUtilization, ProfessionalPairRow};
use crate::diesel_schema::{leads, professional_pairs, service_city_pairs};
use crate::error::PersistenceError;

fn to_count(count: i64) -> Result<u64, PersistenceError> {
    count
        .to_u64()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

backend_fn! {
/// Counts the leads assigned to each professional pair.
///
/// Every pair matching the service filter is reported, including pairs that
/// hold no leads. Results are ordered by lead count, highest first, then by
/// pair ID.
///
/// # Errors
///
/// Returns an error if a database query fails or a count is negative.
pub fn pair_utilization(
    conn: &mut _,
    filter: &LeadReportFilter,
) -> Result<Vec<PairUtilization>, PersistenceError> {
    let mut pair_query = professional_pairs::table
        .inner_join(service_city_pairs::table)
        .order(professional_pairs::pair_id.asc())
        .select(ProfessionalPairRow::as_select())
        .into_boxed();
    if let Some(service_id) = filter.service_id {
        pair_query = pair_query.filter(service_city_pairs::service_id.eq(service_id));
    }
    let pairs: Vec<ProfessionalPair> = pair_query
        .load::<ProfessionalPairRow>(conn)?
        .into_iter()
        .map(ProfessionalPair::from)
        .collect();

    let pair_ids: Vec<i64> = pairs.iter().map(|pair| pair.pair_id).collect();
    let mut count_query = leads::table
        .filter(leads::pair_id.eq_any(pair_ids))
        .group_by(leads::pair_id)
        .select((leads::pair_id, diesel::dsl::count(leads::lead_id)))
        .into_boxed();
    if let Some(floor) = filter.created_at_floor() {
        count_query = count_query.filter(leads::created_at.ge(floor));
    }
    if let Some(ceiling) = filter.created_at_ceiling() {
        count_query = count_query.filter(leads::created_at.lt(ceiling));
    }
    let rows: Vec<(Option<i64>, i64)> = count_query.load::<(Option<i64>, i64)>(conn)?;

    let mut counts: HashMap<i64, u64> = HashMap::new();
    for (pair_id, count) in rows {
        if let Some(pair_id) = pair_id {
            counts.insert(pair_id, to_count(count)?);
        }
    }

    let mut utilization: Vec<PairUtilization> = pairs
        .into_iter()
        .map(|pair| PairUtilization {
            leads_assigned: counts.get(&pair.pair_id).copied().unwrap_or(0),
            pair,
        })
        .collect();
    // Stable sort keeps ascending pair ID among equal counts.
    utilization.sort_by_key(|entry| Reverse(entry.leads_assigned));

    debug!(
        service_id = ?filter.service_id,
        pairs = utilization.len(),
        "Computed pair utilization"
    );
    Ok(utilization)
}
}

backend_fn! {
/// Counts leads per status. Both statuses are always reported, `normal`
/// first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is unknown.
pub fn lead_status_breakdown(
    conn: &mut _,
    filter: &LeadReportFilter,
) -> Result<Vec<LeadStatusCount>, PersistenceError> {
    let mut query = leads::table
        .group_by(leads::status)
        .select((leads::status, diesel::dsl::count(leads::lead_id)))
        .into_boxed();
    if let Some(service_id) = filter.service_id {
        query = query.filter(leads::service_id.eq(service_id));
    }
    if let Some(floor) = filter.created_at_floor() {
        query = query.filter(leads::created_at.ge(floor));
    }
    if let Some(ceiling) = filter.created_at_ceiling() {
        query = query.filter(leads::created_at.lt(ceiling));
    }
    let rows: Vec<(String, i64)> = query.load::<(String, i64)>(conn)?;

    let mut breakdown: Vec<LeadStatusCount> = [LeadStatus::Normal, LeadStatus::Urgent]
        .into_iter()
        .map(|status| LeadStatusCount { status, count: 0 })
        .collect();
    for (status, count) in rows {
        let status: LeadStatus = LeadStatus::from_str(&status).map_err(|_| {
            PersistenceError::DatabaseError(format!("Unknown lead status '{status}' in ledger"))
        })?;
        if let Some(entry) = breakdown.iter_mut().find(|entry| entry.status == status) {
            entry.count = to_count(count)?;
        }
    }

    Ok(breakdown)
}
}
