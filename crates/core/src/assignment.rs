// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{AssignmentStore, LockOutcome};
use protown_domain::{DomainError, PairSlots, ServiceCityPair, Slot};
use tracing::{debug, info, warn};

/// The engine's decision for one lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAssignment {
    pub service_city_pair_id: i64,
    /// The pair the lead must be recorded against.
    pub pair_id: i64,
    pub slot: Slot,
    /// Leads held by the two rotation pairs before this one.
    pub prior_count: u64,
    pub lock: LockOutcome,
}

/// Chooses which professional pair receives the next lead for a service in
/// a city.
///
/// The two lowest-id pairs of the service/city pairing alternate strictly:
/// an even number of existing leads across both selects the first, an odd
/// number the second. The count is taken after the assignment lock, so the
/// caller must record the lead in the same transaction for the rotation to
/// hold under concurrency.
///
/// # Arguments
///
/// * `store` - Transaction-bound storage
/// * `service_id` - The requested service
/// * `city_id` - The requested city
///
/// # Errors
///
/// * `CoreError::DomainViolation(ServiceCityPairNotConfigured)` if the
///   service is not offered in the city
/// * `CoreError::DomainViolation(ProfessionalPairsNotConfigured)` if fewer
///   than two pairs are registered
/// * `CoreError::Store` if any storage call fails
pub fn choose_pair_for_service_city<S: AssignmentStore>(
    store: &mut S,
    service_id: i64,
    city_id: i64,
) -> Result<PairAssignment, CoreError<S::Error>> {
    let service_city_pair: ServiceCityPair = store
        .find_service_city_pair(service_id, city_id)
        .map_err(CoreError::Store)?
        .ok_or(DomainError::ServiceCityPairNotConfigured {
            service_id,
            city_id,
        })?;
    let scp_id: i64 = service_city_pair.service_city_pair_id;

    let registered = store
        .list_professional_pairs(scp_id)
        .map_err(CoreError::Store)?;
    let slots: PairSlots = PairSlots::from_registered(scp_id, registered)?;

    if slots.ignored_count() > 0 {
        warn!(
            service_city_pair_id = scp_id,
            ignored = slots.ignored_count(),
            "More than two professional pairs registered; extras receive no leads"
        );
    }

    let lock: LockOutcome = store
        .lock_service_city_pair(scp_id)
        .map_err(CoreError::Store)?;
    match lock {
        LockOutcome::Unavailable => warn!(
            service_city_pair_id = scp_id,
            "Assignment lock unavailable; concurrent leads may break alternation"
        ),
        LockOutcome::PerKey | LockOutcome::DatabaseWide => {
            debug!(service_city_pair_id = scp_id, lock = %lock, "Assignment lock held");
        }
    }

    let prior_count: u64 = store
        .count_leads_for_pairs(&slots.pair_ids())
        .map_err(CoreError::Store)?;
    let slot: Slot = Slot::for_assigned_count(prior_count);
    let pair_id: i64 = slots.pair_for(slot).pair_id;

    info!(
        service_city_pair_id = scp_id,
        pair_id,
        slot = %slot,
        prior_count,
        "Chose professional pair for lead"
    );

    Ok(PairAssignment {
        service_city_pair_id: scp_id,
        pair_id,
        slot,
        prior_count,
        lock,
    })
}
