// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentStore, LockOutcome, PairAssignment};
use protown_domain::{ProfessionalPair, ServiceCityPair};

/// Storage failure injected by [`FakeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeStoreError(pub &'static str);

impl std::fmt::Display for FakeStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fake store failure in {}", self.0)
    }
}

/// In-memory store recording the order of calls the engine makes.
#[derive(Debug)]
pub struct FakeStore {
    pub service_city_pairs: Vec<ServiceCityPair>,
    pub pairs: Vec<ProfessionalPair>,
    /// `pair_id` of each recorded lead.
    pub leads: Vec<i64>,
    pub lock_outcome: LockOutcome,
    pub fail_on: Option<&'static str>,
    pub calls: Vec<&'static str>,
}

impl FakeStore {
    pub const fn new() -> Self {
        Self {
            service_city_pairs: Vec::new(),
            pairs: Vec::new(),
            leads: Vec::new(),
            lock_outcome: LockOutcome::PerKey,
            fail_on: None,
            calls: Vec::new(),
        }
    }

    pub fn with_service_city_pair(mut self, id: i64, service_id: i64, city_id: i64) -> Self {
        self.service_city_pairs.push(ServiceCityPair {
            service_city_pair_id: id,
            service_id,
            city_id,
        });
        self
    }

    pub fn with_pair(mut self, pair_id: i64, service_city_pair_id: i64) -> Self {
        self.pairs.push(ProfessionalPair {
            pair_id,
            service_city_pair_id,
            professional_id_1: Some(pair_id * 10),
            professional_id_2: Some(pair_id * 10 + 1),
        });
        self
    }

    /// Records a lead the way the caller would after a successful choice.
    pub fn record(&mut self, assignment: &PairAssignment) {
        self.leads.push(assignment.pair_id);
    }

    fn check(&mut self, call: &'static str) -> Result<(), FakeStoreError> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            return Err(FakeStoreError(call));
        }
        Ok(())
    }
}

impl AssignmentStore for FakeStore {
    type Error = FakeStoreError;

    fn find_service_city_pair(
        &mut self,
        service_id: i64,
        city_id: i64,
    ) -> Result<Option<ServiceCityPair>, Self::Error> {
        self.check("find")?;
        Ok(self
            .service_city_pairs
            .iter()
            .find(|scp| scp.service_id == service_id && scp.city_id == city_id)
            .copied())
    }

    fn list_professional_pairs(
        &mut self,
        service_city_pair_id: i64,
    ) -> Result<Vec<ProfessionalPair>, Self::Error> {
        self.check("list")?;
        Ok(self
            .pairs
            .iter()
            .filter(|pair| pair.service_city_pair_id == service_city_pair_id)
            .copied()
            .collect())
    }

    fn lock_service_city_pair(
        &mut self,
        _service_city_pair_id: i64,
    ) -> Result<LockOutcome, Self::Error> {
        self.check("lock")?;
        Ok(self.lock_outcome)
    }

    fn count_leads_for_pairs(&mut self, pair_ids: &[i64]) -> Result<u64, Self::Error> {
        self.check("count")?;
        Ok(self
            .leads
            .iter()
            .filter(|pair_id| pair_ids.contains(*pair_id))
            .count() as u64)
    }
}

/// Service 1 in city 1 (pairing 7) with pairs 100 and 101.
pub fn create_configured_store() -> FakeStore {
    FakeStore::new()
        .with_service_city_pair(7, 1, 1)
        .with_pair(100, 7)
        .with_pair(101, 7)
}
