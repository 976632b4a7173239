// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use protown_domain::{ProfessionalPair, ServiceCityPair};

/// What kind of serialization the store provided for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOutcome {
    /// An exclusive lock keyed by the service/city pairing. Other pairings are
    /// not blocked.
    PerKey,
    /// A lock covering every writer on the database.
    DatabaseWide,
    /// No lock could be taken. Concurrent assignments may collide.
    Unavailable,
}

impl LockOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PerKey => "per-key",
            Self::DatabaseWide => "database-wide",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for LockOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage operations the assignment engine needs.
///
/// Every call is made inside the caller's transaction. A lock taken by
/// [`lock_service_city_pair`](Self::lock_service_city_pair) must be held
/// until that transaction ends and must not be released any other way.
pub trait AssignmentStore {
    /// Storage error type.
    type Error;

    /// Looks up the pairing for a service offered in a city.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lookup fails.
    fn find_service_city_pair(
        &mut self,
        service_id: i64,
        city_id: i64,
    ) -> Result<Option<ServiceCityPair>, Self::Error>;

    /// Lists the professional pairs registered for a pairing.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    fn list_professional_pairs(
        &mut self,
        service_city_pair_id: i64,
    ) -> Result<Vec<ProfessionalPair>, Self::Error>;

    /// Takes the transaction-scoped assignment lock for a pairing, blocking
    /// while another transaction holds it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lock request itself fails.
    fn lock_service_city_pair(
        &mut self,
        service_city_pair_id: i64,
    ) -> Result<LockOutcome, Self::Error>;

    /// Counts committed (and own uncommitted) leads referencing any of the
    /// given pairs.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    fn count_leads_for_pairs(&mut self, pair_ids: &[i64]) -> Result<u64, Self::Error>;
}
