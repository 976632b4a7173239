// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{MAX_CATALOG_NAME_LEN, MIN_CATALOG_NAME_LEN, validate_name};
use serde::{Deserialize, Serialize};

/// A validated, trimmed catalog name for a service, city, or state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogName(String);

impl CatalogName {
    /// Creates a new catalog name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` if the trimmed name is not between
    /// 2 and 100 characters.
    pub fn new(entity: &'static str, raw: &str) -> Result<Self, DomainError> {
        validate_name(entity, raw, MIN_CATALOG_NAME_LEN, MAX_CATALOG_NAME_LEN).map(Self)
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A service offered on the marketplace (plumbing, cleaning, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_id: i64,
    pub name: String,
}

/// Associates a city with the state it belongs to.
///
/// A city may be linked to more than one state; the lowest-id link is treated
/// as the city's default state when a lead omits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCityPair {
    pub state_city_pair_id: i64,
    pub state_id: i64,
    pub city_id: i64,
}

/// The unit of assignment: a service offered in a city.
///
/// At most one exists per `(service_id, city_id)`. Its identifier keys the
/// assignment lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceCityPair {
    pub service_city_pair_id: i64,
    pub service_id: i64,
    pub city_id: i64,
}
