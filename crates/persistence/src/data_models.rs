// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and the composite records returned by the `Persistence` API.

use diesel::prelude::*;
use protown::PairAssignment;
use protown_domain::{
    City, Customer, Lead, LeadStatus, Professional, ProfessionalPair, Service, ServiceCityPair,
    State, StateCityPair,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::diesel_schema::{
    cities, customers, leads, professional_pairs, professionals, service_city_pairs, services,
    state_city_pairs, states,
};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = services)]
pub struct ServiceRow {
    pub service_id: i64,
    pub name: String,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            service_id: row.service_id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = cities)]
pub struct CityRow {
    pub city_id: i64,
    pub name: String,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            city_id: row.city_id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = states)]
pub struct StateRow {
    pub state_id: i64,
    pub name: String,
}

impl From<StateRow> for State {
    fn from(row: StateRow) -> Self {
        Self {
            state_id: row.state_id,
            name: row.name,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = state_city_pairs)]
pub struct StateCityPairRow {
    pub state_city_pair_id: i64,
    pub state_id: i64,
    pub city_id: i64,
}

impl From<StateCityPairRow> for StateCityPair {
    fn from(row: StateCityPairRow) -> Self {
        Self {
            state_city_pair_id: row.state_city_pair_id,
            state_id: row.state_id,
            city_id: row.city_id,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = service_city_pairs)]
pub struct ServiceCityPairRow {
    pub service_city_pair_id: i64,
    pub service_id: i64,
    pub city_id: i64,
}

impl From<ServiceCityPairRow> for ServiceCityPair {
    fn from(row: ServiceCityPairRow) -> Self {
        Self {
            service_city_pair_id: row.service_city_pair_id,
            service_id: row.service_id,
            city_id: row.city_id,
        }
    }
}

/// Diesel Queryable struct for professional rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = professionals)]
pub struct ProfessionalRow {
    pub professional_id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub business_name: Option<String>,
    pub service_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
    pub verified: i32,
    pub created_at: String,
}

impl From<ProfessionalRow> for Professional {
    fn from(row: ProfessionalRow) -> Self {
        Self {
            professional_id: row.professional_id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            business_name: row.business_name,
            service_id: row.service_id,
            state_id: row.state_id,
            city_id: row.city_id,
            verified: row.verified != 0,
            created_at: row.created_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = customers)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: row.customer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = professional_pairs)]
pub struct ProfessionalPairRow {
    pub pair_id: i64,
    pub service_city_pair_id: i64,
    pub professional_id_1: Option<i64>,
    pub professional_id_2: Option<i64>,
}

impl From<ProfessionalPairRow> for ProfessionalPair {
    fn from(row: ProfessionalPairRow) -> Self {
        Self {
            pair_id: row.pair_id,
            service_city_pair_id: row.service_city_pair_id,
            professional_id_1: row.professional_id_1,
            professional_id_2: row.professional_id_2,
        }
    }
}

/// Diesel Queryable struct for lead rows.
///
/// `status` is stored as text and decoded on conversion.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leads)]
pub struct LeadRow {
    pub lead_id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub state_id: i64,
    pub city_id: i64,
    pub description: String,
    pub status: String,
    pub pair_id: Option<i64>,
    pub created_at: String,
}

impl TryFrom<LeadRow> for Lead {
    type Error = PersistenceError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let status: LeadStatus = LeadStatus::from_str(&row.status).map_err(|e| {
            PersistenceError::CorruptRow(format!("lead {}: {e}", row.lead_id))
        })?;

        Ok(Self {
            lead_id: row.lead_id,
            customer_id: row.customer_id,
            service_id: row.service_id,
            state_id: row.state_id,
            city_id: row.city_id,
            description: row.description,
            status,
            pair_id: row.pair_id,
            created_at: row.created_at,
        })
    }
}

/// A lead together with the assignment decision that placed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLead {
    pub lead: Lead,
    pub assignment: PairAssignment,
}

/// A service/city pairing with the names needed for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCityPairListing {
    pub service_city_pair_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub city_id: i64,
    pub city_name: String,
    /// The city's default state, if the city is linked to one.
    pub state: Option<State>,
}

/// A professional as shown inside a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMember {
    pub professional_id: i64,
    pub name: String,
}

/// A professional pair with its members resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosteredPair {
    pub pair: ProfessionalPair,
    pub members: Vec<PairMember>,
}

/// Every pair registered under a service/city pairing, in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRoster {
    pub service_city_pair: ServiceCityPair,
    /// The city's default state, if the city is linked to one.
    pub state_id: Option<i64>,
    pub pairs: Vec<RosteredPair>,
}

/// Optional bounds for lead reports.
///
/// Both dates are inclusive and compared against the UTC creation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadReportFilter {
    /// Only leads for this service, and only pairs registered under its
    /// pairings.
    pub service_id: Option<i64>,
    pub created_from: Option<time::Date>,
    pub created_to: Option<time::Date>,
}

impl LeadReportFilter {
    /// Lower bound on the stored RFC 3339 `created_at` text.
    pub(crate) fn created_at_floor(&self) -> Option<String> {
        self.created_from.map(|date| date.to_string())
    }

    /// Exclusive upper bound: the day after `created_to`.
    pub(crate) fn created_at_ceiling(&self) -> Option<String> {
        self.created_to
            .and_then(time::Date::next_day)
            .map(|date| date.to_string())
    }
}

/// Leads held by one professional pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairUtilization {
    pub pair: ProfessionalPair,
    pub leads_assigned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusCount {
    pub status: LeadStatus,
    pub count: u64,
}
