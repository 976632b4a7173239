// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// API request to create a service, city, or state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCatalogEntryRequest {
    pub name: String,
}

/// API request to associate a city with a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCityToStateRequest {
    pub state_id: i64,
    pub city_id: i64,
}

/// API request to offer a service in a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateServiceCityPairRequest {
    pub service_id: i64,
    pub city_id: i64,
}

/// API request to register a professional pair.
///
/// Either member may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateProfessionalPairRequest {
    pub service_city_pair_id: i64,
    pub professional_id_1: Option<i64>,
    pub professional_id_2: Option<i64>,
}

/// API request to register a professional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub business_name: Option<String>,
    pub service_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetProfessionalVerificationRequest {
    pub verified: bool,
}

/// API request to register a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// API request to submit a lead.
///
/// The customer is always the authenticated actor and the pair is always
/// chosen by the assignment engine, so neither appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLeadRequest {
    pub service_id: i64,
    pub city_id: i64,
    /// When absent, the city's default state is used.
    pub state_id: Option<i64>,
    pub description: String,
    /// `normal` (default) or `urgent`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLeadStatusRequest {
    pub status: String,
}

/// API request bounding a lead report.
///
/// Dates are `YYYY-MM-DD` and inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadReportRequest {
    pub service_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// An identifier with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// A service, city, or state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServicesResponse {
    pub services: Vec<CatalogEntryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCitiesResponse {
    pub cities: Vec<CatalogEntryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatesResponse {
    pub states: Vec<CatalogEntryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCityPairInfo {
    pub state_city_pair_id: i64,
    pub state_id: i64,
    pub city_id: i64,
}

/// A service/city pairing with names and the city's default state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCityPairInfo {
    pub service_city_pair_id: i64,
    pub service: NamedRef,
    pub city: NamedRef,
    pub state: Option<NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServiceCityPairsResponse {
    pub service_city_pairs: Vec<ServiceCityPairInfo>,
}

/// A professional pair with its members resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalPairInfo {
    pub pair_id: i64,
    pub service_city_pair_id: i64,
    pub professionals: Vec<NamedRef>,
    /// Number of professionals in the pair (0, 1, or 2).
    pub quantity: usize,
}

/// Admin view of every pair under a service/city pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRosterResponse {
    pub service_city_pair_id: i64,
    pub service_id: i64,
    pub city_id: i64,
    pub state_id: Option<i64>,
    /// All pairs in ascending ID order.
    pub pairs: Vec<ProfessionalPairInfo>,
    /// The two pairs that take part in the rotation (empty if fewer than two).
    pub rotation_pair_ids: Vec<i64>,
    /// Registered pairs that never receive leads.
    pub ignored_pair_ids: Vec<i64>,
}

/// The pair the next lead for a service/city pairing would receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPairResponse {
    pub service_city_pair_id: i64,
    pub pair_id: i64,
    /// `A` or `B`.
    pub slot: String,
    /// Leads already held by the two rotation pairs.
    pub prior_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProfessionalPairsResponse {
    pub pairs: Vec<ProfessionalPairInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProfessionalPairResponse {
    pub pair_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    pub professional_id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub business_name: Option<String>,
    pub service_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
    pub verified: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

/// The pair a lead was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPairInfo {
    pub id: i64,
    pub professionals: Vec<NamedRef>,
    pub quantity: usize,
}

/// A lead enriched with the names of everything it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub lead_id: i64,
    pub customer: NamedRef,
    pub service: NamedRef,
    pub state: NamedRef,
    pub city: NamedRef,
    pub description: String,
    /// `normal` or `urgent`.
    pub status: String,
    pub pair: Option<LeadPairInfo>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLeadsResponse {
    pub leads: Vec<LeadResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLeadResponse {
    pub lead_id: i64,
    pub message: String,
}

/// Leads held by one professional pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairUtilizationInfo {
    pub pair_id: i64,
    pub service_city_pair_id: i64,
    pub professional_id_1: Option<i64>,
    pub professional_id_2: Option<i64>,
    pub leads_assigned: u64,
    /// Whether the pair is one of the two lowest IDs of its pairing, and so
    /// receives leads.
    pub in_rotation: bool,
}

/// Per-pair lead counts, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairUtilizationResponse {
    pub pairs: Vec<PairUtilizationInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusCountInfo {
    /// `normal` or `urgent`.
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusBreakdownResponse {
    pub statuses: Vec<LeadStatusCountInfo>,
}
