// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the lead marketplace.
//!
//! Handlers take an open [`Persistence`](protown_persistence::Persistence),
//! the request DTO, and the authenticated actor. They enforce roles,
//! translate domain and persistence errors into [`ApiError`], and return
//! response DTOs with every referenced entity resolved to a name.
//! Transport concerns such as HTTP status codes live in the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_city, create_customer, create_lead, create_professional, create_professional_pair,
    create_service, create_service_city_pair, create_state, delete_lead, delete_professional_pair,
    get_lead, get_pair_roster, get_professional_pair, lead_status_breakdown, link_city_to_state,
    list_cities, list_leads, list_professional_pairs, list_service_city_pairs, list_services,
    list_states, pair_utilization, preview_next_pair, set_professional_verification,
    update_lead_status,
};
pub use request_response::{
    CatalogEntryInfo, CreateCatalogEntryRequest, CreateCustomerRequest, CreateLeadRequest,
    CreateProfessionalPairRequest, CreateProfessionalRequest, CreateServiceCityPairRequest,
    CustomerInfo, DeleteLeadResponse, DeleteProfessionalPairResponse, LeadPairInfo,
    LeadReportRequest, LeadResponse, LeadStatusBreakdownResponse, LeadStatusCountInfo,
    LinkCityToStateRequest, ListCitiesResponse, ListLeadsResponse, ListProfessionalPairsResponse,
    ListServiceCityPairsResponse, ListServicesResponse, ListStatesResponse, NamedRef,
    NextPairResponse, PairRosterResponse, PairUtilizationInfo, PairUtilizationResponse,
    ProfessionalInfo, ProfessionalPairInfo, ServiceCityPairInfo,
    SetProfessionalVerificationRequest, StateCityPairInfo, UpdateLeadStatusRequest,
};
