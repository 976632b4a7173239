// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::collections::BTreeMap;
use std::str::FromStr;

use protown::PairAssignment;
use protown_domain::{
    CatalogName, City, Customer, DomainError, Lead, LeadDescription, LeadStatus, NewCustomer,
    NewLead, NewProfessional, PairSlots, Professional, ProfessionalPair, Service, ServiceCityPair,
    State, StateCityPair, validate_pair_members,
};
use protown_persistence::{
    LeadReportFilter, PairRoster, PairUtilization, Persistence, RecordedLead, RosteredPair,
    ServiceCityPairListing,
};
use time::Date;
use time::macros::format_description;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
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

// ============================================================================
// Lookup helpers
// ============================================================================

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

fn require_service(persistence: &mut Persistence, service_id: i64) -> Result<Service, ApiError> {
    persistence
        .get_service(service_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Service", format!("Service {service_id} does not exist")))
}

fn require_city(persistence: &mut Persistence, city_id: i64) -> Result<City, ApiError> {
    persistence
        .get_city(city_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("City", format!("City {city_id} does not exist")))
}

fn require_state(persistence: &mut Persistence, state_id: i64) -> Result<State, ApiError> {
    persistence
        .get_state(state_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("State", format!("State {state_id} does not exist")))
}

fn require_customer(persistence: &mut Persistence, customer_id: i64) -> Result<Customer, ApiError> {
    persistence
        .get_customer(customer_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Customer", format!("Customer {customer_id} does not exist")))
}

fn require_professional(
    persistence: &mut Persistence,
    professional_id: i64,
) -> Result<Professional, ApiError> {
    persistence
        .get_professional(professional_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Professional",
                format!("Professional {professional_id} does not exist"),
            )
        })
}

fn require_service_city_pair(
    persistence: &mut Persistence,
    service_city_pair_id: i64,
) -> Result<ServiceCityPair, ApiError> {
    persistence
        .get_service_city_pair(service_city_pair_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Service/city pairing",
                format!("Service/city pairing {service_city_pair_id} does not exist"),
            )
        })
}

fn catalog_name(entity: &'static str, raw: &str) -> Result<CatalogName, ApiError> {
    CatalogName::new(entity, raw).map_err(translate_domain_error)
}

fn professional_info(professional: Professional) -> ProfessionalInfo {
    ProfessionalInfo {
        professional_id: professional.professional_id,
        name: professional.name,
        email: professional.email,
        phone_number: professional.phone_number,
        business_name: professional.business_name,
        service_id: professional.service_id,
        state_id: professional.state_id,
        city_id: professional.city_id,
        verified: professional.verified,
        created_at: professional.created_at,
    }
}

fn rostered_pair_info(rostered: RosteredPair) -> ProfessionalPairInfo {
    let quantity: usize = rostered.pair.quantity();
    ProfessionalPairInfo {
        pair_id: rostered.pair.pair_id,
        service_city_pair_id: rostered.pair.service_city_pair_id,
        professionals: rostered
            .members
            .into_iter()
            .map(|member| NamedRef {
                id: member.professional_id,
                name: member.name,
            })
            .collect(),
        quantity,
    }
}

/// Resolves the names of a pair's members.
fn pair_members(
    persistence: &mut Persistence,
    pair: &ProfessionalPair,
) -> Result<Vec<NamedRef>, ApiError> {
    pair.member_ids()
        .map(|professional_id| {
            require_professional(persistence, professional_id).map(|professional| NamedRef {
                id: professional.professional_id,
                name: professional.name,
            })
        })
        .collect()
}

/// Builds the enriched lead response.
///
/// Every referenced row is protected by a foreign key, so a missing one is
/// reported as an internal error.
fn enrich_lead(persistence: &mut Persistence, lead: Lead) -> Result<LeadResponse, ApiError> {
    let dangling = |what: &str, id: i64| ApiError::Internal {
        message: format!("Lead {} references missing {what} {id}", lead.lead_id),
    };

    let customer: Customer = persistence
        .get_customer(lead.customer_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| dangling("customer", lead.customer_id))?;
    let service: Service = persistence
        .get_service(lead.service_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| dangling("service", lead.service_id))?;
    let state: State = persistence
        .get_state(lead.state_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| dangling("state", lead.state_id))?;
    let city: City = persistence
        .get_city(lead.city_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| dangling("city", lead.city_id))?;

    let pair: Option<LeadPairInfo> = match lead.pair_id {
        Some(pair_id) => {
            let pair: ProfessionalPair = persistence
                .get_professional_pair(pair_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| dangling("pair", pair_id))?;
            Some(LeadPairInfo {
                id: pair.pair_id,
                professionals: pair_members(persistence, &pair)?,
                quantity: pair.quantity(),
            })
        }
        None => None,
    };

    Ok(LeadResponse {
        lead_id: lead.lead_id,
        customer: NamedRef {
            id: customer.customer_id,
            name: customer.display_name(),
        },
        service: NamedRef {
            id: service.service_id,
            name: service.name,
        },
        state: NamedRef {
            id: state.state_id,
            name: state.name,
        },
        city: NamedRef {
            id: city.city_id,
            name: city.name,
        },
        description: lead.description,
        status: lead.status.as_str().to_string(),
        pair,
        created_at: lead.created_at,
    })
}

/// Whether the actor may see the lead.
fn lead_visible_to(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    lead: &Lead,
) -> Result<bool, ApiError> {
    match authenticated_actor.role {
        Role::Admin => Ok(true),
        Role::Customer => Ok(lead.customer_id == authenticated_actor.id),
        Role::Professional => match lead.pair_id {
            Some(pair_id) => Ok(persistence
                .get_professional_pair(pair_id)
                .map_err(translate_persistence_error)?
                .is_some_and(|pair| pair.contains(authenticated_actor.id))),
            None => Ok(false),
        },
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Creates a service.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The name is invalid
/// - A service with the same name exists
pub fn create_service(
    persistence: &mut Persistence,
    request: &CreateCatalogEntryRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CatalogEntryInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_service")?;
    let name: CatalogName = catalog_name("service", &request.name)?;

    let service: Service = persistence
        .create_service(&name)
        .map_err(translate_persistence_error)?;

    Ok(CatalogEntryInfo {
        id: service.service_id,
        name: service.name,
    })
}

/// Lists every service. Requires no authorization.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_services(persistence: &mut Persistence) -> Result<ListServicesResponse, ApiError> {
    let services: Vec<Service> = persistence
        .list_services()
        .map_err(translate_persistence_error)?;

    Ok(ListServicesResponse {
        services: services
            .into_iter()
            .map(|service| CatalogEntryInfo {
                id: service.service_id,
                name: service.name,
            })
            .collect(),
    })
}

/// Creates a city.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the name is invalid, or
/// the city exists.
pub fn create_city(
    persistence: &mut Persistence,
    request: &CreateCatalogEntryRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CatalogEntryInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_city")?;
    let name: CatalogName = catalog_name("city", &request.name)?;

    let city: City = persistence
        .create_city(&name)
        .map_err(translate_persistence_error)?;

    Ok(CatalogEntryInfo {
        id: city.city_id,
        name: city.name,
    })
}

/// Lists every city. Requires no authorization.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_cities(persistence: &mut Persistence) -> Result<ListCitiesResponse, ApiError> {
    let cities: Vec<City> = persistence
        .list_cities()
        .map_err(translate_persistence_error)?;

    Ok(ListCitiesResponse {
        cities: cities
            .into_iter()
            .map(|city| CatalogEntryInfo {
                id: city.city_id,
                name: city.name,
            })
            .collect(),
    })
}

/// Creates a state.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the name is invalid, or
/// the state exists.
pub fn create_state(
    persistence: &mut Persistence,
    request: &CreateCatalogEntryRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CatalogEntryInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_state")?;
    let name: CatalogName = catalog_name("state", &request.name)?;

    let state: State = persistence
        .create_state(&name)
        .map_err(translate_persistence_error)?;

    Ok(CatalogEntryInfo {
        id: state.state_id,
        name: state.name,
    })
}

/// Lists every state. Requires no authorization.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_states(persistence: &mut Persistence) -> Result<ListStatesResponse, ApiError> {
    let states: Vec<State> = persistence
        .list_states()
        .map_err(translate_persistence_error)?;

    Ok(ListStatesResponse {
        states: states
            .into_iter()
            .map(|state| CatalogEntryInfo {
                id: state.state_id,
                name: state.name,
            })
            .collect(),
    })
}

/// Associates a city with a state.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The state or city does not exist
/// - The association exists
pub fn link_city_to_state(
    persistence: &mut Persistence,
    request: &LinkCityToStateRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<StateCityPairInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "link_city_to_state")?;
    require_state(persistence, request.state_id)?;
    require_city(persistence, request.city_id)?;

    let link: StateCityPair = persistence
        .link_city_to_state(request.state_id, request.city_id)
        .map_err(translate_persistence_error)?;

    Ok(StateCityPairInfo {
        state_city_pair_id: link.state_city_pair_id,
        state_id: link.state_id,
        city_id: link.city_id,
    })
}

/// Offers a service in a city.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The service or city does not exist
/// - The service is already offered in the city
pub fn create_service_city_pair(
    persistence: &mut Persistence,
    request: &CreateServiceCityPairRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ServiceCityPairInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_service_city_pair")?;
    let service: Service = require_service(persistence, request.service_id)?;
    let city: City = require_city(persistence, request.city_id)?;

    let pairing: ServiceCityPair = persistence
        .create_service_city_pair(service.service_id, city.city_id)
        .map_err(translate_persistence_error)?;

    let state: Option<NamedRef> = match persistence
        .find_state_for_city(city.city_id)
        .map_err(translate_persistence_error)?
    {
        Some(state_id) => {
            let state: State = require_state(persistence, state_id)?;
            Some(NamedRef {
                id: state.state_id,
                name: state.name,
            })
        }
        None => None,
    };

    Ok(ServiceCityPairInfo {
        service_city_pair_id: pairing.service_city_pair_id,
        service: NamedRef {
            id: service.service_id,
            name: service.name,
        },
        city: NamedRef {
            id: city.city_id,
            name: city.name,
        },
        state,
    })
}

/// Lists every service/city pairing with names. Requires no authorization.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_service_city_pairs(
    persistence: &mut Persistence,
) -> Result<ListServiceCityPairsResponse, ApiError> {
    let listings: Vec<ServiceCityPairListing> = persistence
        .list_service_city_pairs()
        .map_err(translate_persistence_error)?;

    Ok(ListServiceCityPairsResponse {
        service_city_pairs: listings
            .into_iter()
            .map(|listing| ServiceCityPairInfo {
                service_city_pair_id: listing.service_city_pair_id,
                service: NamedRef {
                    id: listing.service_id,
                    name: listing.service_name,
                },
                city: NamedRef {
                    id: listing.city_id,
                    name: listing.city_name,
                },
                state: listing.state.map(|state| NamedRef {
                    id: state.state_id,
                    name: state.name,
                }),
            })
            .collect(),
    })
}

// ============================================================================
// Pair Registry
// ============================================================================

/// Returns every pair registered under a service/city pairing, marking which
/// two take part in the rotation.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the pairing does not
/// exist.
pub fn get_pair_roster(
    persistence: &mut Persistence,
    service_city_pair_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<PairRosterResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "get_pair_roster")?;
    require_service_city_pair(persistence, service_city_pair_id)?;

    let roster: PairRoster = persistence
        .get_pair_roster(service_city_pair_id)
        .map_err(translate_persistence_error)?;

    let registered: Vec<ProfessionalPair> =
        roster.pairs.iter().map(|rostered| rostered.pair).collect();

    // Below two pairs nothing rotates, so nothing is reported as ignored.
    let (rotation_pair_ids, ignored_pair_ids): (Vec<i64>, Vec<i64>) =
        match PairSlots::from_registered(service_city_pair_id, registered) {
            Ok(slots) => {
                let rotation: Vec<i64> = slots.pair_ids().to_vec();
                let ignored: Vec<i64> = roster
                    .pairs
                    .iter()
                    .map(|rostered| rostered.pair.pair_id)
                    .filter(|pair_id| !rotation.contains(pair_id))
                    .collect();
                (rotation, ignored)
            }
            Err(_) => (Vec::new(), Vec::new()),
        };

    Ok(PairRosterResponse {
        service_city_pair_id,
        service_id: roster.service_city_pair.service_id,
        city_id: roster.service_city_pair.city_id,
        state_id: roster.state_id,
        pairs: roster.pairs.into_iter().map(rostered_pair_info).collect(),
        rotation_pair_ids,
        ignored_pair_ids,
    })
}

/// Reports which pair the next lead for a service/city pairing would
/// receive, without recording anything.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the pairing does not
/// exist, or it has fewer than two pairs.
pub fn preview_next_pair(
    persistence: &mut Persistence,
    service_city_pair_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<NextPairResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "preview_next_pair")?;
    let pairing: ServiceCityPair = require_service_city_pair(persistence, service_city_pair_id)?;

    let assignment: PairAssignment = persistence
        .preview_assignment(pairing.service_id, pairing.city_id)
        .map_err(translate_persistence_error)?;

    Ok(NextPairResponse {
        service_city_pair_id: assignment.service_city_pair_id,
        pair_id: assignment.pair_id,
        slot: assignment.slot.to_string(),
        prior_count: assignment.prior_count,
    })
}

/// Registers a professional pair under a service/city pairing.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - Both slots name the same professional
/// - The pairing or a named professional does not exist
pub fn create_professional_pair(
    persistence: &mut Persistence,
    request: &CreateProfessionalPairRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProfessionalPairInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_professional_pair")?;
    validate_pair_members(request.professional_id_1, request.professional_id_2)
        .map_err(translate_domain_error)?;
    require_service_city_pair(persistence, request.service_city_pair_id)?;

    let pair: ProfessionalPair = persistence
        .create_professional_pair(
            request.service_city_pair_id,
            request.professional_id_1,
            request.professional_id_2,
        )
        .map_err(translate_persistence_error)?;

    Ok(ProfessionalPairInfo {
        pair_id: pair.pair_id,
        service_city_pair_id: pair.service_city_pair_id,
        professionals: pair_members(persistence, &pair)?,
        quantity: pair.quantity(),
    })
}

/// Deletes a professional pair that no lead references.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the pair does not exist,
/// or leads reference it.
pub fn delete_professional_pair(
    persistence: &mut Persistence,
    pair_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteProfessionalPairResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_professional_pair")?;

    persistence
        .delete_professional_pair(pair_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteProfessionalPairResponse {
        pair_id,
        message: format!("Professional pair {pair_id} deleted"),
    })
}

/// Returns one professional pair with its members' names.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the pair does not exist.
pub fn get_professional_pair(
    persistence: &mut Persistence,
    pair_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProfessionalPairInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "get_professional_pair")?;

    let pair: ProfessionalPair = persistence
        .get_professional_pair(pair_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Professional pair",
                format!("Professional pair with ID {pair_id} not found"),
            )
        })?;

    Ok(ProfessionalPairInfo {
        pair_id: pair.pair_id,
        service_city_pair_id: pair.service_city_pair_id,
        professionals: pair_members(persistence, &pair)?,
        quantity: pair.quantity(),
    })
}

/// Lists registered pairs in ascending ID order, either all of them or only
/// those under one service/city pairing.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the requested pairing
/// does not exist.
pub fn list_professional_pairs(
    persistence: &mut Persistence,
    service_city_pair_id: Option<i64>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListProfessionalPairsResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "list_professional_pairs")?;

    let pairs: Vec<ProfessionalPair> = match service_city_pair_id {
        Some(service_city_pair_id) => {
            require_service_city_pair(persistence, service_city_pair_id)?;
            persistence.list_professional_pairs(service_city_pair_id)
        }
        None => persistence.list_all_professional_pairs(),
    }
    .map_err(translate_persistence_error)?;

    let pairs: Vec<ProfessionalPairInfo> = pairs
        .into_iter()
        .map(|pair| {
            Ok(ProfessionalPairInfo {
                pair_id: pair.pair_id,
                service_city_pair_id: pair.service_city_pair_id,
                professionals: pair_members(persistence, &pair)?,
                quantity: pair.quantity(),
            })
        })
        .collect::<Result<_, ApiError>>()?;

    debug!(count = pairs.len(), "Listed professional pairs");
    Ok(ListProfessionalPairsResponse { pairs })
}

// ============================================================================
// Directory
// ============================================================================

/// Registers a professional.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The name or email is invalid
/// - A referenced service, state, or city does not exist
/// - The email is already registered
pub fn create_professional(
    persistence: &mut Persistence,
    request: &CreateProfessionalRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProfessionalInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_professional")?;

    let registration: NewProfessional = NewProfessional::new(
        &request.name,
        &request.email,
        request.phone_number.as_deref(),
        request.business_name.as_deref(),
        request.service_id,
        request.state_id,
        request.city_id,
    )
    .map_err(translate_domain_error)?;

    if let Some(service_id) = registration.service_id {
        require_service(persistence, service_id)?;
    }
    if let Some(state_id) = registration.state_id {
        require_state(persistence, state_id)?;
    }
    if let Some(city_id) = registration.city_id {
        require_city(persistence, city_id)?;
    }

    let professional: Professional = persistence
        .create_professional(&registration)
        .map_err(translate_persistence_error)?;

    Ok(professional_info(professional))
}

/// Marks a professional verified or unverified.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the professional does
/// not exist.
pub fn set_professional_verification(
    persistence: &mut Persistence,
    professional_id: i64,
    request: &SetProfessionalVerificationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProfessionalInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "set_professional_verification")?;
    require_professional(persistence, professional_id)?;

    let professional: Professional = persistence
        .set_professional_verified(professional_id, request.verified)
        .map_err(translate_persistence_error)?;

    Ok(professional_info(professional))
}

/// Registers a customer. Sign-up is open; no actor is required.
///
/// # Errors
///
/// Returns an error if a field is invalid or the email is already
/// registered.
pub fn create_customer(
    persistence: &mut Persistence,
    request: &CreateCustomerRequest,
) -> Result<CustomerInfo, ApiError> {
    let registration: NewCustomer = NewCustomer::new(
        &request.first_name,
        &request.last_name,
        &request.email,
        request.phone_number.as_deref(),
        request.address.as_deref(),
    )
    .map_err(translate_domain_error)?;

    let customer: Customer = persistence
        .create_customer(&registration)
        .map_err(translate_persistence_error)?;

    Ok(CustomerInfo {
        customer_id: customer.customer_id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        email: customer.email,
        phone_number: customer.phone_number,
        address: customer.address,
        created_at: customer.created_at,
    })
}

// ============================================================================
// Leads
// ============================================================================

/// Resolves the state a lead is filed under.
///
/// An explicit state must exist and contain the city. Without one, the
/// city's default state is used.
fn resolve_lead_state(
    persistence: &mut Persistence,
    city_id: i64,
    requested_state_id: Option<i64>,
) -> Result<i64, ApiError> {
    if let Some(state_id) = requested_state_id {
        require_state(persistence, state_id)?;
        let linked: bool = persistence
            .is_city_in_state(city_id, state_id)
            .map_err(translate_persistence_error)?;
        if !linked {
            return Err(translate_domain_error(DomainError::CityNotInState {
                city_id,
                state_id,
            }));
        }
        return Ok(state_id);
    }

    let default_state: Option<i64> = persistence
        .find_state_for_city(city_id)
        .map_err(translate_persistence_error)?;
    debug!(city_id, ?default_state, "Resolved default state for lead");

    default_state.ok_or_else(|| translate_domain_error(DomainError::CityHasNoState { city_id }))
}

/// Submits a lead for the authenticated customer.
///
/// Validation runs in this order: the actor is an existing customer, the
/// service exists, the city exists, the state resolves, the description and
/// status are valid. The pair is then chosen and the lead recorded in one
/// assignment transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a customer, or the customer does not exist
/// - The service, city, or state does not exist
/// - The city is not in the given state, or has no state and none was given
/// - The description or status is invalid
/// - The service is not paired with the city, or the pairing has fewer than
///   two professional pairs
pub fn create_lead(
    persistence: &mut Persistence,
    request: &CreateLeadRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LeadResponse, ApiError> {
    AuthorizationService::authorize_create_lead(authenticated_actor)?;
    let customer: Customer = require_customer(persistence, authenticated_actor.id)?;
    let service: Service = require_service(persistence, request.service_id)?;
    let city: City = require_city(persistence, request.city_id)?;
    let state_id: i64 = resolve_lead_state(persistence, city.city_id, request.state_id)?;

    let description: LeadDescription =
        LeadDescription::new(&request.description).map_err(translate_domain_error)?;
    let status: LeadStatus = match request.status.as_deref() {
        Some(raw) => LeadStatus::from_str(raw).map_err(translate_domain_error)?,
        None => LeadStatus::default(),
    };

    let new_lead: NewLead = NewLead {
        customer_id: customer.customer_id,
        service_id: service.service_id,
        state_id,
        city_id: city.city_id,
        description,
        status,
    };

    let recorded: RecordedLead = persistence
        .create_lead(&new_lead)
        .map_err(translate_persistence_error)?;
    info!(
        lead_id = recorded.lead.lead_id,
        pair_id = recorded.assignment.pair_id,
        lock = %recorded.assignment.lock,
        "Lead submitted"
    );

    enrich_lead(persistence, recorded.lead)
}

/// Lists the leads the actor may see: all of them for admins, their own for
/// customers, and those assigned to their pairs for professionals.
///
/// # Errors
///
/// Returns an error if the professional or customer does not exist or a
/// query fails.
pub fn list_leads(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListLeadsResponse, ApiError> {
    let leads: Vec<Lead> = match authenticated_actor.role {
        Role::Admin => persistence.list_leads(),
        Role::Customer => {
            require_customer(persistence, authenticated_actor.id)?;
            persistence.list_leads_for_customer(authenticated_actor.id)
        }
        Role::Professional => {
            require_professional(persistence, authenticated_actor.id)?;
            persistence.list_leads_for_professional(authenticated_actor.id)
        }
    }
    .map_err(translate_persistence_error)?;

    let mut enriched: Vec<LeadResponse> = Vec::with_capacity(leads.len());
    for lead in leads {
        enriched.push(enrich_lead(persistence, lead)?);
    }

    Ok(ListLeadsResponse { leads: enriched })
}

/// Retrieves a lead the actor may see.
///
/// Leads the actor may not see are reported as not found.
///
/// # Errors
///
/// Returns an error if the lead does not exist or is not visible to the
/// actor.
pub fn get_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LeadResponse, ApiError> {
    let missing = || not_found("Lead", format!("Lead {lead_id} does not exist"));

    let Some(lead) = persistence
        .get_lead(lead_id)
        .map_err(translate_persistence_error)?
    else {
        return Err(missing());
    };
    if !lead_visible_to(persistence, authenticated_actor, &lead)? {
        return Err(missing());
    }

    enrich_lead(persistence, lead)
}

/// Changes a lead's status. The assigned pair never changes.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the status is invalid,
/// or the lead does not exist.
pub fn update_lead_status(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &UpdateLeadStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LeadResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "update_lead_status")?;
    let status: LeadStatus = LeadStatus::from_str(&request.status).map_err(translate_domain_error)?;

    let lead: Lead = persistence
        .update_lead_status(lead_id, status)
        .map_err(translate_persistence_error)?;

    enrich_lead(persistence, lead)
}

/// Deletes a lead.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the lead does not exist.
pub fn delete_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteLeadResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_lead")?;

    persistence
        .delete_lead(lead_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteLeadResponse {
        lead_id,
        message: format!("Lead {lead_id} deleted"),
    })
}

// ============================================================================
// Reports
// ============================================================================

fn parse_report_date(field: &str, raw: Option<&str>) -> Result<Option<Date>, ApiError> {
    raw.map(|raw| {
        Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
            ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
            }
        })
    })
    .transpose()
}

/// Validates a report request into a persistence filter.
fn report_filter(
    persistence: &mut Persistence,
    request: &LeadReportRequest,
) -> Result<LeadReportFilter, ApiError> {
    let created_from: Option<Date> = parse_report_date("date_from", request.date_from.as_deref())?;
    let created_to: Option<Date> = parse_report_date("date_to", request.date_to.as_deref())?;
    if created_from
        .zip(created_to)
        .is_some_and(|(from, to)| from > to)
    {
        return Err(ApiError::InvalidInput {
            field: String::from("date_to"),
            message: String::from("date_to must not be before date_from"),
        });
    }
    if let Some(service_id) = request.service_id {
        require_service(persistence, service_id)?;
    }

    Ok(LeadReportFilter {
        service_id: request.service_id,
        created_from,
        created_to,
    })
}

/// Reports how many leads each professional pair holds, highest first.
///
/// Pairs outside the rotation are listed too, so an admin can confirm they
/// receive nothing.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a date is malformed or the
/// range is inverted, or the service does not exist.
pub fn pair_utilization(
    persistence: &mut Persistence,
    request: &LeadReportRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<PairUtilizationResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "pair_utilization")?;
    let filter: LeadReportFilter = report_filter(persistence, request)?;

    let utilization: Vec<PairUtilization> = persistence
        .pair_utilization(&filter)
        .map_err(translate_persistence_error)?;

    // The two lowest pair IDs of each pairing are the rotating ones.
    let mut by_pairing: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for entry in &utilization {
        by_pairing
            .entry(entry.pair.service_city_pair_id)
            .or_default()
            .push(entry.pair.pair_id);
    }
    for pair_ids in by_pairing.values_mut() {
        pair_ids.sort_unstable();
        pair_ids.truncate(2);
    }
    let rotating: Vec<i64> = by_pairing
        .into_values()
        .filter(|pair_ids| pair_ids.len() == 2)
        .flatten()
        .collect();

    let pairs: Vec<PairUtilizationInfo> = utilization
        .into_iter()
        .map(|entry| PairUtilizationInfo {
            pair_id: entry.pair.pair_id,
            service_city_pair_id: entry.pair.service_city_pair_id,
            professional_id_1: entry.pair.professional_id_1,
            professional_id_2: entry.pair.professional_id_2,
            leads_assigned: entry.leads_assigned,
            in_rotation: rotating.contains(&entry.pair.pair_id),
        })
        .collect();

    info!(
        actor_id = authenticated_actor.id,
        pairs = pairs.len(),
        "Reported pair utilization"
    );
    Ok(PairUtilizationResponse { pairs })
}

/// Counts leads per status.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a date is malformed or the
/// range is inverted, or the service does not exist.
pub fn lead_status_breakdown(
    persistence: &mut Persistence,
    request: &LeadReportRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LeadStatusBreakdownResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "lead_status_breakdown")?;
    let filter: LeadReportFilter = report_filter(persistence, request)?;

    let statuses: Vec<LeadStatusCountInfo> = persistence
        .lead_status_breakdown(&filter)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|entry| LeadStatusCountInfo {
            status: entry.status.as_str().to_string(),
            count: entry.count,
        })
        .collect();

    Ok(LeadStatusBreakdownResponse { statuses })
}
