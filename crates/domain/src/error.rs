// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name field (service, city, state, professional, customer) is invalid.
    InvalidName {
        /// The kind of entity being named.
        entity: &'static str,
        /// Why the name was rejected.
        reason: String,
    },
    /// An email address is malformed.
    InvalidEmail(String),
    /// A lead description is empty or too long.
    InvalidDescription(String),
    /// A lead status string is not recognized.
    InvalidLeadStatus(String),
    /// The two members of a professional pair are invalid.
    InvalidPairMembers(String),
    /// No service/city pairing exists for the requested combination.
    ServiceCityPairNotConfigured {
        /// The requested service.
        service_id: i64,
        /// The requested city.
        city_id: i64,
    },
    /// Fewer than two professional pairs are registered for a service/city pairing.
    ProfessionalPairsNotConfigured {
        /// The service/city pairing being assigned.
        service_city_pair_id: i64,
        /// How many professional pairs were found.
        found: usize,
    },
    /// The city is not associated with any state.
    CityHasNoState {
        /// The city identifier.
        city_id: i64,
    },
    /// The city is not associated with the claimed state.
    CityNotInState {
        /// The city identifier.
        city_id: i64,
        /// The claimed state identifier.
        state_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { entity, reason } => write!(f, "Invalid {entity} name: {reason}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidLeadStatus(status) => {
                write!(
                    f,
                    "Invalid lead status: '{status}'. Must be 'normal' or 'urgent'"
                )
            }
            Self::InvalidPairMembers(msg) => write!(f, "Invalid professional pair: {msg}"),
            Self::ServiceCityPairNotConfigured {
                service_id,
                city_id,
            } => {
                write!(
                    f,
                    "No pairing configured for service {service_id} in city {city_id}"
                )
            }
            Self::ProfessionalPairsNotConfigured {
                service_city_pair_id,
                found,
            } => {
                write!(
                    f,
                    "Fewer than two professional pairs configured for service/city pairing \
                     {service_city_pair_id} (found {found})"
                )
            }
            Self::CityHasNoState { city_id } => {
                write!(
                    f,
                    "City {city_id} is not associated with any state; state_id is required"
                )
            }
            Self::CityNotInState { city_id, state_id } => {
                write!(f, "City {city_id} does not belong to state {state_id}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
