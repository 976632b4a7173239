// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod directory;
mod error;
mod lead;
mod pairing;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogName, City, Service, ServiceCityPair, State, StateCityPair};
pub use directory::{Customer, NewCustomer, NewProfessional, Professional};
pub use error::DomainError;
pub use lead::{Lead, LeadDescription, LeadStatus, MAX_LEAD_DESCRIPTION_LEN, NewLead};
pub use pairing::{PairSlots, ProfessionalPair, Slot, validate_pair_members};
pub use validation::{
    MAX_CATALOG_NAME_LEN, MAX_EMAIL_LEN, MAX_PERSON_NAME_LEN, MIN_CATALOG_NAME_LEN,
    normalize_optional, validate_email, validate_name,
};
