// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{MAX_PERSON_NAME_LEN, normalize_optional, validate_email, validate_name};
use serde::{Deserialize, Serialize};

/// A registered professional who can be placed in a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
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

/// A validated professional registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfessional {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub business_name: Option<String>,
    pub service_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
}

impl NewProfessional {
    /// Validates and normalizes a professional registration.
    ///
    /// The name is trimmed, the email lowercased, and blank optional text
    /// fields collapse to `None`. Newly registered professionals are unverified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` or `DomainError::InvalidEmail` if a
    /// field is rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        email: &str,
        phone_number: Option<&str>,
        business_name: Option<&str>,
        service_id: Option<i64>,
        state_id: Option<i64>,
        city_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validate_name("professional", name, 1, MAX_PERSON_NAME_LEN)?,
            email: validate_email(email)?,
            phone_number: normalize_optional(phone_number),
            business_name: normalize_optional(business_name),
            service_id,
            state_id,
            city_id,
        })
    }
}

/// A customer who submits leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

impl Customer {
    /// First and last name joined by a space.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A validated customer registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    /// Validates and normalizes a customer registration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidName` or `DomainError::InvalidEmail` if a
    /// field is rejected.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: Option<&str>,
        address: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: validate_name("customer first", first_name, 1, MAX_PERSON_NAME_LEN)?,
            last_name: validate_name("customer last", last_name, 1, MAX_PERSON_NAME_LEN)?,
            email: validate_email(email)?,
            phone_number: normalize_optional(phone_number),
            address: normalize_optional(address),
        })
    }
}
