// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Minimum length of a catalog name (service, city, state).
pub const MIN_CATALOG_NAME_LEN: usize = 2;

/// Maximum length of a catalog name (service, city, state).
pub const MAX_CATALOG_NAME_LEN: usize = 100;

/// Maximum length of a person or business name.
pub const MAX_PERSON_NAME_LEN: usize = 150;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 150;

/// Trims a name and checks its length in characters.
///
/// # Arguments
///
/// * `entity` - The kind of entity being named (used in the error)
/// * `raw` - The raw input
/// * `min` - Minimum number of characters after trimming
/// * `max` - Maximum number of characters after trimming
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the trimmed name is shorter than
/// `min` or longer than `max`.
pub fn validate_name(
    entity: &'static str,
    raw: &str,
    min: usize,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed: &str = raw.trim();
    let len: usize = trimmed.chars().count();

    if len < min {
        return Err(DomainError::InvalidName {
            entity,
            reason: format!("must be at least {min} characters"),
        });
    }
    if len > max {
        return Err(DomainError::InvalidName {
            entity,
            reason: format!("must be at most {max} characters, got {len}"),
        });
    }

    Ok(trimmed.to_string())
}

/// Validates and normalizes an email address to lowercase.
///
/// Only structural checks are made: a single `@`, a non-empty local part,
/// and a domain containing a dot.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed or too long.
pub fn validate_email(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.trim().to_lowercase();

    if normalized.chars().count() > MAX_EMAIL_LEN {
        return Err(DomainError::InvalidEmail(format!(
            "must be at most {MAX_EMAIL_LEN} characters"
        )));
    }

    let Some((local, domain)) = normalized.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{normalized}' is missing '@'"
        )));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{normalized}' is not a valid address"
        )));
    }

    let domain_ok: bool = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if !domain_ok {
        return Err(DomainError::InvalidEmail(format!(
            "'{normalized}' has an invalid domain"
        )));
    }

    Ok(normalized)
}

/// Normalizes an optional free-text field: blank becomes `None`.
#[must_use]
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
