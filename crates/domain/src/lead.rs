// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of a lead description, in characters.
pub const MAX_LEAD_DESCRIPTION_LEN: usize = 900;

/// Urgency of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    Normal,
    Urgent,
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidLeadStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LeadStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

/// A trimmed, non-empty lead description of at most 900 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDescription(String);

impl LeadDescription {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDescription` if the trimmed text is empty
    /// or longer than 900 characters.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidDescription(String::from(
                "description cannot be empty",
            )));
        }

        let len: usize = trimmed.chars().count();
        if len > MAX_LEAD_DESCRIPTION_LEN {
            return Err(DomainError::InvalidDescription(format!(
                "must be at most {MAX_LEAD_DESCRIPTION_LEN} characters, got {len}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A lead ready to be recorded.
///
/// Carries no pair: the pair is chosen by the assignment engine at insert
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub customer_id: i64,
    pub service_id: i64,
    pub state_id: i64,
    pub city_id: i64,
    pub description: LeadDescription,
    pub status: LeadStatus,
}

/// A recorded lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub lead_id: i64,
    pub customer_id: i64,
    pub service_id: i64,
    pub state_id: i64,
    pub city_id: i64,
    pub description: String,
    pub status: LeadStatus,
    /// Always set by the assignment path; the column itself is nullable.
    pub pair_id: Option<i64>,
    pub created_at: String,
}
