// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Most mutations use Diesel DSL and are backend-agnostic, with minimal use of
//! backend-specific helpers abstracted via the `PersistenceBackend` trait.
//!
//! ## Module Organization
//!
//! - `catalog`: Services, cities, states, and their pairings
//! - `roster`: Professional and customer registration
//! - `pairs`: Professional pair registry
//! - `leads`: Lead creation through the assignment engine, status updates,
//!   and deletion

pub mod catalog;
pub mod leads;
pub mod pairs;
pub mod roster;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Current UTC time as an RFC 3339 string, used for `created_at` columns.
pub(crate) fn now_rfc3339() -> Result<String, PersistenceError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}
