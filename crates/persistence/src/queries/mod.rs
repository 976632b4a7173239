// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `catalog`: Services, cities, states, and their pairings
//! - `roster`: Professionals and customers
//! - `pairs`: Professional pair registry
//! - `leads`: Lead ledger reads and the assignment count
//! - `reports`: Per-pair utilization and status breakdown
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod catalog;
pub mod leads;
pub mod pairs;
pub mod reports;
pub mod roster;
