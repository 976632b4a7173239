// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Connection setup, migrations, and foreign key enforcement are also
//! exercised implicitly by every other persistence test.

use crate::Persistence;
use crate::backend::sqlite::BUSY_TIMEOUT_MS;
use crate::tests::catalog_name;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

#[derive(QueryableByName)]
struct BusyTimeoutRow {
    #[diesel(sql_type = BigInt)]
    timeout: i64,
}

#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

#[test]
fn test_persistence_initialization() {
    let result = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_service(&catalog_name("service", "Plumbing"))
        .unwrap();

    assert_eq!(db1.list_services().unwrap().len(), 1);
    assert!(db2.list_services().unwrap().is_empty());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_leads().unwrap().is_empty());
    assert!(persistence.list_service_city_pairs().unwrap().is_empty());
}

#[test]
fn test_foreign_key_enforcement_verified() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_busy_timeout_is_configured() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let crate::BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("expected SQLite");
    };

    let row: BusyTimeoutRow = diesel::sql_query("PRAGMA busy_timeout")
        .get_result(conn)
        .unwrap();
    assert_eq!(row.timeout, i64::from(BUSY_TIMEOUT_MS));
}

#[test]
fn test_file_database_uses_wal_and_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protown.db");

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .create_service(&catalog_name("service", "Roofing"))
            .unwrap();

        let crate::BackendConnection::Sqlite(conn) = &mut persistence.conn else {
            panic!("expected SQLite");
        };
        let row: JournalModeRow = diesel::sql_query("PRAGMA journal_mode")
            .get_result(conn)
            .unwrap();
        assert_eq!(row.journal_mode.to_lowercase(), "wal");
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let services = reopened.list_services().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "Roofing");
}
