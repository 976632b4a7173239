// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Binds the assignment engine's storage seam to a Diesel connection.
//!
//! A `LedgerStore` borrows the connection of an open assignment transaction,
//! so every engine read and the lock run inside that transaction.

use diesel::{MysqlConnection, SqliteConnection};
use protown::{AssignmentStore, LockOutcome};
use protown_domain::{ProfessionalPair, ServiceCityPair};

use crate::backend::PersistenceBackend;
use crate::error::PersistenceError;

/// Engine storage backed by a connection inside an assignment transaction.
pub struct LedgerStore<'a, C> {
    conn: &'a mut C,
}

impl<'a, C> LedgerStore<'a, C> {
    pub const fn new(conn: &'a mut C) -> Self {
        Self { conn }
    }
}

macro_rules! ledger_store_impl {
    ($conn_ty:ty, $suffix:ident) => {
        pastey::paste! {
            impl AssignmentStore for LedgerStore<'_, $conn_ty> {
                type Error = PersistenceError;

                fn find_service_city_pair(
                    &mut self,
                    service_id: i64,
                    city_id: i64,
                ) -> Result<Option<ServiceCityPair>, PersistenceError> {
                    crate::queries::catalog::[<find_service_city_pair_ $suffix>](
                        self.conn, service_id, city_id,
                    )
                }

                fn list_professional_pairs(
                    &mut self,
                    service_city_pair_id: i64,
                ) -> Result<Vec<ProfessionalPair>, PersistenceError> {
                    crate::queries::pairs::[<list_professional_pairs_ $suffix>](
                        self.conn,
                        service_city_pair_id,
                    )
                }

                fn lock_service_city_pair(
                    &mut self,
                    service_city_pair_id: i64,
                ) -> Result<LockOutcome, PersistenceError> {
                    self.conn.acquire_assignment_lock(service_city_pair_id)
                }

                fn count_leads_for_pairs(
                    &mut self,
                    pair_ids: &[i64],
                ) -> Result<u64, PersistenceError> {
                    crate::queries::leads::[<count_leads_for_pairs_ $suffix>](self.conn, pair_ids)
                }
            }
        }
    };
}

ledger_store_impl!(SqliteConnection, sqlite);
ledger_store_impl!(MysqlConnection, mysql);
