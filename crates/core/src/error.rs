// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use protown_domain::DomainError;

/// Errors that can occur while choosing a pair for a lead.
///
/// `E` is the storage error of the [`AssignmentStore`](crate::AssignmentStore)
/// in use; it is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError<E> {
    /// A domain rule was violated (missing pairing, too few pairs).
    DomainViolation(DomainError),
    /// The underlying store failed.
    Store(E),
}

impl<E: std::fmt::Display> std::fmt::Display for CoreError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for CoreError<E> {}

impl<E> From<DomainError> for CoreError<E> {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
