// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A team of up to two professionals registered under a service/city pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalPair {
    pub pair_id: i64,
    pub service_city_pair_id: i64,
    pub professional_id_1: Option<i64>,
    pub professional_id_2: Option<i64>,
}

impl ProfessionalPair {
    /// Identifiers of the professionals present in this pair.
    pub fn member_ids(&self) -> impl Iterator<Item = i64> {
        self.professional_id_1
            .into_iter()
            .chain(self.professional_id_2)
    }

    /// Number of professionals in this pair (0, 1, or 2).
    #[must_use]
    pub fn quantity(&self) -> usize {
        self.member_ids().count()
    }

    #[must_use]
    pub fn contains(&self, professional_id: i64) -> bool {
        self.member_ids().any(|id| id == professional_id)
    }
}

/// Checks that a pair does not list the same professional twice.
///
/// # Errors
///
/// Returns `DomainError::InvalidPairMembers` if both slots name the same
/// professional.
pub fn validate_pair_members(
    professional_id_1: Option<i64>,
    professional_id_2: Option<i64>,
) -> Result<(), DomainError> {
    match (professional_id_1, professional_id_2) {
        (Some(first), Some(second)) if first == second => Err(DomainError::InvalidPairMembers(
            format!("professional {first} cannot occupy both slots"),
        )),
        _ => Ok(()),
    }
}

/// One of the two rotation positions of a service/city pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// The pair with the lowest identifier.
    A,
    /// The pair with the second-lowest identifier.
    B,
}

impl Slot {
    /// Selects the slot for the next lead given how many leads the two
    /// rotation pairs already hold. Even counts go to A, odd counts to B.
    #[must_use]
    pub const fn for_assigned_count(count: u64) -> Self {
        if count % 2 == 0 { Self::A } else { Self::B }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two pairs that take part in the rotation for a service/city pairing.
///
/// Pairs beyond the first two (by ascending identifier) are registered but
/// never receive leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSlots {
    a: ProfessionalPair,
    b: ProfessionalPair,
    ignored: usize,
}

impl PairSlots {
    /// Orders the registered pairs by identifier and takes the first two.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ProfessionalPairsNotConfigured` if fewer than two
    /// pairs are registered.
    pub fn from_registered(
        service_city_pair_id: i64,
        mut pairs: Vec<ProfessionalPair>,
    ) -> Result<Self, DomainError> {
        pairs.sort_by_key(|pair| pair.pair_id);
        let found: usize = pairs.len();
        let mut ordered = pairs.into_iter();

        match (ordered.next(), ordered.next()) {
            (Some(a), Some(b)) => Ok(Self {
                a,
                b,
                ignored: found.saturating_sub(2),
            }),
            _ => Err(DomainError::ProfessionalPairsNotConfigured {
                service_city_pair_id,
                found,
            }),
        }
    }

    #[must_use]
    pub const fn slot_a(&self) -> &ProfessionalPair {
        &self.a
    }

    #[must_use]
    pub const fn slot_b(&self) -> &ProfessionalPair {
        &self.b
    }

    #[must_use]
    pub const fn pair_for(&self, slot: Slot) -> &ProfessionalPair {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    /// Identifiers of the A and B pairs, in that order.
    #[must_use]
    pub const fn pair_ids(&self) -> [i64; 2] {
        [self.a.pair_id, self.b.pair_id]
    }

    /// How many registered pairs are outside the rotation.
    #[must_use]
    pub const fn ignored_count(&self) -> usize {
        self.ignored
    }
}
