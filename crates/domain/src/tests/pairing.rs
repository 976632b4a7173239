// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PairSlots, ProfessionalPair, Slot, validate_pair_members};

const fn pair(pair_id: i64) -> ProfessionalPair {
    ProfessionalPair {
        pair_id,
        service_city_pair_id: 7,
        professional_id_1: Some(1),
        professional_id_2: Some(2),
    }
}

#[test]
fn test_slot_parity() {
    assert_eq!(Slot::for_assigned_count(0), Slot::A);
    assert_eq!(Slot::for_assigned_count(1), Slot::B);
    assert_eq!(Slot::for_assigned_count(2), Slot::A);
    assert_eq!(Slot::for_assigned_count(99), Slot::B);
}

#[test]
fn test_pair_slots_orders_by_id() {
    let slots: PairSlots = PairSlots::from_registered(7, vec![pair(101), pair(100)]).unwrap();
    assert_eq!(slots.slot_a().pair_id, 100);
    assert_eq!(slots.slot_b().pair_id, 101);
    assert_eq!(slots.pair_ids(), [100, 101]);
    assert_eq!(slots.ignored_count(), 0);
}

#[test]
fn test_pair_slots_ignores_extra_pairs() {
    let slots: PairSlots =
        PairSlots::from_registered(7, vec![pair(30), pair(10), pair(20)]).unwrap();
    assert_eq!(slots.pair_ids(), [10, 20]);
    assert_eq!(slots.ignored_count(), 1);
    assert_eq!(slots.pair_for(Slot::B).pair_id, 20);
}

#[test]
fn test_pair_slots_requires_two_pairs() {
    let none = PairSlots::from_registered(7, Vec::new());
    assert_eq!(
        none,
        Err(DomainError::ProfessionalPairsNotConfigured {
            service_city_pair_id: 7,
            found: 0,
        })
    );

    let one = PairSlots::from_registered(7, vec![pair(10)]);
    assert_eq!(
        one,
        Err(DomainError::ProfessionalPairsNotConfigured {
            service_city_pair_id: 7,
            found: 1,
        })
    );
}

#[test]
fn test_pair_membership() {
    let half: ProfessionalPair = ProfessionalPair {
        pair_id: 5,
        service_city_pair_id: 7,
        professional_id_1: None,
        professional_id_2: Some(42),
    };
    assert_eq!(half.quantity(), 1);
    assert!(half.contains(42));
    assert!(!half.contains(1));
    assert_eq!(pair(1).quantity(), 2);
}

#[test]
fn test_validate_pair_members_rejects_duplicate() {
    assert!(validate_pair_members(Some(3), Some(4)).is_ok());
    assert!(validate_pair_members(None, None).is_ok());
    assert!(matches!(
        validate_pair_members(Some(3), Some(3)),
        Err(DomainError::InvalidPairMembers(_))
    ));
}
