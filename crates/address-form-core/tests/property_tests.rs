//! Property tests for collection invariants.

use address_form_core::collection::CollectionManager;
use address_form_core::models::{AddressEntry, AddressField};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Add), (0usize..8).prop_map(Op::Remove)]
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z. ]{1,8}", "[0-9]{10}"]
}

fn entry_strategy() -> impl Strategy<Value = AddressEntry> {
    (value_strategy(), value_strategy(), value_strategy(), value_strategy()).prop_map(
        |(name, mobile, clinic, city)| {
            AddressEntry::blank()
                .with_field(AddressField::DoctorName, name)
                .with_field(AddressField::Mobile, mobile)
                .with_field(AddressField::HospitalClinic, clinic)
                .with_field(AddressField::City, city)
        },
    )
}

proptest! {
    #[test]
    fn collection_never_empty(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut manager = CollectionManager::new();
        for op in ops {
            match op {
                Op::Add => {
                    manager.add_entry();
                }
                Op::Remove(i) => {
                    let _ = manager.remove_entry(i);
                }
            }
            prop_assert!(manager.len() >= 1);
        }
    }

    #[test]
    fn update_only_touches_target(
        entries in prop::collection::vec(entry_strategy(), 1..6),
        replacement in entry_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut manager = CollectionManager::new();
        for _ in 1..entries.len() {
            manager.add_entry();
        }
        for (i, entry) in entries.iter().enumerate() {
            manager.update_entry(i, entry.clone()).unwrap();
        }

        let target = pick.index(entries.len());
        let before: Vec<AddressEntry> = manager.entries().cloned().collect();
        manager.update_entry(target, replacement.clone()).unwrap();

        prop_assert_eq!(manager.entry(target).unwrap(), &replacement);
        for (j, entry) in manager.entries().enumerate() {
            if j != target {
                prop_assert_eq!(entry, &before[j]);
            }
        }
    }

    #[test]
    fn shared_mobile_warns_from_either_side(
        mobile in "[0-9]{10}",
        a in entry_strategy(),
        b in entry_strategy(),
    ) {
        let a = a.with_field(AddressField::Mobile, mobile.clone());
        let b = b.with_field(AddressField::Mobile, mobile.clone());

        let mut manager = CollectionManager::new();
        manager.add_entry();
        manager.update_entry(0, a.clone()).unwrap();
        manager.update_entry(1, b.clone()).unwrap();
        prop_assert!(manager.warnings().iter().any(|w| w.field == AddressField::Mobile && w.value == mobile));

        manager.update_entry(0, a).unwrap();
        prop_assert!(manager.warnings().iter().any(|w| w.field == AddressField::Mobile && w.value == mobile));
    }

    #[test]
    fn blank_fields_never_warn(n in 2usize..6) {
        let mut manager = CollectionManager::new();
        for _ in 1..n {
            manager.add_entry();
        }
        for i in 0..n {
            let warnings = manager.update_entry(i, AddressEntry::blank()).unwrap();
            prop_assert!(warnings.is_empty());
        }
    }
}
