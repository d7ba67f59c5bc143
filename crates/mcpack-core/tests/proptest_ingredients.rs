//! Property-based tests for ingredient encoding and resolution.
//!
//! Uses proptest to generate ids, namespaces and recipe shapes, then verify
//! the round-trip, idempotence and precedence invariants hold.

use mcpack_core::context::BuildContext;
use mcpack_core::ingredient::{encode, resolve_id, to_container_form};
use mcpack_core::lookup::{Owner, classify};
use mcpack_core::recipe::extract_ingredients;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// ===========================================================================
// Generators
// ===========================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn arb_direct() -> impl Strategy<Value = Value> {
    (
        arb_name(),
        arb_name(),
        proptest::option::of(1..64u32),
        proptest::option::of(0..27i32),
    )
        .prop_map(|(ns, id, count, slot)| {
            let mut map = Map::new();
            map.insert("item".into(), json!(format!("{ns}:{id}")));
            if let Some(count) = count {
                map.insert("count".into(), json!(count));
            }
            if let Some(slot) = slot {
                map.insert("slot".into(), json!(slot));
            }
            Value::Object(map)
        })
}

fn arb_entries() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(arb_name().prop_map(|id| json!({"item": format!("minecraft:{id}")})), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// resolve_id(encode(id, ns)) == "ns:id"
    #[test]
    fn custom_round_trip(ns in arb_name(), id in arb_name(), count in proptest::option::of(1..64u32)) {
        let ingr = encode(&id, Some(ns.as_str()), count).unwrap();
        prop_assert_eq!(resolve_id(&ingr, true).unwrap(), format!("{ns}:{id}"));
        prop_assert_eq!(resolve_id(&ingr, false).unwrap(), id);
    }

    /// resolve_id(encode("ns:id")) == "ns:id"
    #[test]
    fn qualified_round_trip(ns in arb_name(), id in arb_name()) {
        let qualified = format!("{ns}:{id}");
        let ingr = encode(&qualified, None, None).unwrap();
        prop_assert_eq!(resolve_id(&ingr, true).unwrap(), qualified);
    }

    #[test]
    fn container_form_is_idempotent(ingr in arb_direct()) {
        let once = to_container_form(&ingr);
        prop_assert!(once.get("item").is_none());
        prop_assert_eq!(&once["id"], &ingr["item"]);
        prop_assert_eq!(to_container_form(&once), once);
    }

    /// Each single-shape recipe yields exactly its own entries in order.
    #[test]
    fn single_shape_extraction(entries in arb_entries(), shape in 0..4u8) {
        let (recipe, expected) = match shape {
            0 => {
                let key: Map<String, Value> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (format!("{}", (b'A' + i as u8) as char), e.clone()))
                    .collect();
                (json!({"key": key}), entries.clone())
            }
            1 => (json!({"ingredients": entries}), entries.clone()),
            2 => (json!({"ingredient": entries[0]}), vec![entries[0].clone()]),
            _ => (json!({"template": entries[0]}), vec![entries[0].clone()]),
        };
        prop_assert_eq!(extract_ingredients(&recipe), expected);
    }

    /// Exactly one owner per namespace.
    #[test]
    fn classification_is_exhaustive(ns in arb_name()) {
        let ctx = BuildContext::builder("iyc").build().unwrap();
        let owner = classify(&ctx, &ns);
        let expected = if ns == "iyc" {
            Owner::Project
        } else if ns == "minecraft" {
            Owner::Builtin
        } else {
            Owner::External
        };
        prop_assert_eq!(owner, expected);
    }
}
