//! Shared fixtures for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and, via the `test-utils` feature, in
//! integration tests of this and downstream crates.

use serde_json::json;

use crate::context::BuildContext;
use crate::definition::Definition;
use crate::ingredient::Ingredient;

// ===========================================================================
// Ingredient constructors
// ===========================================================================

/// A custom-form ingredient in the `iyc` namespace.
pub fn custom(local_id: &str) -> Ingredient {
    Ingredient::Custom {
        namespace: "iyc".to_string(),
        local_id: local_id.to_string(),
        count: None,
    }
}

/// A direct-form ingredient.
pub fn direct(item: &str) -> Ingredient {
    Ingredient::Direct {
        item: item.to_string(),
        count: None,
        slot: None,
    }
}

// ===========================================================================
// Contexts
// ===========================================================================

pub fn adamantium_ingot() -> Definition {
    Definition::new("iyc:adamantium_ingot_item").with("durability", json!(500))
}

pub fn adamantium_fragment() -> Definition {
    Definition::new("minecraft:iron_nugget")
        .with("category", json!("material"))
        .with("item_name", json!("Adamantium Fragment"))
        .with("custom_model_data", json!(2010))
}

pub fn simple_battery() -> Definition {
    Definition::new("minecraft:player_head")
        .with("max_stack_size", json!(1))
        .with("wiki", json!("Stores energy"))
}

/// Project `iyc` with two local items and one `simplenergy` external item.
pub fn iyc_context() -> BuildContext {
    let mut b = BuildContext::builder("iyc");
    b.register_definition("adamantium_ingot", adamantium_ingot())
        .register_definition("adamantium_fragment", adamantium_fragment())
        .register_external("simplenergy:simple_battery", simple_battery());
    match b.build() {
        Ok(ctx) => ctx,
        Err(e) => panic!("fixture context is invalid: {e}"),
    }
}
