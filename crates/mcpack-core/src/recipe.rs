//! Recipe shapes and the ingredients they reference.

use serde_json::Value;

/// Pulverizer recipes provided by the SimplEnergy machine pack.
pub const PULVERIZING: &str = "simplenergy_pulverizing";

pub const FURNACE_RECIPE_TYPES: &[&str] = &["smelting", "blasting", "smoking", "campfire_cooking"];
pub const CRAFTING_RECIPE_TYPES: &[&str] = &["crafting_shaped", "crafting_shapeless"];
pub const SPECIAL_RECIPE_TYPES: &[&str] = &[PULVERIZING];

/// The family a recipe's `type` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeKind {
    Crafting,
    Furnace,
    Special,
    Other,
}

impl RecipeKind {
    /// Classify a recipe type, with or without the `minecraft:` prefix.
    pub fn from_type(recipe_type: &str) -> Self {
        let bare = recipe_type
            .strip_prefix("minecraft:")
            .unwrap_or(recipe_type);
        if CRAFTING_RECIPE_TYPES.contains(&bare) {
            Self::Crafting
        } else if FURNACE_RECIPE_TYPES.contains(&bare) {
            Self::Furnace
        } else if SPECIAL_RECIPE_TYPES.contains(&bare) {
            Self::Special
        } else {
            Self::Other
        }
    }

    /// Classify a recipe record by its `type` field.
    pub fn of(recipe: &Value) -> Self {
        recipe
            .get("type")
            .and_then(Value::as_str)
            .map_or(Self::Other, Self::from_type)
    }
}

/// A field holding something. `null`, `false`, zero and empty strings, lists
/// and maps all count as absent.
fn present<'a>(recipe: &'a Value, key: &str) -> Option<&'a Value> {
    recipe.get(key).filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Object(map) => !map.is_empty(),
        Value::Array(list) => !list.is_empty(),
        Value::String(s) => !s.is_empty(),
    })
}

/// The ingredient entries a recipe references, whatever its shape.
///
/// Shapes are checked in a fixed order and the first present one wins:
/// `key` (shaped), `ingredients` (shapeless), `ingredient` (cooking) and
/// `template` (smithing). Unknown shapes yield nothing.
pub fn extract_ingredients(recipe: &Value) -> Vec<Value> {
    if let Some(key) = present(recipe, "key") {
        return match key {
            Value::Object(map) => map.values().cloned().collect(),
            other => vec![other.clone()],
        };
    }
    if let Some(ingredients) = present(recipe, "ingredients") {
        return match ingredients {
            Value::Array(list) => list.clone(),
            other => vec![other.clone()],
        };
    }
    if let Some(ingredient) = present(recipe, "ingredient") {
        return vec![ingredient.clone()];
    }
    if let Some(template) = present(recipe, "template") {
        return vec![template.clone()];
    }
    Vec::new()
}
