//! The ingredient model and its two on-disk encodings.
//!
//! An ingredient names either a built-in item directly,
//! `{"item": "minecraft:stick"}`, or a project item through the custom data
//! marker, `{"components": {"minecraft:custom_data": {"iyc": {"steel": true}}}}`.
//! [`Ingredient`] is the typed view; [`Ingredient::from_value`] and
//! [`Ingredient::to_value`] are the only places that touch the raw JSON.

use serde_json::{Map, Value, json};

use crate::error::IngredientError;
use crate::id::ItemId;

// ---------------------------------------------------------------------------
// Wire keys
// ---------------------------------------------------------------------------

pub const ITEM_KEY: &str = "item";
pub const ID_KEY: &str = "id";
pub const COUNT_KEY: &str = "count";
pub const SLOT_KEY: &str = "slot";
pub const COMPONENTS_KEY: &str = "components";
pub const CUSTOM_DATA_KEY: &str = "minecraft:custom_data";

// ---------------------------------------------------------------------------
// Ingredient
// ---------------------------------------------------------------------------

/// A reference to a game item in one of its two encodings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ingredient {
    /// `{item, count?, slot?}`: the item id is written out directly.
    Direct {
        item: String,
        count: Option<u32>,
        slot: Option<i32>,
    },
    /// The custom data marker `{namespace: {local_id: true}}`.
    Custom {
        namespace: String,
        local_id: String,
        count: Option<u32>,
    },
}

impl Ingredient {
    /// Build the canonical ingredient for `id`.
    ///
    /// A qualified `id` becomes the direct form. A bare `id` needs a
    /// `namespace` and becomes the custom form.
    pub fn encode(
        id: &str,
        namespace: Option<&str>,
        count: Option<u32>,
    ) -> Result<Self, IngredientError> {
        if ItemId::is_qualified(id) {
            return Ok(Self::Direct {
                item: id.to_string(),
                count,
                slot: None,
            });
        }
        let namespace = namespace.ok_or_else(|| IngredientError::Configuration {
            id: id.to_string(),
        })?;
        Ok(Self::Custom {
            namespace: namespace.to_string(),
            local_id: id.to_string(),
            count,
        })
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Self::Direct { count, .. } | Self::Custom { count, .. } => *count,
        }
    }

    /// The ingredient's id, `namespace:id` when `qualify` is set.
    pub fn id(&self, qualify: bool) -> Result<String, IngredientError> {
        match self {
            Self::Direct { item, .. } if qualify => Ok(item.clone()),
            Self::Direct { .. } => Ok(self.item_id()?.local),
            Self::Custom {
                namespace,
                local_id,
                ..
            } => Ok(if qualify {
                format!("{namespace}:{local_id}")
            } else {
                local_id.clone()
            }),
        }
    }

    /// The typed qualified id. Fails for a direct form whose `item` carries
    /// no namespace.
    pub fn item_id(&self) -> Result<ItemId, IngredientError> {
        match self {
            Self::Direct { item, .. } => ItemId::parse(item).ok_or_else(|| {
                IngredientError::malformed(&self.to_value(), "item id has no namespace")
            }),
            Self::Custom {
                namespace,
                local_id,
                ..
            } => Ok(ItemId::new(namespace.clone(), local_id.clone())),
        }
    }

    // -----------------------------------------------------------------------
    // JSON encoding
    // -----------------------------------------------------------------------

    /// Parse either encoding from raw JSON.
    ///
    /// When the custom data holds several candidate namespaces the first one
    /// in document order wins.
    pub fn from_value(value: &Value) -> Result<Self, IngredientError> {
        let map = value
            .as_object()
            .ok_or_else(|| IngredientError::malformed(value, "ingredient is not an object"))?;
        let count = read_count(value, map)?;

        match map.get(ITEM_KEY) {
            Some(Value::String(item)) if !item.is_empty() => {
                let slot = match map.get(SLOT_KEY) {
                    None => None,
                    Some(slot) => Some(
                        slot.as_i64()
                            .and_then(|s| i32::try_from(s).ok())
                            .ok_or_else(|| {
                                IngredientError::malformed(value, "slot is not an integer")
                            })?,
                    ),
                };
                return Ok(Self::Direct {
                    item: item.clone(),
                    count,
                    slot,
                });
            }
            Some(Value::String(_) | Value::Null) | None => {}
            Some(_) => return Err(IngredientError::malformed(value, "item is not a string")),
        }

        let custom_data = map
            .get(COMPONENTS_KEY)
            .and_then(|components| components.get(CUSTOM_DATA_KEY))
            .ok_or_else(|| {
                IngredientError::malformed(value, "neither an item nor custom data is present")
            })?;
        let (namespace, local_id) =
            find_marker(custom_data).ok_or_else(|| IngredientError::DataIntegrity {
                custom_data: custom_data.clone(),
            })?;

        Ok(Self::Custom {
            namespace: namespace.to_string(),
            local_id: local_id.to_string(),
            count,
        })
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Direct { item, slot, .. } => {
                map.insert(ITEM_KEY.to_string(), Value::String(item.clone()));
                if let Some(slot) = slot {
                    map.insert(SLOT_KEY.to_string(), json!(slot));
                }
            }
            Self::Custom {
                namespace,
                local_id,
                ..
            } => {
                map.insert(
                    COMPONENTS_KEY.to_string(),
                    json!({ CUSTOM_DATA_KEY: { namespace: { local_id: true } } }),
                );
            }
        }
        if let Some(count) = self.count() {
            map.insert(COUNT_KEY.to_string(), json!(count));
        }
        Value::Object(map)
    }

    /// The container/inventory shape of this ingredient, built from the
    /// typed fields only.
    ///
    /// Sibling keys beyond `item`, `slot` and `count` are not part of the
    /// typed model and so never appear here. Call [`to_container_form`] on
    /// the original JSON when those must be carried over.
    pub fn to_container_value(&self) -> Value {
        to_container_form(&self.to_value())
    }
}

fn read_count(value: &Value, map: &Map<String, Value>) -> Result<Option<u32>, IngredientError> {
    match map.get(COUNT_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(count) => count
            .as_u64()
            .and_then(|c| u32::try_from(c).ok())
            .map(Some)
            .ok_or_else(|| IngredientError::malformed(value, "count is not a positive integer")),
    }
}

/// Find the first `namespace -> {local_id: <bool>, ..}` entry.
fn find_marker(custom_data: &Value) -> Option<(&str, &str)> {
    custom_data.as_object()?.iter().find_map(|(namespace, data)| {
        let (local_id, first) = data.as_object()?.iter().next()?;
        first
            .is_boolean()
            .then_some((namespace.as_str(), local_id.as_str()))
    })
}

// ---------------------------------------------------------------------------
// Free functions over raw JSON
// ---------------------------------------------------------------------------

/// Encode `id` straight to its JSON form. See [`Ingredient::encode`].
pub fn encode(id: &str, namespace: Option<&str>, count: Option<u32>) -> Result<Value, IngredientError> {
    Ingredient::encode(id, namespace, count).map(|ingredient| ingredient.to_value())
}

/// Extract the id of any supported ingredient encoding.
pub fn resolve_id(ingredient: &Value, qualify: bool) -> Result<String, IngredientError> {
    Ingredient::from_value(ingredient)?.id(qualify)
}

/// Rename `item` to `id` for container and inventory contexts.
///
/// `slot` moves in front of `id`; every other field is copied in order.
/// Anything without an `item` key, including custom-form ingredients, is
/// returned unchanged.
pub fn to_container_form(ingredient: &Value) -> Value {
    let Some(map) = ingredient.as_object() else {
        return ingredient.clone();
    };
    let Some(item) = map.get(ITEM_KEY).filter(|item| !item.is_null()) else {
        return ingredient.clone();
    };

    let mut container = Map::new();
    if let Some(slot) = map.get(SLOT_KEY) {
        container.insert(SLOT_KEY.to_string(), slot.clone());
    }
    container.insert(ID_KEY.to_string(), item.clone());
    for (key, value) in map {
        if key != ITEM_KEY && key != SLOT_KEY {
            container.insert(key.clone(), value.clone());
        }
    }
    Value::Object(container)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    // -----------------------------------------------------------------------
    // encode
    // -----------------------------------------------------------------------

    #[test]
    fn encode_qualified_id_is_direct() {
        assert_eq!(
            encode("minecraft:stick", None, None).unwrap(),
            json!({"item": "minecraft:stick"})
        );
        // The namespace argument is ignored for qualified ids.
        assert_eq!(
            encode("minecraft:stick", Some("iyc"), Some(4)).unwrap(),
            json!({"item": "minecraft:stick", "count": 4})
        );
    }

    #[test]
    fn encode_bare_id_is_custom() {
        assert_eq!(
            encode("adamantium_fragment", Some("iyc"), None).unwrap(),
            json!({"components": {"minecraft:custom_data": {"iyc": {"adamantium_fragment": true}}}})
        );
        assert_eq!(
            encode("adamantium_fragment", Some("iyc"), Some(2)).unwrap(),
            json!({
                "components": {"minecraft:custom_data": {"iyc": {"adamantium_fragment": true}}},
                "count": 2
            })
        );
    }

    #[test]
    fn encode_bare_id_without_namespace_fails() {
        let err = encode("stick", None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, IngredientError::Configuration { ref id } if id == "stick"));
    }

    // -----------------------------------------------------------------------
    // resolve_id
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_direct() {
        let ingr = json!({"item": "minecraft:stick", "count": 3});
        assert_eq!(resolve_id(&ingr, true).unwrap(), "minecraft:stick");
        assert_eq!(resolve_id(&ingr, false).unwrap(), "stick");
    }

    #[test]
    fn resolve_custom() {
        let ingr = encode("adamantium_fragment", Some("iyc"), None).unwrap();
        assert_eq!(resolve_id(&ingr, true).unwrap(), "iyc:adamantium_fragment");
        assert_eq!(resolve_id(&ingr, false).unwrap(), "adamantium_fragment");
    }

    #[test]
    fn resolve_custom_skips_non_marker_entries() {
        let ingr = json!({"components": {"minecraft:custom_data": {
            "smithed": {"ignore": {"functionality": 1}},
            "energy": {"max_storage": 400},
            "iyc": {"steel_ingot": true}
        }}});
        assert_eq!(resolve_id(&ingr, true).unwrap(), "iyc:steel_ingot");
    }

    #[test]
    fn resolve_custom_takes_first_candidate_in_document_order() {
        let ingr = json!({"components": {"minecraft:custom_data": {
            "zeta": {"first": true},
            "alpha": {"second": true}
        }}});
        assert_eq!(resolve_id(&ingr, true).unwrap(), "zeta:first");
    }

    #[test]
    fn resolve_custom_without_marker_fails() {
        let ingr = json!({"components": {"minecraft:custom_data": {"iyc": {"level": 3}}}});
        let err = resolve_id(&ingr, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert!(matches!(err, IngredientError::DataIntegrity { .. }));
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert!(matches!(
            resolve_id(&json!("minecraft:stick"), true),
            Err(IngredientError::Malformed { .. })
        ));
        assert!(matches!(
            resolve_id(&json!({"count": 2}), true),
            Err(IngredientError::Malformed { .. })
        ));
        assert!(matches!(
            resolve_id(&json!({"item": 5}), true),
            Err(IngredientError::Malformed { .. })
        ));
        assert!(matches!(
            resolve_id(&json!({"item": "stick"}), false),
            Err(IngredientError::Malformed { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Typed model
    // -----------------------------------------------------------------------

    #[test]
    fn from_value_reads_count_and_slot() {
        let ingr = Ingredient::from_value(&json!({"item": "minecraft:dirt", "count": 5, "slot": 2}))
            .unwrap();
        assert_eq!(
            ingr,
            Ingredient::Direct {
                item: "minecraft:dirt".into(),
                count: Some(5),
                slot: Some(2),
            }
        );
        assert_eq!(ingr.count(), Some(5));
    }

    #[test]
    fn from_value_rejects_negative_count() {
        let result = Ingredient::from_value(&json!({"item": "minecraft:dirt", "count": -1}));
        assert!(matches!(result, Err(IngredientError::Malformed { .. })));
    }

    #[test]
    fn typed_value_round_trip() {
        let custom = Ingredient::encode("steel", Some("iyc"), Some(3)).unwrap();
        assert_eq!(Ingredient::from_value(&custom.to_value()).unwrap(), custom);

        let direct = Ingredient::Direct {
            item: "minecraft:stone".into(),
            count: None,
            slot: Some(0),
        };
        assert_eq!(Ingredient::from_value(&direct.to_value()).unwrap(), direct);
    }

    #[test]
    fn item_id_of_both_forms() {
        let custom = Ingredient::encode("steel", Some("iyc"), None).unwrap();
        assert_eq!(custom.item_id().unwrap(), ItemId::new("iyc", "steel"));

        let direct = Ingredient::encode("minecraft:stone", None, None).unwrap();
        assert_eq!(direct.item_id().unwrap(), ItemId::new("minecraft", "stone"));
    }

    // -----------------------------------------------------------------------
    // to_container_form
    // -----------------------------------------------------------------------

    #[test]
    fn container_form_renames_item() {
        let out = to_container_form(&json!({"item": "minecraft:stick", "count": 2}));
        assert_eq!(out, json!({"id": "minecraft:stick", "count": 2}));
    }

    #[test]
    fn container_form_puts_slot_first() {
        let out = to_container_form(&json!({"item": "minecraft:stick", "count": 2, "slot": 4}));
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["slot", "id", "count"]);
        assert_eq!(out["slot"], json!(4));
    }

    #[test]
    fn container_form_passes_custom_through() {
        let custom = encode("steel", Some("iyc"), None).unwrap();
        assert_eq!(to_container_form(&custom), custom);
        assert_eq!(to_container_form(&json!({"item": null})), json!({"item": null}));
    }

    #[test]
    fn container_form_is_idempotent() {
        let once = to_container_form(&json!({"item": "minecraft:stick", "slot": 1}));
        assert_eq!(to_container_form(&once), once);
    }

    #[test]
    fn typed_container_value_drops_unmodelled_siblings() {
        let raw = json!({"item": "minecraft:apple", "slot": 1, "components": {"minecraft:rarity": "epic"}});
        let typed = Ingredient::from_value(&raw).unwrap();
        assert_eq!(typed.to_container_value(), json!({"slot": 1, "id": "minecraft:apple"}));
        assert_eq!(
            to_container_form(&raw),
            json!({"slot": 1, "id": "minecraft:apple", "components": {"minecraft:rarity": "epic"}})
        );
    }

    #[test]
    fn typed_container_value() {
        let ingr = Ingredient::encode("minecraft:apple", None, Some(6)).unwrap();
        assert_eq!(
            ingr.to_container_value(),
            json!({"id": "minecraft:apple", "count": 6})
        );
    }
}
