use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::id::BUILTIN_NAMESPACE;

/// Fields that describe an item to the build rather than to the game.
///
/// Used when a build configuration does not name its own exclusion set.
pub const DEFAULT_NON_COMPONENTS: &[&str] = &[
    "id",
    "category",
    "wiki",
    "result_of_crafting",
    "used_for_crafting",
    "custom_block",
    "override_model",
    "smithed",
    "custom_ore_generation",
    "vanilla_name",
];

/// Definitions keyed by local id (project catalog) or by qualified id
/// (external catalog).
pub type Catalog = HashMap<String, Definition>;

/// A custom item definition: its real game id plus component data.
///
/// On disk this is a single flat map whose `id` entry is the game id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    /// Fully-qualified id of the base game item, e.g. `minecraft:iron_ingot`.
    pub id: String,
    /// Every other field, in document order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// Read as one plain map rather than through `#[serde(flatten)]`: flatten
// asks the format for identifier keys, which RON only accepts unquoted.
impl<'de> Deserialize<'de> for Definition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut id = None;
        let mut fields = Map::new();
        for (key, value) in raw {
            if key == "id" {
                id = Some(value);
            } else {
                fields.insert(key, value);
            }
        }
        match id {
            Some(Value::String(id)) => Ok(Self { id, fields }),
            Some(other) => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.to_string()),
                &"a string id",
            )),
            None => Err(de::Error::missing_field("id")),
        }
    }
}

impl Definition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// The local part of `id`, or the whole id when it has no namespace.
    pub fn local_id(&self) -> &str {
        self.id
            .split_once(':')
            .map_or(self.id.as_str(), |(_, local)| local)
    }

    /// Game-visible components, keyed `minecraft:<field>`. `None` when every
    /// field is metadata.
    pub fn components(&self, non_components: &HashSet<String>) -> Option<Map<String, Value>> {
        let components: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(field, _)| !non_components.contains(field.as_str()))
            .map(|(field, value)| (format!("{BUILTIN_NAMESPACE}:{field}"), value.clone()))
            .collect();
        (!components.is_empty()).then_some(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn default_set() -> HashSet<String> {
        DEFAULT_NON_COMPONENTS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn deserialize_keeps_extra_fields() {
        let def: Definition = serde_json::from_value(json!({
            "id": "minecraft:iron_ingot",
            "durability": 500,
            "category": "material"
        }))
        .unwrap();
        assert_eq!(def.id, "minecraft:iron_ingot");
        assert_eq!(def.fields.len(), 2);
        assert_eq!(def.local_id(), "iron_ingot");
    }

    #[test]
    fn missing_id_is_rejected() {
        let result: Result<Definition, _> = serde_json::from_value(json!({"durability": 5}));
        assert!(result.is_err());
        let result: Result<Definition, _> = serde_json::from_value(json!({"id": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn fields_keep_document_order_around_id() {
        let def: Definition = serde_json::from_str(
            r#"{"rarity": "rare", "id": "minecraft:iron_ingot", "durability": 5, "item_name": "Steel"}"#,
        )
        .unwrap();
        let keys: Vec<&str> = def.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["rarity", "durability", "item_name"]);
    }

    #[test]
    fn deserialize_from_ron_map() {
        let catalog: Catalog = ron::from_str(
            r#"{"steel": {"id": "minecraft:iron_ingot", "rarity": "rare", "max_stack_size": 16}}"#,
        )
        .unwrap();
        let steel = &catalog["steel"];
        assert_eq!(steel.id, "minecraft:iron_ingot");
        assert_eq!(steel.fields["rarity"], json!("rare"));
        assert_eq!(steel.fields["max_stack_size"], json!(16));
    }

    #[test]
    fn components_skip_metadata() {
        let def = Definition::new("minecraft:iron_ingot")
            .with("durability", json!(500))
            .with("wiki", json!("A shiny ingot"))
            .with("item_name", json!("Steel"));
        let components = def.components(&default_set()).unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components["minecraft:durability"], json!(500));
        assert_eq!(components["minecraft:item_name"], json!("Steel"));
        assert!(!components.contains_key("minecraft:wiki"));
    }

    #[test]
    fn components_none_when_only_metadata() {
        let def = Definition::new("minecraft:stone").with("category", json!("blocks"));
        assert!(def.components(&default_set()).is_none());
    }

    #[test]
    fn exclusion_set_is_configurable() {
        let def = Definition::new("minecraft:stone").with("category", json!("blocks"));
        let components = def.components(&HashSet::new()).unwrap();
        assert_eq!(components["minecraft:category"], json!("blocks"));
    }
}
