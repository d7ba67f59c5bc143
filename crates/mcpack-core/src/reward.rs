//! Loot tables that hand out a recipe's result.
//!
//! Project items already ship their own `i/<item>` loot table. Anything else
//! gets a derived table under `recipes/<namespace>/<item>`, registered in the
//! build's [`OutputCatalog`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use tracing::debug;

use crate::context::BuildContext;
use crate::error::IngredientError;
use crate::ingredient::Ingredient;
use crate::lookup::{Owner, classify};

// ---------------------------------------------------------------------------
// Loot table model
// ---------------------------------------------------------------------------

/// A loot table with one or more pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub pools: Vec<LootPool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootPool {
    pub rolls: u32,
    pub entries: Vec<LootEntry>,
}

/// A pool entry, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LootEntry {
    /// Drops a game item.
    #[serde(rename = "minecraft:item")]
    Item {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        functions: Vec<LootFunction>,
    },
    /// Defers to another loot table.
    #[serde(rename = "minecraft:loot_table")]
    LootTable {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        functions: Vec<LootFunction>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootFunction {
    pub function: String,
    pub count: u32,
}

impl LootFunction {
    pub fn set_count(count: u32) -> Self {
        Self {
            function: "minecraft:set_count".to_string(),
            count,
        }
    }

    fn to_value(&self) -> Value {
        json!({"function": self.function, "count": self.count})
    }
}

impl LootEntry {
    fn to_value(&self) -> Value {
        let (kind, target_key, target, functions) = match self {
            Self::Item { name, functions } => ("minecraft:item", "name", name, functions),
            Self::LootTable { value, functions } => {
                ("minecraft:loot_table", "value", value, functions)
            }
        };
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(kind));
        map.insert(target_key.to_string(), Value::from(target.as_str()));
        if !functions.is_empty() {
            map.insert(
                "functions".to_string(),
                functions.iter().map(LootFunction::to_value).collect(),
            );
        }
        Value::Object(map)
    }
}

impl LootTable {
    /// The wire form registered in an [`OutputCatalog`]. Matches the serde
    /// encoding of this type.
    pub fn to_value(&self) -> Value {
        let pools: Vec<Value> = self
            .pools
            .iter()
            .map(|pool| {
                let entries: Vec<Value> = pool.entries.iter().map(LootEntry::to_value).collect();
                json!({"rolls": pool.rolls, "entries": entries})
            })
            .collect();
        json!({ "pools": pools })
    }

    /// A single roll of a single entry.
    pub fn single(entry: LootEntry) -> Self {
        Self {
            pools: vec![LootPool {
                rolls: 1,
                entries: vec![entry],
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Output catalog
// ---------------------------------------------------------------------------

/// Sink for derived data files, keyed by resource path.
pub trait OutputCatalog {
    /// Insert or overwrite the record at `path`.
    fn register(&mut self, path: &str, record: Value);
}

/// In-memory output catalog, ordered by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPack {
    files: BTreeMap<String, Value>,
}

impl DataPack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.files.iter().map(|(path, record)| (path.as_str(), record))
    }
}

impl OutputCatalog for DataPack {
    fn register(&mut self, path: &str, record: Value) {
        self.files.insert(path.to_string(), record);
    }
}

// ---------------------------------------------------------------------------
// Reward path
// ---------------------------------------------------------------------------

fn with_count_suffix(mut path: String, count: u32) -> String {
    if count > 1 {
        path.push_str(&format!("_x{count}"));
    }
    path
}

/// Where a recipe result's reward lives, and the table to register there.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub path: String,
    /// `None` for project results, which already ship their own table.
    pub table: Option<LootTable>,
}

impl Reward {
    /// Write the table, if any, to `output` at `path`. Registering the same
    /// reward again overwrites it with an identical record.
    pub fn register(&self, output: &mut dyn OutputCatalog) {
        if let Some(table) = &self.table {
            debug!(path = %self.path, "registering reward loot table");
            output.register(&self.path, table.to_value());
        }
    }
}

/// Work out the reward for `count` of `result` without touching any output.
///
/// Project results point at the item's own `i/<item>` table. Built-in
/// results get a table that drops the item directly; external results get
/// one deferring to `<project>:external/<namespace>/<item>`.
pub fn plan_reward(
    ctx: &BuildContext,
    result: &Ingredient,
    count: u32,
) -> Result<Reward, IngredientError> {
    let id = result.item_id()?;
    let project = ctx.project_id();

    let functions = if count > 1 {
        vec![LootFunction::set_count(count)]
    } else {
        Vec::new()
    };
    let entry = match classify(ctx, &id.namespace) {
        Owner::Project => {
            return Ok(Reward {
                path: with_count_suffix(format!("{project}:i/{}", id.local), count),
                table: None,
            });
        }
        Owner::Builtin => LootEntry::Item {
            name: id.to_string(),
            functions,
        },
        Owner::External => LootEntry::LootTable {
            value: format!("{project}:external/{}/{}", id.namespace, id.local),
            functions,
        },
    };

    Ok(Reward {
        path: with_count_suffix(
            format!("{project}:recipes/{}/{}", id.namespace, id.local),
            count,
        ),
        table: Some(LootTable::single(entry)),
    })
}

/// Plan the reward for `result` and register its table in `output`.
/// Returns the loot table path the recipe should reference.
pub fn build_reward_path(
    ctx: &BuildContext,
    output: &mut dyn OutputCatalog,
    result: &Ingredient,
    count: u32,
) -> Result<String, IngredientError> {
    let reward = plan_reward(ctx, result, count)?;
    reward.register(output);
    Ok(reward.path)
}

// ===========================================================================
// Tests
// ===========================================================================
