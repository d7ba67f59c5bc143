//! Per-build memoization and error reporting.
//!
//! A [`BuildSession`] borrows one [`BuildContext`] and caches every
//! operation by the value of its inputs. Caches live as long as the session;
//! start a new session (or call [`BuildSession::clear`]) for each build run.
//! Failures are reported through `tracing` before they are returned.

use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{error, trace};

use crate::context::BuildContext;
use crate::error::IngredientError;
use crate::ingredient::{self, Ingredient};
use crate::lookup::{self, ResolvedItem};
use crate::recipe;
use crate::reward::{self, OutputCatalog, Reward};

/// Canonical cache key for a JSON value: its text in document order.
fn key_of(value: &Value) -> String {
    value.to_string()
}

/// Look up `key`, or compute and remember the result. Errors are reported
/// and never cached.
fn memoize<K, V>(
    cache: &mut HashMap<K, V>,
    key: K,
    op: &'static str,
    compute: impl FnOnce() -> Result<V, IngredientError>,
) -> Result<V, IngredientError>
where
    K: Eq + Hash,
    V: Clone,
{
    if let Some(hit) = cache.get(&key) {
        return Ok(hit.clone());
    }
    match compute() {
        Ok(value) => {
            cache.insert(key, value.clone());
            Ok(value)
        }
        Err(e) => {
            error!(op, kind = ?e.kind(), "{e}");
            Err(e)
        }
    }
}

/// Memoizing front end to every ingredient operation for one build.
#[derive(Debug)]
pub struct BuildSession<'ctx> {
    ctx: &'ctx BuildContext,
    encoded: HashMap<(String, Option<String>, Option<u32>), Value>,
    container: HashMap<String, Value>,
    ids: HashMap<(String, bool), String>,
    vanilla_ids: HashMap<(String, bool), String>,
    items: HashMap<String, ResolvedItem>,
    rewards: HashMap<(String, u32), Reward>,
    recipes: HashMap<String, Vec<Value>>,
}

impl<'ctx> BuildSession<'ctx> {
    pub fn new(ctx: &'ctx BuildContext) -> Self {
        Self {
            ctx,
            encoded: HashMap::new(),
            container: HashMap::new(),
            ids: HashMap::new(),
            vanilla_ids: HashMap::new(),
            items: HashMap::new(),
            rewards: HashMap::new(),
            recipes: HashMap::new(),
        }
    }

    pub fn context(&self) -> &'ctx BuildContext {
        self.ctx
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        trace!(entries = self.cached_entries(), "clearing ingredient caches");
        self.encoded.clear();
        self.container.clear();
        self.ids.clear();
        self.vanilla_ids.clear();
        self.items.clear();
        self.rewards.clear();
        self.recipes.clear();
    }

    /// Total number of cached results across all operations.
    pub fn cached_entries(&self) -> usize {
        self.encoded.len()
            + self.container.len()
            + self.ids.len()
            + self.vanilla_ids.len()
            + self.items.len()
            + self.rewards.len()
            + self.recipes.len()
    }

    /// See [`ingredient::encode`].
    pub fn encode(
        &mut self,
        id: &str,
        namespace: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, IngredientError> {
        let key = (id.to_string(), namespace.map(str::to_string), count);
        memoize(&mut self.encoded, key, "encode", || {
            ingredient::encode(id, namespace, count)
        })
    }

    /// See [`ingredient::to_container_form`].
    pub fn to_container_form(&mut self, ingredient: &Value) -> Value {
        self.container
            .entry(key_of(ingredient))
            .or_insert_with(|| ingredient::to_container_form(ingredient))
            .clone()
    }

    /// See [`ingredient::resolve_id`].
    pub fn resolve_id(&mut self, ingredient: &Value, qualify: bool) -> Result<String, IngredientError> {
        memoize(&mut self.ids, (key_of(ingredient), qualify), "resolve_id", || {
            ingredient::resolve_id(ingredient, qualify)
        })
    }

    /// See [`lookup::resolve_vanilla_id`].
    pub fn resolve_vanilla_id(
        &mut self,
        ingredient: &Value,
        qualify: bool,
    ) -> Result<String, IngredientError> {
        let ctx = self.ctx;
        memoize(
            &mut self.vanilla_ids,
            (key_of(ingredient), qualify),
            "resolve_vanilla_id",
            || lookup::resolve_vanilla_id(ctx, &Ingredient::from_value(ingredient)?, qualify),
        )
    }

    /// See [`lookup::resolve_item`].
    pub fn resolve_item(&mut self, ingredient: &Value) -> Result<ResolvedItem, IngredientError> {
        let ctx = self.ctx;
        memoize(&mut self.items, key_of(ingredient), "resolve_item", || {
            lookup::resolve_item(ctx, &Ingredient::from_value(ingredient)?)
        })
    }

    /// See [`reward::build_reward_path`]. The planned reward is cached by
    /// result and count; its table is registered in `output` on every call.
    pub fn build_reward_path(
        &mut self,
        output: &mut dyn OutputCatalog,
        result: &Value,
        count: u32,
    ) -> Result<String, IngredientError> {
        let ctx = self.ctx;
        let planned = memoize(
            &mut self.rewards,
            (key_of(result), count),
            "build_reward_path",
            || reward::plan_reward(ctx, &Ingredient::from_value(result)?, count),
        )?;
        planned.register(output);
        Ok(planned.path)
    }

    /// See [`recipe::extract_ingredients`].
    pub fn extract_ingredients(&mut self, recipe: &Value) -> Vec<Value> {
        self.recipes
            .entry(key_of(recipe))
            .or_insert_with(|| recipe::extract_ingredients(recipe))
            .clone()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
