//! McPack Core -- ingredient identity resolution for data pack builds.
//!
//! An *ingredient* names a game item in one of two encodings: the direct
//! form `{"item": "minecraft:stick"}`, or the custom form that tags a base
//! item with `{"minecraft:custom_data": {"<project>": {"<id>": true}}}`.
//! This crate turns either encoding into canonical ids and full item
//! stacks, derives the loot tables a recipe result needs, and lists the
//! ingredients a recipe references.
//!
//! # Namespaces
//!
//! A qualified id `namespace:id` is owned by exactly one source:
//!
//! 1. **Project** -- the active project's namespace, looked up by local id.
//! 2. **Builtin** -- `minecraft`, which needs no lookup.
//! 3. **External** -- any other project, looked up by qualified id.
//!
//! # Key Types
//!
//! - [`ingredient::Ingredient`] -- Typed ingredient with JSON (de)encoding.
//! - [`context::BuildContext`] -- Immutable project id, catalogs and
//!   component exclusion set for one build.
//! - [`lookup::ResolvedItem`] -- An ingredient expanded to `{id, count, components}`.
//! - [`reward::LootTable`] / [`reward::OutputCatalog`] -- Derived reward
//!   tables and the sink they are registered in.
//! - [`session::BuildSession`] -- Memoizing, error-reporting front end scoped
//!   to one build run.

pub mod context;
pub mod definition;
pub mod error;
pub mod id;
pub mod ingredient;
pub mod lookup;
pub mod recipe;
pub mod reward;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use context::{BuildContext, BuildContextBuilder, ContextError};
pub use definition::{Catalog, Definition};
pub use error::{ErrorKind, IngredientError};
pub use id::ItemId;
pub use ingredient::Ingredient;
pub use lookup::ResolvedItem;
pub use reward::{DataPack, OutputCatalog};
pub use session::BuildSession;
