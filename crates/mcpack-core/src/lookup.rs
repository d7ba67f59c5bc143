//! Cross-namespace lookup: which catalog owns an ingredient, and what it
//! expands to.
//!
//! Every qualified id falls into exactly one [`Owner`]:
//!
//! 1. **Project** -- the namespace is the active project's id; the local id
//!    is looked up in the project catalog.
//! 2. **Builtin** -- the `minecraft` namespace; no lookup is needed.
//! 3. **External** -- anything else; the qualified id is looked up in the
//!    external catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::BuildContext;
use crate::definition::Definition;
use crate::error::IngredientError;
use crate::id::{BUILTIN_NAMESPACE, ItemId};
use crate::ingredient::Ingredient;

/// The catalog that owns a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Project,
    Builtin,
    External,
}

/// Classify `namespace` against the active project.
pub fn classify(ctx: &BuildContext, namespace: &str) -> Owner {
    if namespace == ctx.project_id() {
        Owner::Project
    } else if namespace == BUILTIN_NAMESPACE {
        Owner::Builtin
    } else {
        Owner::External
    }
}

/// An ingredient expanded to a full item stack description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub id: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Map<String, Value>>,
}

impl ResolvedItem {
    fn from_definition(def: &Definition, ctx: &BuildContext) -> Self {
        Self {
            id: def.id.clone(),
            count: 1,
            components: def.components(ctx.non_components()),
        }
    }
}

/// Find the definition behind a project or external id.
///
/// Returns `Ok(None)` for built-in ids, which have no definition.
pub fn find_definition<'a>(
    ctx: &'a BuildContext,
    id: &ItemId,
) -> Result<Option<&'a Definition>, IngredientError> {
    match classify(ctx, &id.namespace) {
        Owner::Project => ctx
            .definition(&id.local)
            .map(Some)
            .ok_or_else(|| IngredientError::UnknownProjectItem { id: id.to_string() }),
        Owner::Builtin => Ok(None),
        Owner::External => {
            let qualified = id.to_string();
            ctx.external_definition(&qualified)
                .map(Some)
                .ok_or(IngredientError::UnknownExternalItem { id: qualified })
        }
    }
}

/// The real game item id behind an ingredient.
///
/// Project and external ingredients map to their definition's `id`; built-in
/// ingredients map to themselves. With `qualify` unset only the local part
/// is returned.
pub fn resolve_vanilla_id(
    ctx: &BuildContext,
    ingredient: &Ingredient,
    qualify: bool,
) -> Result<String, IngredientError> {
    let id = ingredient.item_id()?;
    match find_definition(ctx, &id)? {
        Some(def) if qualify => Ok(def.id.clone()),
        Some(def) => Ok(def.local_id().to_string()),
        None => Ok(id.render(qualify)),
    }
}

/// Expand an ingredient into `{id, count: 1, components?}`.
///
/// Built-in ingredients expand to their bare local id with no components.
pub fn resolve_item(
    ctx: &BuildContext,
    ingredient: &Ingredient,
) -> Result<ResolvedItem, IngredientError> {
    let id = ingredient.item_id()?;
    Ok(match find_definition(ctx, &id)? {
        Some(def) => ResolvedItem::from_definition(def, ctx),
        None => ResolvedItem {
            id: id.local,
            count: 1,
            components: None,
        },
    })
}

// ===========================================================================
// Tests
// ===========================================================================
