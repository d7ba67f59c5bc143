//! Error types shared by every resolution step.

use serde_json::Value;

/// Coarse classification of an [`IngredientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A disambiguating input was omitted.
    Configuration,
    /// An ingredient's encoding is broken.
    DataIntegrity,
    /// A resolved id has no owning definition.
    Lookup,
}

/// Errors raised while encoding, resolving or expanding ingredients.
///
/// None of these are transient: they all describe malformed build input and
/// abort the current derivation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngredientError {
    /// An unqualified id was given without a namespace.
    #[error(
        "namespace must be specified for custom ingredient '{id}', or you may be missing 'minecraft:'"
    )]
    Configuration { id: String },

    /// The custom data marker carries no `{namespace: {id: true}}` entry.
    #[error("no namespace found in custom data: {custom_data}")]
    DataIntegrity { custom_data: Value },

    /// The ingredient is neither the direct nor the custom form.
    #[error("malformed ingredient {ingredient}: {reason}")]
    Malformed { ingredient: Value, reason: String },

    /// A project-local id is absent from the definitions catalog.
    #[error("item '{id}' not found in the project definitions")]
    UnknownProjectItem { id: String },

    /// A foreign id is absent from the external definitions catalog.
    #[error("external item '{id}' not found in the external definitions")]
    UnknownExternalItem { id: String },
}

impl IngredientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::DataIntegrity { .. } | Self::Malformed { .. } => ErrorKind::DataIntegrity,
            Self::UnknownProjectItem { .. } | Self::UnknownExternalItem { .. } => ErrorKind::Lookup,
        }
    }

    pub(crate) fn malformed(ingredient: &Value, reason: impl Into<String>) -> Self {
        Self::Malformed {
            ingredient: ingredient.clone(),
            reason: reason.into(),
        }
    }
}
