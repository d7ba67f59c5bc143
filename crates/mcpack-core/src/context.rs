use std::collections::HashSet;

use crate::definition::{Catalog, DEFAULT_NON_COMPONENTS, Definition};
use crate::id::{BUILTIN_NAMESPACE, ItemId};

/// Builder for an immutable [`BuildContext`].
/// Two-phase lifecycle: registration -> finalization.
#[derive(Debug)]
pub struct BuildContextBuilder {
    project_id: String,
    definitions: Catalog,
    external_definitions: Catalog,
    non_components: HashSet<String>,
}

impl BuildContextBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            definitions: Catalog::new(),
            external_definitions: Catalog::new(),
            non_components: DEFAULT_NON_COMPONENTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Register a project-local definition under its local id.
    pub fn register_definition(&mut self, local_id: &str, definition: Definition) -> &mut Self {
        self.definitions.insert(local_id.to_string(), definition);
        self
    }

    /// Register a definition owned by another project, keyed `namespace:id`.
    pub fn register_external(&mut self, qualified_id: &str, definition: Definition) -> &mut Self {
        self.external_definitions
            .insert(qualified_id.to_string(), definition);
        self
    }

    /// Replace the set of metadata fields that are never emitted as components.
    pub fn non_components<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_components = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Finalize and build the immutable context.
    pub fn build(self) -> Result<BuildContext, ContextError> {
        if self.project_id.is_empty() || ItemId::is_qualified(&self.project_id) {
            return Err(ContextError::InvalidProjectId(self.project_id));
        }
        if self.project_id == BUILTIN_NAMESPACE {
            return Err(ContextError::ReservedProjectId(self.project_id));
        }

        // External keys carry their own namespace, which must not shadow ours.
        for key in self.external_definitions.keys() {
            match ItemId::parse(key) {
                Some(id) if id.namespace != self.project_id => {}
                Some(_) => return Err(ContextError::ExternalShadowsProject(key.clone())),
                None => return Err(ContextError::UnqualifiedExternalKey(key.clone())),
            }
        }

        for (key, def) in self
            .definitions
            .iter()
            .chain(self.external_definitions.iter())
        {
            if !ItemId::is_qualified(&def.id) {
                return Err(ContextError::UnqualifiedDefinitionId {
                    key: key.clone(),
                    id: def.id.clone(),
                });
            }
        }

        Ok(BuildContext {
            project_id: self.project_id,
            definitions: self.definitions,
            external_definitions: self.external_definitions,
            non_components: self.non_components,
        })
    }
}

/// Read-only state for one build: the active project and its catalogs.
/// Frozen after build(). Safe to share between sessions.
#[derive(Debug, Clone)]
pub struct BuildContext {
    project_id: String,
    definitions: Catalog,
    external_definitions: Catalog,
    non_components: HashSet<String>,
}

impl BuildContext {
    pub fn builder(project_id: &str) -> BuildContextBuilder {
        BuildContextBuilder::new(project_id)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn definition(&self, local_id: &str) -> Option<&Definition> {
        self.definitions.get(local_id)
    }

    pub fn external_definition(&self, qualified_id: &str) -> Option<&Definition> {
        self.external_definitions.get(qualified_id)
    }

    pub fn non_components(&self) -> &HashSet<String> {
        &self.non_components
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn external_count(&self) -> usize {
        self.external_definitions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("invalid project id '{0}'")]
    InvalidProjectId(String),
    #[error("project id '{0}' is reserved for built-in items")]
    ReservedProjectId(String),
    #[error("external definition key '{0}' is not a qualified id")]
    UnqualifiedExternalKey(String),
    #[error("external definition '{0}' uses the project's own namespace")]
    ExternalShadowsProject(String),
    #[error("definition '{key}' has unqualified id '{id}'")]
    UnqualifiedDefinitionId { key: String, id: String },
}
