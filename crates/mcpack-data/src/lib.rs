//! Loads a build's configuration and definition catalogs from disk.
//!
//! A data directory holds:
//!
//! - `build.{ron,json,toml}` (required) -- [`schema::BuildConfig`].
//! - `definitions.{ron,json,toml}` -- project items keyed by local id.
//! - `external_definitions.{ron,json,toml}` -- other projects' items keyed
//!   by qualified id.

pub mod loader;
pub mod schema;

pub use loader::{DataFile, DataLoadError, Format};
pub use schema::BuildConfig;

use mcpack_core::{BuildContext, Catalog};
use std::path::Path;
use tracing::info;

/// Load every data file in `dir` and build the context for one build run.
pub fn load_build_context(dir: &Path) -> Result<BuildContext, DataLoadError> {
    let config: BuildConfig = loader::require(dir, DataFile::Build)?;
    let definitions: Catalog =
        loader::load_optional(dir, DataFile::Definitions)?.unwrap_or_default();
    let externals: Catalog =
        loader::load_optional(dir, DataFile::ExternalDefinitions)?.unwrap_or_default();

    info!(
        project = %config.project_id,
        definitions = definitions.len(),
        external_definitions = externals.len(),
        dir = %dir.display(),
        "loaded build data"
    );
    context_from_parts(config, definitions, externals)
}

/// Assemble a context from already-deserialized parts.
pub fn context_from_parts(
    config: BuildConfig,
    definitions: Catalog,
    externals: Catalog,
) -> Result<BuildContext, DataLoadError> {
    let mut builder = BuildContext::builder(&config.project_id);
    for (local_id, def) in definitions {
        builder.register_definition(&local_id, def);
    }
    for (qualified_id, def) in externals {
        builder.register_external(&qualified_id, def);
    }
    if let Some(fields) = config.non_components {
        builder.non_components(fields);
    }
    Ok(builder.build()?)
}
