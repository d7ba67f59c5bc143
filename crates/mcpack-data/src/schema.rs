//! Serde structs for the build configuration file.

use serde::Deserialize;

/// `build.{ron,json,toml}`: which project is being built and which
/// definition fields are build metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub project_id: String,
    /// Overrides the default component exclusion set when present.
    #[serde(default)]
    pub non_components: Option<Vec<String>>,
}
