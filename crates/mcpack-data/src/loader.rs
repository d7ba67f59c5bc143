//! Finding and parsing the data files of a build directory.
//!
//! Each [`DataFile`] may be written as RON, JSON or TOML. At most one format
//! may exist per file; two are reported as a conflict rather than guessed
//! between.

use mcpack_core::ContextError;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ===========================================================================
// Data files
// ===========================================================================

/// The data files a build directory can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    /// `build.*`: project id and build options. Required.
    Build,
    /// `definitions.*`: project items keyed by local id.
    Definitions,
    /// `external_definitions.*`: other projects' items keyed by qualified id.
    ExternalDefinitions,
}

impl DataFile {
    /// File name without extension.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Definitions => "definitions",
            Self::ExternalDefinitions => "external_definitions",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading build data.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: DataFile, dir: PathBuf },

    #[error("'{file}' exists in more than one format: {a} and {b}")]
    ConflictingFormats {
        file: DataFile,
        a: PathBuf,
        b: PathBuf,
    },

    #[error("cannot read '{file}' at {path}: {source}")]
    Read {
        file: DataFile,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in '{file}' ({path}): {detail}")]
    Parse {
        file: DataFile,
        path: PathBuf,
        detail: String,
    },

    /// The files parsed but do not form a valid build context.
    #[error("invalid build data: {0}")]
    Context(#[from] ContextError),
}

// ===========================================================================
// Formats
// ===========================================================================

/// Supported data file formats, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Json,
    Toml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Json, Format::Toml];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Ron => "ron",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Self::Ron => ron::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// A data file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub file: DataFile,
    pub path: PathBuf,
    pub format: Format,
}

/// Find `file` in `dir` in whichever format it was written.
pub fn locate(dir: &Path, file: DataFile) -> Result<Option<Located>, DataLoadError> {
    let mut found: Option<Located> = None;
    for format in Format::ALL {
        let path = dir.join(format!("{}.{}", file.stem(), format.extension()));
        if !path.is_file() {
            continue;
        }
        if let Some(existing) = found {
            return Err(DataLoadError::ConflictingFormats {
                file,
                a: existing.path,
                b: path,
            });
        }
        found = Some(Located { file, path, format });
    }
    Ok(found)
}

impl Located {
    /// Read and deserialize the file.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, DataLoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| DataLoadError::Read {
            file: self.file,
            path: self.path.clone(),
            source,
        })?;
        debug!(file = %self.file, path = %self.path.display(), format = ?self.format, "parsing data file");
        self.format
            .parse(&content)
            .map_err(|detail| DataLoadError::Parse {
                file: self.file,
                path: self.path.clone(),
                detail,
            })
    }
}

/// Parse `file` from `dir`, failing if it is absent.
pub fn require<T: DeserializeOwned>(dir: &Path, file: DataFile) -> Result<T, DataLoadError> {
    locate(dir, file)?
        .ok_or_else(|| DataLoadError::MissingRequired {
            file,
            dir: dir.to_path_buf(),
        })?
        .parse()
}

/// Parse `file` from `dir` if it exists.
pub fn load_optional<T: DeserializeOwned>(
    dir: &Path,
    file: DataFile,
) -> Result<Option<T>, DataLoadError> {
    locate(dir, file)?.map(|found| found.parse()).transpose()
}

// ===========================================================================
// Tests
// ===========================================================================
