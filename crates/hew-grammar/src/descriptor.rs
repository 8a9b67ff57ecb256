//! The opaque grammar artifact handed to the loader.
//!
//! A descriptor only records which language it claims to be and where its
//! bytes live. Nothing is read or parsed until the loader asks for it.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::GrammarLoadError;

/// Where the bytes of a descriptor come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorSource {
    /// Linked into the binary at build time.
    Embedded(&'static str),
    /// Already in memory.
    Owned(String),
    /// An artifact on disk, produced by a previous build step.
    File(PathBuf),
}

/// A compiled grammar descriptor and the language it is expected to describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarDescriptor {
    name: Option<Cow<'static, str>>,
    source: DescriptorSource,
}

impl GrammarDescriptor {
    /// Creates a descriptor for an artifact linked into the binary.
    #[must_use]
    pub const fn embedded(name: &'static str, json: &'static str) -> Self {
        Self {
            name: Some(Cow::Borrowed(name)),
            source: DescriptorSource::Embedded(json),
        }
    }

    /// Creates a descriptor from JSON already held in memory.
    ///
    /// No name is expected; use [`GrammarDescriptor::named`] to require one.
    #[must_use]
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            name: None,
            source: DescriptorSource::Owned(json.into()),
        }
    }

    /// Creates a descriptor for an artifact on disk.
    ///
    /// No name is expected; use [`GrammarDescriptor::named`] to require one.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            source: DescriptorSource::File(path.into()),
        }
    }

    /// Requires the loaded grammar to declare `name`.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The language this descriptor must describe, if checked.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Where the descriptor's bytes come from.
    #[must_use]
    pub fn source(&self) -> &DescriptorSource {
        &self.source
    }

    /// A short human-readable description of the artifact's origin.
    #[must_use]
    pub fn origin(&self) -> String {
        match &self.source {
            DescriptorSource::Embedded(_) => "<embedded>".to_string(),
            DescriptorSource::Owned(_) => "<memory>".to_string(),
            DescriptorSource::File(path) => path.display().to_string(),
        }
    }

    /// Returns the descriptor's JSON text, reading it from disk if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarLoadError::NotFound`] if a file artifact is missing, and
    /// [`GrammarLoadError::Io`] if it cannot be read.
    pub fn contents(&self) -> Result<Cow<'_, str>, GrammarLoadError> {
        match &self.source {
            DescriptorSource::Embedded(json) => Ok(Cow::Borrowed(*json)),
            DescriptorSource::Owned(json) => Ok(Cow::Borrowed(json.as_str())),
            DescriptorSource::File(path) => read_artifact(path).map(Cow::Owned),
        }
    }
}

fn read_artifact(path: &Path) -> Result<String, GrammarLoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => GrammarLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => GrammarLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
