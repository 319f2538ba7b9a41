//! Reference filename sets and the lookup that classifies against them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::{Classification, CoreError};

/// Filenames known to be fire and known to be not fire.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSets {
    pub fire: HashSet<String>,
    pub no_fire: HashSet<String>,
}

impl ReferenceSets {
    pub fn from_names<F, N>(fire: F, no_fire: N) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            fire: fire.into_iter().map(Into::into).collect(),
            no_fire: no_fire.into_iter().map(Into::into).collect(),
        }
    }
}

/// Looks `filename` up in the reference sets.
///
/// The fire set is consulted first, so a name present in both sets is fire.
pub fn classify(refs: &ReferenceSets, filename: &str) -> Classification {
    if refs.fire.contains(filename) {
        Classification::KNOWN_FIRE
    } else if refs.no_fire.contains(filename) {
        Classification::KNOWN_NO_FIRE
    } else {
        Classification::FALLBACK
    }
}

/// Supplies a fresh snapshot of the reference sets.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load(&self) -> Result<ReferenceSets, CoreError>;
}

/// Fixed in-memory sets.
#[async_trait]
impl ReferenceSource for ReferenceSets {
    async fn load(&self) -> Result<ReferenceSets, CoreError> {
        Ok(self.clone())
    }
}

/// Lists the two reference directories on every call. Nothing is cached.
#[derive(Debug, Clone)]
pub struct DirectoryReferences {
    fire_dir: PathBuf,
    no_fire_dir: PathBuf,
}

impl DirectoryReferences {
    pub fn new(fire_dir: impl Into<PathBuf>, no_fire_dir: impl Into<PathBuf>) -> Self {
        Self {
            fire_dir: fire_dir.into(),
            no_fire_dir: no_fire_dir.into(),
        }
    }
}

#[async_trait]
impl ReferenceSource for DirectoryReferences {
    async fn load(&self) -> Result<ReferenceSets, CoreError> {
        let (fire, no_fire) =
            tokio::try_join!(list_names(&self.fire_dir), list_names(&self.no_fire_dir))?;
        Ok(ReferenceSets { fire, no_fire })
    }
}

async fn list_names(dir: &Path) -> Result<HashSet<String>, CoreError> {
    let to_error = |source: std::io::Error| CoreError::ReferenceDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(to_error)?;
    let mut names = HashSet::new();

    while let Some(entry) = entries.next_entry().await.map_err(to_error)? {
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(raw) => debug!("Skipping non UTF-8 reference entry {:?}", raw),
        }
    }

    Ok(names)
}
