//! Core domain types for flamecheck.
//!
//! - [`Label`] and [`Classification`] — the canned verdicts returned for an upload
//! - [`ReferenceSets`] and [`ReferenceSource`] — filenames known to be fire / not fire
//! - [`sanitize_filename`] — turns a client filename into a safe path segment
//!
//! # Example
//!
//! ```rust
//! use flamecheck_core::{classify, sanitize_filename, Classification, ReferenceSets};
//!
//! let refs = ReferenceSets::from_names(["blaze.jpg"], ["forest.jpg"]);
//! let name = sanitize_filename("../blaze.jpg");
//! assert_eq!(classify(&refs, &name), Classification::KNOWN_FIRE);
//! ```

mod filename;
mod reference;

pub use filename::{has_allowed_extension, sanitize_filename, ALLOWED_EXTENSIONS};
pub use reference::{classify, DirectoryReferences, ReferenceSets, ReferenceSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading reference data.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A reference directory could not be listed.
    #[error("Failed to list reference directory {}: {source}", path.display())]
    ReferenceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Verdict label reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Fire,
    NoFire,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fire => "fire",
            Label::NoFire => "no_fire",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus the fixed confidence attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub prediction: Label,
    pub confidence: f64,
}

impl Classification {
    /// Filename found in the fire reference set.
    pub const KNOWN_FIRE: Self = Self {
        prediction: Label::Fire,
        confidence: 0.95,
    };

    /// Filename found only in the no-fire reference set.
    pub const KNOWN_NO_FIRE: Self = Self {
        prediction: Label::NoFire,
        confidence: 0.96,
    };

    /// Filename found in neither set.
    pub const FALLBACK: Self = Self {
        prediction: Label::NoFire,
        confidence: 0.60,
    };
}
