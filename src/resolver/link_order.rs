//! Link-order resolution for discovered library files.
//!
//! The build produces a flat set of library files whose names carry
//! platform decorations (`lib` prefix, `_static`/`-x64` suffixes,
//! extensions). Linkers that resolve symbols in a single pass need them in
//! dependency order, so each file is classified by the logical library it
//! implements and emitted in the declared order of those libraries.

use std::path::Path;

use thiserror::Error;

/// Link order of the PhysX 4.x libraries.
///
/// - PhysX is a dependency of PhysXExtensions.
/// - PhysXPvdSDK is a dependency of PhysXExtensions, PhysX and PhysXVehicle.
/// - PhysXCommon is a dependency of PhysX and PhysXCooking.
/// - PhysXFoundation is a dependency of everything else.
pub const PHYSX_LINK_ORDER: [&str; 8] = [
    "PhysXExtensions",
    "PhysX",
    "PhysXVehicle",
    "PhysXPvdSDK",
    "PhysXCooking",
    "PhysXCommon",
    "PhysXCharacterKinematic",
    "PhysXFoundation",
];

/// A declared link order that cannot classify artifacts unambiguously.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkOrderError {
    #[error("library name cannot be empty")]
    EmptyName,

    #[error("library `{0}` is listed more than once")]
    Duplicate(String),

    #[error("library `{suffix}` is a suffix of `{name}`; their artifacts cannot be told apart")]
    OverlappingSuffix { suffix: String, name: String },
}

/// A discovered artifact and the logical library it was matched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub file: String,
    pub logical: Option<String>,
}

/// An ordered list of logical library names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOrder {
    names: Vec<String>,
}

impl LinkOrder {
    /// Build a link order, rejecting names that would make classification
    /// depend on list position.
    pub fn new<I, S>(names: I) -> Result<Self, LinkOrderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        // Every name ends with "", so empties must be caught before the
        // pairwise suffix check
        if names.iter().any(String::is_empty) {
            return Err(LinkOrderError::EmptyName);
        }

        for (i, name) in names.iter().enumerate() {
            for other in &names[i + 1..] {
                if name == other {
                    return Err(LinkOrderError::Duplicate(name.clone()));
                }
                if other.ends_with(name.as_str()) {
                    return Err(LinkOrderError::OverlappingSuffix {
                        suffix: name.clone(),
                        name: other.clone(),
                    });
                }
                if name.ends_with(other.as_str()) {
                    return Err(LinkOrderError::OverlappingSuffix {
                        suffix: other.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(LinkOrder { names })
    }

    /// The PhysX library order.
    pub fn physx() -> Self {
        LinkOrder {
            names: PHYSX_LINK_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of the logical library an artifact file implements.
    pub fn classify(&self, file: &str) -> Option<usize> {
        classify(file, &self.names)
    }

    /// Classify every artifact, keeping discovery order.
    pub fn classify_all<S: AsRef<str>>(&self, discovered: &[S]) -> Vec<ArtifactName> {
        discovered
            .iter()
            .map(|file| ArtifactName {
                file: file.as_ref().to_string(),
                logical: self.classify(file.as_ref()).map(|i| self.names[i].clone()),
            })
            .collect()
    }

    /// Order artifacts by this link order; see [`resolve`].
    pub fn apply<S: AsRef<str>>(&self, discovered: &[S]) -> Vec<String> {
        resolve(discovered, &self.names)
    }
}

/// Strip the extension and any trailing `-` variant tag from a file name.
///
/// `libPhysX_static_64-x64.a` becomes `libPhysX_static_64`.
pub fn artifact_base_name(file: &str) -> &str {
    let stem = Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file);

    match stem.rsplit_once('-') {
        Some((base, _)) => base,
        None => stem,
    }
}

fn classify<S: AsRef<str>>(file: &str, priority: &[S]) -> Option<usize> {
    let base = artifact_base_name(file);
    priority.iter().position(|name| base.ends_with(name.as_ref()))
}

/// Order discovered artifacts by a declared list of logical names.
///
/// Each artifact goes into the bucket of the first logical name its base
/// name ends with, or into a trailing overflow bucket. Buckets are
/// concatenated in declared order; discovery order is kept within each.
/// Every input appears exactly once in the output.
pub fn resolve<S, P>(discovered: &[S], priority: &[P]) -> Vec<String>
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); priority.len()];
    let mut overflow = Vec::new();

    for file in discovered {
        let file = file.as_ref();
        match classify(file, priority) {
            Some(pos) => buckets[pos].push(file.to_string()),
            None => overflow.push(file.to_string()),
        }
    }

    buckets.into_iter().flatten().chain(overflow).collect()
}
