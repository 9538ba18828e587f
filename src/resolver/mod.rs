//! Artifact resolution.
//!
//! Turns the flat set of library files a build produced into a link line.
//! The resolver is pure and deterministic - all directory scanning happens
//! before resolution.

pub mod link_order;

pub use link_order::{
    artifact_base_name, resolve, ArtifactName, LinkOrder, LinkOrderError, PHYSX_LINK_ORDER,
};
