//! Source acquisition.
//!
//! Fetching the PhysX source archive, unpacking it into the work directory
//! and applying the recipe's patches.

pub mod patch;
pub mod tarball;

pub use patch::{apply_patches, PatchStatus};
pub use tarball::{extract_tarball, fetch_archive};
