//! Core data structures for pxpack.
//!
//! This module contains the foundational types used throughout pxpack:
//! - Platform descriptors (OS, arch, compiler, runtime, host build type)
//! - Build variants and the recipe option set
//! - Recipe and profile files

pub mod options;
pub mod platform;
pub mod profile;
pub mod recipe;
pub mod variant;

pub use options::{OptionError, RecipeOptions};
pub use platform::{
    Arch, Compiler, CompilerVersion, HostBuildType, MsvcRuntime, Os, PlatformDescriptor,
    SettingError,
};
pub use profile::Profile;
pub use recipe::{Recipe, RECIPE_FILE};
pub use variant::{BuildVariant, Linkage};
