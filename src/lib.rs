//! pxpack - a packaging recipe for the NVIDIA PhysX SDK
//!
//! This crate provides the library side of pxpack: configuration
//! selection, link-order resolution, and the source/build/package
//! pipeline driving the SDK's CMake build.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod select;
pub mod sources;
pub mod util;

pub use core::{BuildVariant, PlatformDescriptor, Recipe, RecipeOptions};
pub use resolver::LinkOrder;
pub use util::context::GlobalContext;
