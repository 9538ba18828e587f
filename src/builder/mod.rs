//! PhysX build driver.
//!
//! Wraps the SDK's own CMake project: the build context fixes directories
//! and tools for one configuration, and the CMake builder runs configure,
//! build and install against it.

pub mod cmake;
pub mod context;

pub use cmake::CMakeBuilder;
pub use context::{BuildContext, BUILD_SUBFOLDER, SOURCE_SUBFOLDER};
