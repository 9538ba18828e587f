//! High-level operations.
//!
//! This module contains the implementation of pxpack commands.

pub mod package_id;
pub mod pxpack_build;
pub mod pxpack_create;
pub mod pxpack_info;
pub mod pxpack_package;
pub mod pxpack_source;

pub use package_id::{package_id, package_id_inputs};
pub use pxpack_build::build;
pub use pxpack_create::create;
pub use pxpack_info::{collect_libs, package_info, read_info, write_info, PackageInfo, INFO_FILE};
pub use pxpack_package::{assemble, package};
pub use pxpack_source::source;
