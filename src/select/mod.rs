//! Configuration selection.
//!
//! Everything platform-dependent about the recipe is a pure function of the
//! [`PlatformDescriptor`] and [`RecipeOptions`]: whether the combination is
//! accepted at all, which defines and flags consumers need, which prebuilt
//! binaries to copy, and how CMake is configured.

pub mod auxiliary;
pub mod cmake_defs;
pub mod defines;
pub mod validate;

pub use auxiliary::{auxiliary_binary_path, AuxiliaryBinaries, AuxiliaryCopy, PackageDir};
pub use cmake_defs::{cmake_definitions, CMakeDefinitions, CMakeValue};
pub use defines::{build_defines, build_flags, system_libs};
pub use validate::{validate, InvalidConfiguration};

use crate::core::options::RecipeOptions;
use crate::core::platform::PlatformDescriptor;

/// The consumer-facing configuration for one accepted platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub defines: Vec<String>,
    pub cxxflags: Vec<String>,
    pub system_libs: Vec<String>,
    pub auxiliary: Option<AuxiliaryBinaries>,
}

/// Validate and compute the full selection in one step.
pub fn select(
    descriptor: &PlatformDescriptor,
    options: &RecipeOptions,
) -> Result<Selection, InvalidConfiguration> {
    validate(descriptor, options)?;

    Ok(Selection {
        defines: build_defines(descriptor, options),
        cxxflags: build_flags(descriptor),
        system_libs: system_libs(descriptor),
        auxiliary: auxiliary_binary_path(descriptor, options.build_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, Compiler, HostBuildType, Os};
    use crate::core::variant::BuildVariant;

    #[test]
    fn test_select_linux_clang_static() {
        let desc = PlatformDescriptor::new(Os::Linux, Arch::X86_64, Compiler::Clang);
        let mut opts = RecipeOptions::for_os(&Os::Linux);
        opts.shared = false;

        let selection = select(&desc, &opts).unwrap();
        assert_eq!(selection.defines, vec!["PX_PHYSX_STATIC_LIB"]);
        assert_eq!(selection.cxxflags, vec!["-Wno-undef"]);
        assert_eq!(selection.system_libs, vec!["dl", "pthread", "rt"]);
        assert!(selection.auxiliary.is_some());
    }

    #[test]
    fn test_select_rejects_before_computing() {
        let desc = PlatformDescriptor::new(Os::Linux, Arch::X86_64, Compiler::Gcc)
            .with_build_type(HostBuildType::Debug);
        let opts = RecipeOptions::for_os(&Os::Linux);

        assert_eq!(
            select(&desc, &opts),
            Err(InvalidConfiguration::BuildTypeMismatch {
                host: HostBuildType::Debug,
                variant: BuildVariant::Release,
            })
        );
    }
}
