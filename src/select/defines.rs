//! Preprocessor defines and compiler flags consumers of the package need.

use crate::core::options::RecipeOptions;
use crate::core::platform::{Compiler, Os, PlatformDescriptor};
use crate::core::variant::BuildVariant;

pub const DEBUG_DEFINE: &str = "PX_DEBUG=1";
pub const CHECKED_DEFINE: &str = "PX_CHECKED=1";
pub const PROFILE_DEFINE: &str = "PX_PROFILE=1";
pub const STATIC_LIB_DEFINE: &str = "PX_PHYSX_STATIC_LIB";

/// One export define per PhysX DLL.
pub const EXPORT_DEFINES: [&str; 4] = [
    "PX_PHYSX_CORE_EXPORTS",
    "PX_PHYSX_COOKING_EXPORTS",
    "PX_PHYSX_COMMON_EXPORTS",
    "PX_PHYSX_FOUNDATION_EXPORTS",
];

/// Defines a consumer must compile with.
pub fn build_defines(descriptor: &PlatformDescriptor, options: &RecipeOptions) -> Vec<String> {
    let mut defines: Vec<&str> = match options.build_type {
        BuildVariant::Debug => vec![DEBUG_DEFINE, CHECKED_DEFINE],
        BuildVariant::Checked => vec![CHECKED_DEFINE],
        BuildVariant::Profile => vec![PROFILE_DEFINE],
        BuildVariant::Release => vec![],
    };

    match (&descriptor.os, options.shared) {
        (Os::Windows, true) => defines.extend(EXPORT_DEFINES),
        (Os::Windows | Os::Linux, false) => defines.push(STATIC_LIB_DEFINE),
        _ => {}
    }

    defines.into_iter().map(String::from).collect()
}

/// Extra C++ flags a consumer must compile with.
pub fn build_flags(descriptor: &PlatformDescriptor) -> Vec<String> {
    if descriptor.compiler == Compiler::Clang {
        vec!["-Wno-undef".to_string()]
    } else {
        Vec::new()
    }
}

/// System libraries to link alongside PhysX.
pub fn system_libs(descriptor: &PlatformDescriptor) -> Vec<String> {
    let libs: &[&str] = match descriptor.os {
        Os::Linux => &["dl", "pthread", "rt"],
        Os::Android => &["log"],
        _ => &[],
    };
    libs.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::Arch;

    fn descriptor(os: Os, compiler: Compiler) -> PlatformDescriptor {
        PlatformDescriptor::new(os, Arch::X86_64, compiler)
    }

    fn options(os: &Os, variant: BuildVariant, shared: bool) -> RecipeOptions {
        let mut opts = RecipeOptions::for_os(os);
        opts.build_type = variant;
        opts.shared = shared;
        opts
    }

    #[test]
    fn test_debug_windows_shared() {
        let desc = descriptor(Os::Windows, Compiler::Msvc);
        let defines = build_defines(&desc, &options(&Os::Windows, BuildVariant::Debug, true));

        assert!(defines.contains(&DEBUG_DEFINE.to_string()));
        assert!(defines.contains(&CHECKED_DEFINE.to_string()));
        for export in EXPORT_DEFINES {
            assert!(defines.contains(&export.to_string()));
        }
        assert!(!defines.contains(&STATIC_LIB_DEFINE.to_string()));
        assert_eq!(defines.len(), 6);
    }

    #[test]
    fn test_variant_defines() {
        let desc = descriptor(Os::Macos, Compiler::AppleClang);

        assert_eq!(
            build_defines(&desc, &options(&Os::Macos, BuildVariant::Checked, true)),
            vec![CHECKED_DEFINE]
        );
        assert_eq!(
            build_defines(&desc, &options(&Os::Macos, BuildVariant::Profile, true)),
            vec![PROFILE_DEFINE]
        );
        assert!(build_defines(&desc, &options(&Os::Macos, BuildVariant::Release, true)).is_empty());
    }

    #[test]
    fn test_static_define() {
        let win = descriptor(Os::Windows, Compiler::Msvc);
        assert_eq!(
            build_defines(&win, &options(&Os::Windows, BuildVariant::Release, false)),
            vec![STATIC_LIB_DEFINE]
        );

        let linux = descriptor(Os::Linux, Compiler::Gcc);
        assert_eq!(
            build_defines(&linux, &options(&Os::Linux, BuildVariant::Profile, false)),
            vec![PROFILE_DEFINE, STATIC_LIB_DEFINE]
        );

        // No linkage defines for other platforms
        let android = descriptor(Os::Android, Compiler::Clang);
        assert!(build_defines(&android, &options(&Os::Android, BuildVariant::Release, false)).is_empty());
        let linux_shared = build_defines(&linux, &options(&Os::Linux, BuildVariant::Release, true));
        assert!(linux_shared.is_empty());
    }

    #[test]
    fn test_flags() {
        assert_eq!(build_flags(&descriptor(Os::Linux, Compiler::Clang)), vec!["-Wno-undef"]);
        assert!(build_flags(&descriptor(Os::Linux, Compiler::Gcc)).is_empty());
        assert!(build_flags(&descriptor(Os::Macos, Compiler::AppleClang)).is_empty());
        assert!(build_flags(&descriptor(Os::Windows, Compiler::Msvc)).is_empty());
    }

    #[test]
    fn test_system_libs() {
        assert_eq!(
            system_libs(&descriptor(Os::Linux, Compiler::Gcc)),
            vec!["dl", "pthread", "rt"]
        );
        assert_eq!(system_libs(&descriptor(Os::Android, Compiler::Clang)), vec!["log"]);
        assert!(system_libs(&descriptor(Os::Windows, Compiler::Msvc)).is_empty());
    }
}
