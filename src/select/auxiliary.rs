//! Prebuilt GPU/device binaries shipped inside the PhysX source tree.
//!
//! The SDK carries precompiled `PhysXGpu` and `PhysXDevice` binaries under
//! `physx/bin/<platform dir>/<variant>/`. Which directory applies depends on
//! OS, architecture and (for MSVC) the compiler version. Combinations with no
//! prebuilt binaries select nothing; that is not an error.

use std::path::PathBuf;

use crate::core::platform::{Arch, Compiler, CompilerVersion, Os, PlatformDescriptor};
use crate::core::variant::BuildVariant;

/// Package subdirectory a binary is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageDir {
    Lib,
    Bin,
}

impl PackageDir {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageDir::Lib => "lib",
            PackageDir::Bin => "bin",
        }
    }
}

/// One copy rule: files in `dir` (relative to the source root) matching
/// `pattern` go to `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryCopy {
    pub dir: PathBuf,
    pub pattern: &'static str,
    pub dest: PackageDir,
}

/// The set of prebuilt binaries to copy for a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryBinaries {
    pub copies: Vec<AuxiliaryCopy>,
}

impl AuxiliaryBinaries {
    /// Distinct source directories, in copy order.
    pub fn dirs(&self) -> Vec<&PathBuf> {
        let mut dirs: Vec<&PathBuf> = Vec::new();
        for copy in &self.copies {
            if !dirs.contains(&&copy.dir) {
                dirs.push(&copy.dir);
            }
        }
        dirs
    }
}

fn bin_dir(platform_dir: &str, variant: BuildVariant) -> PathBuf {
    ["physx", "bin", platform_dir, variant.as_str()].iter().collect()
}

/// Select the prebuilt binary directories for a platform.
pub fn auxiliary_binary_path(
    descriptor: &PlatformDescriptor,
    variant: BuildVariant,
) -> Option<AuxiliaryBinaries> {
    match (&descriptor.os, &descriptor.arch, &descriptor.compiler) {
        (Os::Linux, Arch::X86_64, _) => Some(AuxiliaryBinaries {
            copies: vec![AuxiliaryCopy {
                dir: bin_dir("linux.clang", variant),
                pattern: "*PhysXGpu*.so",
                dest: PackageDir::Lib,
            }],
        }),
        (Os::Windows, arch, Compiler::Msvc) => {
            let prefix = match arch {
                Arch::X86 => "win.x86_32.",
                Arch::X86_64 => "win.x86_64.",
                _ => return None,
            };
            let (device_toolset, gpu_toolset) = msvc_toolsets(descriptor.compiler_version?)?;

            Some(AuxiliaryBinaries {
                copies: vec![
                    AuxiliaryCopy {
                        dir: bin_dir(&format!("{}{}", prefix, device_toolset), variant),
                        pattern: "PhysXDevice*.dll",
                        dest: PackageDir::Bin,
                    },
                    AuxiliaryCopy {
                        dir: bin_dir(&format!("{}{}", prefix, gpu_toolset), variant),
                        pattern: "PhysXGpu*.dll",
                        dest: PackageDir::Bin,
                    },
                ],
            })
        }
        _ => None,
    }
}

/// Toolset directory suffixes for (PhysXDevice, PhysXGpu).
///
/// The GPU DLL is only shipped for vc120 and vc140; newer toolsets reuse
/// the vc140 build.
fn msvc_toolsets(version: CompilerVersion) -> Option<(&'static str, &'static str)> {
    match version.major {
        12 => Some(("vc120.mt", "vc120.mt")),
        14 => Some(("vc140.mt", "vc140.mt")),
        15 => Some(("vc141.mt", "vc140.mt")),
        16.. => Some(("vc142.mt", "vc140.mt")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn msvc(arch: Arch, version: u32) -> PlatformDescriptor {
        PlatformDescriptor::new(Os::Windows, arch, Compiler::Msvc)
            .with_compiler_version(CompilerVersion::new(version))
    }

    #[test]
    fn test_linux_x86_64() {
        let desc = PlatformDescriptor::new(Os::Linux, Arch::X86_64, Compiler::Clang);
        let aux = auxiliary_binary_path(&desc, BuildVariant::Release).unwrap();

        assert_eq!(aux.copies.len(), 1);
        assert_eq!(aux.copies[0].dir, Path::new("physx/bin/linux.clang/release"));
        assert_eq!(aux.copies[0].pattern, "*PhysXGpu*.so");
        assert_eq!(aux.copies[0].dest, PackageDir::Lib);
    }

    #[test]
    fn test_linux_other_arch_has_none() {
        let desc = PlatformDescriptor::new(Os::Linux, Arch::Armv8, Compiler::Gcc);
        assert_eq!(auxiliary_binary_path(&desc, BuildVariant::Release), None);
    }

    #[test]
    fn test_windows_arm_has_none() {
        let desc = msvc(Arch::Armv7, 16);
        assert_eq!(auxiliary_binary_path(&desc, BuildVariant::Release), None);
    }

    #[test]
    fn test_windows_vc14() {
        let aux = auxiliary_binary_path(&msvc(Arch::X86, 14), BuildVariant::Checked).unwrap();

        assert_eq!(aux.dirs(), vec![Path::new("physx/bin/win.x86_32.vc140.mt/checked")]);
        assert_eq!(aux.copies[0].pattern, "PhysXDevice*.dll");
        assert_eq!(aux.copies[1].pattern, "PhysXGpu*.dll");
        assert!(aux.copies.iter().all(|c| c.dest == PackageDir::Bin));
    }

    #[test]
    fn test_windows_vc12() {
        let aux = auxiliary_binary_path(&msvc(Arch::X86_64, 12), BuildVariant::Release).unwrap();
        assert_eq!(aux.dirs(), vec![Path::new("physx/bin/win.x86_64.vc120.mt/release")]);
    }

    #[test]
    fn test_windows_vc15_takes_gpu_from_vc140() {
        let aux = auxiliary_binary_path(&msvc(Arch::X86_64, 15), BuildVariant::Profile).unwrap();

        assert_eq!(aux.copies[0].dir, Path::new("physx/bin/win.x86_64.vc141.mt/profile"));
        assert_eq!(aux.copies[1].dir, Path::new("physx/bin/win.x86_64.vc140.mt/profile"));
    }

    #[test]
    fn test_windows_vc16_and_newer() {
        for version in [16, 17] {
            let aux =
                auxiliary_binary_path(&msvc(Arch::X86_64, version), BuildVariant::Release).unwrap();
            assert_eq!(aux.copies[0].dir, Path::new("physx/bin/win.x86_64.vc142.mt/release"));
            assert_eq!(aux.copies[1].dir, Path::new("physx/bin/win.x86_64.vc140.mt/release"));
        }
    }

    #[test]
    fn test_windows_unknown_version_has_none() {
        assert_eq!(auxiliary_binary_path(&msvc(Arch::X86_64, 11), BuildVariant::Release), None);
        assert_eq!(auxiliary_binary_path(&msvc(Arch::X86_64, 13), BuildVariant::Release), None);

        let no_version = PlatformDescriptor::new(Os::Windows, Arch::X86_64, Compiler::Msvc);
        assert_eq!(auxiliary_binary_path(&no_version, BuildVariant::Release), None);
    }

    #[test]
    fn test_other_platforms_have_none() {
        let mac = PlatformDescriptor::new(Os::Macos, Arch::X86_64, Compiler::AppleClang);
        assert_eq!(auxiliary_binary_path(&mac, BuildVariant::Release), None);
    }
}
