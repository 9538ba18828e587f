//! Rejection of unsupported platform/compiler/variant combinations.

use thiserror::Error;

use crate::core::options::RecipeOptions;
use crate::core::platform::{Compiler, CompilerVersion, HostBuildType, MsvcRuntime, Os, PlatformDescriptor};
use crate::core::variant::BuildVariant;

/// Oldest Visual Studio the PhysX build scripts accept.
pub const MIN_MSVC_VERSION: CompilerVersion = CompilerVersion {
    major: 9,
    minor: None,
};

/// A configuration the recipe refuses to build.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("PhysX is not supported on {os}")]
    UnsupportedOs { os: String },

    #[error("PhysX does not support {compiler} on {os}")]
    UnsupportedCompiler { compiler: String, os: String },

    #[error("settings build_type={host} is not compatible with physx:build_type={variant}")]
    BuildTypeMismatch {
        host: HostBuildType,
        variant: BuildVariant,
    },

    #[error("compiler.version must be set for {compiler}")]
    MissingCompilerVersion { compiler: String },

    #[error("PhysX does not support Visual Studio < {min} (got {version})")]
    CompilerTooOld {
        version: CompilerVersion,
        min: CompilerVersion,
    },

    #[error(
        "Visual Studio compiler runtime {expected} is required when physx:build_type={variant} (got {})",
        .runtime.map(|r| r.as_str()).unwrap_or("none")
    )]
    RuntimeMismatch {
        runtime: Option<MsvcRuntime>,
        variant: BuildVariant,
        expected: &'static str,
    },
}

/// Check that the descriptor/option combination can be built.
///
/// Nothing external runs before this passes.
pub fn validate(
    descriptor: &PlatformDescriptor,
    options: &RecipeOptions,
) -> Result<(), InvalidConfiguration> {
    if matches!(descriptor.os, Os::Other(_)) {
        return Err(InvalidConfiguration::UnsupportedOs {
            os: descriptor.os.to_string(),
        });
    }

    if descriptor.os == Os::Windows && descriptor.compiler != Compiler::Msvc {
        return Err(InvalidConfiguration::UnsupportedCompiler {
            compiler: descriptor.compiler.to_string(),
            os: descriptor.os.to_string(),
        });
    }

    // The two build-type signals must agree; neither is coerced into the other.
    let variant = options.build_type;
    if variant.is_debug() != (descriptor.build_type == HostBuildType::Debug) {
        return Err(InvalidConfiguration::BuildTypeMismatch {
            host: descriptor.build_type,
            variant,
        });
    }

    if descriptor.compiler == Compiler::Msvc {
        let version = descriptor.compiler_version.ok_or_else(|| {
            InvalidConfiguration::MissingCompilerVersion {
                compiler: descriptor.compiler.to_string(),
            }
        })?;
        if version < MIN_MSVC_VERSION {
            return Err(InvalidConfiguration::CompilerTooOld {
                version,
                min: MIN_MSVC_VERSION,
            });
        }

        let runtime = descriptor.compiler_runtime;
        let runtime_is_debug = runtime.map(MsvcRuntime::is_debug);
        if variant.is_debug() && runtime_is_debug != Some(true) {
            return Err(InvalidConfiguration::RuntimeMismatch {
                runtime,
                variant,
                expected: "MDd or MTd",
            });
        }
        if !variant.is_debug() && runtime_is_debug != Some(false) {
            return Err(InvalidConfiguration::RuntimeMismatch {
                runtime,
                variant,
                expected: "MD or MT",
            });
        }
    }

    Ok(())
}
