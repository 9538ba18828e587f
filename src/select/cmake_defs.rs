//! CMake cache definitions for configuring the PhysX build.

use std::fmt;
use std::path::Path;

use crate::core::options::RecipeOptions;
use crate::core::platform::{Compiler, MsvcRuntime, Os, PlatformDescriptor};

/// A CMake cache value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CMakeValue {
    Bool(bool),
    String(String),
}

impl fmt::Display for CMakeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CMakeValue::Bool(true) => f.write_str("ON"),
            CMakeValue::Bool(false) => f.write_str("OFF"),
            CMakeValue::String(s) => f.write_str(s),
        }
    }
}

/// Ordered `-D` definitions passed to the configure step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CMakeDefinitions {
    entries: Vec<(String, CMakeValue)>,
}

impl CMakeDefinitions {
    /// Set a definition, replacing any earlier value for the same key.
    pub fn set(&mut self, key: &str, value: CMakeValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, CMakeValue::Bool(value));
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, CMakeValue::String(value.into()));
    }

    /// Set a path value; CMake wants forward slashes on every platform.
    pub fn set_path(&mut self, key: &str, path: &Path) {
        self.set_str(key, cmake_path(path));
    }

    pub fn get(&self, key: &str) -> Option<&CMakeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CMakeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `-DKEY=VALUE` arguments.
    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, v)| format!("-D{}={}", k, v))
            .collect()
    }
}

/// Render a path with forward slashes.
pub fn cmake_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// PhysX's name for the target platform.
pub fn target_build_platform(os: &Os) -> Option<&'static str> {
    match os {
        Os::Windows => Some("windows"),
        Os::Linux => Some("linux"),
        Os::Macos => Some("mac"),
        Os::Android => Some("android"),
        Os::Ios => Some("ios"),
        Os::Other(_) => None,
    }
}

/// Compute the configure-step definitions.
///
/// `source_dir` is the extracted SDK root (containing `physx/`, `pxshared/`
/// and `externals/`); `package_dir` is the install prefix.
pub fn cmake_definitions(
    descriptor: &PlatformDescriptor,
    options: &RecipeOptions,
    source_dir: &Path,
    package_dir: &Path,
) -> CMakeDefinitions {
    let mut defs = CMakeDefinitions::default();
    let is_windows = descriptor.os == Os::Windows;

    defs.set_str("CMAKE_BUILD_TYPE", options.build_type.as_str());
    defs.set_path("CMAKE_INSTALL_PREFIX", package_dir);

    // physx/compiler/public/CMakeLists.txt
    if let Some(platform) = target_build_platform(&descriptor.os) {
        defs.set_str("TARGET_BUILD_PLATFORM", platform);
    }
    defs.set_bool("PX_BUILDSNIPPETS", false);
    defs.set_bool("PX_BUILDPUBLICSAMPLES", false);
    defs.set_bool("PX_CMAKE_SUPPRESS_REGENERATION", false);
    let modules_dir = if is_windows { "CMakeModules" } else { "cmakemodules" };
    defs.set_path(
        "CMAKEMODULES_PATH",
        &source_dir.join("externals").join(modules_dir),
    );
    defs.set_path("PHYSX_ROOT_DIR", &source_dir.join("physx"));

    // physx/source/compiler/cmake/CMakeLists.txt
    if let Some(simd) = options.enable_simd {
        defs.set_bool("PX_SCALAR_MATH", !simd);
    }
    defs.set_bool("PX_GENERATE_STATIC_LIBRARIES", !options.shared);
    defs.set_bool("PX_EXPORT_LOWLEVEL_PDB", false);
    defs.set_path("PXSHARED_PATH", &source_dir.join("pxshared"));
    defs.set_path("PXSHARED_INSTALL_PREFIX", package_dir);
    defs.set_bool("PX_GENERATE_SOURCE_DISTRO", false);

    // externals/cmakemodules/NVidiaBuildOptions.cmake
    defs.set_bool("NV_APPEND_CONFIG_NAME", false);
    defs.set_bool("NV_USE_GAMEWORKS_OUTPUT_DIRS", false);
    if descriptor.compiler == Compiler::Msvc {
        let runtime = descriptor.compiler_runtime.unwrap_or(MsvcRuntime::MD);
        defs.set_bool("NV_USE_STATIC_WINCRT", runtime.is_static());
        defs.set_bool("NV_USE_DEBUG_WINCRT", runtime.is_debug());
    }
    defs.set_bool("NV_FORCE_64BIT_SUFFIX", false);
    defs.set_bool("NV_FORCE_32BIT_SUFFIX", false);
    defs.set_path("PX_ROOT_LIB_DIR", &package_dir.join("lib"));

    if is_windows {
        // Prebuilt DLLs are copied during packaging, not by the build.
        defs.set_bool("PX_COPY_EXTERNAL_DLL", false);
        defs.set_bool(
            "PX_FLOAT_POINT_PRECISE_MATH",
            options.enable_float_point_precise_math.unwrap_or(false),
        );
        defs.set_bool("PX_USE_NVTX", false);
        defs.set_bool("GPU_DLL_COPIED", true);
        defs.set_bool("PX_GENERATE_GPU_PROJECTS", false);
    }

    defs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, CompilerVersion};
    use crate::core::variant::BuildVariant;

    fn windows(runtime: MsvcRuntime) -> PlatformDescriptor {
        PlatformDescriptor::new(Os::Windows, Arch::X86_64, Compiler::Msvc)
            .with_compiler_version(CompilerVersion::new(16))
            .with_runtime(runtime)
    }

    #[test]
    fn test_linux_definitions() {
        let desc = PlatformDescriptor::new(Os::Linux, Arch::X86_64, Compiler::Gcc);
        let opts = RecipeOptions::for_os(&Os::Linux);
        let defs = cmake_definitions(&desc, &opts, Path::new("/work/src"), Path::new("/pkg"));

        assert_eq!(defs.get("TARGET_BUILD_PLATFORM"), Some(&CMakeValue::String("linux".into())));
        assert_eq!(defs.get("CMAKE_BUILD_TYPE"), Some(&CMakeValue::String("release".into())));
        assert_eq!(
            defs.get("CMAKEMODULES_PATH"),
            Some(&CMakeValue::String("/work/src/externals/cmakemodules".into()))
        );
        assert_eq!(
            defs.get("PX_ROOT_LIB_DIR"),
            Some(&CMakeValue::String("/pkg/lib".into()))
        );
        assert_eq!(defs.get("PX_GENERATE_STATIC_LIBRARIES"), Some(&CMakeValue::Bool(false)));

        // Windows/Android-only and MSVC-only entries are absent
        assert_eq!(defs.get("PX_SCALAR_MATH"), None);
        assert_eq!(defs.get("NV_USE_STATIC_WINCRT"), None);
        assert_eq!(defs.get("PX_USE_NVTX"), None);
    }

    #[test]
    fn test_windows_definitions() {
        let mut opts = RecipeOptions::for_os(&Os::Windows);
        opts.shared = false;
        opts.enable_simd = Some(false);
        opts.enable_float_point_precise_math = Some(true);
        opts.build_type = BuildVariant::Profile;

        let defs = cmake_definitions(
            &windows(MsvcRuntime::MT),
            &opts,
            Path::new("C:\\work\\src"),
            Path::new("C:\\pkg"),
        );

        assert_eq!(defs.get("TARGET_BUILD_PLATFORM"), Some(&CMakeValue::String("windows".into())));
        assert_eq!(defs.get("CMAKE_BUILD_TYPE"), Some(&CMakeValue::String("profile".into())));
        assert_eq!(defs.get("PX_SCALAR_MATH"), Some(&CMakeValue::Bool(true)));
        assert_eq!(defs.get("PX_GENERATE_STATIC_LIBRARIES"), Some(&CMakeValue::Bool(true)));
        assert_eq!(defs.get("PX_FLOAT_POINT_PRECISE_MATH"), Some(&CMakeValue::Bool(true)));
        assert_eq!(defs.get("GPU_DLL_COPIED"), Some(&CMakeValue::Bool(true)));
        assert_eq!(defs.get("PX_COPY_EXTERNAL_DLL"), Some(&CMakeValue::Bool(false)));

        let modules = defs.get("CMAKEMODULES_PATH").unwrap().to_string();
        assert!(modules.ends_with("externals/CMakeModules"));
        assert!(!modules.contains('\\'));
    }

    #[test]
    fn test_wincrt_from_runtime() {
        let opts = RecipeOptions::for_os(&Os::Windows);
        let cases = [
            (MsvcRuntime::MT, true, false),
            (MsvcRuntime::MTd, true, true),
            (MsvcRuntime::MDd, false, true),
            (MsvcRuntime::MD, false, false),
        ];

        for (runtime, is_static, is_debug) in cases {
            let defs = cmake_definitions(&windows(runtime), &opts, Path::new("/s"), Path::new("/p"));
            assert_eq!(defs.get("NV_USE_STATIC_WINCRT"), Some(&CMakeValue::Bool(is_static)));
            assert_eq!(defs.get("NV_USE_DEBUG_WINCRT"), Some(&CMakeValue::Bool(is_debug)));
        }
    }

    #[test]
    fn test_android_scalar_math() {
        let desc = PlatformDescriptor::new(Os::Android, Arch::Armv8, Compiler::Clang);
        let opts = RecipeOptions::for_os(&Os::Android);
        let defs = cmake_definitions(&desc, &opts, Path::new("/s"), Path::new("/p"));

        assert_eq!(defs.get("PX_SCALAR_MATH"), Some(&CMakeValue::Bool(false)));
        assert_eq!(defs.get("TARGET_BUILD_PLATFORM"), Some(&CMakeValue::String("android".into())));
    }

    #[test]
    fn test_set_replaces_and_renders_args() {
        let mut defs = CMakeDefinitions::default();
        defs.set_bool("A", true);
        defs.set_str("B", "x");
        defs.set_bool("A", false);

        assert_eq!(defs.len(), 2);
        assert_eq!(defs.to_args(), vec!["-DA=OFF", "-DB=x"]);
    }
}
