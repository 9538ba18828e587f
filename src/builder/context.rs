//! Build context - platform, options, directories and tool configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::options::RecipeOptions;
use crate::core::platform::PlatformDescriptor;
use crate::core::variant::BuildVariant;
use crate::util::config::Config;
use crate::util::GlobalContext;

/// Directory the extracted source tree is renamed to.
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// CMake binary directory.
pub const BUILD_SUBFOLDER: &str = "build_subfolder";

/// Everything a pipeline step needs to know about one configuration.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Target platform
    pub descriptor: PlatformDescriptor,

    /// Recipe options for that platform
    pub options: RecipeOptions,

    /// Holds the extracted source and the CMake build tree
    pub work_dir: PathBuf,

    /// Install prefix and final package layout
    pub package_dir: PathBuf,

    /// Cache for downloaded archives
    pub download_dir: PathBuf,

    /// Delay before retrying the source rename
    pub rename_retry_delay: Duration,

    /// CMake generator, if not the platform default
    pub generator: Option<String>,

    /// Parallel jobs for `cmake --build`
    pub jobs: Option<usize>,

    /// Explicit path to cmake
    pub cmake: Option<PathBuf>,

    /// Explicit path to git
    pub git: Option<PathBuf>,
}

impl BuildContext {
    /// Create a context with default tool settings.
    pub fn new(
        descriptor: PlatformDescriptor,
        options: RecipeOptions,
        work_dir: PathBuf,
        package_dir: PathBuf,
    ) -> Self {
        let download_dir = work_dir.join("downloads");
        let config = Config::default();

        BuildContext {
            descriptor,
            options,
            work_dir,
            package_dir,
            download_dir,
            rename_retry_delay: config.rename_retry_delay(),
            generator: None,
            jobs: None,
            cmake: None,
            git: None,
        }
    }

    /// Create a context using the directories and tools from global config.
    pub fn from_global(
        gctx: &GlobalContext,
        descriptor: PlatformDescriptor,
        options: RecipeOptions,
    ) -> Self {
        let config = gctx.config();

        BuildContext {
            download_dir: gctx.download_dir(),
            rename_retry_delay: config.rename_retry_delay(),
            generator: config.build.generator.clone(),
            jobs: config.build.jobs,
            cmake: config.tools.cmake.clone(),
            git: config.tools.git.clone(),
            ..Self::new(descriptor, options, gctx.work_dir(), gctx.package_dir())
        }
    }

    /// Override the work directory.
    pub fn with_work_dir(mut self, dir: PathBuf) -> Self {
        self.work_dir = dir;
        self
    }

    /// Override the package directory.
    pub fn with_package_dir(mut self, dir: PathBuf) -> Self {
        self.package_dir = dir;
        self
    }

    /// The build variant.
    pub fn variant(&self) -> BuildVariant {
        self.options.build_type
    }

    /// Root of the extracted SDK.
    pub fn source_dir(&self) -> PathBuf {
        self.work_dir.join(SOURCE_SUBFOLDER)
    }

    /// CMake binary directory.
    pub fn build_dir(&self) -> PathBuf {
        self.work_dir.join(BUILD_SUBFOLDER)
    }

    /// The CMake project PhysX is configured from.
    pub fn cmake_source_dir(&self) -> PathBuf {
        self.source_dir()
            .join("physx")
            .join("compiler")
            .join("public")
    }

    /// Directory CMake installs the variant's libraries into.
    pub fn installed_variant_lib_dir(&self) -> PathBuf {
        self.package_dir.join("lib").join(self.variant().as_str())
    }
}
