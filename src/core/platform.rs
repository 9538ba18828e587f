//! Platform descriptor - the host settings a recipe is built against.
//!
//! Settings mirror what a package manager reports about the target:
//! operating system, architecture, compiler (identity, version, runtime)
//! and the host's own build type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced when a setting cannot be parsed or applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingError {
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),

    #[error("invalid value `{value}` for setting `{key}`: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Operating system family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    Android,
    Ios,
    /// Anything else; kept so it can be rejected with its name.
    Other(String),
}

impl Os {
    /// Detect the host operating system.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            "macos" => Os::Macos,
            "android" => Os::Android,
            "ios" => Os::Ios,
            other => Os::Other(other.to_string()),
        }
    }

    /// Name as used in settings files.
    pub fn as_str(&self) -> &str {
        match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::Other(name) => name,
        }
    }
}

impl FromStr for Os {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "windows" => Os::Windows,
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::Macos,
            "android" => Os::Android,
            "ios" => Os::Ios,
            _ => Os::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processor architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
    Other(String),
}

impl Arch {
    /// Detect the host architecture.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "x86_64" => Arch::X86_64,
            "arm" => Arch::Armv7,
            "aarch64" => Arch::Armv8,
            other => Arch::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
            Arch::Other(name) => name,
        }
    }
}

impl FromStr for Arch {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "x86" | "i686" => Arch::X86,
            "x86_64" | "amd64" | "x64" => Arch::X86_64,
            "armv7" | "arm" => Arch::Armv7,
            "armv8" | "aarch64" | "arm64" => Arch::Armv8,
            _ => Arch::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Compiler {
    /// Microsoft Visual C++ ("Visual Studio" in settings files)
    Msvc,
    Gcc,
    Clang,
    AppleClang,
    Other(String),
}

impl Compiler {
    pub fn as_str(&self) -> &str {
        match self {
            Compiler::Msvc => "Visual Studio",
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Other(name) => name,
        }
    }
}

impl FromStr for Compiler {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "visual studio" | "msvc" | "cl" => Compiler::Msvc,
            "gcc" | "g++" => Compiler::Gcc,
            "clang" | "clang++" => Compiler::Clang,
            "apple-clang" | "appleclang" => Compiler::AppleClang,
            _ => Compiler::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler version as `major[.minor]`.
///
/// Compiler versions are not semver (`16`, `14.1`, `9`), so comparison
/// treats a missing minor as zero.
#[derive(Debug, Clone, Copy)]
pub struct CompilerVersion {
    pub major: u32,
    pub minor: Option<u32>,
}

impl CompilerVersion {
    pub fn new(major: u32) -> Self {
        CompilerVersion { major, minor: None }
    }

    pub fn with_minor(major: u32, minor: u32) -> Self {
        CompilerVersion {
            major,
            minor: Some(minor),
        }
    }
}

impl PartialEq for CompilerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CompilerVersion {}

impl PartialOrd for CompilerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompilerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
    }
}

impl FromStr for CompilerVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "empty version".to_string())?
            .parse::<u32>()
            .map_err(|e| format!("invalid major version: {}", e))?;

        // Anything past major.minor (patch, build numbers) does not affect selection.
        let minor = match parts.next() {
            Some(m) => Some(
                m.parse::<u32>()
                    .map_err(|e| format!("invalid minor version: {}", e))?,
            ),
            None => None,
        };

        Ok(CompilerVersion { major, minor })
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}", self.major, minor),
            None => write!(f, "{}", self.major),
        }
    }
}

/// MSVC C runtime selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsvcRuntime {
    /// Dynamic release runtime (/MD)
    MD,
    /// Static release runtime (/MT)
    MT,
    /// Dynamic debug runtime (/MDd)
    MDd,
    /// Static debug runtime (/MTd)
    MTd,
}

impl MsvcRuntime {
    pub fn is_debug(self) -> bool {
        matches!(self, MsvcRuntime::MDd | MsvcRuntime::MTd)
    }

    pub fn is_static(self) -> bool {
        matches!(self, MsvcRuntime::MT | MsvcRuntime::MTd)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MsvcRuntime::MD => "MD",
            MsvcRuntime::MT => "MT",
            MsvcRuntime::MDd => "MDd",
            MsvcRuntime::MTd => "MTd",
        }
    }
}

impl FromStr for MsvcRuntime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('/') {
            "MD" => Ok(MsvcRuntime::MD),
            "MT" => Ok(MsvcRuntime::MT),
            "MDd" => Ok(MsvcRuntime::MDd),
            "MTd" => Ok(MsvcRuntime::MTd),
            other => Err(format!("expected MD, MT, MDd or MTd, got `{}`", other)),
        }
    }
}

impl fmt::Display for MsvcRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host's own build type setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostBuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl HostBuildType {
    pub fn as_str(self) -> &'static str {
        match self {
            HostBuildType::Debug => "Debug",
            HostBuildType::Release => "Release",
            HostBuildType::RelWithDebInfo => "RelWithDebInfo",
            HostBuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for HostBuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(HostBuildType::Debug),
            "release" => Ok(HostBuildType::Release),
            "relwithdebinfo" => Ok(HostBuildType::RelWithDebInfo),
            "minsizerel" => Ok(HostBuildType::MinSizeRel),
            _ => Err(format!(
                "expected Debug, Release, RelWithDebInfo or MinSizeRel, got `{}`",
                s
            )),
        }
    }
}

impl fmt::Display for HostBuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete description of the environment a package is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    pub compiler_version: Option<CompilerVersion>,
    /// Only meaningful for MSVC
    pub compiler_runtime: Option<MsvcRuntime>,
    pub build_type: HostBuildType,
}

impl PlatformDescriptor {
    /// Create a descriptor with no compiler version or runtime.
    pub fn new(os: Os, arch: Arch, compiler: Compiler) -> Self {
        PlatformDescriptor {
            os,
            arch,
            compiler,
            compiler_version: None,
            compiler_runtime: None,
            build_type: HostBuildType::Release,
        }
    }

    /// Best guess at the host platform.
    ///
    /// Compiler versions are left unset: they have to come from a profile
    /// or the command line when they matter.
    pub fn host() -> Self {
        let os = Os::host();
        let (compiler, runtime) = match os {
            Os::Windows => (Compiler::Msvc, Some(MsvcRuntime::MD)),
            Os::Macos | Os::Ios => (Compiler::AppleClang, None),
            Os::Android => (Compiler::Clang, None),
            _ => (Compiler::Gcc, None),
        };

        PlatformDescriptor {
            os,
            arch: Arch::host(),
            compiler,
            compiler_version: None,
            compiler_runtime: runtime,
            build_type: HostBuildType::Release,
        }
    }

    pub fn with_compiler_version(mut self, version: CompilerVersion) -> Self {
        self.compiler_version = Some(version);
        self
    }

    pub fn with_runtime(mut self, runtime: MsvcRuntime) -> Self {
        self.compiler_runtime = Some(runtime);
        self
    }

    pub fn with_build_type(mut self, build_type: HostBuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Apply a single `key=value` setting.
    ///
    /// Recognized keys: `os`, `arch`, `compiler`, `compiler.version`,
    /// `compiler.runtime`, `build_type`.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), SettingError> {
        let invalid = |reason: String| SettingError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        match key {
            "os" => self.os = value.parse().unwrap_or_else(|e| match e {}),
            "arch" => self.arch = value.parse().unwrap_or_else(|e| match e {}),
            "compiler" => self.compiler = value.parse().unwrap_or_else(|e| match e {}),
            "compiler.version" => {
                self.compiler_version = Some(value.parse().map_err(invalid)?);
            }
            "compiler.runtime" => {
                self.compiler_runtime = Some(value.parse().map_err(invalid)?);
            }
            "build_type" => self.build_type = value.parse().map_err(invalid)?,
            _ => return Err(SettingError::UnknownSetting(key.to_string())),
        }

        Ok(())
    }

    /// Settings as ordered `(key, value)` pairs, for fingerprints and display.
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let mut settings = vec![
            ("os", self.os.to_string()),
            ("arch", self.arch.to_string()),
            ("compiler", self.compiler.to_string()),
        ];
        if let Some(version) = self.compiler_version {
            settings.push(("compiler.version", version.to_string()));
        }
        if let Some(runtime) = self.compiler_runtime {
            settings.push(("compiler.runtime", runtime.to_string()));
        }
        settings.push(("build_type", self.build_type.to_string()));
        settings
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.os, self.arch, self.compiler)?;
        if let Some(version) = self.compiler_version {
            write!(f, " {}", version)?;
        }
        if let Some(runtime) = self.compiler_runtime {
            write!(f, " /{}", runtime)?;
        }
        write!(f, " ({})", self.build_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os() {
        assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("iOS".parse::<Os>().unwrap(), Os::Ios);
        assert_eq!("Macos".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!(
            "FreeBSD".parse::<Os>().unwrap(),
            Os::Other("FreeBSD".to_string())
        );
        assert_eq!(Os::Other("FreeBSD".to_string()).to_string(), "FreeBSD");
    }

    #[test]
    fn test_parse_compiler() {
        assert_eq!("Visual Studio".parse::<Compiler>().unwrap(), Compiler::Msvc);
        assert_eq!("msvc".parse::<Compiler>().unwrap(), Compiler::Msvc);
        assert_eq!("clang".parse::<Compiler>().unwrap(), Compiler::Clang);
        assert_eq!(
            "apple-clang".parse::<Compiler>().unwrap(),
            Compiler::AppleClang
        );
    }

    #[test]
    fn test_compiler_version_ordering() {
        let v9: CompilerVersion = "9".parse().unwrap();
        let v14_1: CompilerVersion = "14.1".parse().unwrap();
        let v16: CompilerVersion = "16".parse().unwrap();

        assert!(v9 < v14_1);
        assert!(v14_1 < v16);
        assert_eq!("16.0".parse::<CompilerVersion>().unwrap(), v16);
        assert_eq!("17.4.2".parse::<CompilerVersion>().unwrap(), CompilerVersion::with_minor(17, 4));
        assert!("".parse::<CompilerVersion>().is_err());
        assert!("abc".parse::<CompilerVersion>().is_err());
    }

    #[test]
    fn test_runtime_flavors() {
        assert!(MsvcRuntime::MDd.is_debug());
        assert!(MsvcRuntime::MTd.is_debug());
        assert!(!MsvcRuntime::MD.is_debug());
        assert!(MsvcRuntime::MT.is_static());
        assert!(!MsvcRuntime::MDd.is_static());
        assert_eq!("/MTd".parse::<MsvcRuntime>().unwrap(), MsvcRuntime::MTd);
        assert!("MX".parse::<MsvcRuntime>().is_err());
    }

    #[test]
    fn test_apply_setting() {
        let mut desc = PlatformDescriptor::new(Os::Linux, Arch::X86_64, Compiler::Gcc);
        desc.apply_setting("os", "Windows").unwrap();
        desc.apply_setting("compiler", "Visual Studio").unwrap();
        desc.apply_setting("compiler.version", "16").unwrap();
        desc.apply_setting("compiler.runtime", "MDd").unwrap();
        desc.apply_setting("build_type", "Debug").unwrap();

        assert_eq!(desc.os, Os::Windows);
        assert_eq!(desc.compiler, Compiler::Msvc);
        assert_eq!(desc.compiler_version, Some(CompilerVersion::new(16)));
        assert_eq!(desc.compiler_runtime, Some(MsvcRuntime::MDd));
        assert_eq!(desc.build_type, HostBuildType::Debug);

        assert_eq!(
            desc.apply_setting("compiler.cppstd", "17"),
            Err(SettingError::UnknownSetting("compiler.cppstd".to_string()))
        );
        assert!(desc.apply_setting("build_type", "Fast").is_err());
    }

    #[test]
    fn test_settings_listing() {
        let desc = PlatformDescriptor::new(Os::Windows, Arch::X86_64, Compiler::Msvc)
            .with_compiler_version(CompilerVersion::new(15))
            .with_runtime(MsvcRuntime::MT);

        let keys: Vec<_> = desc.settings().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "os",
                "arch",
                "compiler",
                "compiler.version",
                "compiler.runtime",
                "build_type"
            ]
        );
    }
}
