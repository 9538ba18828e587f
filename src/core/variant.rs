//! PhysX build variants and library linkage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four PhysX build configurations.
///
/// This is the recipe's own `build_type` option, separate from the host's
/// Debug/Release setting (see [`HostBuildType`](crate::core::platform::HostBuildType)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    Debug,
    Checked,
    Profile,
    #[default]
    Release,
}

impl BuildVariant {
    pub const ALL: [BuildVariant; 4] = [
        BuildVariant::Debug,
        BuildVariant::Checked,
        BuildVariant::Profile,
        BuildVariant::Release,
    ];

    /// Lowercase name; also the CMake build type and the output subdirectory.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Checked => "checked",
            BuildVariant::Profile => "profile",
            BuildVariant::Release => "release",
        }
    }

    pub fn is_debug(self) -> bool {
        self == BuildVariant::Debug
    }
}

impl FromStr for BuildVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildVariant::Debug),
            "checked" => Ok(BuildVariant::Checked),
            "profile" => Ok(BuildVariant::Profile),
            "release" => Ok(BuildVariant::Release),
            _ => Err(format!(
                "invalid build type '{}'; expected 'debug', 'checked', 'profile', or 'release'",
                s
            )),
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the PhysX libraries are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Linkage {
    Static,
    Shared,
}

impl Linkage {
    pub fn from_shared(shared: bool) -> Self {
        if shared {
            Linkage::Shared
        } else {
            Linkage::Static
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Linkage::Static => write!(f, "static"),
            Linkage::Shared => write!(f, "shared"),
        }
    }
}
