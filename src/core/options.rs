//! Recipe options.
//!
//! Some options only exist on some platforms: `enable_simd` on Windows and
//! Android, `enable_float_point_precise_math` on Windows. On other
//! platforms they are removed from the option set entirely, and trying to
//! set them is an error rather than a silent no-op.

use std::fmt;

use thiserror::Error;

use crate::core::platform::Os;
use crate::core::variant::{BuildVariant, Linkage};

/// Error produced when an option cannot be set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option `{0}`")]
    Unknown(String),

    #[error("option `{option}` does not exist on {os}")]
    NotAvailable { option: String, os: String },

    #[error("option `fPIC` is managed by the PhysX CMake scripts and cannot be set")]
    Fpic,

    #[error("invalid value `{value}` for option `{option}`: {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },
}

/// The recipe's option set for one target OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeOptions {
    pub build_type: BuildVariant,
    pub shared: bool,
    /// `None` where the option does not exist for the target OS
    pub enable_simd: Option<bool>,
    /// `None` where the option does not exist for the target OS
    pub enable_float_point_precise_math: Option<bool>,
}

impl RecipeOptions {
    /// Default options with platform gating applied.
    pub fn for_os(os: &Os) -> Self {
        let enable_simd = matches!(os, Os::Windows | Os::Android).then_some(true);
        let enable_float_point_precise_math = matches!(os, Os::Windows).then_some(false);

        RecipeOptions {
            build_type: BuildVariant::Release,
            shared: true,
            enable_simd,
            enable_float_point_precise_math,
        }
    }

    pub fn linkage(&self) -> Linkage {
        Linkage::from_shared(self.shared)
    }

    /// Set an option from its `key=value` string form.
    pub fn set(&mut self, os: &Os, key: &str, value: &str) -> Result<(), OptionError> {
        match key {
            "build_type" => {
                self.build_type = value.parse().map_err(|reason| OptionError::InvalidValue {
                    option: key.to_string(),
                    value: value.to_string(),
                    reason,
                })?;
            }
            "shared" => self.shared = parse_bool(key, value)?,
            "enable_simd" => {
                if self.enable_simd.is_none() {
                    return Err(OptionError::NotAvailable {
                        option: key.to_string(),
                        os: os.to_string(),
                    });
                }
                self.enable_simd = Some(parse_bool(key, value)?);
            }
            "enable_float_point_precise_math" => {
                if self.enable_float_point_precise_math.is_none() {
                    return Err(OptionError::NotAvailable {
                        option: key.to_string(),
                        os: os.to_string(),
                    });
                }
                self.enable_float_point_precise_math = Some(parse_bool(key, value)?);
            }
            "fPIC" => return Err(OptionError::Fpic),
            _ => return Err(OptionError::Unknown(key.to_string())),
        }

        Ok(())
    }

    /// Options as ordered `(key, value)` pairs; removed options are omitted.
    pub fn values(&self) -> Vec<(&'static str, String)> {
        let mut values = vec![
            ("build_type", self.build_type.to_string()),
            ("shared", self.shared.to_string()),
        ];
        if let Some(simd) = self.enable_simd {
            values.push(("enable_simd", simd.to_string()));
        }
        if let Some(precise) = self.enable_float_point_precise_math {
            values.push(("enable_float_point_precise_math", precise.to_string()));
        }
        values
    }
}

impl fmt::Display for RecipeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .values()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, OptionError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(OptionError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_windows() {
        let opts = RecipeOptions::for_os(&Os::Windows);
        assert_eq!(opts.build_type, BuildVariant::Release);
        assert!(opts.shared);
        assert_eq!(opts.enable_simd, Some(true));
        assert_eq!(opts.enable_float_point_precise_math, Some(false));
    }

    #[test]
    fn test_defaults_gated_by_os() {
        let android = RecipeOptions::for_os(&Os::Android);
        assert_eq!(android.enable_simd, Some(true));
        assert_eq!(android.enable_float_point_precise_math, None);

        let linux = RecipeOptions::for_os(&Os::Linux);
        assert_eq!(linux.enable_simd, None);
        assert_eq!(linux.enable_float_point_precise_math, None);
    }

    #[test]
    fn test_set_options() {
        let os = Os::Windows;
        let mut opts = RecipeOptions::for_os(&os);
        opts.set(&os, "build_type", "checked").unwrap();
        opts.set(&os, "shared", "False").unwrap();
        opts.set(&os, "enable_simd", "false").unwrap();
        opts.set(&os, "enable_float_point_precise_math", "True").unwrap();

        assert_eq!(opts.build_type, BuildVariant::Checked);
        assert_eq!(opts.linkage(), Linkage::Static);
        assert_eq!(opts.enable_simd, Some(false));
        assert_eq!(opts.enable_float_point_precise_math, Some(true));
    }

    #[test]
    fn test_set_removed_option_fails() {
        let os = Os::Linux;
        let mut opts = RecipeOptions::for_os(&os);

        let err = opts.set(&os, "enable_simd", "true").unwrap_err();
        assert_eq!(
            err,
            OptionError::NotAvailable {
                option: "enable_simd".to_string(),
                os: "Linux".to_string()
            }
        );
        assert!(opts.set(&os, "enable_float_point_precise_math", "true").is_err());
        assert_eq!(opts.set(&os, "fPIC", "true"), Err(OptionError::Fpic));
        assert!(matches!(
            opts.set(&os, "lto", "true"),
            Err(OptionError::Unknown(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let os = Os::Windows;
        let mut opts = RecipeOptions::for_os(&os);
        assert!(opts.set(&os, "shared", "maybe").is_err());
        assert!(opts.set(&os, "build_type", "fast").is_err());
    }

    #[test]
    fn test_display() {
        let opts = RecipeOptions::for_os(&Os::Linux);
        assert_eq!(opts.to_string(), "build_type=release shared=true");
    }
}
