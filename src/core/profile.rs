//! Build profiles.
//!
//! A profile is a TOML file pairing host settings with recipe options:
//!
//! ```toml
//! [settings]
//! os = "Windows"
//! arch = "x86_64"
//! compiler = "Visual Studio"
//! "compiler.version" = "16"
//! "compiler.runtime" = "MD"
//! build_type = "Release"
//!
//! [options]
//! build_type = "profile"
//! shared = false
//! ```
//!
//! Values given on the command line are merged on top of the profile.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::RecipeOptions;
use crate::core::platform::PlatformDescriptor;

/// Settings and options read from a profile file and/or the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub settings: BTreeMap<String, toml::Value>,
    pub options: BTreeMap<String, toml::Value>,
}

impl Profile {
    /// Load a profile from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    /// Add a `key=value` setting.
    pub fn set_setting(&mut self, key: &str, value: &str) {
        self.settings
            .insert(key.to_string(), toml::Value::String(value.to_string()));
    }

    /// Add a `key=value` option.
    pub fn set_option(&mut self, key: &str, value: &str) {
        self.options
            .insert(key.to_string(), toml::Value::String(value.to_string()));
    }

    /// Merge another profile into this one (other takes precedence).
    pub fn merge(&mut self, other: Profile) {
        self.settings.extend(other.settings);
        self.options.extend(other.options);
    }

    /// Apply the settings on top of `base`, then derive the option set for
    /// the resulting OS and apply the options.
    pub fn resolve(&self, base: PlatformDescriptor) -> Result<(PlatformDescriptor, RecipeOptions)> {
        let mut descriptor = base;

        for (key, value) in &self.settings {
            descriptor.apply_setting(key, &value_to_string(key, value)?)?;
        }

        let mut options = RecipeOptions::for_os(&descriptor.os);
        for (key, value) in &self.options {
            options.set(&descriptor.os, key, &value_to_string(key, value)?)?;
        }

        Ok((descriptor, options))
    }
}

/// Parse a `key=value` command line pair.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{}`", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{}`", s));
    }

    Ok((key.to_string(), value.trim().to_string()))
}

fn value_to_string(key: &str, value: &toml::Value) -> Result<String> {
    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        _ => bail!("value for `{}` must be a string, boolean or number", key),
    })
}
