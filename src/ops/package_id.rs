//! Binary package identity.
//!
//! The host build type only decides which variant may be built; the built
//! binaries depend on the variant itself. The identity therefore uses the
//! option `build_type` in place of the host setting, so a release variant
//! built under `Release` and `RelWithDebInfo` hosts is the same package.

use crate::core::options::RecipeOptions;
use crate::core::platform::PlatformDescriptor;
use crate::util::hash::Fingerprint;

/// Settings and options that identify a binary package, in hashing order.
pub fn package_id_inputs(
    descriptor: &PlatformDescriptor,
    options: &RecipeOptions,
) -> Vec<(String, String)> {
    let mut inputs: Vec<(String, String)> = descriptor
        .settings()
        .into_iter()
        .map(|(key, value)| {
            let value = if key == "build_type" {
                options.build_type.to_string()
            } else {
                value
            };
            (key.to_string(), value)
        })
        .collect();

    inputs.extend(
        options
            .values()
            .into_iter()
            .map(|(key, value)| (format!("options.{}", key), value)),
    );

    inputs
}

/// Short, stable package identifier.
pub fn package_id(descriptor: &PlatformDescriptor, options: &RecipeOptions) -> String {
    let mut fp = Fingerprint::new();
    for (key, value) in package_id_inputs(descriptor, options) {
        fp.update_pair(&key, &value);
    }
    fp.finish_short()
}
