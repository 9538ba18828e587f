//! Hashing utilities for checksums and fingerprinting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check `data` against an expected hex digest.
pub fn verify_sha256(what: &str, data: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_bytes(data);
    if !actual.eq_ignore_ascii_case(expected) {
        bail!(
            "SHA256 mismatch for {}: expected {}, got {}",
            what,
            expected,
            actual
        );
    }
    Ok(())
}

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add a `key=value` component.
    pub fn update_pair(&mut self, key: &str, value: &str) -> &mut Self {
        self.hasher.update(key.as_bytes());
        self.hasher.update(b"=");
        self.update_str(value)
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Finalize and return a short fingerprint (first 16 chars).
    pub fn finish_short(self) -> String {
        self.finish()[..16].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_sha256_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.txt");
        std::fs::write(&path, "hello").unwrap();

        assert_eq!(sha256_file(&path).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_verify_sha256() {
        verify_sha256("archive", b"hello", HELLO_SHA256).unwrap();
        verify_sha256("archive", b"hello", &HELLO_SHA256.to_uppercase()).unwrap();

        let err = verify_sha256("PhysX.tar.gz", b"hello!", HELLO_SHA256).unwrap_err();
        assert!(err.to_string().contains("SHA256 mismatch for PhysX.tar.gz"));
    }

    #[test]
    fn test_fingerprint_pairs_are_not_ambiguous() {
        let a = {
            let mut fp = Fingerprint::new();
            fp.update_pair("os", "Linux").update_pair("arch", "x86_64");
            fp.finish()
        };
        let b = {
            let mut fp = Fingerprint::new();
            fp.update_pair("os", "Linux").update_pair("arch", "x86_64");
            fp.finish()
        };
        let c = {
            let mut fp = Fingerprint::new();
            fp.update_pair("os=Linux", "").update_pair("arch", "x86_64");
            fp.finish()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
