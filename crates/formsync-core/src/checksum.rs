//! File digests used to verify downloaded forms and media.
//!
//! OpenRosa servers publish MD5 hashes; SHA-256 is offered by the
//! `checksum` command for users cross-checking against other tools.

use anyhow::{Context, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

fn digest_path<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// MD5 of a file as lowercase hex (the digest OpenRosa form lists carry).
pub fn md5_path(path: &Path) -> Result<String> {
    digest_path::<Md5>(path)
}

/// SHA-256 of a file as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    digest_path::<Sha256>(path)
}

/// MD5 of an in-memory buffer as lowercase hex.
pub fn md5_bytes(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}
