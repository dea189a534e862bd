//! `formsync checksum` – hash a file the way the server does.

use anyhow::Result;
use formsync_core::checksum;
use std::path::Path;

pub fn run_checksum(path: &Path, sha256: bool) -> Result<()> {
    let digest = if sha256 {
        checksum::sha256_path(path)?
    } else {
        format!("md5:{}", checksum::md5_path(path)?)
    };
    println!("{}  {}", digest, path.display());
    Ok(())
}
