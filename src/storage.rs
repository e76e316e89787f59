use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory for files the app writes itself (logs, saved config).
pub fn data_dir() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "daycal", "daycal") {
        let data_dir = proj.data_dir();
        if !data_dir.exists() {
            let _ = fs::create_dir_all(data_dir);
        }
        return Some(data_dir.to_path_buf());
    }
    None
}

/// Atomic write: Write to .tmp file then rename
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
