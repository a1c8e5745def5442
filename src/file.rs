// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

/// Create/truncate `path` and write `contents`, making parent dirs as needed.
/// Never appends: whatever was there before is gone.
pub fn write_truncate(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_truncate_replaces_old_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.txt");

        write_truncate(&path, "first run\nwith two lines\n").unwrap();
        write_truncate(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn ensure_directory_refuses_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken");
        fs::write(&path, "x").unwrap();
        assert!(ensure_directory(&path).is_err());
    }
}
