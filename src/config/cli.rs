use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EtlError::InputNotFound {
                    path: path.to_string(),
                }
            } else {
                EtlError::IoError(e)
            }
        })
    }

    /// Writes through a temporary file in the destination directory and
    /// renames onto the target, so a mid-write failure never leaves a
    /// truncated output file behind.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let target = Path::new(path);
        let dir = target.parent().filter(|p| !p.as_os_str().is_empty());

        let write_err = |source: std::io::Error| EtlError::WriteError {
            path: path.to_string(),
            source,
        };

        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new_in("."),
        }
        .map_err(write_err)?;

        tmp.write_all(data).map_err(write_err)?;
        tmp.persist(target).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
