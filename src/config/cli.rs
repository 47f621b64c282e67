use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    /// 先寫入同目錄的暫存檔再改名，失敗時不會留下半個檔案
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let parent_display = parent.display().to_string();

        fs::create_dir_all(&parent).map_err(|e| EtlError::filesystem(&parent_display, e))?;

        let mut tmp =
            new_temp_file(&parent).map_err(|e| EtlError::filesystem(&parent_display, e))?;

        // 覆寫時沿用原檔權限
        if let Ok(existing) = fs::metadata(&full_path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| EtlError::filesystem(tmp.path().display().to_string(), e))?;
        }

        tmp.write_all(data)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| EtlError::filesystem(tmp.path().display().to_string(), e))?;

        tmp.persist(&full_path)
            .map_err(|e| EtlError::filesystem(full_path.display().to_string(), e.error))?;
        Ok(())
    }
}

/// Temp file created with the mode a plain `File::create` would get (0o666 minus umask).
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
