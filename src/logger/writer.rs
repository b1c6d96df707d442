//! File writer for the logger

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Opens the configured log file, creating parent directories as needed.
///
/// The returned handle is shared by every event; `tracing-subscriber` writes
/// through `&File`, so no extra locking is needed.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<Arc<File>, LoggerError> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| LoggerError::OpenFile {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    open(&config.path, config.append).map(Arc::new)
}

fn open(path: &Path, append: bool) -> Result<File, LoggerError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options.open(path).map_err(|source| LoggerError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LogFormat;
    use std::io::Write;
    use tempfile::TempDir;

    fn file_config(path: std::path::PathBuf, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append,
            format: LogFormat::Json,
        }
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/logs/defer.log");

        let file = open_log_file(&file_config(path.clone(), true)).unwrap();
        (&*file).write_all(b"hello\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defer.log");
        std::fs::write(&path, "old\n").unwrap();

        let file = open_log_file(&file_config(path.clone(), true)).unwrap();
        (&*file).write_all(b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_truncate_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defer.log");
        std::fs::write(&path, "old\n").unwrap();

        let file = open_log_file(&file_config(path.clone(), false)).unwrap();
        (&*file).write_all(b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }
}
