//! In-memory device files for testing.

use crate::device_file::DeviceFiles;
use crate::error::MaskError;

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
struct MockFs {
    files: HashMap<PathBuf, String>,
    read_only: HashSet<PathBuf>,
    writes: Vec<(PathBuf, String)>,
}

/// An in-memory stand-in for device files.
///
/// This allows testing code that drives the mask endpoints without a real
/// panel driver. A path exists once it has been seeded or written; every
/// successful write is also appended to a journal.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use udfps_mask::{DeviceFiles, MockDeviceFiles};
///
/// let files = MockDeviceFiles::new().with_file("/brightness", "1000\n");
/// assert_eq!(files.read_int(Path::new("/brightness"), -1), 1000);
///
/// files.write_int(Path::new("/mask"), 607);
/// assert_eq!(files.contents("/mask").as_deref(), Some("607\n"));
/// ```
#[derive(Default)]
pub struct MockDeviceFiles {
    fs: Mutex<MockFs>,
}

impl MockDeviceFiles {
    /// Create an empty set of device files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with `contents`.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.lock()
            .files
            .insert(path.as_ref().to_path_buf(), contents.into());
        self
    }

    /// Make writes to `path` fail as if the node were read-only.
    pub fn fail_writes_to(self, path: impl AsRef<Path>) -> Self {
        self.lock().read_only.insert(path.as_ref().to_path_buf());
        self
    }

    /// Current contents of `path`, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// All successful writes, oldest first.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockFs> {
        self.fs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeviceFiles for MockDeviceFiles {
    fn read_contents(&self, path: &Path) -> Result<String, MaskError> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| MaskError::Open {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn write_line(&self, path: &Path, text: &str) -> Result<(), MaskError> {
        let mut fs = self.lock();
        if fs.read_only.contains(path) {
            return Err(MaskError::Open {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        let line = format!("{}\n", text);
        fs.files.insert(path.to_path_buf(), line.clone());
        fs.writes.push((path.to_path_buf(), line));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }
}
