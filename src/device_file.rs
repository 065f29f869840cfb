//! Typed access to device control files.

use crate::error::MaskError;

use log::{debug, error, info, warn};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Trait for device file backends.
///
/// Implementors provide the raw primitives. The typed operations are
/// provided here so every backend shares the same parsing, formatting and
/// logging rules. Each call makes a single attempt and never retries.
pub trait DeviceFiles: Send + Sync {
    /// Read the whole contents of an endpoint.
    fn read_contents(&self, path: &Path) -> Result<String, MaskError>;

    /// Truncate an endpoint and write `text` followed by a newline.
    fn write_line(&self, path: &Path, text: &str) -> Result<(), MaskError>;

    /// Best-effort probe for whether an endpoint is present.
    fn exists(&self, path: &Path) -> bool;

    /// Read an integer, falling back to `default` on any failure.
    fn read_int(&self, path: &Path, default: i32) -> i32 {
        let parsed = self.read_contents(path).and_then(|contents| {
            parse_leading_int(&contents).ok_or_else(|| MaskError::Parse {
                path: path.to_path_buf(),
                contents,
            })
        });

        match parsed {
            Ok(value) => {
                info!("read {} from {}", value, path.display());
                value
            }
            Err(e) => {
                warn!("{}; using default {}", e, default);
                default
            }
        }
    }

    /// Write an integer in decimal form.
    fn write_int(&self, path: &Path, value: i32) {
        self.write_string(path, &value.to_string());
    }

    /// Write a string verbatim.
    fn write_string(&self, path: &Path, value: &str) {
        match self.write_line(path, value) {
            Ok(()) => info!("wrote {:?} to {}", value, path.display()),
            Err(e) => error!("{}; value {:?} not applied", e, value),
        }
    }
}

/// Parse the integer at the start of the first whitespace-delimited token.
///
/// Trailing characters after the digits are ignored; a token without any
/// leading digits, an empty input, or an out-of-range value yields `None`.
pub(crate) fn parse_leading_int(contents: &str) -> Option<i32> {
    let token = contents.split_whitespace().next()?;
    let sign_len = usize::from(token.starts_with(['+', '-']));
    let digits = token[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    token[..sign_len + digits].parse().ok()
}

/// Device files on the real filesystem (sysfs nodes).
#[derive(Debug, Clone, Copy, Default)]
pub struct SysfsFiles;

impl SysfsFiles {
    /// Create a sysfs backend.
    pub fn new() -> Self {
        Self
    }
}

impl DeviceFiles for SysfsFiles {
    fn read_contents(&self, path: &Path) -> Result<String, MaskError> {
        fs::read_to_string(path).map_err(|source| MaskError::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_line(&self, path: &Path, text: &str) -> Result<(), MaskError> {
        let mut file = File::create(path).map_err(|source| MaskError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        writeln!(file, "{}", text)
            .and_then(|()| file.flush())
            .map_err(|source| MaskError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    fn exists(&self, path: &Path) -> bool {
        let present = fs::metadata(path).is_ok();
        debug!("probe {}: present={}", path.display(), present);
        present
    }
}
