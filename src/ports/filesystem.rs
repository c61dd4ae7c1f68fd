//! Filesystem port for reading embedded report files.

use std::path::Path;

/// Read-only access to the files a report embeds.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Reads the entire contents of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = self.read_bytes(path)?;
        Ok(String::from_utf8(bytes)?)
    }
}
