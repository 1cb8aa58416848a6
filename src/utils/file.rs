use std::fs;
use std::io;
use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Reads a whole file into a string
pub fn file_get(path: &str) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Writes content to a file, creating parent directories as needed
pub fn file_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
