//! Capability-safe filesystem helpers for tests.
//!
//! Test suites inspect the uploads directory through `cap_std::fs::Dir`
//! rather than raw `std::fs` paths.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

/// Names of the regular files directly inside `dir`, sorted.
///
/// # Examples
///
/// ```rust
/// use gamics::test_support::cap_fs::file_names;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("b.png"), b"")?;
/// std::fs::write(dir.path().join("a.png"), b"")?;
/// assert_eq!(file_names(dir.path())?, ["a.png", "b.png"]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn file_names(dir: &Path) -> io::Result<Vec<String>> {
    let directory = Dir::open_ambient_dir(dir, ambient_authority())?;
    let mut names = Vec::new();
    for entry in directory.entries()? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Whether `name` exists directly inside `dir`.
pub fn contains(dir: &Path, name: &str) -> bool {
    Dir::open_ambient_dir(dir, ambient_authority())
        .map(|directory| directory.exists(name))
        .unwrap_or(false)
}

/// Read a file inside `dir`.
pub fn read(dir: &Path, name: &str) -> io::Result<Vec<u8>> {
    Dir::open_ambient_dir(dir, ambient_authority())?.read(name)
}
