//! Capability-based file helpers for the Marquee command-line tool.
//!
//! Paths are UTF-8 (`camino`) and every operation goes through a `cap-std`
//! directory handle opened with ambient authority, so callers never touch
//! `std::fs` directly.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Read the whole UTF-8 file at `path` into a string.
///
/// # Errors
/// Returns any I/O error raised while opening or reading the file,
/// including invalid UTF-8 content.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Report whether the existing entry at `path` is a regular file.
///
/// # Errors
/// Returns an error of kind [`io::ErrorKind::NotFound`] when the entry or
/// its parent directory does not exist, and any other I/O error raised by
/// the metadata lookup.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_dir_and_name(path)?;
    dir.metadata(name.as_str()).map(|metadata| metadata.is_file())
}

/// Create (or truncate) the file at `path`, creating missing parent
/// directories first.
///
/// # Errors
/// Returns any I/O error raised while creating directories or the file.
pub fn create_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = parent_dir_and_name(path)?;
    dir.create(name.as_str())
}

/// Create every missing ancestor directory of `path`.
///
/// The nearest existing ancestor is opened with ambient authority and only
/// the missing components below it are created, so parents reached through
/// `..` work as expected.
///
/// # Errors
/// Returns any I/O error raised while opening the nearest existing ancestor
/// or creating the missing directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    for ancestor in parent.ancestors() {
        let anchor = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        match fs_utf8::Dir::open_ambient_dir(anchor, ambient_authority()) {
            Ok(dir) => {
                let missing = parent.strip_prefix(ancestor).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "ancestor is not a prefix")
                })?;
                if missing.as_str().is_empty() {
                    return Ok(());
                }
                return dir.create_dir_all(missing);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor of {parent}"),
    ))
}

/// Open the directory containing `path` and return it with the file name.
fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}
