//! Capability-scoped file access for the commands.
//!
//! Each path is split into its parent directory, opened through `cap-std`,
//! and the file name, which is resolved relative to that directory handle.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use melm_weave::ModuleName;

use crate::errors::AppError;

/// Returns `<source_dir>/<Segment>/.../<Last>.elm` for `module`.
pub(crate) fn module_path(source_dir: &Utf8Path, module: &ModuleName) -> Utf8PathBuf {
    let mut path = source_dir.to_path_buf();
    for segment in module.segments() {
        path.push(segment);
    }
    path.set_extension("elm");
    path
}

fn split(path: &Utf8Path) -> Result<(&Utf8Path, &str), AppError> {
    let name = path.file_name().ok_or_else(|| AppError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, name))
}

fn read_error(path: &Utf8Path, source: io::Error) -> AppError {
    AppError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Utf8Path, source: io::Error) -> AppError {
    AppError::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn open_parent(path: &Utf8Path) -> Result<Option<(Dir, &str)>, AppError> {
    let (parent, name) = split(path)?;
    match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => Ok(Some((dir, name))),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(read_error(path, error)),
    }
}

/// Reads `path`, returning `None` when it does not exist.
pub(crate) fn read_optional(path: &Utf8Path) -> Result<Option<String>, AppError> {
    let Some((dir, name)) = open_parent(path)? else {
        return Ok(None);
    };
    match dir.read_to_string(name) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(read_error(path, error)),
    }
}

/// Reads `path`, treating absence as an error.
pub(crate) fn read(path: &Utf8Path) -> Result<String, AppError> {
    read_optional(path)?
        .ok_or_else(|| read_error(path, io::Error::from(io::ErrorKind::NotFound)))
}

/// Reports whether `path` names an existing file.
pub(crate) fn is_file(path: &Utf8Path) -> Result<bool, AppError> {
    let Some((dir, name)) = open_parent(path)? else {
        return Ok(false);
    };
    Ok(dir.is_file(name))
}

fn create_parent(path: &Utf8Path) -> Result<(Dir, &str), AppError> {
    let (parent, name) = split(path)?;
    Dir::create_ambient_dir_all(parent, ambient_authority())
        .and_then(|()| Dir::open_ambient_dir(parent, ambient_authority()))
        .map(|dir| (dir, name))
        .map_err(|error| write_error(path, error))
}

/// Writes `contents` to `path`, creating parent directories and replacing
/// any existing file.
pub(crate) fn write(path: &Utf8Path, contents: &str) -> Result<(), AppError> {
    let (dir, name) = create_parent(path)?;
    dir.write(name, contents)
        .map_err(|error| write_error(path, error))
}

/// Writes `contents` to a new file at `path`, creating parent directories.
///
/// Fails with `AppError::AlreadyExists` rather than replace a file.
pub(crate) fn create_new(path: &Utf8Path, contents: &str) -> Result<(), AppError> {
    let (dir, name) = create_parent(path)?;
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options).map_err(|error| {
        if error.kind() == io::ErrorKind::AlreadyExists {
            AppError::AlreadyExists {
                path: path.to_path_buf(),
            }
        } else {
            write_error(path, error)
        }
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|error| write_error(path, error))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    #[test]
    fn module_path_nests_segments_under_the_source_dir() {
        let module = ModuleName::parse("Components.Modal.Login").expect("valid");
        assert_eq!(
            module_path(Utf8Path::new("src"), &module),
            Utf8PathBuf::from("src/Components/Modal/Login.elm")
        );
    }

    #[test]
    fn create_new_builds_parents_and_refuses_to_overwrite() {
        let dir = TempDir::new().expect("temp dir");
        let path = root(&dir).join("a/b/Foo.elm");

        create_new(&path, "module Foo\n").expect("first write");
        assert_eq!(read(&path).expect("read back"), "module Foo\n");

        let error = create_new(&path, "other").expect_err("second write");
        assert!(matches!(error, AppError::AlreadyExists { .. }));
        assert_eq!(read(&path).expect("unchanged"), "module Foo\n");
    }

    #[test]
    fn missing_files_read_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let path = root(&dir).join("absent/Foo.elm");
        assert_eq!(read_optional(&path).expect("no error"), None);
        assert!(!is_file(&path).expect("no error"));
        assert!(matches!(read(&path), Err(AppError::Read { .. })));
    }

    #[test]
    fn write_replaces_existing_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = root(&dir).join("Main.elm");
        write(&path, "one").expect("write");
        write(&path, "two").expect("rewrite");
        assert_eq!(read(&path).expect("read"), "two");
    }
}
