//! `UploadStore` over a `cap-std` directory capability.
//!
//! The store holds a handle to the uploads directory and only ever opens
//! [`UploadedFileName`]s relative to it, so no path can escape the directory.
//! Blocking filesystem calls run on `spawn_blocking`.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::UploadedFileName;
use crate::domain::ports::{UploadStore, UploadStoreError};

/// Upload store rooted at a directory capability.
#[derive(Clone)]
pub struct CapStdUploadStore {
    dir: Arc<Dir>,
}

fn io_error(action: &str, name: &str, err: io::Error) -> UploadStoreError {
    UploadStoreError::io(format!("{action} `{name}`: {err}"))
}

impl CapStdUploadStore {
    /// Open (creating if needed) the uploads directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UploadStoreError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| io_error("create directory", &path.display().to_string(), err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| io_error("open directory", &path.display().to_string(), err))?;
        Ok(Self::from_dir(dir))
    }

    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, UploadStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, UploadStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || task(&dir))
            .await
            .map_err(|err| UploadStoreError::io(format!("upload task aborted: {err}")))?
    }
}

fn write_new(dir: &Dir, name: &str, bytes: &[u8]) -> Result<(), UploadStoreError> {
    // Staged under a dot-prefixed name, which is never a valid upload name.
    let staging = format!(".{name}.partial");
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    let result = dir
        .open_with(&staging, &options)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| {
            if dir.exists(name) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "upload name already taken",
                ));
            }
            dir.rename(&staging, dir, name)
        });

    if let Err(err) = result {
        let _ = dir.remove_file(&staging);
        return Err(io_error("write", name, err));
    }
    Ok(())
}

fn remove_if_present(dir: &Dir, name: &str) -> Result<(), UploadStoreError> {
    match dir.remove_file(name) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(file = name, "upload already absent");
            Ok(())
        }
        Err(err) => Err(io_error("remove", name, err)),
    }
}

#[async_trait]
impl UploadStore for CapStdUploadStore {
    async fn exists(&self, name: &UploadedFileName) -> Result<bool, UploadStoreError> {
        let name = name.as_str().to_owned();
        self.blocking(move |dir| match dir.metadata(&name) {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error("inspect", &name, err)),
        })
        .await
    }

    async fn write(&self, name: &UploadedFileName, bytes: Vec<u8>) -> Result<(), UploadStoreError> {
        let name = name.as_str().to_owned();
        self.blocking(move |dir| write_new(dir, &name, &bytes)).await
    }

    async fn remove(&self, name: &UploadedFileName) -> Result<(), UploadStoreError> {
        let name = name.as_str().to_owned();
        self.blocking(move |dir| remove_if_present(dir, &name)).await
    }
}
