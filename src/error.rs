use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access '{}': No such file or directory", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot open directory '{}': Permission denied", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("cannot open directory '{}': Not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write error: {0}")]
    Write(#[source] io::Error),
}

impl Error {
    /// Classifies an I/O failure that happened while reading `path`.
    pub fn from_read(path: &Path, source: io::Error) -> Error {
        let path = path.to_path_buf();

        if source.raw_os_error() == Some(libc::ENOTDIR) {
            return Error::NotADirectory { path };
        }

        match source.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            _ => Error::Read { path, source },
        }
    }
}
