use {
    std::{io, path::PathBuf},
    thiserror::Error,
};

/// Everything that can abort a compress or decompress call.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller-supplied source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named file could not be opened, created, read or written.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The archive is truncated, malformed, or disagrees with its own sizes.
    #[error("malformed archive: {0}")]
    Format(String),

    /// An internal invariant was broken while encoding.
    #[error("encoding invariant violated: {0}")]
    Encoding(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding(message.into())
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding(_))
    }

    /// Reading past the end of an archive means it was cut short,
    /// which is a property of the archive rather than of the stream.
    pub(crate) fn truncated(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Format(format!("archive ends inside the {}", what))
        } else {
            Error::Io(err)
        }
    }
}
